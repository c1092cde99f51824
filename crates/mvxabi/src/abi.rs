use std::cell::RefCell;
use std::collections::HashMap;
use serde::Deserialize;
use crate::parser::CustomTypes;
use crate::types::{validate_sequence, EnumType, EnumVariant, FieldDefinition, StructType};
use crate::{Error, TypeDescriptor, TypeExpressionParser};

#[derive(Deserialize)]
struct AbiDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    constructor: Option<EndpointDocument>,
    #[serde(default)]
    endpoints: Vec<EndpointDocument>,
    #[serde(default)]
    events: Vec<EventDocument>,
    #[serde(default)]
    types: HashMap<String, TypeDeclaration>,
}

#[derive(Deserialize)]
struct EndpointDocument {
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<ParameterDocument>,
    #[serde(default)]
    outputs: Vec<ParameterDocument>,
}

#[derive(Deserialize)]
struct EventDocument {
    identifier: String,
    #[serde(default)]
    inputs: Vec<ParameterDocument>,
}

#[derive(Deserialize)]
struct ParameterDocument {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    indexed: bool,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TypeDeclaration {
    Struct {
        #[serde(default)]
        fields: Vec<ParameterDocument>,
    },
    Enum {
        #[serde(default)]
        variants: Vec<VariantDocument>,
    },
}

#[derive(Deserialize)]
struct VariantDocument {
    name: String,
    discriminant: u8,
    #[serde(default)]
    fields: Vec<ParameterDocument>,
}

/// A callable contract function as declared in the ABI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbiEndpoint {
    pub name: String,
    pub inputs: Vec<FieldDefinition>,
    pub outputs: Vec<FieldDefinition>,
}

/// An event schema: indexed inputs become topics, the others are packed
/// into one data struct named after the event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbiEvent {
    pub identifier: String,
    pub topics: Vec<FieldDefinition>,
    pub data: Option<TypeDescriptor>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbiRegistry {
    name: Option<String>,
    constructor: Option<AbiEndpoint>,
    endpoints: Vec<AbiEndpoint>,
    events: Vec<AbiEvent>,
    types: HashMap<String, TypeDescriptor>,
}

impl AbiRegistry {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let document: AbiDocument = serde_json::from_str(json)?;

        let resolver = TypeResolver::new(&document.types);
        let parser = TypeExpressionParser::with_custom_types(&resolver);

        let mut types = HashMap::with_capacity(document.types.len());
        for name in document.types.keys() {
            if let Some(ty) = resolver.lookup(name) {
                types.insert(name.clone(), ty?);
            }
        }

        let constructor = document.constructor
            .as_ref()
            .map(|constructor| endpoint(&parser, constructor))
            .transpose()?;
        let endpoints = document.endpoints.iter()
            .map(|document| endpoint(&parser, document))
            .collect::<Result<Vec<_>, Error>>()?;
        let events = document.events.iter()
            .map(|document| event(&parser, document))
            .collect::<Result<Vec<_>, Error>>()?;

        log::debug!(
            "loaded abi {} with {} endpoints, {} events and {} custom types",
            document.name.as_deref().unwrap_or("<unnamed>"),
            endpoints.len(),
            events.len(),
            types.len(),
        );

        Ok(Self {
            name: document.name,
            constructor,
            endpoints,
            events,
            types,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn constructor(&self) -> Option<&AbiEndpoint> {
        self.constructor.as_ref()
    }

    pub fn endpoints(&self) -> &[AbiEndpoint] {
        &self.endpoints
    }

    pub fn endpoint(&self, name: &str) -> Option<&AbiEndpoint> {
        self.endpoints.iter().find(|endpoint| endpoint.name == name)
    }

    pub fn events(&self) -> &[AbiEvent] {
        &self.events
    }

    pub fn event(&self, identifier: &str) -> Option<&AbiEvent> {
        self.events.iter().find(|event| event.identifier == identifier)
    }

    pub fn custom_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }
}

impl CustomTypes for AbiRegistry {
    fn lookup(&self, name: &str) -> Option<Result<TypeDescriptor, Error>> {
        self.types.lookup(name)
    }
}

fn parameters(parser: &TypeExpressionParser, documents: &[ParameterDocument]) -> Result<Vec<FieldDefinition>, Error> {
    documents.iter()
        .map(|document| Ok(FieldDefinition::new(&document.name, parser.parse(&document.ty)?)))
        .collect()
}

fn endpoint(parser: &TypeExpressionParser, document: &EndpointDocument) -> Result<AbiEndpoint, Error> {
    let inputs = parameters(parser, &document.inputs)?;
    validate_sequence(inputs.iter().map(|input| &input.ty))?;
    let outputs = parameters(parser, &document.outputs)?;
    validate_sequence(outputs.iter().map(|output| &output.ty))?;

    Ok(AbiEndpoint {
        name: document.name.clone(),
        inputs,
        outputs,
    })
}

fn event(parser: &TypeExpressionParser, document: &EventDocument) -> Result<AbiEvent, Error> {
    let mut topics = Vec::new();
    let mut fields = Vec::new();
    for input in document.inputs.iter() {
        let field = FieldDefinition::new(&input.name, parser.parse(&input.ty)?);
        if input.indexed {
            topics.push(field);
        } else {
            fields.push(field);
        }
    }

    let data = if fields.is_empty() {
        None
    } else {
        let data = TypeDescriptor::Struct(StructType::new(&document.identifier, fields));
        data.validate()?;
        Some(data)
    };

    Ok(AbiEvent {
        identifier: document.identifier.clone(),
        topics,
        data,
    })
}

/// Resolves declared types on demand so declarations may appear in any
/// order. A type that reaches itself again while being built is rejected.
struct TypeResolver<'d> {
    declarations: &'d HashMap<String, TypeDeclaration>,
    resolved: RefCell<HashMap<String, TypeDescriptor>>,
    pending: RefCell<Vec<String>>,
}

impl<'d> TypeResolver<'d> {
    fn new(declarations: &'d HashMap<String, TypeDeclaration>) -> Self {
        Self {
            declarations,
            resolved: RefCell::new(HashMap::new()),
            pending: RefCell::new(Vec::new()),
        }
    }

    fn resolve(&self, name: &str, declaration: &TypeDeclaration) -> Result<TypeDescriptor, Error> {
        if let Some(ty) = self.resolved.borrow().get(name) {
            return Ok(ty.clone());
        }
        if self.pending.borrow().iter().any(|pending| pending == name) {
            let chain = self.pending.borrow().join(" -> ");
            return Err(Error::InvalidSchema(format!("type {} is recursive: {} -> {}", name, chain, name)));
        }

        self.pending.borrow_mut().push(name.to_string());
        let result = self.build(name, declaration);
        self.pending.borrow_mut().pop();

        let ty = result?;
        log::trace!("resolved custom type {} as {:?}", name, ty);
        self.resolved.borrow_mut().insert(name.to_string(), ty.clone());
        Ok(ty)
    }

    fn build(&self, name: &str, declaration: &TypeDeclaration) -> Result<TypeDescriptor, Error> {
        let parser = TypeExpressionParser::with_custom_types(self);
        let ty = match declaration {
            TypeDeclaration::Struct { fields } => {
                TypeDescriptor::Struct(StructType::new(name, parameters(&parser, fields)?))
            }
            TypeDeclaration::Enum { variants } => {
                let variants = variants.iter()
                    .map(|variant| {
                        let fields = parameters(&parser, &variant.fields)?;
                        Ok(EnumVariant::new(&variant.name, variant.discriminant, fields))
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                TypeDescriptor::Enum(EnumType::new(name, variants))
            }
        };
        ty.validate()?;
        Ok(ty)
    }
}

impl CustomTypes for TypeResolver<'_> {
    fn lookup(&self, name: &str) -> Option<Result<TypeDescriptor, Error>> {
        let declaration = self.declarations.get(name)?;
        Some(self.resolve(name, declaration))
    }
}
