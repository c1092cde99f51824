use base64::{Engine, engine::general_purpose::STANDARD};
use mvxabi::types::validate_sequence;
use mvxabi::{AbiEndpoint, AbiRegistry, FieldDefinition, TypeDescriptor, TypeExpressionParser, TypedValue};
use crate::mvx::{ArgSerializer, CallData};
use crate::Error;

/// One declared input or output of an endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterDefinition {
    pub name: String,
    pub description: String,
    pub ty: TypeDescriptor,
}

impl ParameterDefinition {
    pub fn new(name: &str, ty: TypeDescriptor) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            ty,
        }
    }

    /// Builds a parameter from a type expression such as `List<u16>`.
    pub fn parse(name: &str, expression: &str) -> Result<Self, Error> {
        let ty = TypeExpressionParser::new().parse(expression)?;
        Ok(Self::new(name, ty))
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

impl From<&FieldDefinition> for ParameterDefinition {
    fn from(field: &FieldDefinition) -> Self {
        Self::new(&field.name, field.ty.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointDefinition {
    pub name: String,
    inputs: Vec<ParameterDefinition>,
    outputs: Vec<ParameterDefinition>,
}

impl EndpointDefinition {
    pub fn new(name: &str, inputs: Vec<ParameterDefinition>, outputs: Vec<ParameterDefinition>) -> Result<Self, Error> {
        validate_sequence(inputs.iter().map(|input| &input.ty))?;
        validate_sequence(outputs.iter().map(|output| &output.ty))?;

        Ok(Self {
            name: name.to_string(),
            inputs,
            outputs,
        })
    }

    pub fn from_abi(endpoint: &AbiEndpoint) -> Result<Self, Error> {
        Self::new(
            &endpoint.name,
            endpoint.inputs.iter().map(ParameterDefinition::from).collect(),
            endpoint.outputs.iter().map(ParameterDefinition::from).collect(),
        )
    }

    /// Looks an endpoint up by name in a loaded ABI.
    pub fn from_registry(registry: &AbiRegistry, name: &str) -> Result<Self, Error> {
        let endpoint = registry.endpoint(name).ok_or_else(|| Error::UnknownEndpoint(name.to_string()))?;
        Self::from_abi(endpoint)
    }

    pub fn inputs(&self) -> &[ParameterDefinition] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[ParameterDefinition] {
        &self.outputs
    }

    /// Counts arguments first, then checks each one against its slot.
    pub fn check_arguments(&self, args: &[TypedValue]) -> Result<(), Error> {
        if args.len() != self.inputs.len() {
            return Err(Error::ArgumentCount { expected: self.inputs.len(), actual: args.len() });
        }

        for (position, (input, arg)) in self.inputs.iter().zip(args).enumerate() {
            if !input.ty.is_assignable_from(arg.ty()) {
                return Err(mvxabi::Error::TypeMismatch {
                    expected: input.ty.to_string(),
                    actual: arg.ty().to_string(),
                    position: Some(position),
                }.into());
            }
        }
        Ok(())
    }

    pub fn to_call_data(&self, args: &[TypedValue]) -> Result<CallData, Error> {
        self.check_arguments(args)?;
        let arguments = ArgSerializer::new().values_to_buffers(args)?;
        Ok(CallData::new(&self.name, arguments))
    }

    /// `name@hex@hex...`, ready to be put in a transaction's data field.
    pub fn encode_call(&self, args: &[TypedValue]) -> Result<String, Error> {
        Ok(self.to_call_data(args)?.to_string())
    }

    pub fn decode_output(&self, buffers: &[Vec<u8>]) -> Result<Vec<TypedValue>, Error> {
        ArgSerializer::new().buffers_to_values(buffers, &self.outputs)
    }

    /// Decodes query return data as delivered by the gateway, one base64
    /// string per returned token.
    pub fn decode_output_base64(&self, data: &[&str]) -> Result<Vec<TypedValue>, Error> {
        let buffers = data.iter()
            .map(|encoded| STANDARD.decode(encoded))
            .collect::<Result<Vec<_>, _>>()?;
        self.decode_output(&buffers)
    }
}
