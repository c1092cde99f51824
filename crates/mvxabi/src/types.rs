use std::fmt;
use crate::Error;

/// Describes one ABI type. Descriptors are immutable once built and can be
/// shared freely between encode/decode calls.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Boolean,
    /// Fixed-width two's-complement integer of the given bit size.
    SignedInt(usize),
    /// Fixed-width unsigned integer of the given bit size.
    UnsignedInt(usize),
    BigSignedInt,
    BigUnsignedInt,
    Address,
    ByteSequence,
    Utf8String,
    Hash256,
    TokenIdentifier,
    CodeMetadata,
    Unit,
    Struct(StructType),
    Enum(EnumType),
    List(Box<TypeDescriptor>),
    FixedArray(Box<TypeDescriptor>, usize),
    Tuple(Vec<TypeDescriptor>),
    Option(Box<TypeDescriptor>),
    /// One logical argument spread over several consecutive wire values.
    MultiValue(Vec<TypeDescriptor>),
    /// Zero or more repetitions. Only legal as the last argument.
    Variadic(Box<TypeDescriptor>),
    /// Zero or one trailing occurrence. Only legal as the last argument.
    Optional(Box<TypeDescriptor>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl FieldDefinition {
    pub fn new(name: &str, ty: TypeDescriptor) -> Self {
        Self { name: name.to_string(), ty }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructType {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl StructType {
    pub fn new(name: &str, fields: Vec<FieldDefinition>) -> Self {
        Self { name: name.to_string(), fields }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumVariant {
    pub name: String,
    pub discriminant: u8,
    pub fields: Vec<FieldDefinition>,
}

impl EnumVariant {
    pub fn new(name: &str, discriminant: u8, fields: Vec<FieldDefinition>) -> Self {
        Self { name: name.to_string(), discriminant, fields }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumType {
    pub name: String,
    pub variants: Vec<EnumVariant>,
}

impl EnumType {
    pub fn new(name: &str, variants: Vec<EnumVariant>) -> Self {
        Self { name: name.to_string(), variants }
    }

    pub fn variant(&self, discriminant: u8) -> Option<&EnumVariant> {
        self.variants.iter().find(|variant| variant.discriminant == discriminant)
    }
}

/// Payload-free tag of a [`TypeDescriptor`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Boolean,
    SignedInt,
    UnsignedInt,
    BigSignedInt,
    BigUnsignedInt,
    Address,
    ByteSequence,
    Utf8String,
    Hash256,
    TokenIdentifier,
    CodeMetadata,
    Unit,
    Struct,
    Enum,
    List,
    FixedArray,
    Tuple,
    Option,
    MultiValue,
    Variadic,
    Optional,
}

/// `(expected, actual)` pairs where a slot of the expected kind accepts a
/// value of the actual kind, on top of exact matches.
const WIDENINGS: &[(TypeKind, TypeKind)] = &[
    (TypeKind::BigUnsignedInt, TypeKind::UnsignedInt),
    (TypeKind::BigSignedInt, TypeKind::SignedInt),
];

impl TypeDescriptor {
    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(element))
    }

    pub fn fixed_array(element: TypeDescriptor, length: usize) -> Self {
        TypeDescriptor::FixedArray(Box::new(element), length)
    }

    pub fn option(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Option(Box::new(inner))
    }

    pub fn variadic(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Variadic(Box::new(inner))
    }

    pub fn optional(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Optional(Box::new(inner))
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDescriptor::Boolean => TypeKind::Boolean,
            TypeDescriptor::SignedInt(_) => TypeKind::SignedInt,
            TypeDescriptor::UnsignedInt(_) => TypeKind::UnsignedInt,
            TypeDescriptor::BigSignedInt => TypeKind::BigSignedInt,
            TypeDescriptor::BigUnsignedInt => TypeKind::BigUnsignedInt,
            TypeDescriptor::Address => TypeKind::Address,
            TypeDescriptor::ByteSequence => TypeKind::ByteSequence,
            TypeDescriptor::Utf8String => TypeKind::Utf8String,
            TypeDescriptor::Hash256 => TypeKind::Hash256,
            TypeDescriptor::TokenIdentifier => TypeKind::TokenIdentifier,
            TypeDescriptor::CodeMetadata => TypeKind::CodeMetadata,
            TypeDescriptor::Unit => TypeKind::Unit,
            TypeDescriptor::Struct(_) => TypeKind::Struct,
            TypeDescriptor::Enum(_) => TypeKind::Enum,
            TypeDescriptor::List(_) => TypeKind::List,
            TypeDescriptor::FixedArray(_, _) => TypeKind::FixedArray,
            TypeDescriptor::Tuple(_) => TypeKind::Tuple,
            TypeDescriptor::Option(_) => TypeKind::Option,
            TypeDescriptor::MultiValue(_) => TypeKind::MultiValue,
            TypeDescriptor::Variadic(_) => TypeKind::Variadic,
            TypeDescriptor::Optional(_) => TypeKind::Optional,
        }
    }

    /// Byte length of the nested encoding when it does not depend on the value.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            TypeDescriptor::Boolean => Some(1),
            TypeDescriptor::SignedInt(size) | TypeDescriptor::UnsignedInt(size) => Some(size / 8),
            TypeDescriptor::Address | TypeDescriptor::Hash256 => Some(32),
            TypeDescriptor::Unit => Some(0),
            TypeDescriptor::BigSignedInt
            | TypeDescriptor::BigUnsignedInt
            | TypeDescriptor::ByteSequence
            | TypeDescriptor::Utf8String
            | TypeDescriptor::TokenIdentifier
            | TypeDescriptor::CodeMetadata => None,
            TypeDescriptor::Struct(struct_type) => fields_width(&struct_type.fields),
            TypeDescriptor::Enum(enum_type) => {
                let mut widths = enum_type.variants.iter().map(|variant| fields_width(&variant.fields));
                match widths.next() {
                    None => Some(1),
                    Some(first) => {
                        let first = first?;
                        if widths.all(|width| width == Some(first)) {
                            first.checked_add(1)
                        } else {
                            None
                        }
                    }
                }
            }
            TypeDescriptor::List(_)
            | TypeDescriptor::Option(_)
            | TypeDescriptor::Variadic(_)
            | TypeDescriptor::Optional(_) => None,
            // A width that does not fit in usize is treated as open-ended.
            TypeDescriptor::FixedArray(element, length) => {
                element.fixed_width().and_then(|width| width.checked_mul(*length))
            }
            TypeDescriptor::Tuple(items) | TypeDescriptor::MultiValue(items) => {
                total_width(items.iter().map(|item| item.fixed_width()))
            }
        }
    }

    pub fn is_open_ended(&self) -> bool {
        self.fixed_width().is_none()
    }

    /// Whether this type may absorb a variable number of argument tokens.
    pub fn is_variadic_capable(&self) -> bool {
        match self {
            TypeDescriptor::Variadic(_) | TypeDescriptor::Optional(_) => true,
            TypeDescriptor::MultiValue(items) => items.last().map_or(false, |item| item.is_variadic_capable()),
            _ => false,
        }
    }

    /// Number of argument tokens this type occupies, not counting what a
    /// trailing variadic component may absorb.
    pub fn token_count(&self) -> usize {
        match self {
            TypeDescriptor::Variadic(_) | TypeDescriptor::Optional(_) => 0,
            TypeDescriptor::MultiValue(items) => items.iter().map(|item| item.token_count()).sum(),
            _ => 1,
        }
    }

    pub fn is_assignable_from(&self, actual: &TypeDescriptor) -> bool {
        if self == actual {
            return true;
        }

        match (self, actual) {
            (TypeDescriptor::List(expected), TypeDescriptor::List(actual))
            | (TypeDescriptor::Option(expected), TypeDescriptor::Option(actual))
            | (TypeDescriptor::Variadic(expected), TypeDescriptor::Variadic(actual))
            | (TypeDescriptor::Optional(expected), TypeDescriptor::Optional(actual)) => {
                expected.is_assignable_from(actual)
            }
            (TypeDescriptor::FixedArray(expected, n), TypeDescriptor::FixedArray(actual, m)) => {
                n == m && expected.is_assignable_from(actual)
            }
            (TypeDescriptor::Tuple(expected), TypeDescriptor::Tuple(actual))
            | (TypeDescriptor::MultiValue(expected), TypeDescriptor::MultiValue(actual)) => {
                expected.len() == actual.len()
                    && expected.iter().zip(actual).all(|(expected, actual)| expected.is_assignable_from(actual))
            }
            _ => WIDENINGS.contains(&(self.kind(), actual.kind())),
        }
    }

    /// Checks integer widths and the placement of variadic-capable components.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            TypeDescriptor::SignedInt(size) | TypeDescriptor::UnsignedInt(size) => match size {
                8 | 16 | 32 | 64 => Ok(()),
                _ => Err(Error::InvalidSchema(format!("unsupported integer size {}", size))),
            },
            TypeDescriptor::Struct(struct_type) => validate_fields(&struct_type.name, &struct_type.fields),
            TypeDescriptor::Enum(enum_type) => {
                for (index, variant) in enum_type.variants.iter().enumerate() {
                    let duplicate = enum_type.variants[..index]
                        .iter()
                        .any(|other| other.discriminant == variant.discriminant);
                    if duplicate {
                        return Err(Error::InvalidSchema(format!(
                            "enum {} declares discriminant {} twice",
                            enum_type.name, variant.discriminant,
                        )));
                    }
                    validate_fields(&enum_type.name, &variant.fields)?;
                }
                Ok(())
            }
            TypeDescriptor::List(inner)
            | TypeDescriptor::FixedArray(inner, _)
            | TypeDescriptor::Option(inner)
            | TypeDescriptor::Variadic(inner)
            | TypeDescriptor::Optional(inner) => {
                if inner.is_variadic_capable() {
                    return Err(Error::InvalidSchema(format!("{} can not be nested in {}", inner, self)));
                }
                inner.validate()
            }
            TypeDescriptor::Tuple(items) | TypeDescriptor::MultiValue(items) => validate_sequence(items),
            _ => Ok(()),
        }
    }
}

/// Validates an ordered list of argument types: at most one variadic-capable
/// item, and only in last position.
pub fn validate_sequence<'t, I>(items: I) -> Result<(), Error>
where
    I: IntoIterator<Item = &'t TypeDescriptor>,
    I::IntoIter: ExactSizeIterator,
{
    let items = items.into_iter();
    let last = items.len().saturating_sub(1);
    for (position, item) in items.enumerate() {
        item.validate()?;
        if item.is_variadic_capable() && position != last {
            return Err(Error::InvalidSchema(format!(
                "{} must be the last item, found at position {}",
                item, position,
            )));
        }
    }
    Ok(())
}

pub fn is_open_ended(ty: &TypeDescriptor) -> bool {
    ty.is_open_ended()
}

pub fn is_assignable_from(expected: &TypeDescriptor, actual: &TypeDescriptor) -> bool {
    expected.is_assignable_from(actual)
}

fn fields_width(fields: &[FieldDefinition]) -> Option<usize> {
    total_width(fields.iter().map(|field| field.ty.fixed_width()))
}

fn total_width<I: Iterator<Item = Option<usize>>>(mut widths: I) -> Option<usize> {
    widths.try_fold(0usize, |total, width| total.checked_add(width?))
}

fn validate_fields(owner: &str, fields: &[FieldDefinition]) -> Result<(), Error> {
    for field in fields {
        if field.ty.is_variadic_capable() {
            return Err(Error::InvalidSchema(format!(
                "field {}.{} can not be {}",
                owner, field.name, field.ty,
            )));
        }
        field.ty.validate()?;
    }
    Ok(())
}

fn join(items: &[TypeDescriptor]) -> String {
    items.iter().map(|item| item.to_string()).collect::<Vec<_>>().join(",")
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Boolean => write!(f, "bool"),
            TypeDescriptor::SignedInt(size) => write!(f, "i{}", size),
            TypeDescriptor::UnsignedInt(size) => write!(f, "u{}", size),
            TypeDescriptor::BigSignedInt => write!(f, "BigInt"),
            TypeDescriptor::BigUnsignedInt => write!(f, "BigUint"),
            TypeDescriptor::Address => write!(f, "Address"),
            TypeDescriptor::ByteSequence => write!(f, "bytes"),
            TypeDescriptor::Utf8String => write!(f, "utf-8 string"),
            TypeDescriptor::Hash256 => write!(f, "H256"),
            TypeDescriptor::TokenIdentifier => write!(f, "TokenIdentifier"),
            TypeDescriptor::CodeMetadata => write!(f, "CodeMetadata"),
            TypeDescriptor::Unit => write!(f, "Nothing"),
            TypeDescriptor::Struct(struct_type) => write!(f, "{}", struct_type.name),
            TypeDescriptor::Enum(enum_type) => write!(f, "{}", enum_type.name),
            TypeDescriptor::List(element) => write!(f, "List<{}>", element),
            TypeDescriptor::FixedArray(element, length) => write!(f, "array{}<{}>", length, element),
            TypeDescriptor::Tuple(items) => write!(f, "tuple<{}>", join(items)),
            TypeDescriptor::Option(inner) => write!(f, "Option<{}>", inner),
            TypeDescriptor::MultiValue(items) => write!(f, "multi<{}>", join(items)),
            TypeDescriptor::Variadic(inner) => write!(f, "variadic<{}>", inner),
            TypeDescriptor::Optional(inner) => write!(f, "optional<{}>", inner),
        }
    }
}
