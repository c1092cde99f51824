use num_bigint::{BigInt, BigUint};
use crate::codec::encode_nested;
use crate::types::{EnumType, StructType};
use crate::{Address, CodeMetadata, EnumValue, Error, Field, TypeDescriptor, Value};

/// A value paired with the type that gives its bytes meaning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedValue {
    ty: TypeDescriptor,
    value: Value,
}

impl TypedValue {
    /// Pairs `value` with `ty`, failing if the value does not fit the type.
    pub fn new(ty: TypeDescriptor, value: Value) -> Result<Self, Error> {
        ty.validate()?;
        encode_nested(&ty, &value)?;
        Ok(Self { ty, value })
    }

    pub(crate) fn from_parts(ty: TypeDescriptor, value: Value) -> Self {
        Self { ty, value }
    }

    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (TypeDescriptor, Value) {
        (self.ty, self.value)
    }

    pub fn boolean(value: bool) -> Self {
        Self::from_parts(TypeDescriptor::Boolean, Value::Boolean(value))
    }

    pub fn u8(value: u8) -> Self {
        Self::from_parts(TypeDescriptor::UnsignedInt(8), Value::UInt(value.into()))
    }

    pub fn u16(value: u16) -> Self {
        Self::from_parts(TypeDescriptor::UnsignedInt(16), Value::UInt(value.into()))
    }

    pub fn u32(value: u32) -> Self {
        Self::from_parts(TypeDescriptor::UnsignedInt(32), Value::UInt(value.into()))
    }

    pub fn u64(value: u64) -> Self {
        Self::from_parts(TypeDescriptor::UnsignedInt(64), Value::UInt(value.into()))
    }

    pub fn i8(value: i8) -> Self {
        Self::from_parts(TypeDescriptor::SignedInt(8), Value::Int(value.into()))
    }

    pub fn i16(value: i16) -> Self {
        Self::from_parts(TypeDescriptor::SignedInt(16), Value::Int(value.into()))
    }

    pub fn i32(value: i32) -> Self {
        Self::from_parts(TypeDescriptor::SignedInt(32), Value::Int(value.into()))
    }

    pub fn i64(value: i64) -> Self {
        Self::from_parts(TypeDescriptor::SignedInt(64), Value::Int(value.into()))
    }

    pub fn big_uint(value: impl Into<BigUint>) -> Self {
        Self::from_parts(TypeDescriptor::BigUnsignedInt, Value::UInt(value.into()))
    }

    pub fn big_int(value: impl Into<BigInt>) -> Self {
        Self::from_parts(TypeDescriptor::BigSignedInt, Value::Int(value.into()))
    }

    pub fn address(value: Address) -> Self {
        Self::from_parts(TypeDescriptor::Address, Value::Address(value))
    }

    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::from_parts(TypeDescriptor::ByteSequence, Value::Bytes(value.into()))
    }

    pub fn string(value: &str) -> Self {
        Self::from_parts(TypeDescriptor::Utf8String, Value::String(value.to_string()))
    }

    pub fn h256(value: [u8; 32]) -> Self {
        Self::from_parts(TypeDescriptor::Hash256, Value::H256(value))
    }

    pub fn token_identifier(value: &str) -> Self {
        Self::from_parts(TypeDescriptor::TokenIdentifier, Value::TokenIdentifier(value.to_string()))
    }

    pub fn code_metadata(value: CodeMetadata) -> Self {
        Self::from_parts(TypeDescriptor::CodeMetadata, Value::CodeMetadata(value))
    }

    pub fn unit() -> Self {
        Self::from_parts(TypeDescriptor::Unit, Value::Unit)
    }

    pub fn some(inner: TypedValue) -> Self {
        let (ty, value) = inner.into_parts();
        Self::from_parts(TypeDescriptor::option(ty), Value::Option(Some(Box::new(value))))
    }

    pub fn none(inner: TypeDescriptor) -> Self {
        Self::from_parts(TypeDescriptor::option(inner), Value::Option(None))
    }

    pub fn tuple(items: Vec<TypedValue>) -> Self {
        let (types, values) = items.into_iter().map(TypedValue::into_parts).unzip();
        Self::from_parts(TypeDescriptor::Tuple(types), Value::Tuple(values))
    }

    pub fn multi(items: Vec<TypedValue>) -> Self {
        let (types, values) = items.into_iter().map(TypedValue::into_parts).unzip();
        Self::from_parts(TypeDescriptor::MultiValue(types), Value::Multi(values))
    }

    /// Homogeneous list of `element` values.
    pub fn list(element: TypeDescriptor, items: Vec<TypedValue>) -> Result<Self, Error> {
        let values = Self::homogeneous(&element, items)?;
        Self::new(TypeDescriptor::list(element), Value::List(values))
    }

    pub fn array(element: TypeDescriptor, items: Vec<TypedValue>) -> Result<Self, Error> {
        let size = items.len();
        let values = Self::homogeneous(&element, items)?;
        Self::new(TypeDescriptor::fixed_array(element, size), Value::Array(values))
    }

    pub fn variadic(element: TypeDescriptor, items: Vec<TypedValue>) -> Result<Self, Error> {
        let values = Self::homogeneous(&element, items)?;
        Self::new(TypeDescriptor::variadic(element), Value::Variadic(values))
    }

    /// Trailing argument that is either present or left out.
    pub fn optional(inner: TypeDescriptor, value: Option<TypedValue>) -> Result<Self, Error> {
        let value = match value {
            None => None,
            Some(value) => Some(Box::new(Self::homogeneous(&inner, vec![value])?.remove(0))),
        };
        Self::new(TypeDescriptor::optional(inner), Value::Option(value))
    }

    pub fn structure(ty: StructType, fields: Vec<Field>) -> Result<Self, Error> {
        Self::new(TypeDescriptor::Struct(ty), Value::Struct(fields))
    }

    /// Builds the variant of `ty` called `variant`.
    pub fn enumeration(ty: EnumType, variant: &str, fields: Vec<Field>) -> Result<Self, Error> {
        let discriminant = ty.variants.iter()
            .find(|candidate| candidate.name == variant)
            .map(|candidate| candidate.discriminant)
            .ok_or_else(|| Error::InvalidData(format!("enum {} has no variant {}", ty.name, variant)))?;
        Self::new(TypeDescriptor::Enum(ty), Value::Enum(EnumValue::new(variant, discriminant, fields)))
    }

    fn homogeneous(element: &TypeDescriptor, items: Vec<TypedValue>) -> Result<Vec<Value>, Error> {
        items.into_iter()
            .enumerate()
            .map(|(position, item)| {
                if !element.is_assignable_from(item.ty()) {
                    return Err(Error::TypeMismatch {
                        expected: element.to_string(),
                        actual: item.ty().to_string(),
                        position: Some(position),
                    });
                }
                Ok(item.value)
            })
            .collect()
    }
}
