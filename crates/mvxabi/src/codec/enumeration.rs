use crate::codec::{decode_nested, encode_nested, read_frame, sealed};
use crate::types::{EnumType, EnumVariant};
use crate::{EnumValue, Error, Field, Value};

/// One discriminant byte followed by the variant's fields, nested. At top
/// level a field-less variant encodes its discriminant as a top-level `u8`,
/// so discriminant zero becomes the empty buffer.
pub struct EnumCodec<'t> {
    ty: &'t EnumType,
}

impl<'t> EnumCodec<'t> {
    pub fn new(ty: &'t EnumType) -> Self {
        Self { ty }
    }

    fn variant(&self, discriminant: u8) -> Result<&'t EnumVariant, Error> {
        self.ty.variant(discriminant).ok_or_else(|| {
            Error::InvalidData(format!("enum {} has no variant with discriminant {}", self.ty.name, discriminant))
        })
    }

    fn encode_fields(&self, variant: &EnumVariant, value: &EnumValue) -> Result<Vec<u8>, Error> {
        if value.fields.len() != variant.fields.len() {
            return Err(Error::Arity { expected: variant.fields.len(), actual: value.fields.len() });
        }

        let mut buff = Vec::new();
        for (definition, field) in variant.fields.iter().zip(&value.fields) {
            buff.extend(encode_nested(&definition.ty, &field.value)?);
        }
        Ok(buff)
    }

    fn decode_fields(&self, variant: &EnumVariant, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let mut offset = offset;
        let mut fields = Vec::with_capacity(variant.fields.len());
        for definition in variant.fields.iter() {
            let (value, next) = decode_nested(&definition.ty, bytes, offset)?;
            fields.push(Field::new(&definition.name, value));
            offset = next;
        }
        Ok((Value::Enum(EnumValue::new(&variant.name, variant.discriminant, fields)), offset))
    }
}

impl sealed::Codec for EnumCodec<'_> {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let value = value.as_enum()?;
        let variant = self.variant(value.discriminant)?;
        let mut buff = vec![variant.discriminant];
        buff.extend(self.encode_fields(variant, value)?);
        Ok(buff)
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let enum_value = value.as_enum()?;
        let variant = self.variant(enum_value.discriminant)?;
        if variant.fields.is_empty() && variant.discriminant == 0 {
            return Ok(Vec::new());
        }
        self.encode_nested(value)
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let frame = read_frame(bytes, offset, 1)?;
        let variant = self.variant(frame[0])?;
        self.decode_fields(variant, bytes, offset + 1)
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        if bytes.is_empty() {
            let variant = self.variant(0)?;
            return self.decode_fields(variant, bytes, 0).map(|(value, _)| value);
        }
        self.decode_nested(bytes, 0).map(|(value, _)| value)
    }
}
