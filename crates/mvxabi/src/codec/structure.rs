use crate::codec::{decode_nested, encode_nested, sealed};
use crate::types::StructType;
use crate::{Error, Field, Value};

/// Fields are always nested-encoded, in declared order, in both modes.
pub struct StructCodec<'t> {
    ty: &'t StructType,
}

impl<'t> StructCodec<'t> {
    pub fn new(ty: &'t StructType) -> Self {
        Self { ty }
    }
}

impl sealed::Codec for StructCodec<'_> {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let fields = value.as_struct()?;
        if fields.len() != self.ty.fields.len() {
            return Err(Error::Arity { expected: self.ty.fields.len(), actual: fields.len() });
        }

        let mut buff = Vec::new();
        for (definition, field) in self.ty.fields.iter().zip(fields) {
            if definition.name != field.name {
                return Err(Error::InvalidData(format!(
                    "struct {} expects field `{}`, found `{}`",
                    self.ty.name, definition.name, field.name,
                )));
            }
            buff.extend(encode_nested(&definition.ty, &field.value)?);
        }
        Ok(buff)
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let mut offset = offset;
        let mut fields = Vec::with_capacity(self.ty.fields.len());
        for definition in self.ty.fields.iter() {
            let (value, next) = decode_nested(&definition.ty, bytes, offset)?;
            fields.push(Field::new(&definition.name, value));
            offset = next;
        }
        Ok((Value::Struct(fields), offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use crate::codec::sealed::Codec;
    use crate::types::FieldDefinition;
    use crate::TypeDescriptor;

    fn token_payment() -> StructType {
        StructType::new("EsdtTokenPayment", vec![
            FieldDefinition::new("token_identifier", TypeDescriptor::TokenIdentifier),
            FieldDefinition::new("token_nonce", TypeDescriptor::UnsignedInt(64)),
            FieldDefinition::new("amount", TypeDescriptor::BigUnsignedInt),
        ])
    }

    fn payment_value() -> Value {
        Value::Struct(vec![
            Field::new("token_identifier", Value::TokenIdentifier("MEX-455c57".to_string())),
            Field::new("token_nonce", Value::UInt(5_u8.into())),
            Field::new("amount", Value::UInt(BigUint::from(1_000_000_u32))),
        ])
    }

    const PAYMENT: &str = concat!(
        "0000000a", "4d45582d343535633537",
        "0000000000000005",
        "00000003", "0f4240",
    );

    #[test]
    fn test_struct_encoder() {
        let ty = token_payment();
        let codec = StructCodec::new(&ty);
        let bytes = hex::decode(PAYMENT).unwrap();

        assert_eq!(codec.encode_nested(&payment_value()), Ok(bytes.clone()));
        assert_eq!(codec.encode_top_level(&payment_value()), Ok(bytes));
    }

    #[test]
    fn test_struct_decoder() {
        let ty = token_payment();
        let codec = StructCodec::new(&ty);
        let bytes = hex::decode(PAYMENT).unwrap();

        assert_eq!(codec.decode_nested(&bytes, 0), Ok((payment_value(), bytes.len())));
        assert_eq!(codec.decode_top_level(&bytes), Ok(payment_value()));
    }

    #[test]
    fn test_struct_decoder_fails_atomically() {
        let ty = token_payment();
        let codec = StructCodec::new(&ty);
        let bytes = hex::decode(PAYMENT).unwrap();

        assert_eq!(
            codec.decode_nested(&bytes[..bytes.len() - 1], 0),
            Err(Error::BufferUnderrun { expected: 3, available: 2 }),
        );
    }

    #[test]
    fn test_struct_field_mismatch() {
        let ty = token_payment();
        let codec = StructCodec::new(&ty);

        let missing = Value::Struct(vec![
            Field::new("token_identifier", Value::TokenIdentifier("MEX-455c57".to_string())),
        ]);
        assert_eq!(codec.encode_nested(&missing), Err(Error::Arity { expected: 3, actual: 1 }));

        let renamed = Value::Struct(vec![
            Field::new("token", Value::TokenIdentifier("MEX-455c57".to_string())),
            Field::new("token_nonce", Value::UInt(5_u8.into())),
            Field::new("amount", Value::UInt(1_u8.into())),
        ]);
        assert!(matches!(codec.encode_nested(&renamed), Err(Error::InvalidData(_))));
    }
}
