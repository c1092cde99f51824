use crate::codec::{decode_nested, encode_nested, sealed, Sequence};
use crate::{Error, TypeDescriptor, Value};

/// Heterogeneous fixed-arity sequence. Items are nested-encoded regardless
/// of the outer mode.
pub struct TupleCodec<'t> {
    items: &'t [TypeDescriptor],
    sequence: Sequence,
}

impl<'t> TupleCodec<'t> {
    pub fn new(items: &'t [TypeDescriptor], sequence: Sequence) -> Self {
        Self { items, sequence }
    }
}

impl sealed::Codec for TupleCodec<'_> {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let values = self.sequence.items(value)?;
        if values.len() != self.items.len() {
            return Err(Error::Arity { expected: self.items.len(), actual: values.len() });
        }

        let mut buff = Vec::new();
        for (ty, value) in self.items.iter().zip(values) {
            buff.extend(encode_nested(ty, value)?);
        }
        Ok(buff)
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let mut offset = offset;
        let mut values = Vec::with_capacity(self.items.len());
        for ty in self.items.iter() {
            let (value, next) = decode_nested(ty, bytes, offset)?;
            values.push(value);
            offset = next;
        }
        Ok((self.sequence.wrap(values), offset))
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use super::*;
    use crate::codec::sealed::Codec;

    fn int(value: i64) -> Value {
        Value::Int(BigInt::from(value))
    }

    #[test]
    fn test_simple_tuple_encoder() {
        let items = vec![TypeDescriptor::SignedInt(32), TypeDescriptor::SignedInt(16)];
        let codec = TupleCodec::new(&items, Sequence::Tuple);
        let value = Value::Tuple(vec![int(100), int(10)]);

        assert_eq!(codec.encode_nested(&value), Ok(hex::decode("00000064000a").unwrap()));
        assert_eq!(codec.encode_top_level(&value), Ok(hex::decode("00000064000a").unwrap()));
    }

    #[test]
    fn test_simple_tuple_decoder() {
        let items = vec![TypeDescriptor::SignedInt(32), TypeDescriptor::SignedInt(16)];
        let codec = TupleCodec::new(&items, Sequence::Tuple);
        let bytes = hex::decode("00000064000a").unwrap();

        assert_eq!(codec.decode_nested(&bytes, 0), Ok((Value::Tuple(vec![int(100), int(10)]), 6)));
        for length in 0..bytes.len() {
            assert!(matches!(
                codec.decode_top_level(&bytes[..length]),
                Err(Error::BufferUnderrun { .. }),
            ));
        }
    }

    #[test]
    fn test_mixed_tuple() {
        let items = vec![
            TypeDescriptor::option(TypeDescriptor::UnsignedInt(8)),
            TypeDescriptor::list(TypeDescriptor::UnsignedInt(16)),
        ];
        let codec = TupleCodec::new(&items, Sequence::Multi);
        let value = Value::Multi(vec![
            Value::Option(Some(Box::new(Value::UInt(7_u8.into())))),
            Value::List(vec![Value::UInt(8_u8.into()), Value::UInt(9_u8.into())]),
        ]);
        let bytes = hex::decode("01070000000200080009").unwrap();

        assert_eq!(codec.encode_nested(&value), Ok(bytes.clone()));
        assert_eq!(codec.decode_nested(&bytes, 0), Ok((value, 10)));
    }

    #[test]
    fn test_tuple_arity() {
        let items = vec![TypeDescriptor::Boolean, TypeDescriptor::Boolean];
        let codec = TupleCodec::new(&items, Sequence::Tuple);

        assert_eq!(
            codec.encode_nested(&Value::Tuple(vec![Value::Boolean(true)])),
            Err(Error::Arity { expected: 2, actual: 1 }),
        );
    }
}
