use crate::codec::{decode_nested, decode_top_level, encode_nested, encode_top_level, read_frame, sealed};
use crate::{Error, TypeDescriptor, Value};

const MISSING: u8 = 0x00;
const PRESENT: u8 = 0x01;

/// Nested: a presence byte, then the inner value nested. Top-level: missing
/// is the empty buffer and a present value is the inner top-level encoding
/// with no presence byte.
pub struct OptionCodec<'t> {
    inner: &'t TypeDescriptor,
}

impl<'t> OptionCodec<'t> {
    pub fn new(inner: &'t TypeDescriptor) -> Self {
        Self { inner }
    }
}

impl sealed::Codec for OptionCodec<'_> {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        match value.as_option()? {
            None => Ok(vec![MISSING]),
            Some(value) => {
                let mut buff = vec![PRESENT];
                buff.extend(encode_nested(self.inner, value)?);
                Ok(buff)
            }
        }
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        match value.as_option()? {
            None => Ok(Vec::new()),
            Some(value) => encode_top_level(self.inner, value),
        }
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let frame = read_frame(bytes, offset, 1)?;
        match frame[0] {
            MISSING => Ok((Value::Option(None), offset + 1)),
            PRESENT => {
                let (value, offset) = decode_nested(self.inner, bytes, offset + 1)?;
                Ok((Value::Option(Some(Box::new(value))), offset))
            }
            byte => Err(Error::InvalidData(format!("unexpected option marker 0x{:02x}", byte))),
        }
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        if bytes.is_empty() {
            return Ok(Value::Option(None));
        }
        let value = decode_top_level(self.inner, bytes)?;
        Ok(Value::Option(Some(Box::new(value))))
    }
}
