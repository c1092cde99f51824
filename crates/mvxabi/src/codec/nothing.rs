use crate::codec::sealed;
use crate::{Error, Value};

pub struct NothingCodec;

impl sealed::Codec for NothingCodec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        value.as_unit()?;
        Ok(Vec::new())
    }

    fn decode_nested(&self, _bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        Ok((Value::Unit, offset))
    }
}
