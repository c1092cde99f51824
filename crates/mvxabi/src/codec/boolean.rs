use crate::codec::{read_frame, sealed};
use crate::{Error, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BooleanCodec;

impl sealed::Codec for BooleanCodec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let boolean = value.as_boolean()?;
        Ok(vec![boolean as u8])
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let boolean = value.as_boolean()?;
        Ok(if boolean { vec![0x01] } else { Vec::new() })
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let frame = read_frame(bytes, offset, 1)?;
        let boolean = match frame[0] {
            0x00 => false,
            0x01 => true,
            byte => Err(Error::InvalidData(format!("unexpected boolean byte 0x{:02x}", byte)))?,
        };
        Ok((Value::Boolean(boolean), offset + 1))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        match bytes {
            [] | [0x00] => Ok(Value::Boolean(false)),
            [0x01] => Ok(Value::Boolean(true)),
            [byte] => Err(Error::InvalidData(format!("unexpected boolean byte 0x{:02x}", byte))),
            _ => Err(Error::InvalidLength { expected: 1, actual: bytes.len() }),
        }
    }
}
