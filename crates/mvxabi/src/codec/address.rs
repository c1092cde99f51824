use crate::codec::{read_frame, sealed};
use crate::{Address, Error, Value};

const FRAME: usize = 32;

pub struct AddressCodec;

pub struct H256Codec;

/// Both 32-byte kinds share the same top-level rule: short is an underrun,
/// long is a length error.
fn top_level_frame(bytes: &[u8]) -> Result<&[u8], Error> {
    if bytes.len() < FRAME {
        return Err(Error::BufferUnderrun { expected: FRAME, available: bytes.len() });
    }
    if bytes.len() > FRAME {
        return Err(Error::InvalidLength { expected: FRAME, actual: bytes.len() });
    }
    Ok(bytes)
}

impl sealed::Codec for AddressCodec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let address = value.as_address()?;
        Ok(address.as_bytes().to_vec())
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let frame = read_frame(bytes, offset, FRAME)?;
        Ok((Value::Address(Address::from_slice(frame)?), offset + FRAME))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        let frame = top_level_frame(bytes)?;
        Ok(Value::Address(Address::from_slice(frame)?))
    }
}

impl sealed::Codec for H256Codec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let hash = value.as_h256()?;
        Ok(hash.to_vec())
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let frame = read_frame(bytes, offset, FRAME)?;
        let mut hash = [0u8; FRAME];
        hash.copy_from_slice(frame);
        Ok((Value::H256(hash), offset + FRAME))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        let frame = top_level_frame(bytes)?;
        let mut hash = [0u8; FRAME];
        hash.copy_from_slice(frame);
        Ok(Value::H256(hash))
    }
}
