use crate::codec::{length_prefixed, read_length_prefixed, sealed};
use crate::{CodeMetadata, Error, Value};

/// Variable-length payloads: nested frames carry a 4-byte big-endian length
/// prefix, top-level frames take the whole buffer.
pub struct BytesCodec;

pub struct StringCodec;

pub struct TokenIdentifierCodec;

pub struct CodeMetadataCodec;

impl sealed::Codec for BytesCodec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        length_prefixed(value.as_bytes()?)
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        Ok(value.as_bytes()?.to_vec())
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let (frame, offset) = read_length_prefixed(bytes, offset)?;
        Ok((Value::Bytes(frame.to_vec()), offset))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        Ok(Value::Bytes(bytes.to_vec()))
    }
}

impl sealed::Codec for StringCodec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        length_prefixed(value.as_string()?.as_bytes())
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        Ok(value.as_string()?.as_bytes().to_vec())
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let (frame, offset) = read_length_prefixed(bytes, offset)?;
        Ok((Value::String(String::from_utf8(frame.to_vec())?), offset))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        Ok(Value::String(String::from_utf8(bytes.to_vec())?))
    }
}

impl sealed::Codec for TokenIdentifierCodec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        length_prefixed(value.as_token_identifier()?.as_bytes())
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        Ok(value.as_token_identifier()?.as_bytes().to_vec())
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let (frame, offset) = read_length_prefixed(bytes, offset)?;
        Ok((Value::TokenIdentifier(String::from_utf8(frame.to_vec())?), offset))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        Ok(Value::TokenIdentifier(String::from_utf8(bytes.to_vec())?))
    }
}

impl sealed::Codec for CodeMetadataCodec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        length_prefixed(&value.as_code_metadata()?.to_bytes())
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        Ok(value.as_code_metadata()?.to_bytes().to_vec())
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let (frame, offset) = read_length_prefixed(bytes, offset)?;
        Ok((Value::CodeMetadata(CodeMetadata::from_bytes(frame)?), offset))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        Ok(Value::CodeMetadata(CodeMetadata::from_bytes(bytes)?))
    }
}
