use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use crate::codec::{length_prefixed, read_frame, read_length_prefixed, sealed};
use crate::{Error, Value};

/// Fixed-width two's-complement integer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IntCodec {
    size: usize,
}

/// Fixed-width unsigned integer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UIntCodec {
    size: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BigIntCodec;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BigUIntCodec;

impl IntCodec {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    fn width(&self) -> usize {
        self.size / 8
    }

    /// Minimal two's-complement bytes, checked against the declared width.
    fn minimal_bytes(&self, value: &Value) -> Result<(Vec<u8>, bool), Error> {
        let int = value.as_int()?;
        let bytes = int.to_signed_bytes_be();
        if bytes.len() > self.width() {
            return Err(Error::ValueOutOfRange { value: int.to_string(), ty: format!("i{}", self.size) });
        }
        Ok((bytes, int.sign() == Sign::Minus))
    }
}

impl UIntCodec {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    fn width(&self) -> usize {
        self.size / 8
    }

    fn minimal_bytes(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let uint = value.as_uint()?;
        let bytes = uint_top_level(uint);
        // Widths that are not a whole number of bytes round down.
        if uint.bits() > self.size as u64 || bytes.len() > self.width() {
            return Err(Error::ValueOutOfRange { value: uint.to_string(), ty: format!("u{}", self.size) });
        }
        Ok(bytes)
    }
}

fn uint_top_level(uint: &BigUint) -> Vec<u8> {
    if uint.is_zero() {
        Vec::new()
    } else {
        uint.to_bytes_be()
    }
}

fn int_top_level(int: &BigInt) -> Vec<u8> {
    if int.is_zero() {
        Vec::new()
    } else {
        int.to_signed_bytes_be()
    }
}

impl sealed::Codec for IntCodec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let (bytes, negative) = self.minimal_bytes(value)?;
        let fill = if negative { 0xFF } else { 0x00 };
        Ok(std::iter::repeat(fill).take(self.width() - bytes.len()).chain(bytes).collect())
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        self.minimal_bytes(value)?;
        Ok(int_top_level(value.as_int()?))
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let frame = read_frame(bytes, offset, self.width())?;
        Ok((Value::Int(BigInt::from_signed_bytes_be(frame)), offset + self.width()))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        if bytes.len() > self.width() {
            return Err(Error::InvalidLength { expected: self.width(), actual: bytes.len() });
        }
        Ok(Value::Int(BigInt::from_signed_bytes_be(bytes)))
    }
}

impl sealed::Codec for UIntCodec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let bytes = self.minimal_bytes(value)?;
        Ok(std::iter::repeat(0).take(self.width() - bytes.len()).chain(bytes).collect())
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        self.minimal_bytes(value)
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let frame = read_frame(bytes, offset, self.width())?;
        Ok((Value::UInt(BigUint::from_bytes_be(frame)), offset + self.width()))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        if bytes.len() > self.width() {
            return Err(Error::InvalidLength { expected: self.width(), actual: bytes.len() });
        }
        Ok(Value::UInt(BigUint::from_bytes_be(bytes)))
    }
}

impl sealed::Codec for BigIntCodec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        length_prefixed(&int_top_level(value.as_int()?))
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        Ok(int_top_level(value.as_int()?))
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let (frame, offset) = read_length_prefixed(bytes, offset)?;
        Ok((Value::Int(BigInt::from_signed_bytes_be(frame)), offset))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        Ok(Value::Int(BigInt::from_signed_bytes_be(bytes)))
    }
}

impl sealed::Codec for BigUIntCodec {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        length_prefixed(&uint_top_level(value.as_uint()?))
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        Ok(uint_top_level(value.as_uint()?))
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let (frame, offset) = read_length_prefixed(bytes, offset)?;
        Ok((Value::UInt(BigUint::from_bytes_be(frame)), offset))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        Ok(Value::UInt(BigUint::from_bytes_be(bytes)))
    }
}
