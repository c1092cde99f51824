use crate::codec::{decode_nested, encode_length, encode_nested, read_length, sealed, Sequence};
use crate::{Error, TypeDescriptor, Value};

/// Exactly `size` nested elements, no count prefix, in both modes.
pub struct FixedArrayCodec<'t> {
    element: &'t TypeDescriptor,
    size: usize,
}

impl<'t> FixedArrayCodec<'t> {
    pub fn new(element: &'t TypeDescriptor, size: usize) -> Self {
        Self { element, size }
    }
}

impl sealed::Codec for FixedArrayCodec<'_> {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let values = value.as_array()?;
        if values.len() != self.size {
            return Err(Error::Arity { expected: self.size, actual: values.len() });
        }

        let mut buff = Vec::new();
        for value in values {
            buff.extend(encode_nested(self.element, value)?);
        }
        Ok(buff)
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let mut offset = offset;
        // The declared size comes from the type expression, the buffer bounds it.
        let mut values = Vec::with_capacity(self.size.min(bytes.len().saturating_sub(offset)));
        for index in 0..self.size {
            // A short trailing element means the buffer ran out of elements.
            let (value, next) = match decode_nested(self.element, bytes, offset) {
                Ok(decoded) => decoded,
                Err(Error::BufferUnderrun { .. }) => {
                    return Err(Error::Arity { expected: self.size, actual: index });
                }
                Err(err) => return Err(err),
            };
            values.push(value);
            offset = next;
        }
        Ok((Value::Array(values), offset))
    }
}

/// Homogeneous sequence of unbounded length. Nested frames carry a 4-byte
/// big-endian element count; a top-level list is the concatenation of its
/// nested elements and runs to the end of the buffer.
pub struct ListCodec<'t> {
    element: &'t TypeDescriptor,
    sequence: Sequence,
}

impl<'t> ListCodec<'t> {
    pub fn new(element: &'t TypeDescriptor, sequence: Sequence) -> Self {
        Self { element, sequence }
    }

    fn encode_items(&self, values: &[Value]) -> Result<Vec<u8>, Error> {
        let mut buff = Vec::new();
        for value in values {
            buff.extend(encode_nested(self.element, value)?);
        }
        Ok(buff)
    }
}

impl sealed::Codec for ListCodec<'_> {
    fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let values = self.sequence.items(value)?;
        let mut buff = encode_length(values.len())?.to_vec();
        buff.extend(self.encode_items(values)?);
        Ok(buff)
    }

    fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
        self.encode_items(self.sequence.items(value)?)
    }

    fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
        let (length, mut offset) = read_length(bytes, offset)?;

        let mut values = Vec::new();
        for _ in 0..length {
            let (value, next) = decode_nested(self.element, bytes, offset)?;
            if next == offset {
                return Err(Error::InvalidData(format!(
                    "{} zero-width {} elements are not backed by the buffer",
                    length, self.element,
                )));
            }
            values.push(value);
            offset = next;
        }
        Ok((self.sequence.wrap(values), offset))
    }

    fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
        let mut offset = 0;
        let mut values = Vec::new();
        while offset < bytes.len() {
            let (value, next) = decode_nested(self.element, bytes, offset)?;
            if next == offset {
                return Err(Error::InvalidData(format!(
                    "zero-width {} elements can not be read until the buffer ends",
                    self.element,
                )));
            }
            values.push(value);
            offset = next;
        }
        Ok(self.sequence.wrap(values))
    }
}
