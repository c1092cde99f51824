use crate::codec::{
    AddressCodec,
    BigIntCodec,
    BigUIntCodec,
    BooleanCodec,
    BytesCodec,
    CodeMetadataCodec,
    EnumCodec,
    FixedArrayCodec,
    H256Codec,
    IntCodec,
    ListCodec,
    NothingCodec,
    OptionCodec,
    Sequence,
    StringCodec,
    StructCodec,
    TokenIdentifierCodec,
    TupleCodec,
    UIntCodec,
};
use crate::{Error, TypeDescriptor, TypedValue, Value};

pub(crate) mod sealed {
    use crate::{Error, Value};

    /// Per-kind byte rules. Nested decoding reads from `offset` and returns
    /// the offset right after the consumed frame.
    pub trait Codec {
        fn encode_nested(&self, value: &Value) -> Result<Vec<u8>, Error>;

        fn encode_top_level(&self, value: &Value) -> Result<Vec<u8>, Error> {
            self.encode_nested(value)
        }

        fn decode_nested(&self, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error>;

        fn decode_top_level(&self, bytes: &[u8]) -> Result<Value, Error> {
            let (value, consumed) = self.decode_nested(bytes, 0)?;
            if consumed < bytes.len() {
                log::trace!("ignoring {} trailing bytes after top-level value", bytes.len() - consumed);
            }
            Ok(value)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EncodingMode {
    TopLevel,
    Nested,
}

/// Bytes together with the mode they were produced under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedValue {
    pub bytes: Vec<u8>,
    pub mode: EncodingMode,
}

/// Type-directed binary codec. Stateless; one instance can serve any number
/// of threads. Descriptors are validated before any bytes are touched.
#[derive(Copy, Clone, Debug, Default)]
pub struct BinaryCodec;

impl BinaryCodec {
    pub fn new() -> Self {
        BinaryCodec
    }

    pub fn encode(&self, ty: &TypeDescriptor, value: &Value, mode: EncodingMode) -> Result<EncodedValue, Error> {
        ty.validate()?;
        let bytes = match mode {
            EncodingMode::TopLevel => encode_top_level(ty, value)?,
            EncodingMode::Nested => encode_nested(ty, value)?,
        };
        Ok(EncodedValue { bytes, mode })
    }

    pub fn encode_nested(&self, value: &TypedValue) -> Result<Vec<u8>, Error> {
        encode_nested(value.ty(), value.value())
    }

    pub fn encode_top_level(&self, value: &TypedValue) -> Result<Vec<u8>, Error> {
        encode_top_level(value.ty(), value.value())
    }

    /// Decodes one value from the start of `bytes`, returning it together
    /// with the number of bytes consumed.
    pub fn decode_nested(&self, bytes: &[u8], ty: &TypeDescriptor) -> Result<(TypedValue, usize), Error> {
        ty.validate()?;
        let (value, consumed) = decode_nested(ty, bytes, 0)?;
        Ok((TypedValue::from_parts(ty.clone(), value), consumed))
    }

    pub fn decode_top_level(&self, bytes: &[u8], ty: &TypeDescriptor) -> Result<TypedValue, Error> {
        ty.validate()?;
        let value = decode_top_level(ty, bytes)?;
        Ok(TypedValue::from_parts(ty.clone(), value))
    }

    pub fn decode(&self, bytes: &[u8], ty: &TypeDescriptor, mode: EncodingMode) -> Result<Value, Error> {
        ty.validate()?;
        match mode {
            EncodingMode::TopLevel => decode_top_level(ty, bytes),
            EncodingMode::Nested => decode_nested(ty, bytes, 0).map(|(value, _)| value),
        }
    }
}

fn codec_for(ty: &TypeDescriptor) -> Box<dyn sealed::Codec + '_> {
    match ty {
        TypeDescriptor::Boolean => Box::new(BooleanCodec),
        TypeDescriptor::SignedInt(size) => Box::new(IntCodec::new(*size)),
        TypeDescriptor::UnsignedInt(size) => Box::new(UIntCodec::new(*size)),
        TypeDescriptor::BigSignedInt => Box::new(BigIntCodec),
        TypeDescriptor::BigUnsignedInt => Box::new(BigUIntCodec),
        TypeDescriptor::Address => Box::new(AddressCodec),
        TypeDescriptor::ByteSequence => Box::new(BytesCodec),
        TypeDescriptor::Utf8String => Box::new(StringCodec),
        TypeDescriptor::Hash256 => Box::new(H256Codec),
        TypeDescriptor::TokenIdentifier => Box::new(TokenIdentifierCodec),
        TypeDescriptor::CodeMetadata => Box::new(CodeMetadataCodec),
        TypeDescriptor::Unit => Box::new(NothingCodec),
        TypeDescriptor::Struct(struct_type) => Box::new(StructCodec::new(struct_type)),
        TypeDescriptor::Enum(enum_type) => Box::new(EnumCodec::new(enum_type)),
        TypeDescriptor::List(element) => Box::new(ListCodec::new(element, Sequence::List)),
        TypeDescriptor::Variadic(element) => Box::new(ListCodec::new(element, Sequence::Variadic)),
        TypeDescriptor::FixedArray(element, size) => Box::new(FixedArrayCodec::new(element, *size)),
        TypeDescriptor::Tuple(items) => Box::new(TupleCodec::new(items, Sequence::Tuple)),
        TypeDescriptor::MultiValue(items) => Box::new(TupleCodec::new(items, Sequence::Multi)),
        TypeDescriptor::Option(inner) | TypeDescriptor::Optional(inner) => Box::new(OptionCodec::new(inner)),
    }
}

pub(crate) fn encode_nested(ty: &TypeDescriptor, value: &Value) -> Result<Vec<u8>, Error> {
    codec_for(ty).encode_nested(value)
}

pub(crate) fn encode_top_level(ty: &TypeDescriptor, value: &Value) -> Result<Vec<u8>, Error> {
    codec_for(ty).encode_top_level(value)
}

pub(crate) fn decode_nested(ty: &TypeDescriptor, bytes: &[u8], offset: usize) -> Result<(Value, usize), Error> {
    codec_for(ty).decode_nested(bytes, offset)
}

pub(crate) fn decode_top_level(ty: &TypeDescriptor, bytes: &[u8]) -> Result<Value, Error> {
    codec_for(ty).decode_top_level(bytes)
}

/// Borrows `length` bytes starting at `offset`.
pub(crate) fn read_frame(bytes: &[u8], offset: usize, length: usize) -> Result<&[u8], Error> {
    let available = bytes.len().saturating_sub(offset);
    if available < length {
        return Err(Error::BufferUnderrun { expected: length, available });
    }
    Ok(&bytes[offset..offset + length])
}

/// Reads a 4-byte big-endian length prefix.
pub(crate) fn read_length(bytes: &[u8], offset: usize) -> Result<(usize, usize), Error> {
    let frame = read_frame(bytes, offset, 4)?;
    let mut raw = [0u8; 4];
    raw.copy_from_slice(frame);
    Ok((u32::from_be_bytes(raw) as usize, offset + 4))
}

pub(crate) fn encode_length(length: usize) -> Result<[u8; 4], Error> {
    let length = u32::try_from(length).map_err(|_| Error::ValueOutOfRange {
        value: length.to_string(),
        ty: "u32 length prefix".to_string(),
    })?;
    Ok(length.to_be_bytes())
}

/// Prefixes `payload` with its 4-byte big-endian length.
pub(crate) fn length_prefixed(payload: &[u8]) -> Result<Vec<u8>, Error> {
    let mut buff = Vec::with_capacity(4 + payload.len());
    buff.extend_from_slice(&encode_length(payload.len())?);
    buff.extend_from_slice(payload);
    Ok(buff)
}

/// Reads a length-prefixed payload.
pub(crate) fn read_length_prefixed(bytes: &[u8], offset: usize) -> Result<(&[u8], usize), Error> {
    let (length, offset) = read_length(bytes, offset)?;
    let frame = read_frame(bytes, offset, length)?;
    Ok((frame, offset + length))
}
