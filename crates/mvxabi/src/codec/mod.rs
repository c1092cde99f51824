pub(crate) use codec::sealed;
pub(crate) use codec::{
    decode_nested,
    decode_top_level,
    encode_length,
    encode_nested,
    encode_top_level,
    length_prefixed,
    read_frame,
    read_length,
    read_length_prefixed,
};

pub use codec::{BinaryCodec, EncodedValue, EncodingMode};
pub(crate) use address::{AddressCodec, H256Codec};
pub(crate) use array::{FixedArrayCodec, ListCodec};
pub(crate) use boolean::BooleanCodec;
pub(crate) use bytes::{BytesCodec, CodeMetadataCodec, StringCodec, TokenIdentifierCodec};
pub(crate) use enumeration::EnumCodec;
pub(crate) use integer::{BigIntCodec, BigUIntCodec, IntCodec, UIntCodec};
pub(crate) use nothing::NothingCodec;
pub(crate) use option::OptionCodec;
pub(crate) use structure::StructCodec;
pub(crate) use tuple::TupleCodec;

/// Which value variant a sequence codec produces and accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Sequence {
    List,
    Variadic,
    Tuple,
    Multi,
}

impl Sequence {
    pub(crate) fn items<'v>(&self, value: &'v crate::Value) -> Result<&'v [crate::Value], crate::Error> {
        match self {
            Sequence::List => value.as_list(),
            Sequence::Variadic => value.as_variadic(),
            Sequence::Tuple => value.as_tuple(),
            Sequence::Multi => value.as_multi(),
        }
    }

    pub(crate) fn wrap(&self, items: Vec<crate::Value>) -> crate::Value {
        match self {
            Sequence::List => crate::Value::List(items),
            Sequence::Variadic => crate::Value::Variadic(items),
            Sequence::Tuple => crate::Value::Tuple(items),
            Sequence::Multi => crate::Value::Multi(items),
        }
    }
}

#[allow(clippy::module_inception)]
mod codec;
mod address;
mod array;
mod boolean;
mod bytes;
mod enumeration;
mod integer;
mod nothing;
mod option;
mod structure;
mod tuple;
