extern crate bech32;
extern crate hex;
extern crate log;
extern crate num_bigint;
extern crate num_traits;
extern crate pest;
#[macro_use]
extern crate pest_derive;
extern crate serde;
extern crate serde_json;
#[macro_use]
extern crate thiserror;

pub use abi::{AbiEndpoint, AbiEvent, AbiRegistry};
pub use codec::{BinaryCodec, EncodedValue, EncodingMode};
pub use error::Error;
pub use parser::{parse_type_expression, CustomTypes, TypeExpressionParser};
pub use typed::TypedValue;
pub use types::{
    is_assignable_from,
    is_open_ended,
    EnumType,
    EnumVariant,
    FieldDefinition,
    StructType,
    TypeDescriptor,
    TypeKind,
};
pub use value::{Address, CodeMetadata, EnumValue, Field, Value};

pub mod abi;
pub mod codec;
mod error;
mod grammar;
mod parser;
mod typed;
pub mod types;
mod value;
