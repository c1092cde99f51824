//! Contract-facing toolkit: the ABI codec, call argument serialization and
//! event decoding, re-exported from their member crates.

pub extern crate mvxabi;
pub extern crate contracts;
pub extern crate events;

pub use mvxabi::{BinaryCodec, TypeDescriptor, TypedValue, Value};
pub use contracts::mvx::{ArgSerializer, CallData, EndpointDefinition};
pub use events::{EventDecoder, EventDefinition, RawEvent};
