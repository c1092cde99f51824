extern crate base64;
extern crate log;
extern crate mvxabi;
extern crate serde;
extern crate serde_json;
#[macro_use]
extern crate thiserror;

pub use decoder::{EventDecoder, EventDecoderOptions, EventRecord};
pub use definition::EventDefinition;
pub use error::Error;
pub use raw::RawEvent;

pub mod catalog;
mod decoder;
mod definition;
mod error;
mod raw;
