extern crate base64;
extern crate hex;
extern crate log;
extern crate mvxabi;
#[macro_use]
extern crate thiserror;

pub use error::Error;

pub mod mvx;
mod error;
