use base64::{Engine, engine::general_purpose::STANDARD};
use mvxabi::Address;
use serde::Deserialize;
use crate::Error;

/// A log entry as emitted by a contract: the emitting address, the
/// endpoint identifier, positional topics and an optional data blob.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub address: String,
    pub identifier: String,
    pub topics: Vec<Vec<u8>>,
    pub data: Option<Vec<u8>>,
}

#[derive(Deserialize)]
struct RawEventDocument {
    #[serde(default)]
    address: String,
    #[serde(default)]
    identifier: String,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    data: Option<String>,
}

impl RawEvent {
    pub fn new(address: &str, identifier: &str, topics: Vec<Vec<u8>>, data: Option<Vec<u8>>) -> Self {
        Self {
            address: address.to_string(),
            identifier: identifier.to_string(),
            topics,
            data,
        }
    }

    /// Builds an event from the base64 topics and data a gateway returns.
    pub fn from_base64(address: &str, identifier: &str, topics: &[&str], data: Option<&str>) -> Result<Self, Error> {
        let topics = topics.iter()
            .map(|topic| STANDARD.decode(topic))
            .collect::<Result<Vec<_>, _>>()?;
        let data = data.map(|data| STANDARD.decode(data)).transpose()?;
        Ok(Self::new(address, identifier, topics, data))
    }

    /// Parses one event object of a transaction's logs, e.g.
    /// `{"address": "erd1...", "identifier": "swap", "topics": ["..."], "data": "..."}`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let document: RawEventDocument = serde_json::from_str(json)?;
        let topics = document.topics.iter().map(String::as_str).collect::<Vec<_>>();
        Self::from_base64(&document.address, &document.identifier, &topics, document.data.as_deref())
    }

    /// The emitting contract, parsed from its `erd1…` form.
    pub fn emitter(&self) -> Result<Address, Error> {
        Ok(Address::from_bech32(&self.address)?)
    }

    /// Topic zero as text, the name the contract gave the event.
    pub fn name(&self) -> Option<String> {
        self.topics.first().map(|topic| String::from_utf8_lossy(topic).into_owned())
    }
}
