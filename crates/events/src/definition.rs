use mvxabi::{AbiEvent, FieldDefinition, TypeDescriptor};
use crate::Error;

/// Schema of one event kind. `topics` lists the positions after topic zero,
/// which always holds the event name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDefinition {
    pub identifier: String,
    pub topics: Vec<FieldDefinition>,
    pub data: Option<TypeDescriptor>,
}

impl EventDefinition {
    pub fn new(identifier: &str, topics: Vec<FieldDefinition>, data: Option<TypeDescriptor>) -> Result<Self, Error> {
        // Each topic holds exactly one top-level value.
        for topic in &topics {
            if topic.ty.is_variadic_capable() {
                return Err(mvxabi::Error::InvalidSchema(format!(
                    "event {} topic {} can not be {}",
                    identifier, topic.name, topic.ty,
                )).into());
            }
            topic.ty.validate()?;
        }
        if let Some(data) = data.as_ref() {
            if !matches!(data, TypeDescriptor::Struct(_)) {
                return Err(mvxabi::Error::InvalidSchema(format!(
                    "event {} data must be a struct, got {}",
                    identifier, data,
                )).into());
            }
            data.validate()?;
        }

        Ok(Self {
            identifier: identifier.to_string(),
            topics,
            data,
        })
    }

    pub fn from_abi(event: &AbiEvent) -> Result<Self, Error> {
        Self::new(&event.identifier, event.topics.clone(), event.data.clone())
    }

    /// Topic count of a conforming event, topic zero included.
    pub fn topic_count(&self) -> usize {
        self.topics.len() + 1
    }
}
