use mvxabi::{BinaryCodec, EncodingMode, Value};
use crate::{Error, EventDefinition, RawEvent};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventDecoderOptions {
    /// Reject events whose topic zero is not the definition's identifier.
    pub verify_identifier: bool,
    /// Reject events carrying more topics than declared.
    pub strict_topic_count: bool,
}

/// A decoded event: its name, the declared topics by name, and the data
/// struct when the definition has one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    pub name: String,
    pub topics: Vec<(String, Value)>,
    pub data: Option<Value>,
}

impl EventRecord {
    pub fn topic(&self, name: &str) -> Option<&Value> {
        self.topics.iter()
            .find(|(topic, _)| topic == name)
            .map(|(_, value)| value)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.field(name))
    }
}

pub struct EventDecoder {
    definition: EventDefinition,
    options: EventDecoderOptions,
    codec: BinaryCodec,
}

impl EventDecoder {
    pub fn new(definition: EventDefinition) -> Self {
        Self {
            definition,
            options: EventDecoderOptions::default(),
            codec: BinaryCodec::new(),
        }
    }

    pub fn with_options(mut self, options: EventDecoderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn definition(&self) -> &EventDefinition {
        &self.definition
    }

    pub fn decode(&self, event: &RawEvent) -> Result<EventRecord, Error> {
        let expected = self.definition.topic_count();
        let actual = event.topics.len();
        if actual < expected || (self.options.strict_topic_count && actual > expected) {
            return Err(Error::TopicCount { expected, actual });
        }
        if actual > expected {
            log::debug!("{} carries {} undeclared topics", self.definition.identifier, actual - expected);
        }

        let name = String::from_utf8(event.topics[0].clone())
            .map_err(|err| Error::TopicDecode { index: 0, cause: err.into() })?;
        if self.options.verify_identifier && name != self.definition.identifier {
            return Err(Error::EventMismatch {
                expected: self.definition.identifier.clone(),
                actual: name,
            });
        }

        let mut topics = Vec::with_capacity(self.definition.topics.len());
        for (position, field) in self.definition.topics.iter().enumerate() {
            let index = position + 1;
            let value = self.codec.decode(&event.topics[index], &field.ty, EncodingMode::TopLevel)
                .map_err(|cause| Error::TopicDecode { index, cause })?;
            topics.push((field.name.clone(), value));
        }

        let data = match self.definition.data.as_ref() {
            None => None,
            Some(ty) => {
                let bytes = event.data.as_ref()
                    .ok_or_else(|| Error::MissingEventData(self.definition.identifier.clone()))?;
                let (value, consumed) = self.codec.decode_nested(bytes, ty)?;
                if consumed < bytes.len() {
                    log::debug!(
                        "{} data has {} trailing bytes after {}",
                        self.definition.identifier,
                        bytes.len() - consumed,
                        ty,
                    );
                }
                Some(value.into_parts().1)
            }
        };

        Ok(EventRecord { name, topics, data })
    }
}

#[cfg(test)]
mod tests {
    use mvxabi::{FieldDefinition, StructType, TypeDescriptor};
    use super::*;

    fn definition() -> EventDefinition {
        EventDefinition::new(
            "swap_no_fee_and_forward",
            vec![
                FieldDefinition::new("token_out", TypeDescriptor::TokenIdentifier),
                FieldDefinition::new("epoch", TypeDescriptor::BigUnsignedInt),
            ],
            Some(TypeDescriptor::Struct(StructType::new("SwapNoFeeEvent", vec![
                FieldDefinition::new("amount", TypeDescriptor::BigUnsignedInt),
                FieldDefinition::new("burned", TypeDescriptor::Boolean),
            ]))),
        ).unwrap()
    }

    fn event(topics: &[&[u8]], data: Option<&[u8]>) -> RawEvent {
        RawEvent::new(
            "erd1qqqqqqqqqqqqqpgq",
            "swapNoFeeAndForward",
            topics.iter().map(|topic| topic.to_vec()).collect(),
            data.map(|data| data.to_vec()),
        )
    }

    #[test]
    fn test_decode_event() {
        let decoder = EventDecoder::new(definition());
        let record = decoder.decode(&event(
            &[b"swap_no_fee_and_forward", b"MEX-455c57", &[0x01, 0x2C]],
            Some(&[0, 0, 0, 1, 0x64, 0x01]),
        )).unwrap();

        assert_eq!(record.name, "swap_no_fee_and_forward");
        assert_eq!(record.topic("token_out"), Some(&Value::TokenIdentifier("MEX-455c57".to_string())));
        assert_eq!(record.topic("epoch"), Some(&Value::UInt(300_u32.into())));
        assert_eq!(record.field("amount"), Some(&Value::UInt(100_u32.into())));
        assert_eq!(record.field("burned"), Some(&Value::Boolean(true)));
        assert_eq!(record.topic("missing"), None);
    }

    #[test]
    fn test_topic_count() {
        let decoder = EventDecoder::new(definition());
        assert_eq!(
            decoder.decode(&event(&[b"swap_no_fee_and_forward", b"MEX-455c57"], Some(&[]))),
            Err(Error::TopicCount { expected: 3, actual: 2 }),
        );

        let surplus = event(&[b"swap_no_fee_and_forward", b"MEX-455c57", &[0x01], &[0x02]], Some(&[0, 0, 0, 0, 0]));
        assert!(decoder.decode(&surplus).is_ok());

        let strict = EventDecoder::new(definition()).with_options(EventDecoderOptions {
            strict_topic_count: true,
            ..Default::default()
        });
        assert_eq!(strict.decode(&surplus), Err(Error::TopicCount { expected: 3, actual: 4 }));
    }

    #[test]
    fn test_verify_identifier() {
        let decoder = EventDecoder::new(definition()).with_options(EventDecoderOptions {
            verify_identifier: true,
            ..Default::default()
        });

        assert_eq!(
            decoder.decode(&event(&[b"swap", b"MEX-455c57", &[0x01]], Some(&[0, 0, 0, 0, 0]))),
            Err(Error::EventMismatch {
                expected: "swap_no_fee_and_forward".to_string(),
                actual: "swap".to_string(),
            }),
        );
    }

    #[test]
    fn test_event_data() {
        let decoder = EventDecoder::new(definition());
        let topics: &[&[u8]] = &[b"swap_no_fee_and_forward", b"MEX-455c57", &[0x01]];

        assert_eq!(
            decoder.decode(&event(topics, None)),
            Err(Error::MissingEventData("swap_no_fee_and_forward".to_string())),
        );
        assert!(matches!(
            decoder.decode(&event(topics, Some(&[0, 0, 0, 1, 0x64]))),
            Err(Error::AbiError(mvxabi::Error::BufferUnderrun { .. })),
        ));

        let trailing = decoder.decode(&event(topics, Some(&[0, 0, 0, 1, 0x64, 0x00, 0xFF, 0xFF]))).unwrap();
        assert_eq!(trailing.field("burned"), Some(&Value::Boolean(false)));
    }

    #[test]
    fn test_topic_decode_error() {
        let decoder = EventDecoder::new(definition());

        assert!(matches!(
            decoder.decode(&event(&[b"swap_no_fee_and_forward", &[0xFF, 0xFE], &[0x01]], Some(&[0, 0, 0, 0, 0]))),
            Err(Error::TopicDecode { index: 1, cause: mvxabi::Error::Utf8(_) }),
        ));
    }
}
