#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("abi error: {0}")]
    AbiError(#[from] mvxabi::Error),

    #[error("Topic count error: expected {expected} topics, got {actual}")]
    TopicCount {
        expected: usize,
        actual: usize,
    },

    #[error("Topic {index} can not be decoded: {cause}")]
    TopicDecode {
        index: usize,
        cause: mvxabi::Error,
    },

    #[error("Event {0} carries no data")]
    MissingEventData(String),

    #[error("Event mismatch: expected {expected}, got {actual}")]
    EventMismatch {
        expected: String,
        actual: String,
    },

    #[error("Base64 decoding error : {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Event json error : {0}")]
    Json(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
