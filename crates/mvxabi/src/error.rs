#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("Invalid type expression `{expression}`: {reason}")]
    TypeExpression {
        expression: String,
        reason: String,
    },

    #[error(
        "Type mismatch{}: expected {expected}, got {actual}",
        .position.map(|position| format!(" at position {}", position)).unwrap_or_default()
    )]
    TypeMismatch {
        expected: String,
        actual: String,
        position: Option<usize>,
    },

    #[error("Buffer underrun: expected {expected} bytes, {available} available")]
    BufferUnderrun {
        expected: usize,
        available: usize,
    },

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        expected: usize,
        actual: usize,
    },

    #[error("Arity error: expected {expected} elements, got {actual}")]
    Arity {
        expected: usize,
        actual: usize,
    },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Input data is invalid: {0}")]
    InvalidData(String),

    #[error("Value {value} does not fit in {ty}")]
    ValueOutOfRange {
        value: String,
        ty: String,
    },

    #[error("Utf-8 decoding error : {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Hex decoding error : {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Bech32 decoding error : {0}")]
    Bech32(#[from] bech32::Error),

    #[error("Abi json error : {0}")]
    Json(String),
}

impl Error {
    pub(crate) fn mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
            position: None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
