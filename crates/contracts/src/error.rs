#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("abi error: {0}")]
    AbiError(#[from] mvxabi::Error),

    #[error("Argument count error: expected {expected} tokens, got {actual}")]
    ArgumentCount {
        expected: usize,
        actual: usize,
    },

    #[error("Argument {index} can not be decoded: {cause}")]
    ArgumentDecode {
        index: usize,
        cause: mvxabi::Error,
    },

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Invalid call data: {0}")]
    InvalidCallData(String),

    #[error("Base64 decoding error : {0}")]
    Base64(#[from] base64::DecodeError),
}
