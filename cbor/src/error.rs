use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Incorrect type")]
    InvalidType,

    #[error("Value too large for the target type")]
    Overflow,

    #[error("Not enough data for encoded value")]
    End,

    #[error("Maximum recursion depth reached")]
    Recursion,

    #[error("Invalid UTF-8 in text string: {0}")]
    InvalidUtf8(#[from] core::str::Utf8Error),
}
