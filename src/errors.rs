use std::fmt;
use std::io;
use thiserror::Error;

/// Enumeration of all possible errors that can occur while decoding an STL file
#[derive(Debug, Error)]
pub enum StlParserError {
    /// A header field holds a value this decoder does not understand
    #[error("Unsupported format: {field} = {value:?}")]
    UnsupportedFormat { field: &'static str, value: String },

    /// The input ended before a complete header or record could be read
    #[error("Truncated input while reading {context}: expected {expected} bytes, got {actual}")]
    TruncatedInput {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Stream error: {0}")]
    Stream(StreamError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StlParserError {
    pub(crate) fn unsupported(field: &'static str, value: impl Into<String>) -> Self {
        StlParserError::UnsupportedFormat {
            field,
            value: value.into(),
        }
    }
}

/// Transport specific errors (HTTP sources)
#[derive(Debug)]
pub struct StreamError {
    pub message: String,
}

impl StreamError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StreamError {}

impl From<StreamError> for StlParserError {
    fn from(err: StreamError) -> Self {
        StlParserError::Stream(err)
    }
}

// Conversion to io::Error for callers that work in io::Result
impl From<StlParserError> for io::Error {
    fn from(err: StlParserError) -> Self {
        match err {
            StlParserError::Io(inner) => inner,
            other => {
                let kind = match &other {
                    StlParserError::TruncatedInput { .. } => io::ErrorKind::UnexpectedEof,
                    StlParserError::UnsupportedFormat { .. } => io::ErrorKind::Unsupported,
                    _ => io::ErrorKind::Other,
                };
                io::Error::new(kind, other)
            }
        }
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        io::Error::other(err)
    }
}

// Type alias for Result with StlParserError
pub type StlParserResult<T> = Result<T, StlParserError>;
