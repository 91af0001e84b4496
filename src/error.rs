//! Types for error handling.

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// All possible types of errors that can be returned from this crate.
#[derive(Debug)]
pub enum Error {
    /// A caller-supplied argument was rejected, such as an empty required
    /// string or a zero buffer size.
    InvalidArgument(&'static str),
    /// The multipart body was already finished and can no longer be appended
    /// to.
    Finished,
    /// The multipart body is not finished yet, so it cannot be read from,
    /// buffered, or nested into another body.
    NotFinished,
    /// Invalid UTF-8 string error.
    InvalidUtf8,
    /// An I/O error occurred while pulling bytes from a reader or producer
    /// part.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(message) => write!(f, "invalid argument: {}", message),
            Error::Finished => f.write_str("can't add to a finished multipart body"),
            Error::NotFinished => f.write_str("can't read from a non-finished multipart body"),
            Error::InvalidUtf8 => f.write_str("bytes are not valid UTF-8"),
            Error::Io(e) => write!(f, "I/O error while reading a part: {}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[doc(hidden)]
impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}

#[doc(hidden)]
impl From<Error> for io::Error {
    fn from(error: Error) -> io::Error {
        match error {
            Error::Io(e) => e,
            error @ Error::InvalidArgument(_) => {
                io::Error::new(io::ErrorKind::InvalidInput, error)
            }
            error @ Error::InvalidUtf8 => io::Error::new(io::ErrorKind::InvalidData, error),
            error => io::Error::new(io::ErrorKind::Other, error),
        }
    }
}

#[doc(hidden)]
impl From<std::string::FromUtf8Error> for Error {
    fn from(_: std::string::FromUtf8Error) -> Error {
        Error::InvalidUtf8
    }
}
