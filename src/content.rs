//! Provides the content sources that parts of a multipart body are built
//! from.

use std::{
    borrow::Cow,
    fmt,
    fs::File,
    io::{self, ErrorKind, Read},
};

/// The content of a single part of a multipart body.
///
/// A part's content either is a *literal* held fully in memory, comes from an
/// open [`Read`] stream, or is pulled from a *producer*: a callback that is
/// invoked with a maximum length and returns at most that many bytes, or an
/// empty buffer once exhausted.
///
/// A [`Content`] can be created from many types of sources using the
/// [`Into`](std::convert::Into) trait or one of its constructor functions.
/// Literal content always has a known length. For streams and producers the
/// caller may declare the expected length up front; without one, the length
/// of the part (and of any body containing it) is unknown.
pub struct Content(Repr);

enum Repr {
    /// Content stored in memory.
    Literal(Cow<'static, [u8]>),

    /// Content read from an open stream.
    Reader(Box<dyn Read + Send + Sync>, Option<u64>),

    /// Content pulled from a callback.
    Producer(Producer, Option<u64>),
}

type Producer = Box<dyn FnMut(usize) -> io::Result<Vec<u8>> + Send + Sync>;

impl Content {
    /// Create content from a potentially static byte buffer.
    ///
    /// This will try to prevent a copy if the type passed in can be re-used,
    /// otherwise the buffer will be copied first. This method guarantees to
    /// not require a copy for the following types:
    ///
    /// - `&'static [u8]`
    /// - `&'static str`
    #[inline]
    pub fn from_bytes_static<B>(bytes: B) -> Self
    where
        B: AsRef<[u8]> + 'static,
    {
        castaway::match_type!(bytes, {
            &'static [u8] as bytes => Self(Repr::Literal(Cow::Borrowed(bytes))),
            &'static str as bytes => Self(Repr::Literal(Cow::Borrowed(bytes.as_bytes()))),
            Vec<u8> as bytes => Self::from(bytes),
            String as bytes => Self::from(bytes.into_bytes()),
            bytes => Self::from(bytes.as_ref().to_vec()),
        })
    }

    /// Create streaming content that reads from the given reader, with an
    /// unknown length.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + Send + Sync + 'static,
    {
        Self(Repr::Reader(Box::new(reader), None))
    }

    /// Create streaming content with a known length.
    ///
    /// Giving a value for `length` that doesn't actually match how much data
    /// the reader will produce makes the containing body report a wrong
    /// content length.
    pub fn from_reader_sized<R>(reader: R, length: u64) -> Self
    where
        R: Read + Send + Sync + 'static,
    {
        Self(Repr::Reader(Box::new(reader), Some(length)))
    }

    /// Create content pulled from a producer callback, with an unknown
    /// length.
    ///
    /// The producer is called with a maximum length and must return at most
    /// that many bytes. Returning an empty buffer signals the end of the
    /// content.
    pub fn from_producer<F>(producer: F) -> Self
    where
        F: FnMut(usize) -> io::Result<Vec<u8>> + Send + Sync + 'static,
    {
        Self(Repr::Producer(Box::new(producer), None))
    }

    /// Create content pulled from a producer callback with a known length.
    pub fn from_producer_sized<F>(producer: F, length: u64) -> Self
    where
        F: FnMut(usize) -> io::Result<Vec<u8>> + Send + Sync + 'static,
    {
        Self(Repr::Producer(Box::new(producer), Some(length)))
    }

    /// Get the length of the content, if known.
    pub fn len(&self) -> Option<u64> {
        match &self.0 {
            Repr::Literal(bytes) => Some(bytes.len() as u64),
            Repr::Reader(_, len) => *len,
            Repr::Producer(_, len) => *len,
        }
    }

    /// Whether this content is a literal held fully in memory.
    pub(crate) fn is_literal(&self) -> bool {
        matches!(self.0, Repr::Literal(_))
    }

    /// Borrow the bytes of literal content.
    pub(crate) fn as_literal(&self) -> Option<&[u8]> {
        match &self.0 {
            Repr::Literal(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Pull up to `max_length` bytes from this content.
    ///
    /// `offset` is the read position within the content and is used for
    /// literals only; streams and producers track their own progress. An
    /// empty result means the content is exhausted.
    pub(crate) fn pull(&mut self, offset: &mut usize, max_length: usize) -> io::Result<Vec<u8>> {
        match &mut self.0 {
            Repr::Literal(bytes) => {
                let end = bytes.len().min(offset.saturating_add(max_length));
                let chunk = bytes[*offset..end].to_vec();
                *offset = end;
                Ok(chunk)
            }
            Repr::Reader(reader, _) => {
                let mut buf = vec![0; max_length];
                loop {
                    match reader.read(&mut buf) {
                        Ok(len) => {
                            buf.truncate(len);
                            return Ok(buf);
                        }
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e),
                    }
                }
            }
            Repr::Producer(producer, _) => {
                let chunk = producer(max_length)?;
                if chunk.len() > max_length {
                    return Err(io::Error::new(
                        ErrorKind::InvalidData,
                        "producer returned more bytes than requested",
                    ));
                }
                Ok(chunk)
            }
        }
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Repr::Literal(Cow::Owned(bytes)))
    }
}

impl From<&'_ [u8]> for Content {
    fn from(bytes: &[u8]) -> Self {
        bytes.to_vec().into()
    }
}

impl From<String> for Content {
    fn from(string: String) -> Self {
        string.into_bytes().into()
    }
}

impl From<&'_ str> for Content {
    fn from(string: &str) -> Self {
        string.as_bytes().into()
    }
}

impl From<File> for Content {
    fn from(file: File) -> Self {
        if let Ok(metadata) = file.metadata() {
            Self::from_reader_sized(file, metadata.len())
        } else {
            Self::from_reader(file)
        }
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.len() {
            Some(len) => write!(f, "Content({})", len),
            None => write!(f, "Content(?)"),
        }
    }
}
