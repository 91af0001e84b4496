//! The core multipart body builder and reader.

use std::{
    fmt,
    io::{self, Read},
};

use crate::{boundary, content::Content, error::Error};

/// Default chunk size used when buffering a body in memory.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// An incrementally built MIME multipart message body.
///
/// A body is assembled during a build phase by appending parts in order, each
/// part being some framing and header literals followed by a
/// [`Content`] source. Once [`finish`](Multipart::finish) has been called the
/// body becomes read-only and its exact byte sequence can be pulled out
/// lazily with [`read_chunk`](Multipart::read_chunk) (or through the
/// [`Read`] impl), without the whole body ever being held in memory. Call
/// [`buffer`](Multipart::buffer) to materialize it all at once instead.
///
/// Most callers will not drive the low-level append primitives directly but
/// use one of the subtype builders ([`MixedBuilder`](crate::MixedBuilder),
/// [`AlternativeBuilder`](crate::AlternativeBuilder),
/// [`RelatedBuilder`](crate::RelatedBuilder),
/// [`FormDataBuilder`](crate::FormDataBuilder)), which emit the conventional
/// call sequences for their subtype and finish into a `Multipart`.
///
/// Reading is single pass: a chunk that has been yielded is never yielded
/// again, and exactly one consumer at a time should drive the reader.
/// Externally supplied streams are never closed by the body; the caller
/// remains responsible for them.
pub struct Multipart {
    boundary: String,
    content_type: String,
    parts: Vec<Content>,
    finished: bool,
    content_length: Option<u64>,

    /// Read cursor: index of the current part, plus the offset inside it
    /// (used for literal parts only).
    index: usize,
    literal_pos: usize,
}

impl Multipart {
    /// Create a new multipart body with a generated boundary.
    ///
    /// `content_type` is the content type *without* the boundary parameter,
    /// e.g. `multipart/form-data`. Returns an error if it is blank.
    pub fn new(content_type: &str) -> Result<Self, Error> {
        Self::with_boundary("", content_type)
    }

    /// Create a new multipart body with the given boundary.
    ///
    /// If `boundary` is empty a random one is generated. A non-empty boundary
    /// is used exactly as given; it is not checked against the boundary
    /// grammar of RFC 2046, nor for collisions with part content.
    pub fn with_boundary(boundary: impl Into<String>, content_type: &str) -> Result<Self, Error> {
        check_non_empty(content_type, "content_type must be non-empty")?;

        Ok(Self::for_content_type(boundary.into(), content_type))
    }

    pub(crate) fn for_content_type(boundary: String, content_type: &str) -> Self {
        let boundary = if boundary.is_empty() {
            boundary::generate()
        } else {
            boundary
        };

        Self {
            content_type: format!("{}; boundary={}", content_type, boundary),
            boundary,
            parts: Vec::new(),
            finished: false,
            content_length: Some(0),
            index: 0,
            literal_pos: 0,
        }
    }

    /// Get the boundary separating the parts of this body.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Get the content type of this body, including the boundary parameter.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the content length of this body, if known.
    ///
    /// The length is unknown once any stream or producer part has been
    /// appended without a declared length, and stays unknown from then on.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Whether [`finish`](Multipart::finish) has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the entire body is held in memory as a single literal.
    pub fn is_buffered(&self) -> bool {
        match &self.parts[..] {
            [part] => match part.as_literal() {
                Some(bytes) => self.content_length == Some(bytes.len() as u64),
                None => false,
            },
            _ => false,
        }
    }

    /// Start a new part by appending the boundary line.
    pub fn start_part(&mut self) -> Result<(), Error> {
        let line = format!("--{}\r\n", self.boundary);
        self.add(line.into())
    }

    /// Append an arbitrary part header.
    ///
    /// Name and value are written as given; no validation or escaping is
    /// performed.
    pub fn add_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        self.add(format!("{}: {}\r\n", name, value).into())
    }

    /// Append a `Content-Disposition` header.
    ///
    /// The `name` and `filename` parameters are emitted only when present and
    /// non-empty. Embedded quotes are not escaped.
    pub fn add_content_disposition(
        &mut self,
        disposition: &str,
        name: Option<&str>,
        filename: Option<&str>,
    ) -> Result<(), Error> {
        let mut value = disposition.to_owned();
        if let Some(name) = name.filter(|s| !s.is_empty()) {
            value.push_str("; name=\"");
            value.push_str(name);
            value.push('"');
        }
        if let Some(filename) = filename.filter(|s| !s.is_empty()) {
            value.push_str("; filename=\"");
            value.push_str(filename);
            value.push('"');
        }
        self.add_header("Content-Disposition", &value)
    }

    /// Append a `Content-ID` header.
    pub fn add_content_id(&mut self, content_id: &str) -> Result<(), Error> {
        self.add_header("Content-ID", content_id)
    }

    /// Append a `Content-Type` header.
    pub fn add_content_type(&mut self, content_type: &str) -> Result<(), Error> {
        self.add_header("Content-Type", content_type)
    }

    /// Append a `Content-Transfer-Encoding` header.
    pub fn add_content_transfer_encoding(&mut self, encoding: &str) -> Result<(), Error> {
        self.add_header("Content-Transfer-Encoding", encoding)
    }

    /// End the headers of the current part by appending an empty line.
    pub fn end_headers(&mut self) -> Result<(), Error> {
        self.add("\r\n".into())
    }

    /// Append the content of the current part.
    pub fn add_content(&mut self, content: impl Into<Content>) -> Result<(), Error> {
        self.add(content.into())
    }

    /// End the current part.
    pub fn end_part(&mut self) -> Result<(), Error> {
        self.add("\r\n".into())
    }

    /// Append a finished multipart body as a nested part.
    ///
    /// The nested body is emitted as a part of its own whose `Content-Type`
    /// header is the nested body's content type and whose content is the
    /// nested body's byte stream, read lazily. Returns
    /// [`Error::NotFinished`] if the nested body is not finished, since its
    /// content and length are only stable once finished.
    pub fn add_multipart(&mut self, multipart: Multipart) -> Result<(), Error> {
        if !multipart.is_finished() {
            return Err(Error::NotFinished);
        }

        self.start_part()?;
        self.add_content_type(multipart.content_type())?;
        self.end_headers()?;

        let length = multipart.content_length();
        let mut nested = multipart;
        let producer = move |max_length| {
            nested
                .read_chunk(max_length)
                .map_err(io::Error::from)
        };
        self.add_content(match length {
            Some(length) => Content::from_producer_sized(producer, length),
            None => Content::from_producer(producer),
        })?;

        self.end_part()
    }

    /// Append one complete part with a `Content-Type` header and an optional
    /// `Content-Transfer-Encoding`, the sequence shared by the mixed,
    /// alternative and related builders.
    pub(crate) fn add_typed_part(
        &mut self,
        content: Content,
        content_type: &str,
        transfer_encoding: Option<&str>,
    ) -> Result<(), Error> {
        self.start_part()?;
        self.add_content_type(content_type)?;
        if let Some(encoding) = transfer_encoding.filter(|s| !s.is_empty()) {
            self.add_content_transfer_encoding(encoding)?;
        }
        self.end_headers()?;
        self.add_content(content)?;
        self.end_part()
    }

    /// Finish this body by appending the terminating boundary marker.
    ///
    /// Nothing can be appended afterwards, and reading becomes possible.
    /// Calling `finish` a second time returns [`Error::Finished`].
    pub fn finish(&mut self) -> Result<(), Error> {
        let line = format!("--{}--\r\n", self.boundary);
        self.add(line.into())?;
        self.finished = true;

        tracing::debug!(
            boundary = %self.boundary,
            parts = self.parts.len(),
            content_length = ?self.content_length,
            "multipart body finished"
        );

        Ok(())
    }

    /// Append one part, keeping the running content length up to date.
    fn add(&mut self, content: Content) -> Result<(), Error> {
        if self.finished {
            return Err(Error::Finished);
        }

        if content.is_literal() {
            // Literals always contribute their exact length.
            if let Some(total) = &mut self.content_length {
                *total += content.len().unwrap_or(0);
            }
        } else {
            match content.len() {
                // One undeclared stream or producer length makes the total
                // unknown for good.
                None => self.content_length = None,
                Some(length) => {
                    if let Some(total) = &mut self.content_length {
                        *total += length;
                    }
                }
            }
        }

        tracing::trace!(part = ?content, "part appended");
        self.parts.push(content);

        Ok(())
    }

    /// Read the next chunk of this body, at most `max_length` bytes long.
    ///
    /// An empty result means the whole body has been read. Returns
    /// [`Error::NotFinished`] before [`finish`](Multipart::finish) has been
    /// called, and [`Error::Io`] if a stream or producer part fails; such a
    /// failure is terminal for the body.
    pub fn read_chunk(&mut self, max_length: usize) -> Result<Vec<u8>, Error> {
        if !self.finished {
            return Err(Error::NotFinished);
        }
        if max_length == 0 {
            return Ok(Vec::new());
        }

        self.do_read(max_length)
    }

    fn do_read(&mut self, max_length: usize) -> Result<Vec<u8>, Error> {
        while let Some(part) = self.parts.get_mut(self.index) {
            let chunk = part.pull(&mut self.literal_pos, max_length)?;
            if !chunk.is_empty() {
                return Ok(chunk);
            }
            self.index += 1;
            self.literal_pos = 0;
        }

        Ok(Vec::new())
    }

    /// Buffer the entire body in memory, using the default chunk size.
    ///
    /// See [`buffer_with_size`](Multipart::buffer_with_size).
    pub fn buffer(&mut self) -> Result<&[u8], Error> {
        self.buffer_with_size(DEFAULT_BUFFER_SIZE)
    }

    /// Buffer the entire body in memory and return its bytes.
    ///
    /// The body's parts are drained through the chunked reader and replaced
    /// by a single literal holding the concatenated output, after which the
    /// content length is exactly known. The read cursor is reset to the
    /// start, so a subsequent [`read_chunk`](Multipart::read_chunk) replays
    /// the body from the beginning. Buffering an already buffered body just
    /// returns the cached bytes (and still resets the cursor).
    ///
    /// Buffer before the first `read_chunk`: chunks that were already read
    /// are gone and will be missing from the buffered content.
    pub fn buffer_with_size(&mut self, buffer_size: usize) -> Result<&[u8], Error> {
        if !self.finished {
            return Err(Error::NotFinished);
        }
        if buffer_size == 0 {
            return Err(Error::InvalidArgument("buffer_size must be positive"));
        }

        if !self.is_buffered() {
            self.index = 0;
            self.literal_pos = 0;

            let mut content = Vec::new();
            loop {
                let chunk = self.do_read(buffer_size)?;
                if chunk.is_empty() {
                    break;
                }
                content.extend_from_slice(&chunk);
            }

            tracing::debug!(len = content.len(), "multipart body buffered");

            self.content_length = Some(content.len() as u64);
            self.parts.clear();
            self.parts.push(content.into());
        }

        self.index = 0;
        self.literal_pos = 0;

        match self.parts.first().and_then(Content::as_literal) {
            Some(bytes) => Ok(bytes),
            None => unreachable!("a buffered body holds a single literal part"),
        }
    }

    /// Buffer the entire body and return it as a string.
    ///
    /// This is the materialized form to hand to collaborators that want the
    /// whole body at once, such as a mail transport. Returns
    /// [`Error::InvalidUtf8`] if the body is not valid UTF-8.
    pub fn text(&mut self) -> Result<String, Error> {
        let bytes = self.buffer()?.to_vec();
        Ok(String::from_utf8(bytes)?)
    }
}

/// Adapter for feeding the body to any `Read`-consuming transport, such as an
/// HTTP client sending a request body.
impl Read for Multipart {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk = self.read_chunk(buf.len())?;
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

impl fmt::Debug for Multipart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multipart")
            .field("boundary", &self.boundary)
            .field("parts", &self.parts.len())
            .field("content_length", &self.content_length)
            .field("finished", &self.finished)
            .finish()
    }
}

pub(crate) fn check_non_empty(value: &str, message: &'static str) -> Result<(), Error> {
    if value.trim().is_empty() {
        Err(Error::InvalidArgument(message))
    } else {
        Ok(())
    }
}
