use crate::{multipart::check_non_empty, Content, Error, Multipart};

/// Builder for a `multipart/alternative` body: several renditions of the same
/// content, such as a plain text and an HTML version of a mail message.
#[derive(Debug)]
pub struct AlternativeBuilder {
    inner: Multipart,
}

impl AlternativeBuilder {
    /// Create a new builder with a generated boundary.
    pub fn new() -> Self {
        Self::with_boundary("")
    }

    /// Create a new builder with the given boundary. A random one is
    /// generated if the boundary is empty.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            inner: Multipart::for_content_type(boundary.into(), "multipart/alternative"),
        }
    }

    /// Append one alternative with the given content type and an optional
    /// content transfer encoding.
    ///
    /// Alternatives should be appended in increasing order of preference;
    /// consumers pick the last one they can display.
    pub fn part(
        mut self,
        content: impl Into<Content>,
        content_type: &str,
        transfer_encoding: Option<&str>,
    ) -> Result<Self, Error> {
        check_non_empty(content_type, "content_type must be non-empty")?;

        self.inner
            .add_typed_part(content.into(), content_type, transfer_encoding)?;
        Ok(self)
    }

    /// Append a finished multipart body as a nested alternative, e.g. a
    /// `multipart/related` body holding an HTML rendition with inline images.
    pub fn nested(mut self, multipart: Multipart) -> Result<Self, Error> {
        self.inner.add_multipart(multipart)?;
        Ok(self)
    }

    /// Finish the body so that it can be read.
    pub fn finish(mut self) -> Result<Multipart, Error> {
        self.inner.finish()?;
        Ok(self.inner)
    }
}

impl Default for AlternativeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
