use crate::{multipart::check_non_empty, Content, Error, Multipart};

/// Builder for a `multipart/related` body: a root part plus the resources it
/// references, such as an HTML document with inline images addressed by
/// content ID.
#[derive(Debug)]
pub struct RelatedBuilder {
    inner: Multipart,
}

impl RelatedBuilder {
    /// Create a new builder with a generated boundary.
    pub fn new() -> Self {
        Self::with_boundary("")
    }

    /// Create a new builder with the given boundary. A random one is
    /// generated if the boundary is empty.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            inner: Multipart::for_content_type(boundary.into(), "multipart/related"),
        }
    }

    /// Append a part with the given content type and an optional content
    /// transfer encoding. The first part appended is the root part.
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

    /// Append an inline file that other parts can refer to by its content ID
    /// (e.g. `<img src="cid:...">`).
    pub fn inline_file(
        mut self,
        content_id: &str,
        filename: &str,
        content: impl Into<Content>,
        content_type: &str,
        transfer_encoding: Option<&str>,
    ) -> Result<Self, Error> {
        check_non_empty(content_id, "content_id must be non-empty")?;
        check_non_empty(filename, "filename must be non-empty")?;
        check_non_empty(content_type, "content_type must be non-empty")?;

        self.inner.start_part()?;
        self.inner.add_content_type(content_type)?;
        self.inner.add_content_id(content_id)?;
        if let Some(encoding) = transfer_encoding.filter(|s| !s.is_empty()) {
            self.inner.add_content_transfer_encoding(encoding)?;
        }
        self.inner
            .add_content_disposition("inline", None, Some(filename))?;
        self.inner.end_headers()?;
        self.inner.add_content(content)?;
        self.inner.end_part()?;
        Ok(self)
    }

    /// Finish the body so that it can be read.
    pub fn finish(mut self) -> Result<Multipart, Error> {
        self.inner.finish()?;
        Ok(self.inner)
    }
}

impl Default for RelatedBuilder {
    fn default() -> Self {
        Self::new()
    }
}
