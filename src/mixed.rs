use crate::{multipart::check_non_empty, Content, Error, Multipart};

/// Builder for a `multipart/mixed` body, typically used for mail messages
/// carrying independent parts such as attachments.
#[derive(Debug)]
pub struct MixedBuilder {
    inner: Multipart,
}

impl MixedBuilder {
    /// Create a new builder with a generated boundary.
    pub fn new() -> Self {
        Self::with_boundary("")
    }

    /// Create a new builder with the given boundary. A random one is
    /// generated if the boundary is empty.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            inner: Multipart::for_content_type(boundary.into(), "multipart/mixed"),
        }
    }

    /// Append a generic part with the given content type and an optional
    /// content transfer encoding.
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

    /// Append a file attachment.
    pub fn attachment(
        mut self,
        filename: &str,
        content: impl Into<Content>,
        content_type: &str,
        transfer_encoding: Option<&str>,
    ) -> Result<Self, Error> {
        check_non_empty(filename, "filename must be non-empty")?;
        check_non_empty(content_type, "content_type must be non-empty")?;

        self.inner.start_part()?;
        self.inner.add_content_type(content_type)?;
        if let Some(encoding) = transfer_encoding.filter(|s| !s.is_empty()) {
            self.inner.add_content_transfer_encoding(encoding)?;
        }
        self.inner
            .add_content_disposition("attachment", None, Some(filename))?;
        self.inner.end_headers()?;
        self.inner.add_content(content)?;
        self.inner.end_part()?;
        Ok(self)
    }

    /// Append a finished multipart body as a nested part.
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

impl Default for MixedBuilder {
    fn default() -> Self {
        Self::new()
    }
}
