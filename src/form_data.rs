use crate::{multipart::check_non_empty, Content, Error, Multipart};

/// Builder for a `multipart/form-data` body as described in [RFC
/// 7578](https://datatracker.ietf.org/doc/html/rfc7578), the format browsers
/// use to submit forms with file uploads.
#[derive(Debug)]
pub struct FormDataBuilder {
    inner: Multipart,
}

impl FormDataBuilder {
    /// Create a new builder with a generated boundary.
    pub fn new() -> Self {
        Self::with_boundary("")
    }

    /// Create a new builder with the given boundary. A random one is
    /// generated if the boundary is empty.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            inner: Multipart::for_content_type(boundary.into(), "multipart/form-data"),
        }
    }

    /// Append a field with a given name and value.
    ///
    /// Duplicate fields with the same name are allowed and will be preserved
    /// in the order they are added.
    pub fn field(mut self, name: &str, value: impl Into<Content>) -> Result<Self, Error> {
        check_non_empty(name, "name must be non-empty")?;

        self.inner.start_part()?;
        self.inner
            .add_content_disposition("form-data", Some(name), None)?;
        self.inner.end_headers()?;
        self.inner.add_content(value)?;
        self.inner.end_part()?;
        Ok(self)
    }

    /// Append a file field.
    pub fn file(
        mut self,
        name: &str,
        filename: &str,
        content: impl Into<Content>,
        content_type: &str,
    ) -> Result<Self, Error> {
        check_non_empty(name, "name must be non-empty")?;
        check_non_empty(filename, "filename must be non-empty")?;
        check_non_empty(content_type, "content_type must be non-empty")?;

        self.inner.start_part()?;
        self.inner
            .add_content_disposition("form-data", Some(name), Some(filename))?;
        self.inner.add_content_type(content_type)?;
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

impl Default for FormDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}
