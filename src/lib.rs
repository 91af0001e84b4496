//! Incremental, streaming construction of MIME multipart message bodies.
//!
//! This crate builds `multipart/mixed`, `multipart/alternative`,
//! `multipart/related` and `multipart/form-data` bodies part by part, then
//! hands them back as a lazily produced byte stream in the exact [RFC
//! 2046](https://datatracker.ietf.org/doc/html/rfc2046) wire format. The
//! body is never materialized in memory unless you explicitly ask for it
//! with [`Multipart::buffer`].
//!
//! It is write-only: parsing existing multipart bodies, content negotiation
//! and the transport that ultimately consumes the bytes (an HTTP client, a
//! mailer) are out of scope. The finished body implements
//! [`std::io::Read`], so it plugs into anything that consumes a reader.
//!
//! # Building a body
//!
//! Each subtype has a small chainable builder that emits the conventional
//! headers for its parts and finishes into a [`Multipart`]:
//!
//! ```
//! use multipart_body::FormDataBuilder;
//!
//! # fn main() -> Result<(), multipart_body::Error> {
//! let mut body = FormDataBuilder::new()
//!     .field("username", "alice")?
//!     .file("avatar", "avatar.png", &b"\x89PNG..."[..], "image/png")?
//!     .finish()?;
//!
//! // Content-Type and Content-Length headers for the upload:
//! assert!(body.content_type().starts_with("multipart/form-data; boundary="));
//! assert!(body.content_length().is_some());
//!
//! // Pull the body in chunks, e.g. into an HTTP request:
//! loop {
//!     let chunk = body.read_chunk(8192)?;
//!     if chunk.is_empty() {
//!         break;
//!     }
//!     // write the chunk to the transport...
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Streaming parts
//!
//! Part content can be a literal, any open [`std::io::Read`] stream, or a
//! *producer* callback that is asked repeatedly for at most N bytes; see
//! [`Content`]. Streams and producers are pulled only while reading, so
//! large files never need to fit in memory. The crate never closes a stream
//! it was given; that stays the caller's job.
//!
//! # Nesting
//!
//! A finished body can be embedded into another one, e.g. a
//! `multipart/related` HTML-with-images rendition inside a
//! `multipart/alternative` mail body:
//!
//! ```
//! use multipart_body::{AlternativeBuilder, RelatedBuilder};
//!
//! # fn main() -> Result<(), multipart_body::Error> {
//! let related = RelatedBuilder::new()
//!     .part("<html><img src=\"cid:logo\"></html>", "text/html", None)?
//!     .inline_file("logo", "logo.png", "...image bytes...", "image/png", None)?
//!     .finish()?;
//!
//! let mut mail = AlternativeBuilder::new()
//!     .part("Hello World", "text/plain", None)?
//!     .nested(related)?
//!     .finish()?;
//!
//! let text = mail.text()?;
//! assert!(text.starts_with(&format!("--{}\r\n", mail.boundary())));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]

mod alternative;
mod boundary;
mod content;
mod error;
mod form_data;
mod mixed;
mod multipart;
mod related;

pub use crate::{
    alternative::AlternativeBuilder,
    content::Content,
    error::Error,
    form_data::FormDataBuilder,
    mixed::MixedBuilder,
    multipart::{Multipart, DEFAULT_BUFFER_SIZE},
    related::RelatedBuilder,
};
