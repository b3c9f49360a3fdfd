//! HTTP protocol implementation.
//!
//! This module implements a single-request HTTP/1.1 server pipeline on top of
//! a raw TCP stream. No HTTP library is involved; the wire format is read and
//! written by hand.
//!
//! # Architecture
//!
//! - **`reader`**: Buffered line reader for the header block plus the
//!   length-delimited body read
//! - **`parser`**: Turns an accumulated header block into a [`request::Request`]
//! - **`request`**: Request line, canonicalized header map and body types
//! - **`response`**: HTTP response representation with builder pattern and
//!   gzip negotiation
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`connection`**: The per-connection state machine tying it all together
//!
//! # Connection State Machine
//!
//! Each connection handles exactly one request, then closes:
//!
//! ```text
//! ReadingHeaders → ParsingHeaders → ReadingBody → Routing → WritingResponse → Closed
//! ```
//!
//! Transitions are strictly sequential; there is no keep-alive, so no state is
//! ever revisited. Any error short-circuits to a best-effort 400/500 response
//! followed by `Closed`.

pub mod connection;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;

use crate::http::response::StatusCode;
use thiserror::Error;

/// Errors produced while reading and parsing a request off the wire.
///
/// Every variant is connection-scoped: the connection that hit it is torn
/// down and no other connection is affected.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request line did not split into exactly method, target and version.
    #[error("malformed request line: {0:?}")]
    InvalidRequestLine(String),

    /// A header line with no colon.
    #[error("malformed header line: {0:?}")]
    InvalidHeader(String),

    /// `Content-Length` value that does not parse as an integer.
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// The declared `Content-Length` exceeds what the client actually sent.
    #[error("body too short: expected {expected} bytes, got {got}")]
    BodyTooShort { expected: usize, got: usize },

    /// Header block bytes that are not valid UTF-8.
    #[error("header block is not valid UTF-8")]
    InvalidEncoding,

    /// Transport failure while reading or writing the connection.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}

impl HttpError {
    /// Status code for the best-effort error response written before the
    /// connection is closed.
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::InvalidRequestLine(_)
            | HttpError::InvalidHeader(_)
            | HttpError::InvalidContentLength(_)
            | HttpError::BodyTooShort { .. }
            | HttpError::InvalidEncoding => StatusCode::BadRequest,
            HttpError::Io(_) => StatusCode::InternalServerError,
        }
    }
}
