use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

/// HTTP status codes emitted by the server.
///
/// The set is fixed: routing can only produce these six outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    /// Maps a numeric code back onto the supported set.
    ///
    /// Anything outside the fixed table falls back to 500. A safety net for
    /// glue code; correct routing never produces an unknown code.
    pub fn from_u16(code: u16) -> Self {
        match code {
            200 => StatusCode::Ok,
            201 => StatusCode::Created,
            400 => StatusCode::BadRequest,
            404 => StatusCode::NotFound,
            405 => StatusCode::MethodNotAllowed,
            _ => StatusCode::InternalServerError,
        }
    }
}

/// A complete HTTP response ready to be serialized.
///
/// Headers are kept in emission order. `Content-Length` always matches the
/// final body, and `Content-Encoding: gzip` is present exactly when the body
/// was actually compressed.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Looks up a header value; emission order holds at most one entry per
    /// name here, so first match is the match.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// An empty-body response with the given status, used for error paths.
    pub fn empty(status: StatusCode) -> Self {
        ResponseBuilder::new(status).build()
    }
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("text/plain")
///     .body(b"hello".to_vec())
///     .gzip(client_accepts_gzip)
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: Option<String>,
    body: Vec<u8>,
    gzip: bool,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
            gzip: false,
        }
    }

    /// Sets the Content-Type header. An empty string leaves it out.
    pub fn content_type(mut self, ct: impl Into<String>) -> Self {
        let ct = ct.into();
        self.content_type = (!ct.is_empty()).then_some(ct);
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Requests gzip compression of the body. Pass the client's
    /// Accept-Encoding verdict here.
    pub fn gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }

    /// Builds the final response.
    ///
    /// Compression runs first so that `Content-Length` is computed from the
    /// body actually written. A failed compression falls back to the
    /// uncompressed body with no encoding header; it must never abort the
    /// response.
    pub fn build(mut self) -> Response {
        let mut headers = Vec::new();

        if let Some(ct) = self.content_type.take() {
            headers.push(("Content-Type".to_string(), ct));
        }

        if self.gzip && !self.body.is_empty() {
            match compress(&self.body) {
                Ok(compressed) => {
                    self.body = compressed;
                    headers.push(("Content-Encoding".to_string(), "gzip".to_string()));
                }
                Err(e) => {
                    tracing::warn!("gzip failed, sending identity body: {}", e);
                }
            }
        }

        headers.push(("Content-Length".to_string(), self.body.len().to_string()));

        Response {
            status: self.status,
            headers,
            body: self.body,
        }
    }
}

/// Compresses a fully materialized body in one pass. Bodies here are always
/// small and buffered, so streaming would buy nothing.
fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
