use crate::http::HttpError;
use std::collections::HashMap;

/// HTTP request methods.
///
/// The server fully routes GET and POST; the remaining methods are parsed so
/// they can be answered with 405 Method Not Allowed where appropriate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Matching is case-sensitive per the wire format; extension methods are
    /// not supported and yield `None`.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }
}

/// The first line of a request: method, target and protocol version.
///
/// Construction is all-or-nothing: [`RequestLine::parse`] either yields all
/// three fields or an error, never a partially filled line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// Path plus optional query component, exactly as sent (not decoded).
    pub target: String,
    /// Protocol version token, typically "HTTP/1.1".
    pub version: String,
}

impl RequestLine {
    /// Parses a raw request line.
    ///
    /// The line is split on runs of whitespace and must produce exactly three
    /// tokens. Anything else is a structural error on the line itself,
    /// distinct from body-framing errors.
    pub fn parse(raw: &str) -> Result<Self, HttpError> {
        let mut tokens = raw.split_whitespace();

        let (Some(method), Some(target), Some(version), None) =
            (tokens.next(), tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(HttpError::InvalidRequestLine(raw.to_string()));
        };

        let method = Method::from_token(method)
            .ok_or_else(|| HttpError::InvalidRequestLine(raw.to_string()))?;

        Ok(Self {
            method,
            target: target.to_string(),
            version: version.to_string(),
        })
    }
}

/// Case-insensitive header map with canonicalized keys.
///
/// Keys are stored in canonical form ("content-length" becomes
/// "Content-Length"), so lookups accept any casing. A duplicate key
/// overwrites the earlier value: last occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    values: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(canonicalize(key), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&canonicalize(key)).map(|v| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(&canonicalize(key))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Canonical header-name form: each dash-separated part starts with an
/// uppercase letter, the rest is lowercase ("user-agent" -> "User-Agent").
fn canonicalize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = true;

    for c in key.chars() {
        if c == '-' {
            out.push('-');
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

/// A fully parsed request: request line, headers and body.
///
/// Owned exclusively by one connection for the lifetime of a single
/// request/response exchange.
#[derive(Debug, Clone)]
pub struct Request {
    pub line: RequestLine,
    pub headers: Headers,
    /// Request body, exactly `Content-Length` bytes (empty when the header
    /// is absent).
    pub body: Vec<u8>,
}

impl Request {
    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Declared body length.
    ///
    /// Absent header or a non-positive value means no body is read at all.
    /// A value that is not an integer is a parse error (400), not zero.
    pub fn content_length(&self) -> Result<usize, HttpError> {
        let Some(raw) = self.header("Content-Length") else {
            return Ok(0);
        };

        let n: i64 = raw
            .trim()
            .parse()
            .map_err(|_| HttpError::InvalidContentLength(raw.to_string()))?;

        Ok(usize::try_from(n).unwrap_or(0))
    }

    /// Whether the client advertised gzip support.
    ///
    /// Substring match on the Accept-Encoding value; quality values are not
    /// interpreted.
    pub fn accepts_gzip(&self) -> bool {
        self.header("Accept-Encoding")
            .map(|v| v.contains("gzip"))
            .unwrap_or(false)
    }
}
