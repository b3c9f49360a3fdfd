//! Request routing.
//!
//! The router is deliberately thin glue over the parsing/response core: a
//! pure mapping from (method, target, headers, body) to (status, content
//! type, body bytes). Routes live in an ordered table evaluated in priority
//! order, exact matches before prefix matches before the 404 default, so new
//! routes are additive rather than another arm in a conditional.

use crate::http::request::{Method, Request};
use crate::http::response::StatusCode;
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::PathBuf;

/// What a handler produced; the response builder wraps this with framing and
/// gzip negotiation.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteOutcome {
    pub status: StatusCode,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
}

impl RouteOutcome {
    fn empty(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    fn text(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: Some("text/plain"),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Matcher {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Matcher {
    /// On a hit, returns the remainder of the path after the matched part
    /// (empty for exact matches).
    fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            Matcher::Exact(p) => (path == *p).then_some(""),
            Matcher::Prefix(p) => path.strip_prefix(p),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Root,
    UserAgent,
    Echo,
    Files,
}

struct Route {
    matcher: Matcher,
    endpoint: Endpoint,
}

/// Route table, highest priority first.
const ROUTES: &[Route] = &[
    Route {
        matcher: Matcher::Exact("/"),
        endpoint: Endpoint::Root,
    },
    Route {
        matcher: Matcher::Exact("/user-agent"),
        endpoint: Endpoint::UserAgent,
    },
    Route {
        matcher: Matcher::Prefix("/echo/"),
        endpoint: Endpoint::Echo,
    },
    Route {
        matcher: Matcher::Prefix("/files/"),
        endpoint: Endpoint::Files,
    },
];

/// Dispatches requests against the route table.
///
/// Each connection builds its own router from the shared configuration;
/// the only resource routers share is the filesystem, where concurrent
/// writes to the same name race at the filesystem level (last write wins).
#[derive(Debug, Clone)]
pub struct Router {
    files_dir: Option<PathBuf>,
}

impl Router {
    pub fn new(files_dir: Option<PathBuf>) -> Self {
        Self { files_dir }
    }

    pub async fn dispatch(&self, req: &Request) -> RouteOutcome {
        // The query component never participates in matching.
        let path = req.line.target.split('?').next().unwrap_or("");

        for route in ROUTES {
            if let Some(rest) = route.matcher.matches(path) {
                tracing::debug!(endpoint = ?route.endpoint, path, "Route matched");
                return self.handle(route.endpoint, rest, req).await;
            }
        }

        RouteOutcome::empty(StatusCode::NotFound)
    }

    async fn handle(&self, endpoint: Endpoint, rest: &str, req: &Request) -> RouteOutcome {
        match endpoint {
            Endpoint::Root => RouteOutcome::empty(StatusCode::Ok),

            Endpoint::Echo => {
                RouteOutcome::text(StatusCode::Ok, percent_decode(rest).into_owned())
            }

            Endpoint::UserAgent => {
                let agent = req.header("User-Agent").unwrap_or("unknown");
                RouteOutcome::text(StatusCode::Ok, agent)
            }

            Endpoint::Files => self.files(rest, req).await,
        }
    }

    async fn files(&self, name: &str, req: &Request) -> RouteOutcome {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            // Traversal attempts never reach the filesystem.
            return RouteOutcome::empty(StatusCode::NotFound);
        }

        let Some(dir) = &self.files_dir else {
            return RouteOutcome::empty(StatusCode::InternalServerError);
        };
        let path = dir.join(name);

        match req.line.method {
            Method::GET => match tokio::fs::read(&path).await {
                Ok(bytes) => RouteOutcome {
                    status: StatusCode::Ok,
                    content_type: Some("application/octet-stream"),
                    body: bytes,
                },
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    RouteOutcome::empty(StatusCode::NotFound)
                }
                Err(e) => {
                    tracing::error!("Failed to read {}: {}", path.display(), e);
                    RouteOutcome::empty(StatusCode::InternalServerError)
                }
            },

            Method::POST => match tokio::fs::write(&path, &req.body).await {
                Ok(()) => RouteOutcome::empty(StatusCode::Created),
                Err(e) => {
                    tracing::error!("Failed to write {}: {}", path.display(), e);
                    RouteOutcome::empty(StatusCode::InternalServerError)
                }
            },

            _ => RouteOutcome::empty(StatusCode::MethodNotAllowed),
        }
    }
}

/// Percent-decodes a path segment.
///
/// Returns `Cow::Borrowed` when nothing needed decoding. Invalid percent
/// sequences are passed through as-is; plus signs are preserved (no space
/// decoding in paths).
pub fn percent_decode(s: &str) -> Cow<'_, str> {
    if !s.contains('%') {
        return Cow::Borrowed(s);
    }

    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    out.push(hi << 4 | lo);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
