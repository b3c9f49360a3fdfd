use crate::http::HttpError;
use crate::http::request::{Headers, Request, RequestLine};

/// Parses an accumulated header block into a request with an empty body.
///
/// The block is everything read up to (and excluding) the blank line that
/// ends the headers. The first line is the request line, the remainder are
/// header lines. Body bytes are attached later, once `Content-Length` is
/// known.
pub fn parse_request_head(block: &str) -> Result<Request, HttpError> {
    let mut lines = block.split('\n').map(|l| l.trim_end_matches('\r'));

    let line = RequestLine::parse(lines.next().unwrap_or(""))?;
    let headers = parse_headers(lines)?;

    Ok(Request {
        line,
        headers,
        body: Vec::new(),
    })
}

/// Parses header lines into a canonicalized map.
///
/// Each line is split once on the first colon; a line with no colon is a
/// structural error. Key and value are trimmed, later duplicates overwrite
/// earlier ones. Empty lines are skipped silently; irregular clients send
/// stray blank lines mid-block and rejecting them buys nothing.
fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> Result<Headers, HttpError> {
    let mut headers = Headers::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| HttpError::InvalidHeader(line.to_string()))?;

        headers.insert(key.trim(), value.trim());
    }

    Ok(headers)
}
