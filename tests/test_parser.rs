use wireserve::http::HttpError;
use wireserve::http::parser::parse_request_head;
use wireserve::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = parse_request_head("GET / HTTP/1.1\r\nHost: example.com").unwrap();

    assert_eq!(req.line.method, Method::GET);
    assert_eq!(req.line.target, "/");
    assert_eq!(req.line.version, "HTTP/1.1");
    assert_eq!(req.headers.get("Host").unwrap(), "example.com");
    assert!(req.body.is_empty());
}

#[test]
fn test_parse_multiple_headers() {
    let head =
        "GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*";
    let req = parse_request_head(head).unwrap();

    assert_eq!(req.headers.get("Host").unwrap(), "example.com");
    assert_eq!(req.headers.get("User-Agent").unwrap(), "test-client");
    assert_eq!(req.headers.get("Accept").unwrap(), "*/*");
}

#[test]
fn test_parse_request_with_query_string() {
    let req = parse_request_head("GET /search?q=rust HTTP/1.1\r\nHost: example.com").unwrap();

    assert_eq!(req.line.target, "/search?q=rust");
}

#[test]
fn test_parse_header_values_trimmed() {
    let req = parse_request_head("GET / HTTP/1.1\r\n  Host  :   example.com  ").unwrap();

    assert_eq!(req.headers.get("Host").unwrap(), "example.com");
}

#[test]
fn test_parse_header_value_with_colon() {
    // Only the first colon splits key from value.
    let req = parse_request_head("GET / HTTP/1.1\r\nHost: example.com:8080").unwrap();

    assert_eq!(req.headers.get("Host").unwrap(), "example.com:8080");
}

#[test]
fn test_parse_duplicate_header_last_wins() {
    let head = "GET / HTTP/1.1\r\nX-Tag: one\r\nX-Tag: two";
    let req = parse_request_head(head).unwrap();

    assert_eq!(req.headers.get("X-Tag").unwrap(), "two");
    assert_eq!(req.headers.len(), 1);
}

#[test]
fn test_parse_header_keys_canonicalized() {
    let req = parse_request_head("GET / HTTP/1.1\r\ncontent-length: 7").unwrap();

    assert_eq!(req.headers.get("Content-Length").unwrap(), "7");
}

#[test]
fn test_parse_empty_header_lines_skipped() {
    let head = "GET / HTTP/1.1\r\nHost: a\r\n\r\nUser-Agent: b";
    let req = parse_request_head(head).unwrap();

    assert_eq!(req.headers.len(), 2);
    assert_eq!(req.headers.get("User-Agent").unwrap(), "b");
}

#[test]
fn test_parse_tolerates_bare_newlines() {
    let req = parse_request_head("GET / HTTP/1.1\nHost: example.com").unwrap();

    assert_eq!(req.line.target, "/");
    assert_eq!(req.headers.get("Host").unwrap(), "example.com");
}

#[test]
fn test_parse_malformed_header_no_colon() {
    let result = parse_request_head("GET / HTTP/1.1\r\nBrokenHeader");

    assert!(matches!(result, Err(HttpError::InvalidHeader(_))));
}

#[test]
fn test_parse_malformed_header_rejected_anywhere() {
    let result = parse_request_head("GET / HTTP/1.1\r\nHost: a\r\nnocolon\r\nAccept: */*");

    assert!(matches!(result, Err(HttpError::InvalidHeader(_))));
}

#[test]
fn test_parse_malformed_request_line() {
    let result = parse_request_head("GET /\r\nHost: example.com");

    assert!(matches!(result, Err(HttpError::InvalidRequestLine(_))));
}

#[test]
fn test_parse_empty_block() {
    assert!(matches!(
        parse_request_head(""),
        Err(HttpError::InvalidRequestLine(_))
    ));
}

#[test]
fn test_parse_headerless_request() {
    let req = parse_request_head("GET / HTTP/1.1").unwrap();

    assert!(req.headers.is_empty());
}
