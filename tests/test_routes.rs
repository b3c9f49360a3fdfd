use std::path::PathBuf;
use wireserve::http::request::{Headers, Method, Request, RequestLine};
use wireserve::http::response::StatusCode;
use wireserve::routes::{Router, percent_decode};

fn request(method: Method, target: &str) -> Request {
    Request {
        line: RequestLine {
            method,
            target: target.to_string(),
            version: "HTTP/1.1".to_string(),
        },
        headers: Headers::new(),
        body: vec![],
    }
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wireserve-test-{}-{}", std::process::id(), name));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_root_route() {
    let router = Router::new(None);
    let outcome = router.dispatch(&request(Method::GET, "/")).await;

    assert_eq!(outcome.status, StatusCode::Ok);
    assert!(outcome.body.is_empty());
    assert!(outcome.content_type.is_none());
}

#[tokio::test]
async fn test_echo_route() {
    let router = Router::new(None);
    let outcome = router.dispatch(&request(Method::GET, "/echo/hello")).await;

    assert_eq!(outcome.status, StatusCode::Ok);
    assert_eq!(outcome.content_type, Some("text/plain"));
    assert_eq!(outcome.body, b"hello");
}

#[tokio::test]
async fn test_echo_route_percent_decoded() {
    let router = Router::new(None);
    let outcome = router
        .dispatch(&request(Method::GET, "/echo/hello%20world"))
        .await;

    assert_eq!(outcome.body, b"hello world");
}

#[tokio::test]
async fn test_echo_route_ignores_query() {
    let router = Router::new(None);
    let outcome = router
        .dispatch(&request(Method::GET, "/echo/abc?verbose=1"))
        .await;

    assert_eq!(outcome.body, b"abc");
}

#[tokio::test]
async fn test_user_agent_route() {
    let router = Router::new(None);
    let mut req = request(Method::GET, "/user-agent");
    req.headers.insert("User-Agent", "foobar/1.2.3");

    let outcome = router.dispatch(&req).await;

    assert_eq!(outcome.status, StatusCode::Ok);
    assert_eq!(outcome.content_type, Some("text/plain"));
    assert_eq!(outcome.body, b"foobar/1.2.3");
}

#[tokio::test]
async fn test_user_agent_route_missing_header() {
    let router = Router::new(None);
    let outcome = router.dispatch(&request(Method::GET, "/user-agent")).await;

    assert_eq!(outcome.body, b"unknown");
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let router = Router::new(None);
    let outcome = router.dispatch(&request(Method::GET, "/unknown/path")).await;

    assert_eq!(outcome.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_files_post_then_get() {
    let dir = temp_dir("post-then-get");
    let router = Router::new(Some(dir));

    let mut post = request(Method::POST, "/files/roundtrip.txt");
    post.body = b"abc".to_vec();
    let outcome = router.dispatch(&post).await;
    assert_eq!(outcome.status, StatusCode::Created);

    let outcome = router
        .dispatch(&request(Method::GET, "/files/roundtrip.txt"))
        .await;
    assert_eq!(outcome.status, StatusCode::Ok);
    assert_eq!(outcome.content_type, Some("application/octet-stream"));
    assert_eq!(outcome.body, b"abc");
}

#[tokio::test]
async fn test_files_missing_is_404() {
    let dir = temp_dir("missing");
    let router = Router::new(Some(dir));

    let outcome = router
        .dispatch(&request(Method::GET, "/files/not-there.txt"))
        .await;

    assert_eq!(outcome.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_files_unconfigured_is_500() {
    let router = Router::new(None);
    let outcome = router.dispatch(&request(Method::GET, "/files/x")).await;

    assert_eq!(outcome.status, StatusCode::InternalServerError);
}

#[tokio::test]
async fn test_files_wrong_method_is_405() {
    let dir = temp_dir("wrong-method");
    let router = Router::new(Some(dir));

    for method in [Method::PUT, Method::DELETE, Method::PATCH] {
        let outcome = router.dispatch(&request(method, "/files/x")).await;
        assert_eq!(outcome.status, StatusCode::MethodNotAllowed);
    }
}

#[tokio::test]
async fn test_files_traversal_rejected() {
    let dir = temp_dir("traversal");
    let router = Router::new(Some(dir));

    for target in [
        "/files/../secret.txt",
        "/files/..",
        "/files/sub/inner.txt",
        "/files/",
    ] {
        let outcome = router.dispatch(&request(Method::GET, target)).await;
        assert_eq!(outcome.status, StatusCode::NotFound, "target {}", target);
    }
}

#[test]
fn test_percent_decode_plain() {
    assert_eq!(percent_decode("/simple/path"), "/simple/path");
}

#[test]
fn test_percent_decode_sequences() {
    assert_eq!(percent_decode("hello%20world"), "hello world");
    assert_eq!(percent_decode("%2F"), "/");
}

#[test]
fn test_percent_decode_invalid_sequences_pass_through() {
    assert_eq!(percent_decode("100%"), "100%");
    assert_eq!(percent_decode("a%zzb"), "a%zzb");
}

#[test]
fn test_percent_decode_preserves_plus() {
    assert_eq!(percent_decode("a+b"), "a+b");
}
