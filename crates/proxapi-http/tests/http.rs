use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use proxapi::{Error, Proxy, ProxySettings, Strategy};
use proxapi_http::{HttpAdapter, HttpError};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    name: String,
    followers: u32,
}

fn response(status: &str, headers: &[&str], body: &str) -> String {
    let mut raw = format!("HTTP/1.1 {status}\r\nconnection: close\r\ncontent-length: {}\r\n", body.len());
    for header in headers {
        raw.push_str(header);
        raw.push_str("\r\n");
    }
    raw.push_str("\r\n");
    raw.push_str(body);
    raw
}

/// Serves the canned responses in order, one per connection.
async fn serve(responses: Vec<String>) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        for reply in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            counter.fetch_add(1, Ordering::SeqCst);
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
    });

    (addr, hits)
}

fn users(
    addr: SocketAddr,
) -> HttpAdapter<String, User, impl Fn(&Client, &String) -> RequestBuilder + Send + Sync> {
    HttpAdapter::new(Client::new(), move |client: &Client, name: &String| {
        client.get(format!("http://{addr}/users/{name}"))
    })
}

#[tokio::test]
async fn test_json_payload() {
    let (addr, hits) = serve(vec![response(
        "200 OK",
        &["content-type: application/json"],
        r#"{"name":"john","followers":42}"#,
    )])
    .await;

    let proxy = Proxy::with_defaults(users(addr));
    let user = proxy.call(&"john".to_string()).await.unwrap();

    assert_eq!(
        user,
        User {
            name: "john".to_string(),
            followers: 42
        }
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_status_error_is_hard() {
    let (addr, _) = serve(vec![response("404 Not Found", &[], "no such user")]).await;

    let proxy = Proxy::new(users(addr), ProxySettings::default().strategy(Strategy::Retry));
    let err = proxy.call(&"nobody".to_string()).await.unwrap_err();

    match err {
        Error::Adapter(HttpError::Status { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such user");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_truncated_error_body_is_reported() {
    let truncated = "HTTP/1.1 500 Internal Server Error\r\nconnection: close\r\ncontent-length: 100\r\n\r\nshort".to_string();
    let (addr, _) = serve(vec![truncated]).await;

    let proxy = Proxy::with_defaults(users(addr));
    let err = proxy.call(&"john".to_string()).await.unwrap_err();

    match err {
        Error::Adapter(HttpError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.starts_with("<unreadable body: "), "body: {body}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_invalid_body_is_decode_error() {
    let (addr, _) = serve(vec![response("200 OK", &[], "not json")]).await;

    let proxy = Proxy::with_defaults(users(addr));
    let err = proxy.call(&"john".to_string()).await.unwrap_err();

    assert!(matches!(err, Error::Adapter(HttpError::Decode(_))));
}

#[tokio::test]
async fn test_429_aborts_and_records_delay() {
    let (addr, hits) = serve(vec![response(
        "429 Too Many Requests",
        &["retry-after: 900"],
        "",
    )])
    .await;

    let proxy = Proxy::with_defaults(users(addr));
    let err = proxy.call(&"john".to_string()).await.unwrap_err();

    assert!(err.is_rate_limited());
    assert_eq!(proxy.limit_info().retry_delay, Duration::from_secs(900));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_429_retries_after_suggested_delay() {
    let (addr, hits) = serve(vec![
        response("429 Too Many Requests", &["retry-after: 1"], ""),
        response("200 OK", &[], r#"{"name":"toto","followers":3}"#),
    ])
    .await;

    let proxy = Proxy::new(
        users(addr),
        ProxySettings::default()
            .strategy(Strategy::Retry)
            .retry_delay(Duration::from_secs(3600)),
    );
    let user = tokio::time::timeout(Duration::from_secs(10), proxy.call(&"toto".to_string()))
        .await
        .expect("retry should follow retry-after, not the default delay")
        .unwrap();

    assert_eq!(user.followers, 3);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(proxy.limit_info().retry_delay, Duration::from_secs(1));
}
