//! HTTP-level tests for the search client and local platform services.
//!
//! Each test binds a one-shot server on a loopback port that records the raw
//! request head and answers with a canned response.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use pixgrid::api::{FetchOutcome, PixabayClient, QueryParams, SearchFetcher};
use pixgrid::domain::{FilterKey, FilterSet};
use pixgrid::platform::{
    run_transfer, LocalPlatform, Notice, TransferIntent, TransferRequest, DOWNLOADED_TOAST, DOWNLOAD_ALERT_TITLE,
};
use pixgrid::Config;

const HITS_BODY: &str = r#"{
    "total": 4692,
    "totalHits": 500,
    "hits": [
        {
            "id": 195893,
            "previewURL": "https://cdn.pixabay.com/photo/2013/10/15/09/12/flower-195893_150.jpg",
            "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
            "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg",
            "imageWidth": 4000,
            "imageHeight": 2250,
            "tags": "blossom, bloom, flower",
            "user": "Josch13",
            "likes": 35
        }
    ]
}"#;

/// Serves one request, resolving to its request head.
async fn serve_once(status: &'static str, body: Vec<u8>) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        socket.shutdown().await.unwrap();

        String::from_utf8_lossy(&head).into_owned()
    });

    (base, handle)
}

fn config(base_url: String, root: &Path) -> Config {
    Config {
        api_key: Some("test-key".to_string()),
        base_url,
        download_dir: root.join("downloads"),
        library_dir: root.join("library"),
        share_dir: root.join("outbox"),
        ..Config::default()
    }
}

fn request_line(head: &str) -> &str {
    head.lines().next().unwrap_or_default()
}

#[tokio::test]
async fn search_sends_defaults_then_params_in_order() {
    let tmp = TempDir::new().unwrap();
    let (base, server) = serve_once("200 OK", HITS_BODY.as_bytes().to_vec()).await;
    let client = PixabayClient::new(&config(format!("{base}/api/"), tmp.path())).unwrap();

    let mut filters = FilterSet::new();
    filters.set(FilterKey::Order, "latest");
    let params = QueryParams::build(2, Some(&filters), Some("nature"), Some("red cars"));

    let outcome = client.fetch(&params).await;
    let head = server.await.unwrap();

    assert_eq!(
        request_line(&head),
        "GET /api/?key=test-key&per_page=20&safesearch=false&editors_choice=false\
         &page=2&order=latest&category=nature&q=red%20cars HTTP/1.1"
    );
    let FetchOutcome::Success(hits) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 195_893);
    assert_eq!(hits[0].image_width, 4000);
    assert_eq!(hits[0].tags, "blossom, bloom, flower");
}

#[tokio::test]
async fn error_status_becomes_failure() {
    let tmp = TempDir::new().unwrap();
    let (base, server) = serve_once("400 Bad Request", b"[ERROR 400] Invalid API key".to_vec()).await;
    let client = PixabayClient::new(&config(format!("{base}/api/"), tmp.path())).unwrap();

    let outcome = client.fetch(&QueryParams::build(1, None, None, None)).await;
    server.await.unwrap();

    let FetchOutcome::Failure(message) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(message.contains("400"), "{message}");
    assert!(message.contains("Invalid API key"), "{message}");
}

#[tokio::test]
async fn body_without_hits_becomes_failure() {
    let tmp = TempDir::new().unwrap();
    let (base, server) = serve_once("200 OK", br#"{"total": 0}"#.to_vec()).await;
    let client = PixabayClient::new(&config(format!("{base}/api/"), tmp.path())).unwrap();

    let outcome = client.fetch(&QueryParams::build(1, None, None, None)).await;
    server.await.unwrap();

    assert!(!outcome.is_success());
}

#[tokio::test]
async fn download_then_save_lands_in_library() {
    let tmp = TempDir::new().unwrap();
    let (base, server) = serve_once("200 OK", b"\xff\xd8\xff jpeg bytes".to_vec()).await;
    let platform = LocalPlatform::new(&config(format!("{base}/api/"), tmp.path())).unwrap();

    let request = TransferRequest {
        id: 1,
        url: format!("{base}/get/flower_640.jpg"),
        file_name: "flower-195893_150.jpg".to_string(),
        intent: TransferIntent::Save,
    };
    let notice = run_transfer(&platform, &request).await;
    let head = server.await.unwrap();

    assert_eq!(request_line(&head), "GET /get/flower_640.jpg HTTP/1.1");
    assert_eq!(notice, Some(Notice::Toast(DOWNLOADED_TOAST.to_string())));
    let downloaded = tmp.path().join("downloads/flower-195893_150.jpg");
    assert_eq!(std::fs::read(&downloaded).unwrap(), b"\xff\xd8\xff jpeg bytes");
    assert!(tmp.path().join("library/flower-195893_150.jpg").exists());
}

#[tokio::test]
async fn failed_download_alerts_and_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let (base, server) = serve_once("404 Not Found", b"gone".to_vec()).await;
    let platform = LocalPlatform::new(&config(format!("{base}/api/"), tmp.path())).unwrap();

    let request = TransferRequest {
        id: 1,
        url: format!("{base}/get/missing_640.jpg"),
        file_name: "missing_150.jpg".to_string(),
        intent: TransferIntent::Share,
    };
    let notice = run_transfer(&platform, &request).await;
    server.await.unwrap();

    let Some(Notice::Alert { title, message }) = notice else {
        panic!("expected alert, got {notice:?}");
    };
    assert_eq!(title, DOWNLOAD_ALERT_TITLE);
    assert!(message.contains("404"), "{message}");
    assert!(!tmp.path().join("downloads/missing_150.jpg").exists());
    assert!(!tmp.path().join("outbox/missing_150.jpg").exists());
}
