//! End-to-end tests against a live server on an ephemeral port

use std::net::SocketAddr;

use reqwest::StatusCode;
use serde_json::{json, Value};
use stringlab_api::{ApiServer, AppState};
use stringlab_config::ServerConfig;
use tokio::{sync::oneshot, task::JoinHandle};

struct TestServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            ..Default::default()
        };
        let server = ApiServer::bind(&config, AppState::in_memory())
            .await
            .expect("Failed to bind test server");
        let addr = server.local_addr().unwrap();

        let (shutdown, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve(async move {
            let _ = rx.await;
        }));

        Self {
            addr,
            shutdown,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn stop(self) {
        let _ = self.shutdown.send(());
        self.handle
            .await
            .expect("server task panicked")
            .expect("server returned an error");
    }
}

#[tokio::test]
async fn test_string_lifecycle_over_http() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // Create
    let response = client
        .post(server.url("/strings"))
        .json(&json!({ "value": "Was it a car or a cat I saw" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["isPalindrome"], true);
    assert_eq!(created["wordCount"], 8);

    // Duplicate
    let response = client
        .post(server.url("/strings"))
        .json(&json!({ "value": "Was it a car or a cat I saw" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: Value = response.json().await.unwrap();
    assert!(error["error"].is_string());

    // Get by value
    let response = client
        .get(server.url("/strings/Was%20it%20a%20car%20or%20a%20cat%20I%20saw"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = response.json().await.unwrap();
    assert_eq!(fetched, created);

    // Natural-language filter
    let response = client
        .get(server.url("/strings/filter-by-natural-language"))
        .query(&[("q", "show me palindromes")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["count"], 1);

    // Delete, then gone
    let response = client
        .delete(server.url("/strings/Was%20it%20a%20car%20or%20a%20cat%20I%20saw"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await.unwrap().is_empty());

    let response = client
        .get(server.url("/strings/Was%20it%20a%20car%20or%20a%20cat%20I%20saw"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_creates_of_same_value_store_once() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let requests = (0..16).map(|_| {
        let client = client.clone();
        let url = server.url("/strings");
        tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({ "value": "contended" }))
                .send()
                .await
                .unwrap()
                .status()
        })
    });

    let mut created = 0;
    let mut conflicts = 0;
    for request in requests.collect::<Vec<_>>() {
        match request.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 15);

    let body: Value = client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["storedStrings"], 1);

    server.stop().await;
}
