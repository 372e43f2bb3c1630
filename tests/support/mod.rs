// Fake upstream servers shared by the integration tests.
#![allow(dead_code)]

use axum::{
    Router,
    body::Bytes,
    http::{StatusCode, Uri, header},
    response::IntoResponse,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// One request as seen by a fake server.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub path: String,
    // Null when the body was not JSON.
    pub body: Value,
}

#[derive(Clone)]
pub struct FakeServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeServer {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests mutex poisoned").clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

// Scripted replies keyed by path. Unknown paths answer 404.
#[derive(Default)]
pub struct FakeServerBuilder {
    replies: HashMap<String, (StatusCode, String)>,
}

impl FakeServerBuilder {
    pub fn reply(mut self, path: &str, status: StatusCode, body: &str) -> Self {
        self.replies
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    pub async fn spawn(self) -> FakeServer {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let replies = Arc::new(self.replies);
        let seen = requests.clone();

        let router = Router::new().fallback(move |uri: Uri, body: Bytes| {
            let seen = seen.clone();
            let replies = replies.clone();
            async move {
                let path = uri.path().to_string();
                let parsed = serde_json::from_slice(&body).unwrap_or(Value::Null);
                seen.lock().expect("requests mutex poisoned").push(Recorded {
                    path: path.clone(),
                    body: parsed,
                });

                match replies.get(&path) {
                    Some((status, body)) => (
                        *status,
                        [(header::CONTENT_TYPE, "application/json")],
                        body.clone(),
                    )
                        .into_response(),
                    None => StatusCode::NOT_FOUND.into_response(),
                }
            }
        });

        FakeServer {
            base_url: spawn(router).await,
            requests,
        }
    }
}

pub fn fake_server() -> FakeServerBuilder {
    FakeServerBuilder::default()
}

// Serve a router on an ephemeral port for the lifetime of the test runtime.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

// Base URL of a port that was bound and released, so connections are refused.
pub async fn refused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{addr}")
}
