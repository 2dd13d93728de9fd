//! In-process stand-in for a Riak node's HTTP API.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use riak_exporter::config::RiakSection;

pub struct MockRiak {
    pub base_url: String,
    ping_hits: Arc<AtomicUsize>,
    stats_hits: Arc<AtomicUsize>,
}

impl MockRiak {
    pub fn ping_hits(&self) -> usize {
        self.ping_hits.load(Ordering::SeqCst)
    }

    pub fn stats_hits(&self) -> usize {
        self.stats_hits.load(Ordering::SeqCst)
    }

    pub fn riak_section(&self) -> RiakSection {
        RiakSection {
            uri: self.base_url.clone(),
            timeout_ms: 1000,
        }
    }
}

#[derive(Clone)]
pub struct MockBehavior {
    pub ping_status: StatusCode,
    pub stats_status: StatusCode,
    pub stats_body: &'static str,
    pub stats_delay: Duration,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            ping_status: StatusCode::OK,
            stats_status: StatusCode::OK,
            stats_body: r#"{"a": 1, "b": "x", "c": 2.5}"#,
            stats_delay: Duration::ZERO,
        }
    }
}

pub async fn spawn_riak(behavior: MockBehavior) -> MockRiak {
    let ping_hits = Arc::new(AtomicUsize::new(0));
    let stats_hits = Arc::new(AtomicUsize::new(0));

    let ping = {
        let hits = Arc::clone(&ping_hits);
        let status = behavior.ping_status;
        move || async move {
            hits.fetch_add(1, Ordering::SeqCst);
            (status, "OK")
        }
    };
    let stats = {
        let hits = Arc::clone(&stats_hits);
        let behavior = behavior.clone();
        move || async move {
            hits.fetch_add(1, Ordering::SeqCst);
            if !behavior.stats_delay.is_zero() {
                tokio::time::sleep(behavior.stats_delay).await;
            }
            (
                behavior.stats_status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                behavior.stats_body,
            )
        }
    };

    let app = Router::new()
        .route("/ping", get(ping))
        .route("/stats", get(stats));

    let base_url = serve(app).await;
    MockRiak {
        base_url,
        ping_hits,
        stats_hits,
    }
}

/// Serve a router on an ephemeral local port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Riak node whose `/ping` answers 200 and whose `/stats` promises a
/// 100-byte body, sends a few bytes, then closes the connection.
pub async fn spawn_truncated_stats() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut sock, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut req = Vec::new();
                let mut buf = [0u8; 1024];
                while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                    match sock.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => req.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&req);
                let resp: &[u8] = if head.starts_with("GET /ping ") {
                    b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nOK"
                } else {
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\nconnection: close\r\n\r\n{\"a\": 1"
                };
                let _ = sock.write_all(resp).await;
                let _ = sock.shutdown().await;
            });
        }
    });
    format!("http://{addr}")
}
