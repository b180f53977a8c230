//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use vehicle_decoder::config::DecoderConfig;
use vehicle_decoder::decode::{DecodeRouter, ProviderCredential, ProviderEndpoints, ReqwestTransport};
use vehicle_decoder::{HttpServer, Shutdown};

/// Request targets (`/path?query`) seen by a mock upstream, in arrival order.
pub type Recorded = Arc<Mutex<Vec<String>>>;

/// Start a programmable mock upstream on an ephemeral port.
///
/// `f` receives the request target and returns `(status, body)`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Recorded)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let seen = recorded.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let target = read_request_target(&mut socket).await;
                        seen.lock().unwrap().push(target.clone());

                        let (status, body) = f(target).await;
                        let reason = StatusCode::from_u16(status)
                            .ok()
                            .and_then(|code| code.canonical_reason())
                            .unwrap_or("Unknown");
                        let status_text = format!("{} {}", status, reason);

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorded)
}

/// Start a mock upstream that always answers with the same status and body.
pub async fn start_mock_backend(status: u16, body: &'static str) -> (SocketAddr, Recorded) {
    start_programmable_backend(move |_| async move { (status, body.to_string()) }).await
}

/// Read up to the end of the request head and return the request target.
async fn read_request_target(socket: &mut tokio::net::TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&head)
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string()
}

/// A running decoder bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the decoder against the given upstreams.
pub async fn start_decoder(vin_upstream: SocketAddr, plate_upstream: SocketAddr, key: Option<&str>) -> TestServer {
    let mut config = DecoderConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.timeouts.upstream_secs = 1;
    config.providers.vin_url = format!("http://{}/api/vehicles/DecodeVinValues/", vin_upstream);
    config.providers.plate_url = format!("http://{}/platedecoder", plate_upstream);
    config.providers.api_key = key.map(str::to_string);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeouts.upstream_secs))
        .no_proxy()
        .build()
        .unwrap();
    let decoder = DecodeRouter::new(
        Arc::new(ReqwestTransport::with_client(client, config.timeouts.upstream_secs)),
        ProviderEndpoints::from_config(&config.providers).unwrap(),
        ProviderCredential::new(config.providers.api_key.clone()),
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::with_decoder(config, decoder);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer { addr, shutdown }
}

/// HTTP client that ignores any proxy configured in the environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
