//! Stub upstream server for tests: answers every connection with one canned
//! HTTP response and records the request lines it saw.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub struct StubUpstream {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

/// Bind an ephemeral port and serve `body` with the given status and content
/// type. `delay` holds the response back to simulate a slow upstream.
pub async fn spawn_stub(
    status: u16,
    content_type: &str,
    body: &str,
    delay: Duration,
) -> StubUpstream {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub upstream");
    let addr = listener.local_addr().expect("stub upstream addr");

    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let seen = seen.clone();
            let response = response.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let head = String::from_utf8_lossy(&buf[..n]).to_string();
                if let Some(line) = head.lines().next() {
                    seen.lock().unwrap().push(line.to_string());
                }
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    StubUpstream {
        base_url: format!("http://{}", addr),
        requests,
    }
}
