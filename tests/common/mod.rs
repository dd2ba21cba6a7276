//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// What the mock upstream saw for one request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    /// Path + query, exactly as sent on the request line.
    pub target: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Start a mock upstream that records every request and answers with a
/// fixed status, content type, and body. Requests it saw are reported
/// over the returned channel.
pub async fn start_recording_upstream(
    status: u16,
    content_type: &'static str,
    response_body: &'static str,
) -> (SocketAddr, mpsc::UnboundedReceiver<SeenRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                let seen = loop {
                    let n = match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => n,
                    };
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(seen) = parse_request(&buf) {
                        break seen;
                    }
                };

                let status_text = match status {
                    200 => "200 OK",
                    204 => "204 No Content",
                    404 => "404 Not Found",
                    422 => "422 Unprocessable Entity",
                    500 => "500 Internal Server Error",
                    _ => "200 OK",
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    content_type,
                    response_body.len(),
                    response_body,
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
                let _ = tx.send(seen);
            });
        }
    });

    (addr, rx)
}

/// Parse a buffered HTTP/1.1 request once it has fully arrived.
fn parse_request(buf: &[u8]) -> Option<SeenRequest> {
    let text = std::str::from_utf8(buf).ok()?;
    let head_end = text.find("\r\n\r\n")?;
    let head = &text[..head_end];

    let mut lines = head.split("\r\n");
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut content_length = 0usize;
    let mut authorization = None;
    let mut content_type = None;
    for line in lines {
        let (name, value) = line.split_once(':')?;
        let value = value.trim();
        match name.to_ascii_lowercase().as_str() {
            "content-length" => content_length = value.parse().ok()?,
            "authorization" => authorization = Some(value.to_string()),
            "content-type" => content_type = Some(value.to_string()),
            _ => {}
        }
    }

    let body_start = head_end + 4;
    let body = buf.get(body_start..body_start + content_length)?;
    Some(SeenRequest {
        method,
        target,
        authorization,
        content_type,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}
