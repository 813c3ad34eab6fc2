//! One-shot HTTP stub for exercising the network collaborators offline.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves a single canned response on a random local port.
///
/// Returns the base URL (`http://127.0.0.1:PORT`) and a handle resolving to
/// the raw request the client sent.
pub async fn serve_once(
    status: u16,
    content_type: &'static str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind stub");
    let addr = listener.local_addr().expect("Failed to read stub address");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Failed to accept");
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.expect("Failed to read");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if request_complete(&request) {
                break;
            }
        }

        let response = format!(
            concat!(
                "HTTP/1.1 {} Stub\r\n",
                "Content-Type: {}\r\n",
                "Content-Length: {}\r\n",
                "Connection: close\r\n\r\n{}",
            ),
            status,
            content_type,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.expect("Failed to write");
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{}", addr), handle)
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    buf.len() >= end + 4 + content_length
}
