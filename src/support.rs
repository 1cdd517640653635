use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Substituted when a 2xx body carries no usable reply text.
pub const REPLY_FALLBACK: &str = "I apologize, but I couldn't process your request right now.";

/// Substituted for transport failures and non-2xx statuses alike.
pub const CONNECT_FALLBACK: &str = "I'm having trouble connecting right now. Please try again later.";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/chat";

#[derive(Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    response: Option<String>,
}

#[derive(Clone)]
pub struct SupportClient {
    client: Client,
    endpoint: String,
}

impl SupportClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// One exchange: POST the user text, get back something displayable.
    /// Failures never escape; transport and HTTP errors map to the connect
    /// fallback, a 2xx body without usable reply text to the reply fallback.
    pub async fn exchange(&self, text: &str) -> String {
        match self.send_query(text).await {
            Ok(Some(reply)) if !reply.is_empty() => reply,
            Ok(_) => REPLY_FALLBACK.to_string(),
            Err(_) => CONNECT_FALLBACK.to_string(),
        }
    }

    async fn send_query(&self, text: &str) -> Result<Option<String>> {
        let request = ChatRequest { query: text };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "support endpoint returned {}",
                response.status()
            ));
        }

        let reply: ChatReply = response.json().await?;
        Ok(reply.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// One-shot HTTP stub standing in for the support endpoint: accepts a
    /// single connection, reads one request, answers with the given status
    /// line and body, and hands the raw request back for assertions.
    async fn spawn_stub(
        status_line: &'static str,
        body: &'static str,
    ) -> (SocketAddr, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text
                        .lines()
                        .find_map(|line| {
                            let lower = line.to_ascii_lowercase();
                            let value = lower.strip_prefix("content-length:")?;
                            value.trim().parse::<usize>().ok()
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;

            String::from_utf8_lossy(&raw).into_owned()
        });

        (addr, handle)
    }

    fn endpoint(addr: SocketAddr) -> String {
        format!("http://{}/chat", addr)
    }

    #[tokio::test]
    async fn round_trip_returns_server_reply() {
        let (addr, request) = spawn_stub(
            "HTTP/1.1 200 OK",
            r#"{"response":"Try restarting your device."}"#,
        )
        .await;

        let client = SupportClient::new(&endpoint(addr));
        let reply = client.exchange("My printer won't connect").await;
        assert_eq!(reply, "Try restarting your device.");

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /chat"));
        assert!(raw
            .to_ascii_lowercase()
            .contains("content-type: application/json"));
        assert!(raw.ends_with(r#"{"query":"My printer won't connect"}"#));
    }

    #[tokio::test]
    async fn missing_reply_field_uses_reply_fallback() {
        let (addr, _request) = spawn_stub("HTTP/1.1 200 OK", "{}").await;
        let client = SupportClient::new(&endpoint(addr));
        assert_eq!(client.exchange("anything").await, REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn empty_reply_field_uses_reply_fallback() {
        let (addr, _request) = spawn_stub("HTTP/1.1 200 OK", r#"{"response":""}"#).await;
        let client = SupportClient::new(&endpoint(addr));
        assert_eq!(client.exchange("anything").await, REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn http_errors_all_map_to_one_connect_fallback() {
        for status_line in ["HTTP/1.1 404 Not Found", "HTTP/1.1 500 Internal Server Error"] {
            let (addr, _request) = spawn_stub(status_line, r#"{"error":"boom"}"#).await;
            let client = SupportClient::new(&endpoint(addr));
            assert_eq!(client.exchange("anything").await, CONNECT_FALLBACK);
        }
    }

    #[tokio::test]
    async fn connection_refused_maps_to_connect_fallback() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SupportClient::new(&endpoint(addr));
        assert_eq!(client.exchange("anything").await, CONNECT_FALLBACK);
    }

    #[tokio::test]
    async fn unparseable_success_body_maps_to_connect_fallback() {
        let (addr, _request) = spawn_stub("HTTP/1.1 200 OK", "not json").await;
        let client = SupportClient::new(&endpoint(addr));
        assert_eq!(client.exchange("anything").await, CONNECT_FALLBACK);
    }
}
