//! HTTP Transport
//!
//! One request, one response. Implementations only fail when the backend
//! could not be reached; every received status is handed back as-is.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Ceiling applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API root, starting with '/'
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn with_body<B: serde::Serialize>(mut self, body: &B) -> ClientResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::validation(format!("unserializable body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| ClientError::decode(format!("unexpected response body: {}", e)))
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the round-trip. Errors are always [`ClientError::Network`].
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        (**self).send(request).await
    }
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .client
            .request(method, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Network(format!(
                    "{} {} timed out after {:?}",
                    request.method.as_str(),
                    request.path,
                    self.timeout
                ))
            } else {
                ClientError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(format!("failed to read response: {}", e)))?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(404, "").is_success());
        assert!(!ApiResponse::new(401, "").is_success());
    }

    #[test]
    fn test_bad_json_is_service_error() {
        let resp = ApiResponse::new(200, "<html>");
        let err = resp.json::<serde_json::Value>().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Service);
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let transport = ReqwestTransport::new("http://localhost:3000/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:3000");
    }

    /// Reads one request head from the first connection, then answers 404
    fn serve_not_found(listener: TcpListener) -> thread::JoinHandle<String> {
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            while !String::from_utf8_lossy(&raw).contains("\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }
            stream
                .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        })
    }

    #[tokio::test]
    async fn test_silent_backend_times_out_as_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_secs(2));
            drop(stream);
        });

        let transport = ReqwestTransport::new(&format!("http://{}", addr), Duration::from_millis(500)).unwrap();
        let err = transport.send(ApiRequest::new(Method::Get, "/menus")).await.unwrap_err();

        match &err {
            ClientError::Network(msg) => assert!(msg.contains("500ms"), "{}", msg),
            other => panic!("expected a network error, got {:?}", other),
        }
        assert!(err.is_retryable());
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_bearer_and_query_reach_the_wire() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = serve_not_found(listener);

        let transport = ReqwestTransport::new(&format!("http://{}/", addr), DEFAULT_TIMEOUT).unwrap();
        let mut request = ApiRequest::new(Method::Get, "/menus").with_query("startDate", "2024-01-01");
        request.bearer = Some("tok".to_string());
        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status, 404);

        let head = server.join().unwrap();
        assert!(head.starts_with("GET /menus?startDate=2024-01-01 HTTP/1.1"), "{}", head);
        assert!(head.to_ascii_lowercase().contains("authorization: bearer tok"), "{}", head);
    }
}
