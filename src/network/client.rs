//! HTTP transport - executes a test attempt with reqwest

use std::time::{Duration, Instant};

use futures_util::future::FutureExt;

use crate::error::{Result, TestError};
use crate::models::{Header, HttpMethod, TestRequest, TransportResponse};
use crate::network::transport::{AttemptFuture, Transport};

/// Sends the draft as a real HTTP request
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        HttpTransport {
            client: create_client(timeout),
            timeout,
        }
    }
}

impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    fn execute(&self, request: TestRequest) -> AttemptFuture {
        let client = self.client.clone();
        let timeout = self.timeout;
        async move { execute_request(&client, request, timeout).await }.boxed()
    }
}

/// Build a request from the given parameters
fn build_request(client: &reqwest::Client, request: &TestRequest) -> reqwest::RequestBuilder {
    let mut req_builder = match request.method {
        HttpMethod::GET => client.get(&request.url),
        HttpMethod::POST => client.post(&request.url),
        HttpMethod::PUT => client.put(&request.url),
        HttpMethod::PATCH => client.patch(&request.url),
        HttpMethod::DELETE => client.delete(&request.url),
    };

    for header in &request.headers {
        req_builder = req_builder.header(&header.key, &header.value);
    }

    // Sent as typed, even when it does not parse
    if let Some(body) = &request.body {
        req_builder = req_builder.body(body.clone());
    }

    req_builder
}

/// Execute an HTTP request. Any response, whatever its status, completes
/// the attempt.
pub async fn execute_request(
    client: &reqwest::Client,
    request: TestRequest,
    timeout: Duration,
) -> Result<TransportResponse> {
    let start = Instant::now();
    let resp = build_request(client, &request)
        .send()
        .await
        .map_err(|e| map_error(e, timeout))?;

    let status = resp.status().as_u16();
    let headers = resp
        .headers()
        .iter()
        .map(|(k, v)| Header::new(k.as_str(), v.to_str().unwrap_or_default()))
        .collect();

    let body = resp
        .text()
        .await
        .map_err(|e| TestError::Transport(format!("Error reading body: {}", e)))?;
    let formatted = if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
        serde_json::to_string_pretty(&json).unwrap_or(body)
    } else {
        body
    };

    tracing::debug!(
        status,
        elapsed_ms = start.elapsed().as_millis() as u64,
        bytes = formatted.len(),
        "HTTP test response"
    );

    Ok(TransportResponse {
        status: Some(status),
        headers,
        body: formatted,
    })
}

fn map_error(e: reqwest::Error, timeout: Duration) -> TestError {
    if e.is_timeout() {
        TestError::Timeout(timeout)
    } else {
        TestError::from(e)
    }
}

/// Create an HTTP client with the given request timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
