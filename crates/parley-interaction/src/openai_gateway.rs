//! OpenAIGateway - Direct REST API implementation for OpenAI chat completions.
//!
//! Sends one system message and one user message per request. Retries are
//! never attempted; every failure surfaces once to the caller.

use std::time::Duration;

use parley_core::error::{ParleyError, Result};
use parley_core::gateway::CompletionGateway;
use parley_core::session::CompletionRequest;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Gateway implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAIGateway {
    client: Client,
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl OpenAIGateway {
    /// Creates a new gateway with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Overrides the endpoint (OpenAI-compatible servers, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|err| ParleyError::gateway(None, format!("OpenAI API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            ParleyError::gateway(None, format!("Failed to parse OpenAI response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait::async_trait]
impl CompletionGateway for OpenAIGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatCompletionRequest::from(request);
        tracing::debug!(
            "[OpenAIGateway] Sending request: model={}, temperature={}, max_tokens={}",
            body.model,
            body.temperature,
            body.max_tokens
        );
        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

impl From<&CompletionRequest> for ChatCompletionRequest {
    fn from(request: &CompletionRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system_content.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: request.user_content.clone(),
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ParleyError::gateway(None, "OpenAI API returned no content in the response"))
}

fn map_http_error(status: StatusCode, body: String) -> ParleyError {
    let detail = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let message = match status {
        StatusCode::UNAUTHORIZED => format!("Invalid API key: {detail}"),
        StatusCode::TOO_MANY_REQUESTS => format!("Rate limited or quota exceeded: {detail}"),
        _ => detail,
    };

    ParleyError::gateway(Some(status.as_u16()), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn sample_request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.5,
            max_tokens: 256,
            system_content: "You are a helpful assistant.\n\nBe terse.".to_string(),
            user_content: "hi".to_string(),
        }
    }

    /// Reads one full HTTP request (headers plus Content-Length body).
    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut received = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap_or(0);
            if n == 0 {
                return;
            }
            received.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&received);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if received.len() >= header_end + 4 + content_length {
                    return;
                }
            }
        }
    }

    /// Serves one canned response and returns the endpoint URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}/v1/chat/completions")
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatCompletionRequest::from(&sample_request());
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["max_tokens"], 256);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(
            json["messages"][0]["content"],
            "You are a helpful assistant.\n\nBe terse."
        );
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_extract_first_choice() {
        let parsed: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "hello!"}}, {"message": {"content": "other"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text_response(parsed).unwrap(), "hello!");
    }

    #[test]
    fn test_extract_without_content_fails() {
        let parsed: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(extract_text_response(parsed).unwrap_err().is_gateway());
    }

    #[test]
    fn test_map_http_error_uses_api_message() {
        let err = map_http_error(
            StatusCode::UNAUTHORIZED,
            r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#
                .to_string(),
        );
        match err {
            ParleyError::Gateway {
                status_code,
                message,
            } => {
                assert_eq!(status_code, Some(401));
                assert_eq!(message, "Invalid API key: Incorrect API key provided");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(err.to_string(), "Completion gateway error (502): upstream down");
    }

    #[tokio::test]
    async fn test_complete_against_local_server() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"choices": [{"message": {"role": "assistant", "content": "hello!"}}]}"#,
        )
        .await;
        let gateway = OpenAIGateway::new("sk-test").with_endpoint(endpoint);

        let reply = gateway.complete(&sample_request()).await.unwrap();
        assert_eq!(reply, "hello!");
    }

    #[tokio::test]
    async fn test_complete_reports_quota_error() {
        let endpoint = serve_once(
            "429 Too Many Requests",
            r#"{"error": {"message": "You exceeded your current quota"}}"#,
        )
        .await;
        let gateway = OpenAIGateway::new("sk-test").with_endpoint(endpoint);

        let err = gateway.complete(&sample_request()).await.unwrap_err();
        assert!(err.is_gateway());
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("quota"));
    }
}
