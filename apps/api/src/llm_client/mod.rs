/// LLM Client: the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the Cohere API directly.
/// The client is built once in `main` and handed to handlers through `AppState`.
///
/// Two call shapes exist upstream. The caller picks one explicitly via
/// [`CallKind`] and gets back the matching [`LlmReply`] variant; the reply
/// shape is never sniffed from the response body.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Model used for chat-style calls (profile analysis, resume analysis).
pub const CHAT_MODEL: &str = "command-r-plus";
/// Model used for completion-style calls (LinkedIn copy generation).
pub const COMPLETION_MODEL: &str = "command-xlarge";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Which upstream endpoint a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `POST /chat`: request `{model, message, temperature}`, reply `{text}`.
    Chat,
    /// `POST /generate`: request `{model, prompt, temperature}`, reply `{generations: [{text}]}`.
    Completion,
}

#[derive(Debug, Clone)]
pub struct LlmRequest<'a> {
    pub kind: CallKind,
    pub input: &'a str,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl<'a> LlmRequest<'a> {
    pub fn chat(message: &'a str, temperature: f32) -> Self {
        Self {
            kind: CallKind::Chat,
            input: message,
            temperature,
            max_tokens: None,
        }
    }

    pub fn completion(prompt: &'a str, temperature: f32) -> Self {
        Self {
            kind: CallKind::Completion,
            input: prompt,
            temperature,
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    message: &'a str,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionReply {
    #[serde(default)]
    pub generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
pub struct Generation {
    #[serde(default)]
    pub text: String,
}

/// Upstream reply, tagged by the endpoint that produced it.
#[derive(Debug)]
pub enum LlmReply {
    Chat(ChatReply),
    Completion(CompletionReply),
}

impl LlmReply {
    /// Extracts the generated text using the rule for this reply's variant.
    /// Whitespace-only output counts as no output.
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            LlmReply::Chat(reply) => Some(reply.text.as_str()),
            LlmReply::Completion(reply) => reply.generations.first().map(|g| g.text.as_str()),
        };
        text.map(str::trim).filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct CohereErrorBody {
    message: String,
}

/// The single text-generation client used by all handlers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends one request to the endpoint selected by `request.kind`.
    /// Failures are returned as-is; there is no retry.
    pub async fn call(&self, request: &LlmRequest<'_>) -> Result<LlmReply, LlmError> {
        let builder = match request.kind {
            CallKind::Chat => self
                .client
                .post(format!("{}/chat", self.base_url))
                .json(&ChatBody {
                    model: CHAT_MODEL,
                    message: request.input,
                    temperature: request.temperature,
                    max_tokens: request.max_tokens,
                }),
            CallKind::Completion => self
                .client
                .post(format!("{}/generate", self.base_url))
                .json(&GenerateBody {
                    model: COMPLETION_MODEL,
                    prompt: request.input,
                    temperature: request.temperature,
                    max_tokens: request.max_tokens,
                }),
        };

        let response = builder.bearer_auth(&self.api_key).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<CohereErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply = match request.kind {
            CallKind::Chat => LlmReply::Chat(response.json().await?),
            CallKind::Completion => LlmReply::Completion(response.json().await?),
        };

        debug!("LLM {:?} call succeeded", request.kind);
        Ok(reply)
    }

    /// Calls the LLM and returns the trimmed generated text.
    pub async fn complete_text(&self, request: &LlmRequest<'_>) -> Result<String, LlmError> {
        let reply = self.call(request).await?;
        reply
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new("test-key".into(), server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_chat_reply_text() {
        let reply = LlmReply::Chat(ChatReply {
            text: "  {\"a\": 1}\n".into(),
        });
        assert_eq!(reply.text(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_completion_reply_uses_first_generation() {
        let reply = LlmReply::Completion(CompletionReply {
            generations: vec![
                Generation { text: "first".into() },
                Generation { text: "second".into() },
            ],
        });
        assert_eq!(reply.text(), Some("first"));
    }

    #[test]
    fn test_empty_replies_have_no_text() {
        assert_eq!(LlmReply::Chat(ChatReply { text: "   ".into() }).text(), None);
        assert_eq!(
            LlmReply::Completion(CompletionReply {
                generations: vec![]
            })
            .text(),
            None
        );
    }

    #[tokio::test]
    async fn test_chat_call_posts_message_and_reads_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": CHAT_MODEL,
                "message": "hello"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "hi there"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .complete_text(&LlmRequest::chat("hello", 0.3))
            .await
            .unwrap();
        assert_eq!(text, "hi there");
    }

    #[tokio::test]
    async fn test_completion_call_hits_generate_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": COMPLETION_MODEL,
                "prompt": "write",
                "max_tokens": 500
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "generations": [{"text": "HEADLINE: x"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = LlmRequest::completion("write", 0.6).with_max_tokens(500);
        let text = client_for(&server).complete_text(&request).await.unwrap();
        assert_eq!(text, "HEADLINE: x");
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "invalid api token"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .call(&LlmRequest::chat("hello", 0.3))
            .await
            .unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid api token");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_chat_text_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": ""})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete_text(&LlmRequest::chat("hello", 0.3))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
