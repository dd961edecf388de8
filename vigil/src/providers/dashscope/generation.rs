//! DashScope multimodal generation API implementation.

use super::client::DashScopeClient;
use crate::error::{Error, LlmError};
use crate::message::{ChatMessage, MessageContent, MessageRole};
use crate::providers::common::{GenerateOptions, Model, ModelResponse, TokenUsage};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

const PROVIDER: &str = "dashscope";

/// DashScope multimodal conversation model.
///
/// Implements the [`Model`] trait against the
/// `services/aigc/multimodal-generation/generation` endpoint.
#[derive(Clone)]
pub struct MultiModalModel {
    client: DashScopeClient,
    model_id: String,
}

impl std::fmt::Debug for MultiModalModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiModalModel")
            .field("model_id", &self.model_id)
            .finish()
    }
}

impl MultiModalModel {
    /// Create a new multimodal generation model.
    pub(crate) fn new(client: DashScopeClient, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    /// Build the request body for the API.
    ///
    /// The DashScope native format nests the conversation under `input` and
    /// sampling knobs under `parameters`.
    fn build_request_body(&self, messages: &[ChatMessage], options: &GenerateOptions) -> Value {
        let mut body = serde_json::json!({
            "model": self.model_id,
            "input": { "messages": messages },
        });

        if !options.is_empty() {
            body["parameters"] = serde_json::json!(options);
        }

        body
    }

    /// Parse the API response into a [`ModelResponse`].
    ///
    /// The verdict lives at `output.choices[0].message.content[0].text`; a
    /// response missing that path is a format error, never a panic.
    fn parse_response(&self, json: Value) -> Result<ModelResponse, Error> {
        if let Some(request_id) = json["request_id"].as_str() {
            debug!(request_id, "parsed DashScope response");
        }

        let choice = json["output"]["choices"]
            .get(0)
            .ok_or_else(|| LlmError::response_format("output.choices[0]", "no choices"))?;

        let message_json = &choice["message"];
        let content: Vec<MessageContent> = match &message_json["content"] {
            Value::Array(_) => serde_json::from_value(message_json["content"].clone())?,
            Value::String(text) => vec![MessageContent::text(text)],
            other => {
                return Err(LlmError::response_format(
                    "message.content array",
                    other.to_string(),
                )
                .into());
            }
        };

        let message = ChatMessage::with_contents(MessageRole::Assistant, content);

        let token_usage = json.get("usage").map(|usage| TokenUsage {
            input_tokens: saturating_u32(usage["input_tokens"].as_u64().unwrap_or(0)),
            output_tokens: saturating_u32(usage["output_tokens"].as_u64().unwrap_or(0)),
        });

        let mut response = ModelResponse::new(message).with_raw(json);
        if let Some(usage) = token_usage {
            response = response.with_token_usage(usage);
        }
        Ok(response)
    }

    /// Map a non-success HTTP response to a provider error.
    fn status_error(status: reqwest::StatusCode, body: &str) -> LlmError {
        // DashScope error bodies carry {"code": .., "message": ..}.
        let (code, message) = serde_json::from_str::<Value>(body).map_or_else(
            |_| (None, body.to_string()),
            |v| {
                (
                    v["code"].as_str().map(String::from),
                    v["message"].as_str().unwrap_or(body).to_string(),
                )
            },
        );

        let err = if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            LlmError::auth(PROVIDER, message)
        } else {
            LlmError::http_status(PROVIDER, status.as_u16(), message)
        };

        match code {
            Some(code) => err.with_code(code),
            None => err,
        }
    }
}

#[async_trait]
impl Model for MultiModalModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    #[instrument(skip(self, messages, options), fields(model = %self.model_id))]
    async fn generate(
        &self,
        messages: Vec<ChatMessage>,
        options: GenerateOptions,
    ) -> Result<ModelResponse, Error> {
        let body = self.build_request_body(&messages, &options);

        debug!("Sending request to DashScope API");

        let response = self
            .client
            .http_client
            .post(format!(
                "{}/services/aigc/multimodal-generation/generation",
                self.client.base_url
            ))
            .headers(self.client.auth_headers())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, &error_text).into());
        }

        let json: Value = response.json().await?;
        self.parse_response(json)
    }
}

fn saturating_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
