use crate::domain::model::TransliterationRequest;
use crate::domain::ports::{ConfigProvider, TextGenerator};
use crate::utils::error::{ConvertError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// OpenAI Responses API (`POST {base_url}/responses`)
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct ResponsesBody {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl ResponsesBody {
    fn into_text(self) -> String {
        if let Some(text) = self.output_text {
            return text.trim().to_string();
        }

        self.output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text)
            .collect::<String>()
            .trim()
            .to_string()
    }
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    /// 沒有 API key 時回傳 `None`，服務照常啟動但請求會回 500
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key() else {
            tracing::warn!("OPENAI_API_KEY is not set, conversions will fail with 500");
            return Ok(None);
        };

        let client = Self::new(
            api_key,
            config.api_base_url(),
            config.model(),
            Duration::from_secs(config.timeout_seconds()),
        )?;
        Ok(Some(client))
    }

    pub fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, request: &TransliterationRequest) -> Result<String> {
        let payload = ResponsesRequest {
            model: &self.model,
            instructions: request.instructions,
            input: &request.input,
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
        };

        tracing::debug!("Making API request to: {} (model {})", self.endpoint(), self.model);
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.error.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("OpenAI API returned status {}", status.as_u16()));
            return Err(ConvertError::ServiceError { message });
        }

        let body: ResponsesBody = response.json().await?;
        Ok(body.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client =
            OpenAiClient::new("sk-test", "http://localhost:9000/v1/", DEFAULT_MODEL, Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/responses");
    }

    #[test]
    fn test_output_text_is_preferred() {
        let body: ResponsesBody = serde_json::from_value(serde_json::json!({
            "output_text": " じょん \n",
            "output": []
        }))
        .unwrap();
        assert_eq!(body.into_text(), "じょん");
    }

    #[test]
    fn test_output_items_are_concatenated() {
        let body: ResponsesBody = serde_json::from_value(serde_json::json!({
            "id": "resp_1",
            "output": [
                {"type": "reasoning", "summary": []},
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        {"type": "output_text", "text": "めあり", "annotations": []},
                        {"type": "refusal", "refusal": "no"},
                        {"type": "output_text", "text": "じぇーん", "annotations": []}
                    ]
                }
            ]
        }))
        .unwrap();
        assert_eq!(body.into_text(), "めありじぇーん");
    }

    #[test]
    fn test_empty_output() {
        let body: ResponsesBody = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(body.into_text(), "");
    }
}
