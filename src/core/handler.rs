use crate::core::adapter::NameTransliterationAdapter;
use crate::domain::model::{ApiResponse, ConvertRequest, ConvertResponse, ErrorBody};
use crate::domain::ports::TextGenerator;
use crate::utils::error::{ConvertError, Result};
use serde::Serialize;

pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// 與傳輸層無關的請求處理：method + 原始 body → ApiResponse
///
/// 沒有 adapter 代表啟動時沒拿到 API key，所有 POST 都回 500。
pub struct ConvertHandler<G: TextGenerator> {
    adapter: Option<NameTransliterationAdapter<G>>,
}

impl<G: TextGenerator> ConvertHandler<G> {
    pub fn unconfigured() -> Self {
        Self { adapter: None }
    }

    pub fn from_generator(generator: Option<G>) -> Self {
        Self {
            adapter: generator.map(NameTransliterationAdapter::new),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.adapter.is_some()
    }

    pub async fn handle(&self, method: &str, body: &[u8]) -> ApiResponse {
        self.handle_raw(method, Ok(body)).await
    }

    /// body 解碼失敗時 (例如傳輸層的編碼問題) 仍先做 method / API key 檢查，再回 400
    pub async fn handle_raw(&self, method: &str, body: Result<&[u8]>) -> ApiResponse {
        if method.eq_ignore_ascii_case("OPTIONS") {
            return preflight_response();
        }

        match self.process(method, body).await {
            Ok(hiragana) => {
                tracing::info!("✅ Converted name to hiragana ({} chars)", hiragana.chars().count());
                json_response(200, &ConvertResponse { hiragana })
            }
            Err(e) => error_response(&e),
        }
    }

    async fn process(&self, method: &str, body: Result<&[u8]>) -> Result<String> {
        if !method.eq_ignore_ascii_case("POST") {
            return Err(ConvertError::MethodNotAllowed);
        }

        let adapter = self
            .adapter
            .as_ref()
            .ok_or_else(ConvertError::missing_api_key)?;

        let request = ConvertRequest::from_slice(body?)?;
        adapter.convert(&request.name).await
    }
}

pub fn preflight_response() -> ApiResponse {
    ApiResponse {
        status: 200,
        headers: CORS_HEADERS.to_vec(),
        body: None,
    }
}

pub fn error_response(err: &ConvertError) -> ApiResponse {
    let status = err.status_code();
    if status >= 500 {
        tracing::error!(
            "❌ convert error: {} (category: {:?})",
            err,
            err.category()
        );
        tracing::error!("💡 {}", err.recovery_suggestion());
    } else {
        tracing::warn!("Rejected request ({}): {}", status, err);
    }

    json_response(
        status,
        &ErrorBody {
            error: err.user_friendly_message(),
        },
    )
}

fn json_response<T: Serialize>(status: u16, payload: &T) -> ApiResponse {
    let (status, body) = match serde_json::to_string(payload) {
        Ok(body) => (status, body),
        Err(e) => {
            tracing::error!("Failed to serialize response: {}", e);
            (500, r#"{"error":"Server error"}"#.to_string())
        }
    };

    let mut headers = CORS_HEADERS.to_vec();
    headers.push(("Content-Type", JSON_CONTENT_TYPE));

    ApiResponse {
        status,
        headers,
        body: Some(body),
    }
}
