use crate::core::handler::ConvertHandler;
use crate::core::{ApiResponse, TextGenerator};
use crate::utils::error::ConvertError;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// API Gateway proxy event，同時支援 REST (v1) 與 HTTP API (v2) 的 method 欄位
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpContext {
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ProxyRequest {
    pub fn method(&self) -> &str {
        self.http_method
            .as_deref()
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|ctx| ctx.http.as_ref())
                    .map(|http| http.method.as_str())
            })
            .unwrap_or("")
    }
}

impl From<ApiResponse> for ProxyResponse {
    fn from(api: ApiResponse) -> Self {
        Self {
            status_code: api.status,
            headers: api
                .headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: api.body.unwrap_or_default(),
            is_base64_encoded: false,
        }
    }
}

pub async fn handle_proxy_event<G: TextGenerator>(
    handler: &ConvertHandler<G>,
    event: &ProxyRequest,
) -> ProxyResponse {
    let body = event.body.as_deref().unwrap_or("");
    let method = event.method();

    // binary media type 或 Function URL 會把 body 以 base64 傳入
    let response = if event.is_base64_encoded {
        match STANDARD.decode(body) {
            Ok(decoded) => handler.handle(method, &decoded).await,
            Err(e) => {
                let err = ConvertError::UndecodableBody {
                    reason: format!("invalid base64 body: {}", e),
                };
                handler.handle_raw(method, Err(err)).await
            }
        }
    } else {
        handler.handle(method, body.as_bytes()).await
    };

    response.into()
}
