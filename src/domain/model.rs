use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// 給模型的固定指示
pub const SYSTEM_INSTRUCTION: &str = "You are a Japanese transliteration assistant. Return ONLY the most common Japanese reading of the given Latin-alphabet personal name in HIRAGANA. No kanji, no katakana, no romaji, no quotes, no extra text.";

pub const TEMPERATURE: f32 = 0.2;
pub const MAX_OUTPUT_TOKENS: u32 = 50;
pub const MAX_NAME_LENGTH: usize = 50;

/// 已通過驗證、去掉前後空白的名字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameInput(String);

impl NameInput {
    /// 只能由 `core::name::validate_name` 建立
    pub(crate) fn new_unchecked(trimmed: String) -> Self {
        Self(trimmed)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransliterationRequest {
    pub instructions: &'static str,
    pub input: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl TransliterationRequest {
    pub fn for_name(name: &NameInput) -> Self {
        Self {
            instructions: SYSTEM_INSTRUCTION,
            input: format!("Name: {}\nOutput:", name.as_str()),
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// Inbound body. `name` 保留原始 JSON，型別檢查交給驗證
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertRequest {
    pub name: serde_json::Value,
}

impl ConvertRequest {
    /// 空 body 視為 `{}`；任何合法 JSON 都接受，不是 object 就當作沒有 name
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        if body.is_empty() {
            return Ok(Self::default());
        }

        let value: serde_json::Value = serde_json::from_slice(body)?;
        let name = value
            .get("name")
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        Ok(Self { name })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub hiragana: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 與傳輸層無關的 HTTP 回應，由 server / lambda 各自轉換
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: Option<String>,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }
}
