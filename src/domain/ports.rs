use crate::domain::model::TransliterationRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部文字生成服務：吃 instructions / input / temperature / max_output_tokens，回傳自由文字
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &TransliterationRequest) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> Option<&str>;
    fn api_base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
