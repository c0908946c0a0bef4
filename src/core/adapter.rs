use crate::core::hiragana::extract_hiragana;
use crate::core::name::validate_name;
use crate::domain::model::TransliterationRequest;
use crate::domain::ports::TextGenerator;
use crate::utils::error::{ConvertError, Result};

/// validate → build prompt → 呼叫外部服務 → 抽出平假名
///
/// 不重試、不快取，每次呼叫互相獨立。`generator` 在啟動時建立後注入。
pub struct NameTransliterationAdapter<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> NameTransliterationAdapter<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn convert(&self, name: &serde_json::Value) -> Result<String> {
        let name = validate_name(name)?;
        let request = TransliterationRequest::for_name(&name);

        tracing::debug!("Requesting transliteration for {:?}", name.as_str());
        let raw_output = self.generator.generate(&request).await?;
        tracing::debug!("Raw model output: {:?}", raw_output);

        // 模型沒回任何平假名 (包含完全沒回) 一律算轉換失敗
        let hiragana = extract_hiragana(&raw_output);
        if hiragana.is_empty() {
            tracing::warn!("Model output contained no hiragana");
            return Err(ConvertError::ConversionError);
        }

        Ok(hiragana)
    }
}
