use crate::adapters::openai::{DEFAULT_API_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECONDS};
use crate::core::ConfigProvider;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 方便測試，不直接碰 process 環境變數
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_seconds = match lookup("OPENAI_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConvertError::InvalidConfigValueError {
                    field: "OPENAI_TIMEOUT_SECONDS".to_string(),
                    value: raw.clone(),
                    reason: "Value must be a whole number of seconds".to_string(),
                })?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self {
            api_key: lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
            api_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_seconds,
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_url("OPENAI_BASE_URL", &self.api_base_url)?;
        validate_non_empty_string("OPENAI_MODEL", &self.model)?;
        // Lambda 本身最長 900 秒
        validate_range("OPENAI_TIMEOUT_SECONDS", self.timeout_seconds, 1, 900)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<LambdaConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LambdaConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_key(), None);
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-lambda"),
            ("OPENAI_MODEL", "gpt-test"),
            ("OPENAI_TIMEOUT_SECONDS", "12"),
        ])
        .unwrap();
        assert_eq!(config.api_key(), Some("sk-lambda"));
        assert_eq!(config.model(), "gpt-test");
        assert_eq!(config.timeout_seconds(), 12);
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = config_from(&[("OPENAI_API_KEY", "  ")]).unwrap();
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_bad_timeout() {
        let err = config_from(&[("OPENAI_TIMEOUT_SECONDS", "soon")]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidConfigValueError { .. }));
    }
}
