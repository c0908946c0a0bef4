use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

/// 選用的 TOML 設定檔，只填 flag / 環境變數沒給的部分
///
/// ```toml
/// [server]
/// host = "127.0.0.1"
/// port = 8080
///
/// [openai]
/// api_key = "${OPENAI_API_KEY}"
/// model = "gpt-4o-mini"
/// timeout_seconds = 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub openai: OpenAiSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAiSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConvertError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        let mut config: FileConfig =
            toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;

        // 環境變數沒設定時 api_key 會變成空字串，視同未設定
        if config
            .openai
            .api_key
            .as_deref()
            .is_some_and(|k| k.trim().is_empty())
        {
            config.openai.api_key = None;
        }

        Ok(config)
    }
}

/// 替換 `${VAR}`，找不到的變數換成空字串
fn substitute_env_vars(content: &str) -> String {
    ENV_VAR_PATTERN
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.openai.base_url {
            validate_url("openai.base_url", base_url)?;
        }
        if let Some(timeout) = self.openai.timeout_seconds {
            validate_range("openai.timeout_seconds", timeout, 1, 300)?;
        }
        if let Some(port) = self.server.port {
            validate_range("server.port", port, 1, u16::MAX)?;
        }
        Ok(())
    }
}
