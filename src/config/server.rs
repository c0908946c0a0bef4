use crate::adapters::openai::{DEFAULT_API_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECONDS};
use crate::config::toml_config::FileConfig;
use crate::core::ConfigProvider;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Parser)]
#[command(name = "hiragana-convert")]
#[command(about = "Transliterate Latin-alphabet names into Japanese hiragana over HTTP")]
pub struct ServiceConfig {
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "OPENAI_TIMEOUT_SECONDS", default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, env = "HIRAGANA_CONFIG", help = "Optional TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServiceConfig {
    /// 設定檔的值只覆蓋仍是預設值的欄位
    pub fn merge_file(&mut self, file: FileConfig) {
        if let Some(host) = file.server.host {
            if self.host == DEFAULT_HOST {
                self.host = host;
            }
        }
        if let Some(port) = file.server.port {
            if self.port == DEFAULT_PORT {
                self.port = port;
            }
        }
        // 只有空白的 key 視為沒設定
        if self.api_key().is_none() {
            self.api_key = file.openai.api_key;
        }
        if let Some(base_url) = file.openai.base_url {
            if self.api_base_url == DEFAULT_API_BASE_URL {
                self.api_base_url = base_url;
            }
        }
        if let Some(model) = file.openai.model {
            if self.model == DEFAULT_MODEL {
                self.model = model;
            }
        }
        if let Some(timeout) = file.openai.timeout_seconds {
            if self.timeout_seconds == DEFAULT_TIMEOUT_SECONDS {
                self.timeout_seconds = timeout;
            }
        }
    }

    /// 有 `--config` 時讀檔並合併
    pub fn load_config_file(&mut self) -> Result<()> {
        if let Some(path) = self.config.clone() {
            tracing::info!("Loading config file: {}", path.display());
            let file = FileConfig::from_file(&path)?;
            file.validate()?;
            self.merge_file(file);
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            ConvertError::InvalidConfigValueError {
                field: "host".to_string(),
                value: self.host.clone(),
                reason: format!("Invalid listen address: {}", e),
            }
        })
    }
}

impl ConfigProvider for ServiceConfig {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
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

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        self.socket_addr()?;
        validate_url("api_base_url", &self.api_base_url)?;
        validate_non_empty_string("model", &self.model)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;

        tracing::info!("✅ Service configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::{OpenAiSection, ServerSection};

    fn parse(args: &[&str]) -> ServiceConfig {
        let mut argv = vec!["hiragana-convert"];
        argv.extend_from_slice(args);
        ServiceConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--host",
            "127.0.0.1",
            "--port",
            "8081",
            "--api-key",
            "sk-cli",
            "--model",
            "gpt-test",
            "--timeout-seconds",
            "5",
        ]);

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8081");
        assert_eq!(config.api_key(), Some("sk-cli"));
        assert_eq!(config.model(), "gpt-test");
        assert_eq!(config.timeout_seconds(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_fills_only_defaults() {
        // 明確給預設值，避免環境變數影響結果
        let mut config = parse(&[
            "--host",
            DEFAULT_HOST,
            "--port",
            "9000",
            "--api-key",
            "sk-cli",
            "--api-base-url",
            DEFAULT_API_BASE_URL,
            "--model",
            DEFAULT_MODEL,
        ]);

        config.merge_file(FileConfig {
            server: ServerSection {
                host: Some("127.0.0.1".to_string()),
                port: Some(7000),
            },
            openai: OpenAiSection {
                api_key: Some("sk-file".to_string()),
                base_url: None,
                model: Some("gpt-file".to_string()),
                timeout_seconds: None,
            },
        });

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.api_key(), Some("sk-cli"));
        assert_eq!(config.model, "gpt-file");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_invalid_config() {
        let config = parse(&["--api-base-url", "not a url", "--api-key", "sk"]);
        assert!(config.validate().is_err());

        let config = parse(&["--host", "not a host", "--api-key", "sk"]);
        assert!(config.validate().is_err());

        let config = parse(&["--timeout-seconds", "0", "--api-key", "sk"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = parse(&["--api-key", "   "]);
        assert!(config.validate().is_ok());
        assert_eq!(config.api_key(), None);

        let mut config = parse(&["--api-key", " "]);
        config.merge_file(FileConfig {
            server: ServerSection::default(),
            openai: OpenAiSection {
                api_key: Some("sk-file".to_string()),
                base_url: None,
                model: None,
                timeout_seconds: None,
            },
        });
        assert_eq!(config.api_key(), Some("sk-file"));
    }
}
