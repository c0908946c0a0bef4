use thiserror::Error;

/// 名字格式不符時回給呼叫端的固定提示
pub const NAME_GUIDANCE_MESSAGE: &str =
    "Send 'name' with only letters, spaces, hyphen, apostrophe (max 50).";

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Method not allowed. Use POST.")]
    MethodNotAllowed,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid JSON body: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("Unreadable request body: {reason}")]
    UndecodableBody { reason: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Service error: {message}")]
    ServiceError { message: String },

    #[error("Failed to convert to hiragana.")]
    ConversionError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    Configuration,
    Upstream,
    Internal,
}

impl ConvertError {
    pub fn missing_api_key() -> Self {
        ConvertError::ConfigError {
            message: "API key not configured".to_string(),
        }
    }

    pub fn invalid_name() -> Self {
        ConvertError::ValidationError {
            message: NAME_GUIDANCE_MESSAGE.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::MethodNotAllowed
            | ConvertError::MalformedRequest(_)
            | ConvertError::UndecodableBody { .. }
            | ConvertError::ValidationError { .. } => ErrorCategory::Client,
            ConvertError::ConfigError { .. } | ConvertError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ConvertError::ApiError(_)
            | ConvertError::ServiceError { .. }
            | ConvertError::ConversionError => ErrorCategory::Upstream,
            ConvertError::IoError(_) => ErrorCategory::Internal,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ConvertError::MethodNotAllowed => 405,
            ConvertError::MalformedRequest(_)
            | ConvertError::UndecodableBody { .. }
            | ConvertError::ValidationError { .. } => 400,
            _ => 500,
        }
    }

    /// 回應 body 裡 `error` 欄位的內容
    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::MalformedRequest(_) | ConvertError::UndecodableBody { .. } => {
                "Invalid JSON body".to_string()
            }
            ConvertError::ConfigError { message }
            | ConvertError::ValidationError { message }
            | ConvertError::ServiceError { message } => {
                if message.is_empty() {
                    "Server error".to_string()
                } else {
                    message.clone()
                }
            }
            ConvertError::ApiError(e) => e.to_string(),
            ConvertError::InvalidConfigValueError { .. } | ConvertError::IoError(_) => {
                "Server error".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::MethodNotAllowed => "Send the request with POST",
            ConvertError::ConfigError { .. } => "Set OPENAI_API_KEY before starting the service",
            ConvertError::InvalidConfigValueError { .. } => {
                "Check the command line flags, environment variables and config file"
            }
            ConvertError::MalformedRequest(_) | ConvertError::UndecodableBody { .. } => {
                "Send a UTF-8 JSON body such as {\"name\": \"John\"}"
            }
            ConvertError::ValidationError { .. } => {
                "Use only ASCII letters, spaces, hyphens and apostrophes (max 50)"
            }
            ConvertError::ApiError(_) | ConvertError::ServiceError { .. } => {
                "Check network access, API key and quota of the OpenAI account"
            }
            ConvertError::ConversionError => "Retry, or try a different spelling of the name",
            ConvertError::IoError(_) => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ConvertError::MethodNotAllowed.status_code(), 405);
        assert_eq!(ConvertError::invalid_name().status_code(), 400);
        assert_eq!(ConvertError::missing_api_key().status_code(), 500);
        assert_eq!(ConvertError::ConversionError.status_code(), 500);

        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ConvertError::from(parse_err).status_code(), 400);
    }

    #[test]
    fn test_user_friendly_messages() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        assert_eq!(
            ConvertError::from(parse_err).user_friendly_message(),
            "Invalid JSON body"
        );
        assert_eq!(
            ConvertError::invalid_name().user_friendly_message(),
            NAME_GUIDANCE_MESSAGE
        );
        assert_eq!(
            ConvertError::missing_api_key().user_friendly_message(),
            "API key not configured"
        );
        assert_eq!(
            ConvertError::ConversionError.user_friendly_message(),
            "Failed to convert to hiragana."
        );
        assert_eq!(
            ConvertError::ServiceError {
                message: String::new()
            }
            .user_friendly_message(),
            "Server error"
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            ConvertError::MethodNotAllowed.category(),
            ErrorCategory::Client
        );
        assert_eq!(
            ConvertError::ServiceError {
                message: "quota".to_string()
            }
            .category(),
            ErrorCategory::Upstream
        );
        assert_eq!(
            ConvertError::missing_api_key().category(),
            ErrorCategory::Configuration
        );
    }
}
