use crate::domain::model::{NameInput, MAX_NAME_LENGTH};
use crate::utils::error::{ConvertError, Result};
use regex::Regex;
use std::sync::LazyLock;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z \-']+$").expect("name pattern is a valid regex"));

/// 檢查順序：字串 → 去空白後非空 → 長度 ≤ 50 → 只含英文字母、空白、連字號、撇號
///
/// 缺少或為 `null` 的 name 視為空字串。
pub fn validate_name(value: &serde_json::Value) -> Result<NameInput> {
    let raw = match value {
        serde_json::Value::String(s) => s.as_str(),
        serde_json::Value::Null => "",
        other => {
            tracing::debug!("name is not a string: {}", type_name(other));
            return Err(ConvertError::invalid_name());
        }
    };

    let trimmed = raw.trim_matches(is_trimmed_whitespace);
    if trimmed.is_empty() {
        return Err(ConvertError::invalid_name());
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ConvertError::invalid_name());
    }
    if !NAME_PATTERN.is_match(trimmed) {
        return Err(ConvertError::invalid_name());
    }

    Ok(NameInput::new_unchecked(trimmed.to_string()))
}

/// 與瀏覽器 `String.prototype.trim` 相同的空白集合：
/// 不含 U+0085 (NEL)，但包含 U+FEFF (BOM)
fn is_trimmed_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
