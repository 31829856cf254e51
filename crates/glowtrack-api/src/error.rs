//! Errors surfaced by the records API client.

use glowtrack_core::models::ValidationError;
use serde_json::Value;
use thiserror::Error;

/// Client error taxonomy.
///
/// `status_code()` keeps the dashboard's numeric convention: the HTTP status
/// when the server answered, 0 when it could not be reached, -1 otherwise.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Unable to reach the server: {0}")]
    Connection(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Request failed: {0}")]
    Request(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// What the caller was doing, for the generic notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
    Delete,
}

impl ApiError {
    pub fn status_code(&self) -> i32 {
        match self {
            ApiError::Status { status, .. } => i32::from(*status),
            ApiError::Connection(_) => 0,
            ApiError::Decode(_) | ApiError::Validation(_) | ApiError::Request(_) => -1,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    /// Notification text; details stay in the logs.
    pub fn user_message(&self, operation: Operation) -> &'static str {
        match (self, operation) {
            (ApiError::Connection(_), _) => "无法连接到服务器，请检查网络连接",
            (ApiError::Validation(_), _) => "请检查填写的信息",
            (_, Operation::Load) => "加载失败，请稍后重试",
            (_, Operation::Save) => "保存失败，请稍后重试",
            (_, Operation::Delete) => "删除失败，请稍后重试",
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        ApiError::Validation(e.into())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ApiError::Connection(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// The `detail` of an error body: a plain message, or the messages of a
/// field-validation list joined with "; ".
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let status = ApiError::Status { status: 404, detail: "Patient not found".into() };
        assert_eq!(status.status_code(), 404);
        assert!(status.is_not_found());
        assert_eq!(ApiError::Connection("refused".into()).status_code(), 0);
        assert_eq!(ApiError::Request("bad url".into()).status_code(), -1);
        assert_eq!(
            ApiError::Validation(ValidationError::Required("first_name".into())).status_code(),
            -1
        );
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "Patient not found"}"#).as_deref(),
            Some("Patient not found")
        );
        assert_eq!(
            extract_detail(r#"{"detail": [{"msg": "field required"}, {"msg": "bad email"}]}"#)
                .as_deref(),
            Some("field required; bad email")
        );
        assert_eq!(extract_detail("<html>oops</html>"), None);
        assert_eq!(extract_detail(r#"{"error": "x"}"#), None);
    }

    #[test]
    fn test_user_message() {
        let err = ApiError::Status { status: 500, detail: "boom".into() };
        assert_eq!(err.user_message(Operation::Load), "加载失败，请稍后重试");
        assert_eq!(err.user_message(Operation::Save), "保存失败，请稍后重试");
        assert_eq!(
            ApiError::Connection("timeout".into()).user_message(Operation::Delete),
            "无法连接到服务器，请检查网络连接"
        );
    }
}
