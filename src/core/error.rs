//! Error types for intake and generation. `Display` is the text shown to the user.

use crate::utils::constants::{MSG_IMAGE_TOO_SMALL, MSG_IMAGE_UNREADABLE, MSG_NO_FILE};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("{}", MSG_IMAGE_TOO_SMALL)]
    TooSmall { width: u32, height: u32 },

    #[error("{}", MSG_IMAGE_UNREADABLE)]
    Undecodable(String),

    #[error("{}", MSG_NO_FILE)]
    NoFile,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Upstream or proxy answered with a non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// Success status but the body did not carry an image.
    #[error("응답 형식이 올바르지 않습니다: {0}")]
    MalformedResponse(String),

    #[error("이미지 처리 실패: {0}")]
    Image(String),
}

impl From<image::ImageError> for GenerationError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}

/// Pulls a human readable message out of an upstream error body.
pub fn extract_error_message(body: Option<&Value>, fallback: impl Into<String>) -> String {
    let Some(body) = body else {
        return fallback.into();
    };

    if let Some(first) = body.get("errors").and_then(|e| e.get(0)) {
        return match first.as_str() {
            Some(s) => s.to_string(),
            None => first.to_string(),
        };
    }

    match body.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => fallback.into(),
    }
}

#[cfg(test)]
mod cfg_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_prefers_errors_array() {
        let body = json!({"errors": ["bad prompt", "other"], "message": "ignored"});
        assert_eq!(extract_error_message(Some(&body), "fallback"), "bad prompt");
    }

    #[test]
    fn test_extract_falls_back_to_message() {
        let body = json!({"name": "bad_request", "message": "init_image too large"});
        assert_eq!(
            extract_error_message(Some(&body), "fallback"),
            "init_image too large"
        );
    }

    #[test]
    fn test_extract_generic_fallback() {
        let body = json!({"id": "abc"});
        assert_eq!(extract_error_message(Some(&body), "fallback"), "fallback");
        assert_eq!(extract_error_message(None, "fallback"), "fallback");
    }

    #[test]
    fn test_extract_non_string_error_entry() {
        let body = json!({"errors": [{"code": 7}]});
        assert_eq!(extract_error_message(Some(&body), "fallback"), r#"{"code":7}"#);
    }

    #[test]
    fn test_error_display_is_user_message() {
        let err = GenerationError::Upstream {
            status: 400,
            message: "bad prompt".into(),
        };
        assert_eq!(err.to_string(), "bad prompt");

        let err = IntakeError::TooSmall {
            width: 100,
            height: 100,
        };
        assert_eq!(err.to_string(), MSG_IMAGE_TOO_SMALL);
        assert_eq!(IntakeError::NoFile.to_string(), MSG_NO_FILE);
    }
}
