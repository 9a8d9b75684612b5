//! Request and response types exchanged with the function runtime.
//!
//! These types are serialised as JSON on the HTTP trigger surface.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Invocation result
// ---------------------------------------------------------------------------

/// Successful response body for `POST /call`.
///
/// Serialises as `{"decryptedPassword": "<string-or-null>"}`. The password is
/// `null` when the remote unwrap succeeded but the local decrypt failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitiveValue {
    /// Plaintext password recovered by the envelope decryption, if any.
    #[serde(rename = "decryptedPassword")]
    pub decrypted_password: Option<String>,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"upstream_error"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status; always `"ok"` once the process is serving.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_value_serialises_under_camel_case_key() {
        let v = SensitiveValue {
            decrypted_password: Some("hunter2".into()),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["decryptedPassword"], "hunter2");
    }

    #[test]
    fn absent_password_serialises_as_null() {
        let v = SensitiveValue {
            decrypted_password: None,
        };
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"decryptedPassword":null}"#);
    }

    #[test]
    fn error_response_new() {
        let e = ErrorResponse::new("upstream_error", "KMS key unwrap failed");
        assert_eq!(e.code, "upstream_error");
        assert!(e.message.contains("unwrap failed"));
    }
}
