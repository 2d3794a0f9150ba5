//! Error types shared by every module.

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The token endpoint refused an authorization-code or refresh exchange.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A Web API response body carried an `error` field.
    #[error("spotify api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serde error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("scrape error: {0}")]
    Scrape(String),

    /// No usable authorization code was obtained from the user.
    #[error("authorization code error: {0}")]
    CodeSource(String),
}

impl Error {
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_) | Error::Api { status: 401, .. })
    }
}

/// Extracts the provider error from a response body, if there is one.
///
/// The Web API reports `{"error": {"status": 401, "message": "..."}}` while the
/// accounts service reports `{"error": "invalid_grant", "error_description": "..."}`.
/// Both shapes are recognised; a `null` error field counts as no error.
pub fn provider_error(body: &Value) -> Option<(Option<u16>, String)> {
    match body.get("error")? {
        Value::Null => None,
        Value::Object(obj) => {
            let status = obj
                .get("status")
                .and_then(Value::as_u64)
                .map(|s| s as u16);
            let message = obj
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            Some((status, message))
        }
        Value::String(code) => {
            let message = body
                .get("error_description")
                .and_then(Value::as_str)
                .unwrap_or(code)
                .to_string();
            Some((None, message))
        }
        other => Some((None, other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_display() {
        let err = Error::Api {
            status: 404,
            message: "Non existing id".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Non existing id"));
    }

    #[test]
    fn test_web_api_error_shape() {
        let body = json!({"error": {"status": 401, "message": "The access token expired"}});
        assert_eq!(
            provider_error(&body),
            Some((Some(401), "The access token expired".to_string()))
        );
    }

    #[test]
    fn test_accounts_error_shape() {
        let body = json!({"error": "invalid_grant", "error_description": "Invalid refresh token"});
        assert_eq!(
            provider_error(&body),
            Some((None, "Invalid refresh token".to_string()))
        );

        let bare = json!({"error": "invalid_client"});
        assert_eq!(provider_error(&bare), Some((None, "invalid_client".to_string())));
    }

    #[test]
    fn test_no_error_field() {
        assert_eq!(provider_error(&json!({"id": "abc"})), None);
        assert_eq!(provider_error(&json!({"error": null})), None);
    }

    #[test]
    fn test_is_auth_error() {
        assert!(Error::Authentication("nope".into()).is_auth_error());
        assert!(
            Error::Api {
                status: 401,
                message: "expired".into()
            }
            .is_auth_error()
        );
        assert!(!Error::Scrape("bad selector".into()).is_auth_error());
    }
}
