//! Request DTOs for the gateway API
//!
//! Defines the query parameters and JSON bodies accepted by `/api/cache`.

use serde::Deserialize;

use crate::error::GatewayError;
use crate::store::MAX_TTL_SECONDS;

/// Query parameters for `GET /api/cache`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchParams {
    /// The cache key, typically an encoded query
    pub key: Option<String>,
}

impl FetchParams {
    /// Returns the key, rejecting a missing or empty one.
    pub fn require_key(self) -> Result<String, GatewayError> {
        self.key.filter(|key| !key.is_empty()).ok_or_else(|| {
            GatewayError::InvalidRequest("key query parameter is required".to_string())
        })
    }
}

/// A TTL override as sent by clients: either a JSON number or a string
/// holding one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TtlField {
    Seconds(i64),
    Text(String),
}

/// Request body for `POST /api/cache`.
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The payload to store
/// - `ttl`: Optional TTL in seconds (uses the configured default if absent)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub ttl: Option<TtlField>,
}

impl StoreRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() || self.value.is_empty() {
            return Some("key and value are required in payload body".to_string());
        }
        None
    }

    /// Resolves the TTL to apply, falling back to `default_ttl`.
    ///
    /// An explicit TTL must lie in `1..=MAX_TTL_SECONDS`.
    pub fn effective_ttl(&self, default_ttl: u64) -> Result<u64, GatewayError> {
        let seconds = match &self.ttl {
            None => return Ok(default_ttl),
            Some(TtlField::Seconds(n)) => Some(*n),
            Some(TtlField::Text(s)) if s.trim().is_empty() => return Ok(default_ttl),
            Some(TtlField::Text(s)) => s.trim().parse::<i64>().ok(),
        };

        let seconds = seconds
            .and_then(|n| u64::try_from(n).ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                GatewayError::InvalidRequest(
                    "ttl must be a positive integer number of seconds".to_string(),
                )
            })?;

        if seconds > MAX_TTL_SECONDS {
            return Err(GatewayError::InvalidRequest(format!(
                "ttl must not exceed {} seconds",
                MAX_TTL_SECONDS
            )));
        }
        Ok(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_request_deserialize() {
        let json = r#"{"key": "abc", "value": "hello"}"#;
        let req: StoreRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "abc");
        assert_eq!(req.value, "hello");
        assert!(req.ttl.is_none());
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_store_request_missing_value() {
        let req: StoreRequest = serde_json::from_str(r#"{"key": "abc"}"#).unwrap();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_store_request_empty_key() {
        let req: StoreRequest = serde_json::from_str(r#"{"key": "", "value": "v"}"#).unwrap();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_ttl_defaults() {
        let req: StoreRequest = serde_json::from_str(r#"{"key": "k", "value": "v"}"#).unwrap();
        assert_eq!(req.effective_ttl(300).unwrap(), 300);

        let req: StoreRequest =
            serde_json::from_str(r#"{"key": "k", "value": "v", "ttl": ""}"#).unwrap();
        assert_eq!(req.effective_ttl(300).unwrap(), 300);
    }

    #[test]
    fn test_ttl_as_string() {
        let req: StoreRequest =
            serde_json::from_str(r#"{"key": "k", "value": "v", "ttl": "60"}"#).unwrap();
        assert_eq!(req.ttl, Some(TtlField::Text("60".to_string())));
        assert_eq!(req.effective_ttl(300).unwrap(), 60);
    }

    #[test]
    fn test_ttl_as_number() {
        let req: StoreRequest =
            serde_json::from_str(r#"{"key": "k", "value": "v", "ttl": 90}"#).unwrap();
        assert_eq!(req.effective_ttl(300).unwrap(), 90);
    }

    #[test]
    fn test_ttl_rejects_garbage() {
        let req: StoreRequest =
            serde_json::from_str(r#"{"key": "k", "value": "v", "ttl": "soon"}"#).unwrap();
        assert!(matches!(
            req.effective_ttl(300),
            Err(GatewayError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_ttl_rejects_non_positive() {
        for ttl in ["0", "-5"] {
            let body = format!(r#"{{"key": "k", "value": "v", "ttl": {}}}"#, ttl);
            let req: StoreRequest = serde_json::from_str(&body).unwrap();
            assert!(req.effective_ttl(300).is_err(), "ttl {} accepted", ttl);
        }
    }

    #[test]
    fn test_ttl_rejects_above_maximum() {
        for ttl in [
            r#""9223372036854775807""#.to_string(),
            "9223372036854775807".to_string(),
            (MAX_TTL_SECONDS + 1).to_string(),
        ] {
            let body = format!(r#"{{"key": "k", "value": "v", "ttl": {}}}"#, ttl);
            let req: StoreRequest = serde_json::from_str(&body).unwrap();
            assert!(
                matches!(req.effective_ttl(300), Err(GatewayError::InvalidRequest(_))),
                "ttl {} accepted",
                ttl
            );
        }
    }

    #[test]
    fn test_ttl_accepts_maximum() {
        let body = format!(r#"{{"key": "k", "value": "v", "ttl": {}}}"#, MAX_TTL_SECONDS);
        let req: StoreRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(req.effective_ttl(300).unwrap(), MAX_TTL_SECONDS);
    }

    #[test]
    fn test_fetch_params_require_key() {
        let params = FetchParams {
            key: Some("abc".to_string()),
        };
        assert_eq!(params.require_key().unwrap(), "abc");

        assert!(FetchParams::default().require_key().is_err());
        assert!(FetchParams {
            key: Some(String::new())
        }
        .require_key()
        .is_err());
    }
}
