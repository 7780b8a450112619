use crate::domain_model::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TOKEN_NOT_VALID: &str = "Token is not valid";

/// Payload signed into every session token.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "iss")]
    pub issuer: String,
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TokenClaims {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            kind: self.kind.clone(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// The current token of an identity, as written to the store.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub identity: Identity,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Outcome of checking a token against the store.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub is_logged: bool,
    pub token: String,
    pub message: Option<String>,
}

impl SessionStatus {
    pub fn not_valid(token: &str) -> Self {
        Self {
            is_logged: false,
            token: token.to_string(),
            message: Some(TOKEN_NOT_VALID.to_string()),
        }
    }

    pub fn compared(token: &str, is_logged: bool) -> Self {
        Self {
            is_logged,
            token: token.to_string(),
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn claims_use_short_wire_names() {
        let claims = TokenClaims {
            issuer: "www.mdslab.org".to_string(),
            expires_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            id: "1".to_string(),
            kind: "user".to_string(),
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["iss"], "www.mdslab.org");
        assert_eq!(json["exp"], 1_700_000_000);
        assert_eq!(json["type"], "user");
    }

    #[test]
    fn expiry_is_strictly_after() {
        let now = Utc::now();
        let claims = TokenClaims {
            issuer: String::new(),
            expires_at: now,
            id: "1".to_string(),
            kind: "user".to_string(),
        };
        assert!(!claims.is_expired_at(now));
        assert!(claims.is_expired_at(now + Duration::seconds(1)));
    }

    #[test]
    fn status_serializes_camel_case() {
        let json = serde_json::to_value(SessionStatus::not_valid("abc")).unwrap();
        assert_eq!(json["isLogged"], false);
        assert_eq!(json["message"], TOKEN_NOT_VALID);
        let json = serde_json::to_value(SessionStatus::compared("abc", true)).unwrap();
        assert!(json["message"].is_null());
    }
}
