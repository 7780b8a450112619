use serde::{Deserialize, Serialize};
use std::fmt;

/// Who a session belongs to: an opaque id plus a type tag such as `"user"` or `"admin"`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Identity {
    pub fn new(id: impl ToString, kind: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.into(),
        }
    }

    pub fn session_key(&self) -> SessionKey {
        SessionKey(format!("{}-{}", self.kind, self.id))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.id)
    }
}

/// Store key of the session record for one identity, `"{type}-{id}"`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SessionKey(pub String);

impl SessionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_is_type_dash_id() {
        let identity = Identity::new(1, "user");
        assert_eq!(identity.session_key().as_str(), "user-1");
        assert_eq!(identity.to_string(), "user-1");
    }

    #[test]
    fn kind_serializes_as_type() {
        let json = serde_json::to_value(Identity::new("42", "admin")).unwrap();
        assert_eq!(json["type"], "admin");
        assert_eq!(json["id"], "42");
    }
}
