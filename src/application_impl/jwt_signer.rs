use crate::application_port::{InvalidTokenError, SessionError, TokenSigner};
use crate::domain_model::TokenClaims;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// HS256 compact tokens over a shared secret.
pub struct JwtHs256Signer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHs256Signer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is compared by the session check so it can clean up the store
        validation.validate_exp = false;
        validation.validate_aud = false;
        JwtHs256Signer {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

fn invalid_token(kind: &ErrorKind) -> InvalidTokenError {
    match kind {
        ErrorKind::InvalidSignature => InvalidTokenError::Signature,
        ErrorKind::Json(_) | ErrorKind::Utf8(_) | ErrorKind::MissingRequiredClaim(_) => {
            InvalidTokenError::Claims
        }
        _ => InvalidTokenError::Malformed,
    }
}

#[async_trait::async_trait]
impl TokenSigner for JwtHs256Signer {
    async fn sign(&self, claims: &TokenClaims) -> Result<String, SessionError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| SessionError::Signing(e.to_string()))
    }

    async fn verify(&self, token: &str) -> Result<TokenClaims, InvalidTokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| invalid_token(e.kind()))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn claims() -> TokenClaims {
        TokenClaims {
            issuer: "www.mdslab.org".to_string(),
            expires_at: Utc::now() + Duration::minutes(1),
            id: "1".to_string(),
            kind: "user".to_string(),
        }
    }

    #[tokio::test]
    async fn sign_then_verify() {
        let signer = JwtHs256Signer::new(b"@2e$1#1&$23_-!");
        let token = signer.sign(&claims()).await.unwrap();
        assert_eq!(token.split('.').count(), 3);
        let decoded = signer.verify(&token).await.unwrap();
        assert_eq!(decoded.id, "1");
        assert_eq!(decoded.kind, "user");
        assert_eq!(decoded.issuer, "www.mdslab.org");
    }

    #[tokio::test]
    async fn other_secret_is_rejected() {
        let token = JwtHs256Signer::new(b"first").sign(&claims()).await.unwrap();
        let err = JwtHs256Signer::new(b"second").verify(&token).await.unwrap_err();
        assert_eq!(err, InvalidTokenError::Signature);
    }

    #[tokio::test]
    async fn expired_claims_still_verify() {
        let signer = JwtHs256Signer::new(b"secret");
        let mut old = claims();
        old.expires_at = Utc::now() - Duration::hours(1);
        let token = signer.sign(&old).await.unwrap();
        assert!(signer.verify(&token).await.is_ok());
    }

    #[tokio::test]
    async fn garbage_is_malformed() {
        let signer = JwtHs256Signer::new(b"secret");
        assert_eq!(signer.verify("").await.unwrap_err(), InvalidTokenError::Malformed);
        assert_eq!(
            signer.verify("not-a-token").await.unwrap_err(),
            InvalidTokenError::Malformed
        );
    }

    #[tokio::test]
    async fn foreign_payload_is_unreadable() {
        #[derive(serde::Serialize)]
        struct Other {
            exp: i64,
            sub: String,
        }
        let other = Other {
            exp: Utc::now().timestamp() + 60,
            sub: "1".to_string(),
        };
        let key = EncodingKey::from_secret(b"secret");
        let token = encode(&Header::new(Algorithm::HS256), &other, &key).unwrap();
        let err = JwtHs256Signer::new(b"secret").verify(&token).await.unwrap_err();
        assert_eq!(err, InvalidTokenError::Claims);
    }
}
