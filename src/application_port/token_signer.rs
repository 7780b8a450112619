use crate::application_port::{InvalidTokenError, SessionError};
use crate::domain_model::TokenClaims;

#[async_trait::async_trait]
pub trait TokenSigner: Send + Sync {
    async fn sign(&self, claims: &TokenClaims) -> Result<String, SessionError>;
    async fn verify(&self, token: &str) -> Result<TokenClaims, InvalidTokenError>;
}
