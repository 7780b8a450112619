mod session_service;
mod token_signer;

pub use session_service::*;
pub use token_signer::*;
