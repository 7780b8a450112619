mod jwt_signer;
mod session_manager;

pub use jwt_signer::*;
pub use session_manager::*;
