//! Trainlog Auth: password hashing, bearer credential issuance and
//! validation, and the account lifecycle (register, login, erasure).

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginInput, LoginOutput, RegisterInput};
pub use token::{AccessTokenClaims, TokenVerifier, ValidatedClaims};
