//! Error types for the Todo API

use thiserror::Error;

/// Reasons a signed token can be rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token is malformed")]
    Malformed,
}

/// Authentication error types
///
/// `InvalidCredentials` deliberately covers both an unknown id and a wrong
/// password so callers cannot probe which accounts exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User already exists")]
    UserExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("Refresh token is not recognised")]
    UnknownRefreshToken,
}
