//! Authentication middleware
//!
//! `require_auth` guards a group of routes: a request without a bearer
//! token gets 401, one whose token fails validation gets 403, and a good
//! token leaves an [`AuthUser`] in the request extensions.

use crate::error::ApiError;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::Span;

/// Identity decoded from a valid access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

/// Bearer token from the Authorization header, if any.
///
/// The scheme name is matched case-insensitively; any other scheme
/// counts as no token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("Bearer")
        .then(|| token.trim())
}

/// Reuses the identity left by [`require_auth`], otherwise authenticates
/// the request itself.
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let app_state = AppState::from_ref(state);
        AuthService::authenticate(app_state.jwt(), bearer_token(&parts.headers))
    }
}

/// Middleware for a group of routes, applied with `from_fn_with_state`
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = AuthService::authenticate(state.jwt(), bearer_token(request.headers()))?;

    Span::current().record("user_id", user.user_id.as_str());
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
