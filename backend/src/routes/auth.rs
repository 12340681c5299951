//! Authentication routes
//!
//! Signup, signin, token refresh and signout.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use todo_api_shared::{
    AccessTokenResponse, AuthTokens, MessageResponse, RefreshRequest, SigninRequest,
    SignupRequest,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/refresh", post(refresh))
        .route("/signout", post(signout))
}

/// POST /signup
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    AuthService::signup(state.users(), &req.id, &req.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// POST /signin
async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = AuthService::signin(state.users(), state.jwt(), &req.id, &req.password).await?;
    Ok(Json(tokens))
}

/// POST /refresh
///
/// A missing or unreadable body counts as an absent token (401).
async fn refresh(
    State(state): State<AppState>,
    body: Option<Json<RefreshRequest>>,
) -> ApiResult<Json<AccessTokenResponse>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let token =
        AuthService::refresh(state.users(), state.jwt(), req.refresh_token.as_deref()).await?;
    Ok(Json(token))
}

/// POST /signout
///
/// Requires a valid Bearer token.
async fn signout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::signout(state.users(), &auth_user).await?;
    Ok(Json(MessageResponse::new("Signed out successfully")))
}
