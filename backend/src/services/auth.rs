//! Authentication flow: signup, signin, refresh, signout and access checks
//!
//! Each user has at most one live refresh token: the value stored in the
//! credential store. Signin overwrites it, signout clears it, and refresh
//! only honours a token that is both validly signed and still stored.

use crate::auth::{AuthUser, JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{CredentialStore, StoreError};
use todo_api_shared::{validation, AccessTokenResponse, AuthError, AuthTokens};
use tracing::{debug, info, warn};

const TOKEN_TYPE: &str = "Bearer";

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user with no refresh token
    pub async fn signup(
        store: &dyn CredentialStore,
        id: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        validation::validate_credentials(id, password).map_err(ApiError::Validation)?;

        let digest = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        match store.create_user(id, &digest).await {
            Ok(_) => {
                info!(user_id = %id, "User signed up");
                Ok(())
            }
            Err(StoreError::Duplicate(_)) => Err(AuthError::UserExists.into()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials and issue a fresh access/refresh pair
    ///
    /// Unknown ids and wrong passwords produce the same error.
    pub async fn signin(
        store: &dyn CredentialStore,
        jwt: &JwtService,
        id: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let Some(user) = store.find_user(id).await? else {
            PasswordService::verify_decoy(password.to_string())
                .await
                .map_err(ApiError::Internal)?;
            debug!("Signin rejected");
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = PasswordService::verify_async(password.to_string(), user.password_digest)
            .await
            .map_err(ApiError::Internal)?;
        if !valid {
            debug!("Signin rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        let access_token = jwt.issue_access(&user.id).map_err(ApiError::Internal)?;
        let refresh_token = jwt.issue_refresh(&user.id).map_err(ApiError::Internal)?;

        store.set_refresh_token(&user.id, Some(&refresh_token)).await?;

        info!(user_id = %user.id, "User signed in");

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: jwt.access_token_expiry_secs(),
        })
    }

    /// Exchange a stored refresh token for a new access token
    ///
    /// The refresh token itself is not rotated.
    pub async fn refresh(
        store: &dyn CredentialStore,
        jwt: &JwtService,
        refresh_token: Option<&str>,
    ) -> Result<AccessTokenResponse, ApiError> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = jwt.verify_refresh(token).map_err(|e| {
            debug!(reason = %e, "Refresh token failed validation");
            AuthError::InvalidToken(e)
        })?;

        let user = store
            .find_user_by_refresh_token(token)
            .await?
            .filter(|user| user.id == claims.id)
            .ok_or_else(|| {
                warn!(user_id = %claims.id, "Refresh token is signed but no longer stored");
                AuthError::UnknownRefreshToken
            })?;

        let access_token = jwt.issue_access(&user.id).map_err(ApiError::Internal)?;

        Ok(AccessTokenResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: jwt.access_token_expiry_secs(),
        })
    }

    /// Forget the stored refresh token of an authenticated user
    pub async fn signout(store: &dyn CredentialStore, user: &AuthUser) -> Result<(), ApiError> {
        store.set_refresh_token(&user.user_id, None).await?;
        info!(user_id = %user.user_id, "User signed out");
        Ok(())
    }

    /// Resolve a presented access token to the caller's identity
    pub fn authenticate(jwt: &JwtService, access_token: Option<&str>) -> Result<AuthUser, ApiError> {
        let token = access_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = jwt.verify_access(token).map_err(AuthError::InvalidToken)?;

        Ok(AuthUser { user_id: claims.id })
    }
}
