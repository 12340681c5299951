//! Application state management
//!
//! Shared state handed to every handler via Axum's state extraction.
//! Everything in it is cheap to clone and read-only after startup; the
//! stores are injected as trait objects.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::{CredentialStore, PgTodoRepository, PgUserRepository, TodoStore};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used for readiness checks
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Credential store
    pub users: Arc<dyn CredentialStore>,
    /// Todo store
    pub todos: Arc<dyn TodoStore>,
}

impl AppState {
    /// Create state backed by Postgres stores on `db`
    ///
    /// Pre-computes the JWT keys, so call once at startup.
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let users = Arc::new(PgUserRepository::new(db.clone()));
        let todos = Arc::new(PgTodoRepository::new(db.clone()));
        Self::with_stores(db, config, users, todos)
    }

    /// Create state with explicitly injected stores
    pub fn with_stores(
        db: PgPool,
        config: AppConfig,
        users: Arc<dyn CredentialStore>,
        todos: Arc<dyn TodoStore>,
    ) -> Self {
        let jwt = JwtService::new(
            &config.jwt.access_secret,
            &config.jwt.refresh_secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
        );

        Self {
            db,
            config: Arc::new(config),
            jwt,
            users,
            todos,
        }
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn users(&self) -> &dyn CredentialStore {
        self.users.as_ref()
    }

    #[inline]
    pub fn todos(&self) -> &dyn TodoStore {
        self.todos.as_ref()
    }
}
