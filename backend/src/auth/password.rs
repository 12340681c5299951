//! Password digests using Argon2id
//!
//! Every digest carries its own random salt in PHC string format, so the
//! stored value is all `verify` needs.

use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tokio::sync::OnceCell;

/// Digest checked when there is no stored one, so a lookup miss costs the
/// same Argon2 work as a wrong password
static DECOY_DIGEST: OnceCell<String> = OnceCell::const_new();

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Produce a salted digest of `password` (CPU-bound, blocks the caller)
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Check `password` against a stored digest (CPU-bound, blocks the caller)
    ///
    /// A digest that cannot be parsed is an error, not a mismatch.
    pub fn verify(password: &str, digest: &str) -> Result<bool> {
        let parsed =
            PasswordHash::new(digest).map_err(|e| anyhow::anyhow!("Invalid digest: {}", e))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// [`PasswordService::hash`] on the blocking thread pool
    pub async fn hash_async(password: String) -> Result<String> {
        run_blocking(move || Self::hash(&password)).await
    }

    /// [`PasswordService::verify`] on the blocking thread pool
    pub async fn verify_async(password: String, digest: String) -> Result<bool> {
        run_blocking(move || Self::verify(&password, &digest)).await
    }

    /// Run a full verification against a fixed digest and report a mismatch
    pub async fn verify_decoy(password: String) -> Result<bool> {
        let digest = DECOY_DIGEST
            .get_or_try_init(|| Self::hash_async("decoy-password".to_string()))
            .await?
            .clone();
        Self::verify_async(password, digest).await?;
        Ok(false)
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .context("Password task panicked or was cancelled")?
}
