//! Password hashing using bcrypt
//!
//! Hashes embed their own random salt, so two hashes of the same password
//! differ while both still verify.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. Request handlers use the `_async`
//! variants, which run on the blocking thread pool.

use anyhow::Result;
use tokio::sync::OnceCell;

/// bcrypt work factor
pub const HASH_COST: u32 = 10;

const DUMMY_PASSWORD: &str = "blog-api-dummy-password";

/// Hash compared against when there is no stored hash, built on first use
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

async fn dummy_hash() -> Result<&'static String> {
    DUMMY_HASH
        .get_or_try_init(|| PasswordService::hash_async(DUMMY_PASSWORD.to_string()))
        .await
}

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        bcrypt::hash(password, HASH_COST)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// A stored hash that cannot be parsed is an error, not a mismatch.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Spend the cost of a real comparison without a stored hash
    ///
    /// Always reports a mismatch. Login calls this for unknown emails so that
    /// they take as long as a wrong password.
    pub async fn verify_missing_async(password: String) -> Result<bool> {
        let hash = dummy_hash().await?;
        Self::verify_async(password, hash.clone()).await?;
        Ok(false)
    }
}
