/**
 * Password Hashing
 *
 * One-way password transform and verification predicate, backed by bcrypt.
 * Each call to `hash` draws a fresh salt, so hashing the same plaintext
 * twice yields different digests.
 *
 * bcrypt is CPU-bound, so both operations run on the blocking thread pool
 * and never stall the async executor.
 */

use thiserror::Error;

/// Work factor for bcrypt. Tunable; raising it makes offline brute force
/// proportionally more expensive.
pub const BCRYPT_COST: u32 = 10;

/// Failures from the hashing path
///
/// Verification never produces these: a malformed digest fails closed.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// bcrypt rejected the input or cost
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// The blocking task was cancelled or panicked
    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Hash a plaintext password with a fresh salt
pub async fn hash(plaintext: &str) -> Result<String, PasswordError> {
    let plaintext = plaintext.to_owned();
    let digest = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, BCRYPT_COST)).await??;
    Ok(digest)
}

/// Verify a plaintext password against a stored digest
///
/// Returns true iff the plaintext re-hashes to `digest` under the salt
/// embedded in it. Fails closed: a malformed digest (or a cancelled
/// verification task) returns false rather than surfacing an error.
pub async fn verify(plaintext: &str, digest: &str) -> bool {
    let plaintext = plaintext.to_owned();
    let digest = digest.to_owned();
    match tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest)).await {
        Ok(Ok(matched)) => matched,
        Ok(Err(e)) => {
            tracing::warn!("password verification failed: {:?}", e);
            false
        }
        Err(e) => {
            tracing::error!("verification task failed: {:?}", e);
            false
        }
    }
}
