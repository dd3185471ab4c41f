//! Password hashing with bcrypt.
//!
//! bcrypt is deliberately slow, so both hashing and verification run on the
//! blocking thread pool.

use tokio::task;

use super::AuthError;

/// Work factor used when none is configured.
pub const DEFAULT_COST: u32 = 10;

/// Hashes and verifies admin passwords at a fixed bcrypt cost.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash `password` into a self-describing bcrypt string.
    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    /// Check `password` against a stored hash.
    ///
    /// A malformed stored hash is an error, not a mismatch.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("s3cret").await.unwrap();
        assert_ne!(hash, "s3cret");
        assert!(hasher.verify("s3cret", &hash).await.unwrap());
        assert!(!hasher.verify("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_error() {
        let hasher = PasswordHasher::new(4);
        assert!(hasher.verify("s3cret", "not-a-hash").await.is_err());
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(PasswordHasher::default().cost(), 10);
    }
}
