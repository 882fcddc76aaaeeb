//! Password hashing using Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use std::sync::OnceLock;

use crate::error::{ShopError, ShopResult};

/// Hash a password into a salted PHC string.
pub fn hash_password(password: &str) -> ShopResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ShopError::Storage(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string.
///
/// A malformed stored hash is treated as a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Hash checked when the customer name is unknown, so a failed login costs
/// the same whether or not the name is registered.
pub(crate) fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("shop-unknown-customer").unwrap_or_default())
        .as_str()
}

/// [`hash_password`] on the blocking thread pool.
pub(crate) async fn hash_in_background(password: &str) -> ShopResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(ShopError::storage)?
}

/// [`verify_password`] on the blocking thread pool.
///
/// Without a stored hash the password is checked against [`dummy_hash`] and
/// the result is always `false`.
pub(crate) async fn verify_in_background(password: &str, stored_hash: Option<String>) -> ShopResult<bool> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            verify_password(&password, dummy_hash());
            false
        }
    })
    .await
    .map_err(ShopError::storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrongpass", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_dummy_hash_is_real_argon2() {
        assert!(dummy_hash().starts_with("$argon2id$"));
        assert!(!verify_password("", dummy_hash()));
    }

    #[tokio::test]
    async fn test_background_hash_and_verify() {
        let hash = hash_in_background("s3cret").await.unwrap();
        assert!(verify_in_background("s3cret", Some(hash.clone())).await.unwrap());
        assert!(!verify_in_background("nope", Some(hash)).await.unwrap());
        assert!(!verify_in_background("s3cret", None).await.unwrap());
    }

    #[test]
    fn test_plaintext_is_not_a_valid_hash() {
        assert!(!verify_password("s3cret", "s3cret"));
    }
}
