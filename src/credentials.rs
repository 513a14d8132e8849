use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{error::ApiError, models::Admin, repository::RepositoryState};

/// hash_password
///
/// Hashes a plaintext password with Argon2id and a freshly generated salt.
/// Used by the bootstrap seed and by principal setup.
pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::internal("hash password", e))
}

/// verify_password
///
/// Checks a plaintext password against a stored PHC-format hash. A malformed
/// stored hash counts as a failed verification rather than an error; the
/// caller cannot tell the two apart and must not be able to.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// verify_credentials
///
/// Resolves a login attempt to a principal. Returns `Ok(None)` for an unknown
/// email, a deactivated principal, or a wrong password — the three cases are
/// deliberately indistinguishable to the caller.
pub async fn verify_credentials(
    repo: &RepositoryState,
    email: &str,
    password: &str,
) -> Result<Option<Admin>, ApiError> {
    let Some(admin) = repo
        .find_admin_by_email(email)
        .await
        .map_err(|e| ApiError::internal("log in", e))?
    else {
        return Ok(None);
    };

    if !admin.is_active || !verify_password(password, &admin.password_hash) {
        return Ok(None);
    }

    Ok(Some(admin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_the_same_password() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash));
    }

    #[test]
    fn verify_rejects_a_different_password() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(!verify_password("Tr0ub4dor&3", &hash));
    }

    #[test]
    fn two_hashes_of_the_same_password_differ() {
        // Fresh salt per hash.
        let a = hash_password("pw").unwrap();
        let b = hash_password("pw").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_fails_closed() {
        assert!(!verify_password("pw", "not-a-phc-string"));
    }
}
