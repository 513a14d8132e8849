use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

use crate::{
    error::{ApiError, AuthError},
    models::Admin,
};

/// Discriminator embedded in every credential this service issues. A token
/// signed with the same secret for any other purpose carries a different tag
/// and is rejected outright, so key reuse elsewhere can never mint an admin
/// session.
pub const ADMIN_SESSION_TOKEN_TYPE: &str = "admin-session";

/// Session lifetime in seconds. There is no refresh: after 24 hours the admin
/// re-authenticates.
pub const SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Claims
///
/// The signed payload of an admin session credential. A snapshot of the
/// principal at issuance time; changes to the stored principal are not
/// reflected until re-login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the admin's UUID.
    pub sub: Uuid,
    pub email: String,
    /// Display name, carried so pages can greet without a storage round trip.
    pub name: String,
    pub role: String,
    /// Credential-kind discriminator, always `admin-session` for tokens we mint.
    #[serde(rename = "type")]
    pub token_type: String,
    /// Issued At: seconds since the Unix epoch.
    pub iat: usize,
    /// Expiration: the first instant the credential is invalid.
    pub exp: usize,
}

/// unix_now
///
/// Wall-clock seconds since the Unix epoch. Credential timestamps are
/// second-resolution.
pub fn unix_now() -> usize {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_secs() as usize
}

/// issue
///
/// Builds the claim set for an authenticated principal and signs it (HS256)
/// with the configured secret. Fails with `ApiError::Configuration` when no
/// secret is configured; an unsigned or weakly-signed credential is never
/// produced.
pub fn issue(admin: &Admin, secret: Option<&str>) -> Result<String, ApiError> {
    let secret = secret.ok_or(ApiError::Configuration)?;
    let now = unix_now();

    let claims = Claims {
        sub: admin.id,
        email: admin.email.clone(),
        name: admin.full_name.clone(),
        role: admin.role.clone(),
        token_type: ADMIN_SESSION_TOKEN_TYPE.to_string(),
        iat: now,
        exp: now + SESSION_TTL_SECS as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal("issue session credential", e))
}

/// verify
///
/// Recomputes the signature over the claims portion (constant-time comparison
/// inside jsonwebtoken), checks expiry with zero leeway, and checks the
/// credential-kind discriminator. Pure function of (credential, secret,
/// current time); no side effects.
///
/// Failure mapping:
/// - expired claims → `AuthError::Expired`
/// - wrong discriminator → `AuthError::WrongType`
/// - bad signature, malformed token, anything else → `AuthError::InvalidSignature`
pub fn verify(credential: &str, secret: Option<&str>) -> Result<Claims, ApiError> {
    let secret = secret.ok_or(ApiError::Configuration)?;

    let mut validation = Validation::default();
    validation.validate_exp = true;
    // The default 60s leeway would keep a credential alive past its embedded
    // expiry; expires-at is the first invalid instant.
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        credential,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => ApiError::Auth(AuthError::Expired),
        _ => ApiError::Auth(AuthError::InvalidSignature),
    })?;

    if token_data.claims.token_type != ADMIN_SESSION_TOKEN_TYPE {
        return Err(ApiError::Auth(AuthError::WrongType));
    }

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const TEST_SECRET: &str = "test-secret-value-1234567890";

    fn test_admin() -> Admin {
        Admin {
            id: Uuid::from_u128(7),
            email: "admin@civicportal.org".to_string(),
            password_hash: "unused".to_string(),
            full_name: "Site Administrator".to_string(),
            role: "admin".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn sign(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn verify_round_trips_issue() {
        let admin = test_admin();
        let credential = issue(&admin, Some(TEST_SECRET)).unwrap();
        let claims = verify(&credential, Some(TEST_SECRET)).unwrap();

        assert_eq!(claims.sub, admin.id);
        assert_eq!(claims.email, admin.email);
        assert_eq!(claims.name, admin.full_name);
        assert_eq!(claims.role, admin.role);
        assert_eq!(claims.token_type, ADMIN_SESSION_TOKEN_TYPE);
        assert_eq!(claims.exp, claims.iat + SESSION_TTL_SECS as usize);
    }

    #[test]
    fn issue_without_secret_is_a_configuration_error() {
        let err = issue(&test_admin(), None).unwrap_err();
        assert!(matches!(err, ApiError::Configuration));

        let err = verify("whatever", None).unwrap_err();
        assert!(matches!(err, ApiError::Configuration));
    }

    #[test]
    fn any_single_position_signature_mutation_fails() {
        let credential = issue(&test_admin(), Some(TEST_SECRET)).unwrap();
        let sig_start = credential.rfind('.').unwrap() + 1;

        for pos in sig_start..credential.len() {
            let mut bytes = credential.clone().into_bytes();
            bytes[pos] = if bytes[pos] == b'A' { b'B' } else { b'A' };
            let Ok(tampered) = String::from_utf8(bytes) else {
                continue;
            };
            if tampered == credential {
                continue;
            }
            let err = verify(&tampered, Some(TEST_SECRET)).unwrap_err();
            assert!(
                matches!(err, ApiError::Auth(AuthError::InvalidSignature)),
                "mutation at {pos} was accepted"
            );
        }
    }

    #[test]
    fn expired_credential_fails_even_with_a_valid_signature() {
        let now = unix_now();
        let claims = Claims {
            sub: Uuid::from_u128(7),
            email: "admin@civicportal.org".into(),
            name: "Site Administrator".into(),
            role: "admin".into(),
            token_type: ADMIN_SESSION_TOKEN_TYPE.into(),
            iat: now - 100_000,
            exp: now - 100, // correctly signed, already past
        };
        let err = verify(&sign(&claims), Some(TEST_SECRET)).unwrap_err();
        assert!(matches!(err, ApiError::Auth(AuthError::Expired)));
    }

    #[test]
    fn foreign_token_type_fails_even_when_fresh() {
        let now = unix_now();
        let claims = Claims {
            sub: Uuid::from_u128(7),
            email: "admin@civicportal.org".into(),
            name: "Site Administrator".into(),
            role: "admin".into(),
            token_type: "password-reset".into(),
            iat: now,
            exp: now + 3600,
        };
        let err = verify(&sign(&claims), Some(TEST_SECRET)).unwrap_err();
        assert!(matches!(err, ApiError::Auth(AuthError::WrongType)));
    }

    #[test]
    fn wrong_secret_fails_as_invalid_signature() {
        let credential = issue(&test_admin(), Some(TEST_SECRET)).unwrap();
        let err = verify(&credential, Some("a-different-secret")).unwrap_err();
        assert!(matches!(err, ApiError::Auth(AuthError::InvalidSignature)));
    }
}
