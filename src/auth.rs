//! Credential verification and the admin session gate.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::ExposeSecret;
use tower_sessions::Session;

use crate::config::AdminSettings;
use crate::error::AppError;

/// Session attribute marking an authenticated admin.
pub const ADMIN_SESSION_KEY: &str = "admin";

/// Hash a password for the `admin.password_hash` config field.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a submitted admin password. When a hash is configured (and
/// non-empty) it is authoritative; otherwise the configured default
/// plaintext password is compared exactly.
pub fn verify_password(submitted: &str, settings: &AdminSettings) -> bool {
    let configured_hash = settings
        .password_hash
        .as_ref()
        .map(|h| h.expose_secret().as_str())
        .filter(|h| !h.is_empty());

    match configured_hash {
        Some(hash) => match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(submitted.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::error!("configured admin password hash is invalid: {e}");
                false
            }
        },
        None => settings.default_password.expose_secret() == submitted,
    }
}

/// Session gate for `/admin/*`. Without a live admin session the request
/// is redirected to the login form, carrying the originally requested path
/// so it can resume after login; the route body never runs.
pub async fn require_admin(session: Session, request: Request<Body>, next: Next) -> Response {
    let admin: Option<bool> = session.get(ADMIN_SESSION_KEY).await.unwrap_or(None);
    if admin != Some(true) {
        let target = format!("/login?redirect={}", request.uri().path());
        return Redirect::to(&target).into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn settings_with_hash(hash: Option<&str>) -> AdminSettings {
        AdminSettings {
            password_hash: hash.map(|h| Secret::new(h.to_string())),
            default_password: Secret::new("fallback-pw".to_string()),
        }
    }

    #[test]
    fn verifies_against_configured_hash() {
        let hash = hash_password("s3cret").unwrap();
        let settings = settings_with_hash(Some(&hash));
        assert!(verify_password("s3cret", &settings));
        assert!(!verify_password("wrong", &settings));
        // The plaintext fallback must not work while a hash is configured.
        assert!(!verify_password("fallback-pw", &settings));
    }

    #[test]
    fn falls_back_to_plaintext_without_hash() {
        let settings = settings_with_hash(None);
        assert!(verify_password("fallback-pw", &settings));
        assert!(!verify_password("other", &settings));
    }

    #[test]
    fn empty_hash_counts_as_absent() {
        let settings = settings_with_hash(Some(""));
        assert!(verify_password("fallback-pw", &settings));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("pw").unwrap();
        let b = hash_password("pw").unwrap();
        assert_ne!(a, b);
    }
}
