//! Password hashing, session-cookie helpers, and the credential store
//! seam the account handlers run against.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, Key, SignedCookieJar};
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use papyra_common::Result;
use papyra_db::{User, UserRepository};

/// Where account handlers read and create users. Split from
/// [`UserRepository`] so the handlers can run against an in-memory store
/// in tests.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create(&self, user: &User) -> Result<()>;
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        UserRepository::find_by_username(self, username).await
    }
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        UserRepository::find_by_email(self, email).await
    }
    async fn create(&self, user: &User) -> Result<()> {
        UserRepository::create(self, user).await
    }
}

pub const SESSION_COOKIE: &str = "papyra_session";

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
    Ok(hash.to_string())
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else { return false };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Session signing key: derived from the configured secret, or generated
/// fresh per boot when unset (existing sessions then expire on restart).
pub fn session_key(secret: Option<&SecretString>) -> Key {
    match secret {
        Some(secret) if secret.expose_secret().len() >= 32 => {
            Key::derive_from(secret.expose_secret().as_bytes())
        }
        Some(_) => {
            warn!("PAPYRA_SESSION_SECRET is shorter than 32 bytes, generating a random key");
            Key::generate()
        }
        None => Key::generate(),
    }
}

pub fn current_user(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

pub fn login_cookie(username: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, username.to_string()))
        .path("/")
        .http_only(true)
        .build()
}

/// Extracts the logged-in username or yields the login redirect the
/// protected pages use.
pub fn require_user(jar: &SignedCookieJar, next: &str) -> std::result::Result<String, Redirect> {
    current_user(jar).ok_or_else(|| Redirect::to(&format!("/login?next={next}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "hunter2"));
        assert!(!verify_password(&hash, "hunter3"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("not-a-phc-string", "password"));
    }

    #[test]
    fn require_user_redirects_anonymous_to_login_with_next() {
        use axum::response::IntoResponse;

        let jar = SignedCookieJar::new(Key::generate());
        let redirect = require_user(&jar, "/search").unwrap_err();
        let resp = redirect.into_response();
        assert_eq!(
            resp.headers()
                .get(axum::http::header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/login?next=/search")
        );
    }

    #[test]
    fn session_cookie_round_trips_through_signed_jar() {
        let jar = SignedCookieJar::new(Key::generate());
        assert_eq!(current_user(&jar), None);
        let jar = jar.add(login_cookie("ada"));
        assert_eq!(current_user(&jar), Some("ada".to_string()));
        assert!(require_user(&jar, "/search").is_ok());
    }

    #[test]
    fn short_secret_falls_back_to_generated_key() {
        let short = SecretString::from("too-short".to_string());
        let long = SecretString::from("0123456789abcdef0123456789abcdef".to_string());
        // Both must produce usable keys; the long one deterministically.
        let k1 = session_key(Some(&long));
        let k2 = session_key(Some(&long));
        assert_eq!(k1.master(), k2.master());
        let _ = session_key(Some(&short));
        let _ = session_key(None);
    }
}
