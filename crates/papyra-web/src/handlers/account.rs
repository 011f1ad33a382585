//! Registration, login, and logout.
//!
//! Authentication failures surface only as generic flashed messages;
//! database errors behind them are logged by the error type.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use papyra_db::User;

use crate::auth::{
    current_user, hash_password, login_cookie, verify_password, UserStore, SESSION_COOKIE,
};
use crate::error::WebResult;
use crate::handlers::{escape, render_page};
use crate::state::SharedState;

// ── Login ─────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
    pub notice: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

pub async fn login_page(jar: SignedCookieJar, Query(query): Query<LoginQuery>) -> Response {
    if current_user(&jar).is_some() {
        return Redirect::to("/").into_response();
    }
    let notice = match query.notice.as_deref() {
        Some("created") => Some(("success", "Account created successfully! You can now log in.")),
        Some("exists") => Some((
            "danger",
            r#"This email address is already registered. Please <a href="/login">login</a> instead."#,
        )),
        _ => None,
    };
    render_login(query.next.as_deref(), notice).into_response()
}

pub async fn login_submit(
    State(state): State<SharedState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    login_with(&state.users, jar, form).await
}

async fn login_with(
    users: &dyn UserStore,
    jar: SignedCookieJar,
    form: LoginForm,
) -> WebResult<Response> {
    let user = users.find_by_username(&form.username).await?;

    let verified = user
        .map(|u| verify_password(&u.password_hash, &form.password))
        .unwrap_or(false);
    if !verified {
        let notice = Some(("danger", "Login Unsuccessful. Please check username and password"));
        return Ok(render_login(form.next.as_deref(), notice).into_response());
    }

    let jar = jar.add(login_cookie(&form.username));
    Ok((jar, Redirect::to(&redirect_target(form.next))).into_response())
}

/// Post-login redirect target. Only same-site paths are honored:
/// absolute URLs and protocol-relative `//host` values fall back to `/`.
fn redirect_target(next: Option<String>) -> String {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//"))
        .unwrap_or_else(|| "/".to_string())
}

fn render_login(next: Option<&str>, notice: Option<(&str, &str)>) -> axum::response::Html<String> {
    let notice_html = notice
        .map(|(level, text)| format!(r#"<div class="alert alert-{level}">{text}</div>"#))
        .unwrap_or_default();
    let next_field = next
        .map(|n| format!(r#"<input type="hidden" name="next" value="{}">"#, escape(n)))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>Login</h1>
{notice_html}
<form method="POST" action="/login" class="stack-form">
    {next_field}
    <label>Username <input type="text" name="username" required></label>
    <label>Password <input type="password" name="password" required></label>
    <button type="submit" class="btn">Log in</button>
</form>
<p>No account yet? <a href="/register">Register</a>.</p>"#,
    );
    render_page("Login", &body)
}

// ── Registration ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn register_page() -> axum::response::Html<String> {
    render_register(None)
}

pub async fn register_submit(
    State(state): State<SharedState>,
    Form(form): Form<RegisterForm>,
) -> WebResult<Response> {
    register_with(&state.users, form).await
}

async fn register_with(users: &dyn UserStore, form: RegisterForm) -> WebResult<Response> {
    if users.find_by_email(&form.email).await?.is_some() {
        return Ok(Redirect::to("/login?notice=exists").into_response());
    }

    let user = User {
        username: form.username,
        email: form.email,
        password_hash: hash_password(&form.password)?,
    };
    // A duplicate username trips the unique index here.
    if users.create(&user).await.is_err() {
        let notice = Some(("danger", "That username is already taken."));
        return Ok(render_register(notice).into_response());
    }

    Ok(Redirect::to("/login?notice=created").into_response())
}

fn render_register(notice: Option<(&str, &str)>) -> axum::response::Html<String> {
    let notice_html = notice
        .map(|(level, text)| format!(r#"<div class="alert alert-{level}">{text}</div>"#))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>Register</h1>
{notice_html}
<form method="POST" action="/register" class="stack-form">
    <label>Username <input type="text" name="username" required></label>
    <label>Email <input type="email" name="email" required></label>
    <label>Password <input type="password" name="password" required></label>
    <button type="submit" class="btn">Create account</button>
</form>
<p>Already registered? <a href="/login">Log in</a>.</p>"#,
    );
    render_page("Register", &body)
}

// ── Logout ────────────────────────────────────────────────────────────────────

pub async fn logout(jar: SignedCookieJar) -> Response {
    if current_user(&jar).is_none() {
        return Redirect::to("/login?next=/logout").into_response();
    }
    let jar = jar.remove(SESSION_COOKIE);
    (jar, Redirect::to("/")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::header::{LOCATION, SET_COOKIE};
    use axum_extra::extract::cookie::Key;
    use papyra_common::{PapyraError, Result};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryUsers {
        users: Mutex<Vec<User>>,
    }

    impl MemoryUsers {
        fn with_user(username: &str, email: &str, password: &str) -> Self {
            let store = Self::default();
            store.users.lock().unwrap().push(User {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password).unwrap(),
            });
            store
        }
    }

    #[async_trait]
    impl UserStore for MemoryUsers {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.username == username).cloned())
        }
        async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
        }
        async fn create(&self, user: &User) -> Result<()> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username == user.username) {
                return Err(PapyraError::Config("duplicate username".to_string()));
            }
            users.push(user.clone());
            Ok(())
        }
    }

    fn empty_jar() -> SignedCookieJar {
        SignedCookieJar::new(Key::generate())
    }

    fn location_of(resp: &Response) -> Option<&str> {
        resp.headers().get(LOCATION).and_then(|v| v.to_str().ok())
    }

    async fn body_of(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn redirect_target_honors_only_same_site_paths() {
        assert_eq!(redirect_target(Some("/database".to_string())), "/database");
        assert_eq!(redirect_target(None), "/");
        assert_eq!(redirect_target(Some("https://evil.example/".to_string())), "/");
        assert_eq!(redirect_target(Some("//evil.example".to_string())), "/");
    }

    #[tokio::test]
    async fn successful_login_sets_cookie_and_follows_next() {
        let users = MemoryUsers::with_user("ada", "ada@example.org", "hunter2");
        let form = LoginForm {
            username: "ada".to_string(),
            password: "hunter2".to_string(),
            next: Some("/database".to_string()),
        };

        let resp = login_with(&users, empty_jar(), form).await.unwrap();
        assert_eq!(location_of(&resp), Some("/database"));
        let cookie = resp.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with(SESSION_COOKIE));
    }

    #[tokio::test]
    async fn wrong_password_rerenders_login_with_message() {
        let users = MemoryUsers::with_user("ada", "ada@example.org", "hunter2");
        let form = LoginForm {
            username: "ada".to_string(),
            password: "wrong".to_string(),
            next: None,
        };

        let resp = login_with(&users, empty_jar(), form).await.unwrap();
        assert_eq!(location_of(&resp), None);
        let body = body_of(resp).await;
        assert!(body.contains("Login Unsuccessful. Please check username and password"));
    }

    #[tokio::test]
    async fn duplicate_email_redirects_to_login_notice() {
        let users = MemoryUsers::with_user("ada", "ada@example.org", "hunter2");
        let form = RegisterForm {
            username: "other".to_string(),
            email: "ada@example.org".to_string(),
            password: "pw".to_string(),
        };

        let resp = register_with(&users, form).await.unwrap();
        assert_eq!(location_of(&resp), Some("/login?notice=exists"));
    }

    #[tokio::test]
    async fn fresh_registration_hashes_and_redirects() {
        let users = MemoryUsers::default();
        let form = RegisterForm {
            username: "ada".to_string(),
            email: "ada@example.org".to_string(),
            password: "hunter2".to_string(),
        };

        let resp = register_with(&users, form).await.unwrap();
        assert_eq!(location_of(&resp), Some("/login?notice=created"));

        let stored = users.users.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].password_hash.starts_with("$argon2"));
        assert!(verify_password(&stored[0].password_hash, "hunter2"));
    }

    #[tokio::test]
    async fn taken_username_rerenders_register_with_message() {
        let users = MemoryUsers::with_user("ada", "ada@example.org", "hunter2");
        let form = RegisterForm {
            username: "ada".to_string(),
            email: "new@example.org".to_string(),
            password: "pw".to_string(),
        };

        let resp = register_with(&users, form).await.unwrap();
        let body = body_of(resp).await;
        assert!(body.contains("That username is already taken."));
    }
}
