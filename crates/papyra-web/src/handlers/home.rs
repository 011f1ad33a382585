//! Home page.

use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::SignedCookieJar;

use crate::auth::current_user;
use crate::handlers::{escape, render_page};
use crate::state::SharedState;

pub async fn home(State(state): State<SharedState>, jar: SignedCookieJar) -> Html<String> {
    let article_count = state.articles.count().await.unwrap_or(0);

    let greeting = match current_user(&jar) {
        Some(username) => format!("Signed in as <strong>{}</strong>.", escape(&username)),
        None => r#"<a href="/login">Log in</a> or <a href="/register">register</a> to search."#
            .to_string(),
    };

    let body = format!(
        r#"<h1>Research Article Aggregator</h1>
<p>Search arXiv, Europe PMC, and IEEE Xplore in one pass; every result is
summarized and topic-tagged before it lands in the database.</p>
<p>{greeting}</p>
<div class="stat-card">
    <div class="stat-value">{article_count}</div>
    <div class="stat-label">Articles stored</div>
</div>
<p><a class="btn" href="/search">New search</a>
   <a class="btn btn-outline" href="/database">Browse database</a></p>"#,
    );

    render_page("Home", &body)
}
