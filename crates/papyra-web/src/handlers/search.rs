//! Search form and results page.
//!
//! POST runs the retrieval-and-enrichment pipeline synchronously; the
//! results page renders whatever came back, enriched and already
//! persisted.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use papyra_common::article::Article;

use crate::auth::require_user;
use crate::handlers::{escape, render_page};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SearchForm {
    pub query: String,
}

pub async fn search_page(jar: SignedCookieJar) -> Response {
    if let Err(redirect) = require_user(&jar, "/search") {
        return redirect.into_response();
    }
    render_search_form().into_response()
}

pub async fn search_submit(
    State(state): State<SharedState>,
    jar: SignedCookieJar,
    Form(form): Form<SearchForm>,
) -> Response {
    if let Err(redirect) = require_user(&jar, "/search") {
        return redirect.into_response();
    }

    let articles = state.pipeline.run(&form.query).await;
    render_results(&form.query, &articles).into_response()
}

fn render_search_form() -> Html<String> {
    let body = r#"<h1>Search the literature</h1>
<p>One query fans out to arXiv, Europe PMC, and IEEE Xplore. Results are
summarized and topic-tagged, then stored.</p>
<form method="POST" action="/search" class="stack-form">
    <label>Research topic
        <input type="text" name="query" placeholder="e.g. graph neural networks" required>
    </label>
    <button type="submit" class="btn">Search</button>
</form>"#;
    render_page("Search", body)
}

fn render_results(query: &str, articles: &[Article]) -> Html<String> {
    let results_html = if articles.is_empty() {
        r#"<div class="alert alert-warning">No articles found. Try a broader topic.</div>"#
            .to_string()
    } else {
        articles.iter().map(render_article_card).collect()
    };

    let body = format!(
        r#"<h1>Results for: <em>{query}</em>
<span class="badge">{count} articles</span></h1>
{results_html}
<p><a class="btn btn-outline" href="/search">New search</a></p>"#,
        query = escape(query),
        count = articles.len(),
    );
    render_page("Results", &body)
}

fn render_article_card(article: &Article) -> String {
    let title_html = match &article.url {
        Some(url) if !url.is_empty() => format!(
            r#"<a href="{}">{}</a>"#,
            escape(url),
            escape(&article.title)
        ),
        _ => escape(&article.title),
    };
    let doi_html = article
        .doi
        .as_deref()
        .filter(|doi| *doi != "NAN")
        .map(|doi| format!(r#"<span class="doi">DOI: {}</span>"#, escape(doi)))
        .unwrap_or_default();
    let topics_html: String = article
        .topics
        .iter()
        .map(|topic| format!(r#"<span class="badge badge-topic">{}</span>"#, escape(topic)))
        .collect();

    format!(
        r#"<div class="card">
    <div class="card-header">
        <h3>{title_html}</h3>
        <span class="badge badge-source">{source}</span> {doi_html}
    </div>
    <p class="summary">{summary}</p>
    <div class="topics">{topics_html}</div>
</div>"#,
        source = article.source,
        summary = escape(article.summary.as_deref().unwrap_or("No summary available")),
    )
}
