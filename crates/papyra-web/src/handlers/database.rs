//! Raw listing of the stored article collection.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::SignedCookieJar;

use papyra_common::article::Article;

use crate::auth::require_user;
use crate::handlers::{escape, render_page};
use crate::state::SharedState;

pub async fn database_page(State(state): State<SharedState>, jar: SignedCookieJar) -> Response {
    if let Err(redirect) = require_user(&jar, "/database") {
        return redirect.into_response();
    }

    let articles = state.articles.list_all().await;
    render_listing(&articles).into_response()
}

fn render_listing(articles: &[Article]) -> Html<String> {
    let rows: String = articles
        .iter()
        .map(|a| {
            format!(
                r#"<tr>
    <td><span class="badge badge-source">{source}</span></td>
    <td>{title}</td>
    <td>{keywords}</td>
    <td>{summary}</td>
    <td>{topics}</td>
</tr>"#,
                source = a.source,
                title = escape(&a.title),
                keywords = escape(a.keywords.as_deref().unwrap_or("")),
                summary = escape(&truncate(a.summary.as_deref().unwrap_or(""), 160)),
                topics = escape(&a.topics.join("; ")),
            )
        })
        .collect();

    let table = if articles.is_empty() {
        r#"<div class="alert alert-warning">The database is empty. Run a search first.</div>"#
            .to_string()
    } else {
        format!(
            r#"<table class="table">
<thead><tr><th>Source</th><th>Title</th><th>Keywords</th><th>Summary</th><th>Topics</th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
        )
    };

    let body = format!(
        r#"<h1>Database <span class="badge">{count} records</span></h1>
{table}"#,
        count = articles.len(),
    );
    render_page("Database", &body)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use papyra_common::article::{Article, ArticleSource};

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 160), "short");
        let long = "é".repeat(200);
        let cut = truncate(&long, 160);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.chars().count(), 161);
    }

    #[test]
    fn listing_renders_rows() {
        let mut article = Article::raw(ArticleSource::IeeeXplore, "T".into(), "c".into());
        article.keywords = Some("graph%20neural".into());
        article.summary = Some("S".into());
        article.topics = vec!["a".into(), "b".into()];
        let Html(page) = render_listing(std::slice::from_ref(&article));
        assert!(page.contains("IEEE Xplore"));
        assert!(page.contains("graph%20neural"));
        assert!(page.contains("a; b"));
    }
}
