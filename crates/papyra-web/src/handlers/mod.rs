//! HTTP handlers for all web routes.

pub mod account;
pub mod chat;
pub mod database;
pub mod home;
pub mod search;

use axum::response::Html;

/// Navigation partial shared across all pages.
pub const NAV_HTML: &str = include_str!("../../templates/nav.html");

/// Wraps a page body in the shared document shell.
pub fn render_page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} — Papyra</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
{nav}
<main class="main-content">
{body}
</main>
</body>
</html>"#,
        title = title,
        nav = NAV_HTML,
        body = body,
    ))
}

/// Minimal HTML escaping for user- and source-provided text.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
