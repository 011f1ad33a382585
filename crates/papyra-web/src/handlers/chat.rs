//! Chat page and JSON endpoint.
//!
//! The endpoint accepts `{"message": …}` and returns `{"response": …}`;
//! a failed completion call yields the fixed sentinel reply rather than
//! an error status.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::SignedCookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::{current_user, require_user};
use crate::handlers::render_page;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

pub async fn chat_page(jar: SignedCookieJar) -> Response {
    if let Err(redirect) = require_user(&jar, "/chat") {
        return redirect.into_response();
    }

    let body = r#"<h1>Research chat</h1>
<p>Ask a question about research papers; answers come from the same model
that summarizes your search results.</p>
<div id="chat-log" class="chat-log"></div>
<form id="chat-form" class="stack-form">
    <label>Your question <input type="text" id="chat-input" required></label>
    <button type="submit" class="btn">Send</button>
</form>
<script>
document.getElementById('chat-form').addEventListener('submit', async (e) => {
    e.preventDefault();
    const input = document.getElementById('chat-input');
    const log = document.getElementById('chat-log');
    const message = input.value;
    input.value = '';
    log.insertAdjacentText('beforeend', 'You: ' + message + '\n');
    const res = await fetch('/chat', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify({message}),
    });
    const data = await res.json();
    log.insertAdjacentText('beforeend', 'Papyra: ' + (data.response ?? '') + '\n');
});
</script>"#;
    render_page("Chat", body).into_response()
}

pub async fn chat_submit(
    State(state): State<SharedState>,
    jar: SignedCookieJar,
    Json(payload): Json<ChatRequest>,
) -> Response {
    // JSON callers get a status code, not a login redirect.
    if current_user(&jar).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "Authentication required"})),
        )
            .into_response();
    }

    let response = state.llm.chat(&payload.message).await;
    Json(ChatResponse { response }).into_response()
}
