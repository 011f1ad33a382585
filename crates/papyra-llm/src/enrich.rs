//! Article enrichment and chatbot calls.
//!
//! One completion call produces the summary, a second extracts topics from
//! that summary. Every failure is absorbed into a fixed sentinel so the
//! pipeline always proceeds with degraded data instead of erroring.

use std::sync::Arc;

use tracing::warn;

use crate::backend::{LlmBackend, LlmRequest, Message};

/// Sentinel summary when a completion call fails.
pub const SUMMARY_FAILED: &str = "Summarization failed";
/// Sentinel topic list entry when topic extraction fails.
pub const TOPICS_FAILED: &str = "Topic extraction failed";

/// Source placeholders that mean "there is no abstract to work with".
const NO_CONTENT_MARKERS: [&str; 2] = ["No summary available", "No abstract available"];

/// Fixed summary attached when an article has no usable content.
pub const NO_CONTENT_SUMMARY: &str =
    "As there's no available content provided, a summary cannot be created.";

/// Fixed topic list attached when an article has no usable content.
pub const NO_CONTENT_TOPICS: [&str; 2] = [
    "The main topics in the provided text are: lack of available content",
    "and inability to create a summary.",
];

const ASSISTANT_PROMPT: &str = "You are a helpful assistant.";
const RESEARCHER_PROMPT: &str =
    "You are a researcher explaining research papers based on questions asked to you";

/// Sentinel chat reply when the completion call fails.
pub const CHAT_FAILED: &str = "ChatBot failed";

/// Wraps an [`LlmBackend`] with the enrichment and chat prompts.
#[derive(Clone)]
pub struct LlmService {
    backend: Arc<dyn LlmBackend>,
}

impl LlmService {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// One completion call producing a short summary of `content`.
    pub async fn summarize(&self, content: &str) -> String {
        let req = LlmRequest {
            messages: vec![
                Message::system(ASSISTANT_PROMPT),
                Message::user(format!("Please summarize the following content: {content}")),
            ],
            model: None,
            max_tokens: Some(150),
        };
        match self.backend.complete(req).await {
            Ok(resp) => resp.content,
            Err(e) => {
                warn!("Summarization call failed: {e}");
                SUMMARY_FAILED.to_string()
            }
        }
    }

    /// One completion call extracting a short topic list from `text`.
    pub async fn extract_topics(&self, text: &str) -> Vec<String> {
        let req = LlmRequest {
            messages: vec![
                Message::system(ASSISTANT_PROMPT),
                Message::user(format!("Extract the main topics from the following text: {text}")),
            ],
            model: None,
            max_tokens: Some(100),
        };
        match self.backend.complete(req).await {
            Ok(resp) => resp.content.split(", ").map(str::to_string).collect(),
            Err(e) => {
                warn!("Topic extraction call failed: {e}");
                vec![TOPICS_FAILED.to_string()]
            }
        }
    }

    /// Summary + topic list for one article's content.
    ///
    /// Content equal to a source placeholder skips both model calls and
    /// yields the fixed no-content sentinels. Topics are extracted from
    /// the generated summary, not the raw content.
    pub async fn enrich(&self, content: &str) -> (String, Vec<String>) {
        if NO_CONTENT_MARKERS.contains(&content) {
            return (
                NO_CONTENT_SUMMARY.to_string(),
                NO_CONTENT_TOPICS.iter().map(|t| t.to_string()).collect(),
            );
        }
        let summary = self.summarize(content).await;
        let topics = self.extract_topics(&summary).await;
        (summary, topics)
    }

    /// Answers a free-form question with the researcher persona.
    pub async fn chat(&self, user_message: &str) -> String {
        let req = LlmRequest {
            messages: vec![
                Message::system(RESEARCHER_PROMPT),
                Message::user(format!(
                    "Answer the following question in a few sentences: {user_message}"
                )),
            ],
            model: None,
            max_tokens: Some(100),
        };
        match self.backend.complete(req).await {
            Ok(resp) => resp.content,
            Err(e) => {
                warn!("Chat call failed: {e}");
                CHAT_FAILED.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LlmError, LlmResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns scripted responses in order; errors once the script runs out.
    struct ScriptedBackend {
        responses: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(responses: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.iter().rev().map(|s| s.to_string()).collect()),
            })
        }
    }

    #[async_trait]
    impl LlmBackend for ScriptedBackend {
        async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
            match self.responses.lock().unwrap().pop() {
                Some(content) => Ok(LlmResponse {
                    content,
                    model: "scripted".to_string(),
                    prompt_tokens: 0,
                    completion_tokens: 0,
                }),
                None => Err(LlmError::ApiError { status: 500, message: "script exhausted".into() }),
            }
        }

        fn model_id(&self) -> &str { "scripted" }
    }

    #[tokio::test]
    async fn enrich_runs_summary_then_topics() {
        let svc = LlmService::new(ScriptedBackend::new(&["Test Summary", "Topic1, Topic2"]));
        let (summary, topics) = svc.enrich("This is a test content.").await;
        assert_eq!(summary, "Test Summary");
        assert_eq!(topics, vec!["Topic1", "Topic2"]);
    }

    #[tokio::test]
    async fn enrich_short_circuits_on_placeholder_content() {
        // A backend with no scripted responses would fail if called.
        let svc = LlmService::new(ScriptedBackend::new(&[]));
        let (summary, topics) = svc.enrich("No summary available").await;
        assert_eq!(summary, NO_CONTENT_SUMMARY);
        assert_eq!(topics.len(), 2);
        assert!(topics[0].contains("lack of available content"));

        let (summary, _) = svc.enrich("No abstract available").await;
        assert_eq!(summary, NO_CONTENT_SUMMARY);
    }

    #[tokio::test]
    async fn failures_substitute_sentinels() {
        let svc = LlmService::new(ScriptedBackend::new(&[]));
        assert_eq!(svc.summarize("anything").await, SUMMARY_FAILED);
        assert_eq!(svc.extract_topics("anything").await, vec![TOPICS_FAILED.to_string()]);
        assert_eq!(svc.chat("anything").await, CHAT_FAILED);
    }

    #[tokio::test]
    async fn single_topic_response_yields_one_entry() {
        let svc = LlmService::new(ScriptedBackend::new(&["Machine Learning"]));
        let topics = svc.extract_topics("text").await;
        assert_eq!(topics, vec!["Machine Learning"]);
    }
}
