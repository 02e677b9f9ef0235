use serde::Deserialize;
use serde_json::Value;

use crate::{AnswerPayload, CitationPayload, FailureKind, ServiceError};

#[derive(Debug, Deserialize)]
struct HistoryReply {
    chat_history: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct AnswerReply {
    response: String,
    #[serde(default)]
    citations: Option<Vec<CitationReply>>,
}

#[derive(Debug, Deserialize)]
struct CitationReply {
    #[serde(default)]
    page: Option<PageLabel>,
    #[serde(default)]
    content: String,
}

const UNKNOWN_PAGE: &str = "Unknown";

/// Page numbers arrive as integers or as text such as `"Unknown"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageLabel {
    Text(String),
    Number(serde_json::Number),
}

impl From<PageLabel> for String {
    fn from(label: PageLabel) -> Self {
        match label {
            PageLabel::Text(text) => text,
            PageLabel::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: String,
}

/// Extracts the `content` of every object entry whose content is a non-empty
/// string, in reply order. Plain values and empty objects are dropped.
pub fn parse_history(body: &[u8]) -> Result<Vec<String>, ServiceError> {
    let reply: HistoryReply = serde_json::from_slice(body).map_err(malformed)?;
    Ok(reply
        .chat_history
        .into_iter()
        .filter_map(history_content)
        .collect())
}

fn history_content(item: Value) -> Option<String> {
    let Value::Object(mut fields) = item else {
        return None;
    };
    match fields.remove("content") {
        Some(Value::String(content)) if !content.is_empty() => Some(content),
        _ => None,
    }
}

/// Parses a successful ask reply. Missing or null `citations` become an empty list.
pub fn parse_answer(body: &[u8]) -> Result<AnswerPayload, ServiceError> {
    let reply: AnswerReply = serde_json::from_slice(body).map_err(malformed)?;
    Ok(AnswerPayload {
        response: reply.response,
        citations: reply
            .citations
            .unwrap_or_default()
            .into_iter()
            .map(|citation| CitationPayload {
                page: citation
                    .page
                    .map(String::from)
                    .unwrap_or_else(|| UNKNOWN_PAGE.to_string()),
                content: citation.content,
            })
            .collect(),
    })
}

/// Returns the service's `error` string from a failure body, if it has one.
pub fn parse_service_error(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorReply>(body)
        .ok()
        .map(|reply| reply.error)
}

fn malformed(err: serde_json::Error) -> ServiceError {
    ServiceError::new(FailureKind::MalformedBody, err.to_string())
}
