use std::fmt;
use std::path::PathBuf;

pub type OperationId = u64;

/// A file on disk to be sent as one part of an ingestion batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationPayload {
    pub page: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerPayload {
    pub response: String,
    pub citations: Vec<CitationPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    HistoryLoaded(Result<Vec<String>, ServiceError>),
    FilesProcessed {
        op_id: OperationId,
        result: Result<(), ServiceError>,
    },
    QuestionAnswered {
        op_id: OperationId,
        result: Result<AnswerPayload, ServiceError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The error string the service put in its reply body, if any.
    pub fn service_message(&self) -> Option<&str> {
        match &self.kind {
            FailureKind::Service { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidRequest,
    FileRead { path: PathBuf },
    Network,
    Timeout,
    RedirectLimitExceeded,
    HttpStatus(u16),
    /// Non-2xx reply carrying a structured `error` field.
    Service { status: u16, message: String },
    MalformedBody,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::FileRead { path } => write!(f, "cannot read {}", path.display()),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Service { status, message } => {
                write!(f, "service error (status {status}): {message}")
            }
            FailureKind::MalformedBody => write!(f, "malformed reply body"),
        }
    }
}
