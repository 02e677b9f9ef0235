//! DocQA engine: HTTP client for the question-answering service and effect execution.
mod client;
mod engine;
mod settings;
mod types;
mod wire;

pub use client::{QaService, ReqwestQaService};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use settings::{ServiceSettings, ASK_PATH, DEFAULT_BASE_URL, HISTORY_PATH, PROCESS_PATH};
pub use types::{
    AnswerPayload, CitationPayload, EngineEvent, FailureKind, OperationId, ServiceError, UploadFile,
};
pub use wire::{parse_answer, parse_history, parse_service_error};
