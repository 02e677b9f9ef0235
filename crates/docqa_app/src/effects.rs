use std::sync::{mpsc, Arc};

use docqa_core::{Answer, Citation, Effect, Msg};
use docqa_engine::{
    AnswerPayload, EngineError, EngineEvent, EngineHandle, EventSink, ServiceSettings, UploadFile,
};
use docqa_logging::{docqa_info, docqa_op, docqa_warn};
use log::Level;

use crate::app::AppEvent;

/// Bridges core effects to the engine and engine events back to core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ServiceSettings, tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings, Arc::new(MsgSink { tx }))?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchHistory => {
                    docqa_info!("FetchHistory");
                    self.engine.load_history();
                }
                Effect::ProcessFiles { op_id, files } => {
                    docqa_op!(Level::Info, op_id, "ProcessFiles files={}", files.len());
                    let uploads = files
                        .into_iter()
                        .map(|file| UploadFile {
                            path: file.path,
                            name: file.name,
                        })
                        .collect();
                    self.engine.process_files(op_id, uploads);
                }
                Effect::AskQuestion { op_id, question } => {
                    docqa_op!(Level::Info, op_id, "AskQuestion len={}", question.len());
                    self.engine.ask_question(op_id, question);
                }
            }
        }
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Msg(translate(event)));
    }
}

/// Maps an engine completion to the core message for it. Raw failure causes
/// are logged here and never reach the user, except the service's own error text.
pub(crate) fn translate(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::HistoryLoaded(Ok(entries)) => {
            docqa_info!("Loaded {} history entries", entries.len());
            Msg::HistoryLoaded(entries)
        }
        EngineEvent::HistoryLoaded(Err(err)) => {
            docqa_warn!("Error fetching chat history: {}", err);
            Msg::HistoryLoadFailed
        }
        EngineEvent::FilesProcessed { op_id, result } => match result {
            Ok(()) => {
                docqa_op!(Level::Info, op_id, "Files processed");
                Msg::FilesProcessed { op_id }
            }
            Err(err) => {
                docqa_op!(Level::Error, op_id, "Processing files failed: {}", err);
                Msg::FilesProcessFailed { op_id }
            }
        },
        EngineEvent::QuestionAnswered { op_id, result } => match result {
            Ok(payload) => Msg::AnswerReceived {
                op_id,
                answer: map_answer(payload),
            },
            Err(err) => {
                docqa_op!(Level::Error, op_id, "Sending question failed: {}", err);
                Msg::QuestionFailed {
                    op_id,
                    service_error: err.service_message().map(str::to_owned),
                }
            }
        },
    }
}

fn map_answer(payload: AnswerPayload) -> Answer {
    Answer {
        text: payload.response,
        citations: payload
            .citations
            .into_iter()
            .map(|citation| Citation {
                page: citation.page,
                content: citation.content,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docqa_engine::{CitationPayload, FailureKind, ServiceError, ServiceSettings};

    fn service_error(kind: FailureKind) -> ServiceError {
        ServiceError {
            message: kind.to_string(),
            kind,
        }
    }

    #[test]
    fn history_failure_becomes_silent_message() {
        let msg = translate(EngineEvent::HistoryLoaded(Err(service_error(
            FailureKind::Network,
        ))));
        assert_eq!(msg, Msg::HistoryLoadFailed);
    }

    #[test]
    fn answer_payload_maps_to_core_answer() {
        let msg = translate(EngineEvent::QuestionAnswered {
            op_id: 4,
            result: Ok(AnswerPayload {
                response: "Paris".to_string(),
                citations: vec![CitationPayload {
                    page: "3".to_string(),
                    content: "Capital of France".to_string(),
                }],
            }),
        });
        assert_eq!(
            msg,
            Msg::AnswerReceived {
                op_id: 4,
                answer: Answer {
                    text: "Paris".to_string(),
                    citations: vec![Citation {
                        page: "3".to_string(),
                        content: "Capital of France".to_string(),
                    }],
                },
            }
        );
    }

    #[test]
    fn only_service_errors_carry_text_to_the_user() {
        let structured = translate(EngineEvent::QuestionAnswered {
            op_id: 1,
            result: Err(service_error(FailureKind::Service {
                status: 400,
                message: "index not built".to_string(),
            })),
        });
        assert_eq!(
            structured,
            Msg::QuestionFailed {
                op_id: 1,
                service_error: Some("index not built".to_string()),
            }
        );

        let transport = translate(EngineEvent::QuestionAnswered {
            op_id: 2,
            result: Err(service_error(FailureKind::HttpStatus(502))),
        });
        assert_eq!(
            transport,
            Msg::QuestionFailed {
                op_id: 2,
                service_error: None,
            }
        );
    }

    #[test]
    fn batch_failure_is_generic() {
        let msg = translate(EngineEvent::FilesProcessed {
            op_id: 3,
            result: Err(service_error(FailureKind::Timeout)),
        });
        assert_eq!(msg, Msg::FilesProcessFailed { op_id: 3 });
    }

    #[test]
    fn runner_starts_against_default_settings() {
        let (tx, _rx) = mpsc::channel();
        assert!(EffectRunner::new(ServiceSettings::default(), tx).is_ok());
    }
}
