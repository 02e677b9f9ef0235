use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use docqa_logging::{docqa_debug, docqa_op, docqa_trace};
use log::Level;

use crate::{
    EngineEvent, OperationId, QaService, ReqwestQaService, ServiceError, ServiceSettings,
    UploadFile,
};

/// Receives completion events from the engine thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("service setup failed: {0}")]
    Service(#[from] ServiceError),
    #[error("engine runtime failed to start: {0}")]
    Runtime(#[from] io::Error),
}

enum EngineCommand {
    LoadHistory,
    ProcessFiles {
        op_id: OperationId,
        files: Vec<UploadFile>,
    },
    AskQuestion {
        op_id: OperationId,
        question: String,
    },
}

/// Runs service calls on a background tokio runtime. Every command becomes its
/// own task, so calls overlap freely; each reports back exactly one event.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let service = ReqwestQaService::new(settings)?;
        Self::with_service(Arc::new(service), sink)
    }

    pub fn with_service(
        service: Arc<dyn QaService>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("docqa-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let service = service.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(service.as_ref(), command, sink.as_ref()).await;
                    });
                }
                docqa_debug!("Engine command channel closed; shutting down runtime");
            })?;

        Ok(Self { cmd_tx })
    }

    /// Convenience constructor that delivers events on a std channel.
    pub fn with_channel(
        service: Arc<dyn QaService>,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), EngineError> {
        let (event_tx, event_rx) = mpsc::channel();
        let handle = Self::with_service(service, Arc::new(ChannelEventSink::new(event_tx)))?;
        Ok((handle, event_rx))
    }

    pub fn load_history(&self) {
        self.send(EngineCommand::LoadHistory);
    }

    pub fn process_files(&self, op_id: OperationId, files: Vec<UploadFile>) {
        self.send(EngineCommand::ProcessFiles { op_id, files });
    }

    pub fn ask_question(&self, op_id: OperationId, question: impl Into<String>) {
        self.send(EngineCommand::AskQuestion {
            op_id,
            question: question.into(),
        });
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(service: &dyn QaService, command: EngineCommand, sink: &dyn EventSink) {
    let event = match command {
        EngineCommand::LoadHistory => {
            docqa_trace!("Fetching chat history");
            EngineEvent::HistoryLoaded(service.fetch_history().await)
        }
        EngineCommand::ProcessFiles { op_id, files } => {
            docqa_op!(Level::Trace, op_id, "Processing batch files={}", files.len());
            let result = service.process_files(&files).await;
            EngineEvent::FilesProcessed { op_id, result }
        }
        EngineCommand::AskQuestion { op_id, question } => {
            docqa_op!(Level::Trace, op_id, "Asking question len={}", question.len());
            let result = service.ask_question(&question).await;
            EngineEvent::QuestionAnswered { op_id, result }
        }
    };
    sink.emit(event);
}
