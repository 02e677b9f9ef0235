#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The front end is up; load prior conversation history once.
    SessionStarted,
    /// User asked for the history panel to be reloaded.
    HistoryRequested,
    /// History fetch succeeded with already-filtered entries.
    HistoryLoaded(Vec<String>),
    /// History fetch failed. Logged by the effect runner, never shown.
    HistoryLoadFailed,
    /// User picked a new set of files; replaces the previous selection.
    FilesSelected(Vec<crate::SelectedFile>),
    /// User clicked Process.
    ProcessClicked,
    /// User edited the query field.
    QueryChanged(String),
    /// User clicked Send.
    SendClicked,
    /// Engine completion for a file batch.
    FilesProcessed { op_id: crate::OperationId },
    FilesProcessFailed { op_id: crate::OperationId },
    /// Engine completion for a question.
    AnswerReceived {
        op_id: crate::OperationId,
        answer: crate::Answer,
    },
    QuestionFailed {
        op_id: crate::OperationId,
        /// The service's own `error` string, when it sent one.
        service_error: Option<String>,
    },
    /// User closed a finished notification.
    NotificationDismissed(crate::OperationId),
}
