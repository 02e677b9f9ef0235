use crate::{notices, AppState, Effect, Msg, OperationId, OperationKind};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionStarted => {
            if state.start() {
                vec![Effect::FetchHistory]
            } else {
                Vec::new()
            }
        }
        Msg::HistoryRequested => vec![Effect::FetchHistory],
        Msg::HistoryLoaded(entries) => {
            state.replace_history(entries);
            Vec::new()
        }
        // Background load: prior history stays as it was.
        Msg::HistoryLoadFailed => Vec::new(),
        Msg::FilesSelected(files) => {
            state.replace_selected_files(files);
            Vec::new()
        }
        Msg::ProcessClicked => {
            // An empty selection is still submitted; the service decides what it means.
            let op_id = state
                .notifier_mut()
                .begin(OperationKind::ProcessFiles, notices::PROCESSING_FILES);
            state.mark_dirty();
            vec![Effect::ProcessFiles {
                op_id,
                files: state.selected_files().to_vec(),
            }]
        }
        Msg::QueryChanged(text) => {
            state.set_query(text);
            Vec::new()
        }
        Msg::SendClicked => {
            if state.query().trim().is_empty() {
                state
                    .notifier_mut()
                    .fail_immediate(OperationKind::AskQuestion, notices::EMPTY_QUESTION);
                state.mark_dirty();
                return (state, Vec::new());
            }
            let op_id = state
                .notifier_mut()
                .begin(OperationKind::AskQuestion, notices::SENDING_QUESTION);
            state.mark_dirty();
            vec![Effect::AskQuestion {
                op_id,
                question: state.query().to_owned(),
            }]
        }
        Msg::FilesProcessed { op_id } => {
            // The selection is intentionally left as-is after a successful batch.
            settle(&mut state, op_id, Ok(notices::FILES_PROCESSED.to_owned()));
            Vec::new()
        }
        Msg::FilesProcessFailed { op_id } => {
            settle(&mut state, op_id, Err(notices::PROCESS_FILES_FAILED.to_owned()));
            Vec::new()
        }
        Msg::AnswerReceived { op_id, answer } => {
            if settle(&mut state, op_id, Ok(notices::QUESTION_SENT.to_owned())) {
                state.set_answer(answer);
            }
            Vec::new()
        }
        Msg::QuestionFailed {
            op_id,
            service_error,
        } => {
            let message = match service_error.as_deref() {
                Some(error) => notices::service_error(error),
                None => notices::QUESTION_FAILED.to_owned(),
            };
            settle(&mut state, op_id, Err(message));
            Vec::new()
        }
        Msg::NotificationDismissed(op_id) => {
            if state.notifier_mut().dismiss(op_id).is_ok() {
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}

/// Moves a pending operation to its terminal state. Returns `false` for stale
/// or duplicate completions, which leave the state untouched.
fn settle(state: &mut AppState, op_id: OperationId, outcome: Result<String, String>) -> bool {
    let notifier = state.notifier_mut();
    let transitioned = match outcome {
        Ok(message) => notifier.succeed(op_id, message),
        Err(message) => notifier.fail(op_id, message),
    }
    .is_ok();
    if transitioned {
        state.mark_dirty();
    }
    transitioned
}
