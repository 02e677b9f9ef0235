use crate::view_model::{AppViewModel, NotificationView};
use crate::{Answer, Notifier, SelectedFile};

/// Session state. Every slot is last-write-wins and is only written by
/// `update`, one message at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    started: bool,
    selected_files: Vec<SelectedFile>,
    history: Vec<String>,
    answer: Option<Answer>,
    query: String,
    notifier: Notifier,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            selected_files: self
                .selected_files
                .iter()
                .map(|file| file.name.clone())
                .collect(),
            history: self.history.clone(),
            answer: self.answer.clone(),
            notifications: self
                .notifier
                .operations()
                .map(|op| NotificationView {
                    op_id: op.id,
                    kind: op.kind,
                    state: op.state,
                    message: op.message.clone(),
                })
                .collect(),
            pending_operations: self.notifier.pending_count(),
        }
    }

    pub fn selected_files(&self) -> &[SelectedFile] {
        &self.selected_files
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn answer(&self) -> Option<&Answer> {
        self.answer.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns `true` only the first time it is called.
    pub(crate) fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    pub(crate) fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub(crate) fn replace_selected_files(&mut self, files: Vec<SelectedFile>) {
        self.selected_files = files;
        self.mark_dirty();
    }

    pub(crate) fn replace_history(&mut self, entries: Vec<String>) {
        self.history = entries;
        self.mark_dirty();
    }

    pub(crate) fn set_answer(&mut self, answer: Answer) {
        self.answer = Some(answer);
        self.mark_dirty();
    }

    /// The query is read at send time and is not part of the view.
    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
    }
}
