use crate::{Answer, OperationId, OperationKind, OperationState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub selected_files: Vec<String>,
    pub history: Vec<String>,
    pub answer: Option<Answer>,
    pub notifications: Vec<NotificationView>,
    pub pending_operations: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub op_id: OperationId,
    pub kind: OperationKind,
    pub state: OperationState,
    pub message: String,
}
