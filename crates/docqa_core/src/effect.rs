use crate::{OperationId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchHistory,
    ProcessFiles {
        op_id: OperationId,
        files: Vec<SelectedFile>,
    },
    AskQuestion {
        op_id: OperationId,
        question: String,
    },
}
