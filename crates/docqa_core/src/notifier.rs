use std::collections::BTreeMap;

pub type OperationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    ProcessFiles,
    AskQuestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    Pending,
    Succeeded,
    Failed,
}

impl OperationState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OperationState::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub id: OperationId,
    pub kind: OperationKind,
    pub state: OperationState,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("operation {0} is unknown or was dismissed")]
    Unknown(OperationId),
    #[error("operation {id} already finished as {state:?}")]
    AlreadyTerminal {
        id: OperationId,
        state: OperationState,
    },
    #[error("operation {0} is still pending")]
    StillPending(OperationId),
}

/// Lifecycle registry for async operations: `pending -> succeeded | failed`.
///
/// Operations are keyed by id and tracked independently; starting a new one
/// never touches another that is still pending. Finished operations stay
/// visible until dismissed or superseded by the next operation of the same
/// kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notifier {
    next_id: OperationId,
    operations: BTreeMap<OperationId, Operation>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self {
            next_id: 1,
            operations: BTreeMap::new(),
        }
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new pending operation and returns its id.
    pub fn begin(&mut self, kind: OperationKind, message: impl Into<String>) -> OperationId {
        self.insert(kind, OperationState::Pending, message.into())
    }

    pub fn succeed(
        &mut self,
        id: OperationId,
        message: impl Into<String>,
    ) -> Result<(), TransitionError> {
        self.finish(id, OperationState::Succeeded, message.into())
    }

    pub fn fail(&mut self, id: OperationId, message: impl Into<String>) -> Result<(), TransitionError> {
        self.finish(id, OperationState::Failed, message.into())
    }

    /// Registers an operation that failed before it could start.
    pub fn fail_immediate(&mut self, kind: OperationKind, message: impl Into<String>) -> OperationId {
        self.insert(kind, OperationState::Failed, message.into())
    }

    /// Removes a finished operation. Pending operations cannot be dismissed.
    pub fn dismiss(&mut self, id: OperationId) -> Result<(), TransitionError> {
        let operation = self
            .operations
            .get(&id)
            .ok_or(TransitionError::Unknown(id))?;
        if !operation.state.is_terminal() {
            return Err(TransitionError::StillPending(id));
        }
        self.operations.remove(&id);
        Ok(())
    }

    pub fn get(&self, id: OperationId) -> Option<&Operation> {
        self.operations.get(&id)
    }

    /// All live operations in ascending id order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    pub fn pending_count(&self) -> usize {
        self.operations
            .values()
            .filter(|op| op.state == OperationState::Pending)
            .count()
    }

    fn insert(&mut self, kind: OperationKind, state: OperationState, message: String) -> OperationId {
        self.supersede(kind);
        let id = self.next_id;
        self.next_id += 1;
        self.operations.insert(
            id,
            Operation {
                id,
                kind,
                state,
                message,
            },
        );
        id
    }

    fn supersede(&mut self, kind: OperationKind) {
        self.operations
            .retain(|_, op| op.kind != kind || !op.state.is_terminal());
    }

    fn finish(
        &mut self,
        id: OperationId,
        state: OperationState,
        message: String,
    ) -> Result<(), TransitionError> {
        let operation = self
            .operations
            .get_mut(&id)
            .ok_or(TransitionError::Unknown(id))?;
        if operation.state.is_terminal() {
            return Err(TransitionError::AlreadyTerminal {
                id,
                state: operation.state,
            });
        }
        operation.state = state;
        operation.message = message;
        Ok(())
    }
}
