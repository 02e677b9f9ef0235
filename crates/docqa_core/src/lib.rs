//! DocQA core: pure state machine and view-model helpers.
mod effect;
mod model;
mod msg;
pub mod notices;
mod notifier;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{Answer, Citation, SelectedFile};
pub use msg::Msg;
pub use notifier::{
    Notifier, Operation, OperationId, OperationKind, OperationState, TransitionError,
};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, NotificationView};
