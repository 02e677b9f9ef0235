use docqa_core::{notices, update, AppState, Effect, Msg, OperationState, SelectedFile};
use pretty_assertions::assert_eq;

fn init_logging() {
    docqa_logging::initialize_for_tests();
}

fn files(paths: &[&str]) -> Vec<SelectedFile> {
    paths.iter().map(|p| SelectedFile::from_path(*p)).collect()
}

#[test]
fn selection_replaces_previous_list() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::FilesSelected(files(&["/docs/a.pdf", "/docs/b.pdf"])),
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().selected_files, vec!["a.pdf", "b.pdf"]);

    let (mut state, _) = update(state, Msg::FilesSelected(files(&["/other/c.pdf"])));
    assert_eq!(state.view().selected_files, vec!["c.pdf"]);
    assert!(state.consume_dirty());
}

#[test]
fn process_submits_whole_selection_as_one_batch() {
    init_logging();
    let selection = files(&["/docs/a.pdf", "/docs/b.pdf"]);
    let (state, _) = update(AppState::new(), Msg::FilesSelected(selection.clone()));
    let (state, effects) = update(state, Msg::ProcessClicked);

    let view = state.view();
    assert_eq!(view.notifications.len(), 1);
    assert_eq!(view.notifications[0].state, OperationState::Pending);
    assert_eq!(view.notifications[0].message, notices::PROCESSING_FILES);
    assert_eq!(
        effects,
        vec![Effect::ProcessFiles {
            op_id: view.notifications[0].op_id,
            files: selection,
        }]
    );
}

#[test]
fn empty_selection_is_still_submitted() {
    init_logging();
    let (_state, effects) = update(AppState::new(), Msg::ProcessClicked);

    assert!(matches!(
        &effects[..],
        [Effect::ProcessFiles { files, .. }] if files.is_empty()
    ));
}

#[test]
fn successful_batch_keeps_selection() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilesSelected(files(&["/docs/a.pdf"])));
    let (state, effects) = update(state, Msg::ProcessClicked);
    let Effect::ProcessFiles { op_id, .. } = effects[0].clone() else {
        panic!("expected process effect");
    };

    let (state, _) = update(state, Msg::FilesProcessed { op_id });
    let view = state.view();
    assert_eq!(view.selected_files, vec!["a.pdf"]);
    assert_eq!(view.notifications[0].state, OperationState::Succeeded);
    assert_eq!(view.notifications[0].message, notices::FILES_PROCESSED);
    assert!(view.answer.is_none());
    assert!(view.history.is_empty());
}

#[test]
fn failed_batch_shows_generic_message() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ProcessClicked);
    let Effect::ProcessFiles { op_id, .. } = effects[0].clone() else {
        panic!("expected process effect");
    };

    let (state, _) = update(state, Msg::FilesProcessFailed { op_id });
    let view = state.view();
    assert_eq!(view.notifications[0].state, OperationState::Failed);
    assert_eq!(view.notifications[0].message, notices::PROCESS_FILES_FAILED);
}

#[test]
fn next_batch_supersedes_finished_notification() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ProcessClicked);
    let Effect::ProcessFiles { op_id: first, .. } = effects[0].clone() else {
        panic!("expected process effect");
    };
    let (state, _) = update(state, Msg::FilesProcessed { op_id: first });
    let (state, _) = update(state, Msg::ProcessClicked);

    let view = state.view();
    assert_eq!(view.notifications.len(), 1);
    assert_ne!(view.notifications[0].op_id, first);
    assert_eq!(view.notifications[0].state, OperationState::Pending);
}

#[test]
fn finished_notification_can_be_dismissed() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ProcessClicked);
    let Effect::ProcessFiles { op_id, .. } = effects[0].clone() else {
        panic!("expected process effect");
    };

    // Pending notifications stay put.
    let (state, _) = update(state, Msg::NotificationDismissed(op_id));
    assert_eq!(state.view().notifications.len(), 1);

    let (state, _) = update(state, Msg::FilesProcessed { op_id });
    let (state, _) = update(state, Msg::NotificationDismissed(op_id));
    assert!(state.view().notifications.is_empty());
}
