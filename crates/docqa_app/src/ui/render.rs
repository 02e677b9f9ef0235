use docqa_core::{AppViewModel, NotificationView, OperationState};

/// Renders the view model as plain text lines for the terminal.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("== Chat History ==".to_string());
    if view.history.is_empty() {
        lines.push("  (empty)".to_string());
    }
    lines.extend(view.history.iter().map(|entry| format!("  {entry}")));

    if let Some(answer) = &view.answer {
        lines.push("== Response ==".to_string());
        lines.push(format!("  {}", answer.text));
        if !answer.citations.is_empty() {
            lines.push("  Citations:".to_string());
            lines.extend(
                answer
                    .citations
                    .iter()
                    .map(|citation| format!("    Page {}: {}", citation.page, citation.content)),
            );
        }
    }

    if !view.selected_files.is_empty() {
        lines.push("== Selected Files ==".to_string());
        lines.extend(view.selected_files.iter().map(|name| format!("  - {name}")));
    }

    if !view.notifications.is_empty() {
        lines.push(match view.pending_operations {
            0 => "== Notifications ==".to_string(),
            pending => format!("== Notifications ({pending} pending) =="),
        });
        lines.extend(view.notifications.iter().map(notification_line));
    }

    lines
}

fn notification_line(notification: &NotificationView) -> String {
    let marker = match notification.state {
        OperationState::Pending => "..",
        OperationState::Succeeded => "ok",
        OperationState::Failed => "!!",
    };
    format!(
        "  [{marker}] #{} {}",
        notification.op_id, notification.message
    )
}
