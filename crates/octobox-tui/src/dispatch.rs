//! Executes [`Command`]s returned by [`App::update`] against a backend.

use octobox_api::BulkAction;
use tracing::{info, warn};

use crate::app::{ActionKind, ActionResult, ActionType, App, Command, NotificationView};
use crate::backend::NotificationBackend;

/// Run `cmd`, feeding results back into `app`. Returns whether the frame
/// needs a repaint.
pub fn dispatch_command(
    cmd: Command,
    app: &mut App,
    backend: &mut dyn NotificationBackend,
) -> bool {
    match cmd {
        Command::None | Command::Quit => false,
        Command::Fetch => {
            match backend.list() {
                Ok(notifications) => {
                    info!(count = notifications.len(), "notifications refreshed");
                    app.set_notifications(
                        notifications.iter().map(NotificationView::from).collect(),
                    );
                }
                Err(err) => {
                    warn!(%err, "refresh failed");
                    app.set_fetch_error(&format!("Refresh failed: {err}"));
                }
            }
            true
        }
        Command::Batch(commands) => {
            let mut dirty = false;
            for child in commands {
                dirty |= dispatch_command(child, app, backend);
            }
            dirty
        }
        Command::RunAction(action) => {
            let result = execute_action(backend, action);
            let follow_up = app.handle_action_result(result);
            let _ = dispatch_command(follow_up, app, backend);
            true
        }
    }
}

pub fn execute_action(backend: &mut dyn NotificationBackend, action: ActionKind) -> ActionResult {
    match action {
        ActionKind::Open { id, url } => match backend.open_url(&url) {
            Ok(()) => ActionResult {
                kind: ActionType::Open,
                ids: vec![id],
                message: format!("Opened notification {id} in browser"),
                error: None,
            },
            Err(err) => ActionResult {
                kind: ActionType::Open,
                ids: vec![id],
                message: String::new(),
                error: Some(format!("Could not open notification {id}: {err}")),
            },
        },
        ActionKind::Bulk { action, ids } => match backend.apply(action, &ids) {
            Ok(()) => {
                info!(action = action.label(), count = ids.len(), "bulk action done");
                ActionResult {
                    kind: ActionType::Bulk(action),
                    message: bulk_success_message(action, ids.len()),
                    ids,
                    error: None,
                }
            }
            Err(err) => {
                warn!(action = action.label(), %err, "bulk action failed");
                ActionResult {
                    kind: ActionType::Bulk(action),
                    ids,
                    message: String::new(),
                    error: Some(format!("Could not {}: {err}", action.label())),
                }
            }
        },
    }
}

fn bulk_success_message(action: BulkAction, count: usize) -> String {
    let noun = if count == 1 {
        "notification"
    } else {
        "notifications"
    };
    match action {
        BulkAction::MarkRead => format!("Marked {count} {noun} read"),
        BulkAction::Mute => format!("Muted {count} {noun}"),
        BulkAction::Archive => format!("Archived {count} {noun}"),
    }
}
