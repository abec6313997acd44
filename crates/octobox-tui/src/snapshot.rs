//! Plain-text rendering used when no interactive terminal is attached.

use std::io::Write;

use octobox_api::Notification;

use crate::backend::NotificationBackend;

const TYPE_WIDTH: usize = 12;
const TITLE_WIDTH: usize = 48;
const REPO_WIDTH: usize = 28;

/// Fetch once and write the table to `out`.
pub fn run_snapshot<W: Write>(
    backend: &mut dyn NotificationBackend,
    out: &mut W,
) -> Result<(), String> {
    let notifications = backend
        .list()
        .map_err(|err| format!("fetch notifications: {err}"))?;
    out.write_all(render_snapshot_text(&notifications).as_bytes())
        .and_then(|()| out.flush())
        .map_err(|err| format!("write snapshot: {err}"))
}

#[must_use]
pub fn render_snapshot_text(notifications: &[Notification]) -> String {
    let mut lines = render_snapshot_lines(notifications);
    lines.push(String::new());
    lines.join("\n")
}

#[must_use]
pub fn render_snapshot_lines(notifications: &[Notification]) -> Vec<String> {
    let unread = notifications.iter().filter(|n| n.unread).count();
    let mut lines = vec![format!(
        "octobox: {unread} unread / {} total",
        notifications.len()
    )];
    if notifications.is_empty() {
        lines.push("No notifications".to_owned());
        return lines;
    }

    lines.push(format!(
        "  {:<TYPE_WIDTH$} {:<TITLE_WIDTH$} {:<REPO_WIDTH$} REASON",
        "TYPE", "TITLE", "REPO"
    ));
    for notification in notifications {
        let marker = if notification.unread { '*' } else { ' ' };
        let line = format!(
            "{marker} {:<TYPE_WIDTH$} {:<TITLE_WIDTH$} {:<REPO_WIDTH$} {}",
            trim(&notification.subject.kind, TYPE_WIDTH),
            trim(&notification.subject.title, TITLE_WIDTH),
            trim(&notification.repo.name, REPO_WIDTH),
            notification.reason
        );
        lines.push(line.trim_end().to_owned());
    }
    lines
}

fn trim(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_owned();
    }
    if max <= 1 {
        return value.chars().take(max).collect();
    }
    let mut out: String = value.chars().take(max - 1).collect();
    out.push('~');
    out
}
