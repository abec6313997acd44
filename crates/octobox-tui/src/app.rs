//! App shell and state model for the notification table.
//!
//! Key events come in through [`App::update`], which mutates selection state
//! and returns a [`Command`] for the runtime to execute. Results of executed
//! commands flow back through [`App::set_notifications`],
//! [`App::set_fetch_error`] and [`App::handle_action_result`].

use std::collections::{BTreeSet, HashSet};

use octobox_api::{BulkAction, Notification};
use octobox_term_adapter::input::{translate_input, InputEvent, Key, KeyEvent, UiAction};
use octobox_term_adapter::render::{FrameSize, Rect, RenderFrame, TextRole};
use octobox_term_adapter::style::{StyleToken, ThemeSpec};
use octobox_term_adapter::widgets::{
    align_cell, layout_columns, notification_columns, BorderStyle, TableColumnSpec,
};

use crate::help_overlay::render_help_overlay;

pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_HEIGHT: usize = 24;
pub const COLUMN_GAP: usize = 1;

/// Rows taken by everything except data rows: two panel borders, the
/// header row, the status line and the hint line.
const CHROME_ROWS: usize = 5;

pub const KEY_HINTS: &str =
    "esc quit  ^r refresh  ^o open  ^n read  ^u mute  ^e archive  enter select  ? help";

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: u64,
    pub kind: String,
    pub title: String,
    pub repo: String,
    pub reason: String,
    pub unread: bool,
    pub web_url: String,
}

impl NotificationView {
    fn cells(&self) -> [&str; 4] {
        [&self.kind, &self.title, &self.repo, &self.reason]
    }
}

impl From<&Notification> for NotificationView {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.subject.kind.clone(),
            title: notification.subject.title.clone(),
            repo: notification.repo.name.clone(),
            reason: notification.reason.clone(),
            unread: notification.unread,
            web_url: notification.web_url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Modes, status, commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Main,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Ok,
    Err,
}

/// Commands returned from update handlers for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    Fetch,
    Batch(Vec<Command>),
    RunAction(ActionKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Open { id: u64, url: String },
    Bulk { action: BulkAction, ids: Vec<u64> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Open,
    Bulk(BulkAction),
}

/// Outcome of an executed [`ActionKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub kind: ActionType,
    /// Notification ids the action targeted.
    pub ids: Vec<u64>,
    /// Human-readable success message.
    pub message: String,
    /// Error message, if the action failed.
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct App {
    rows: Vec<NotificationView>,
    selected_idx: usize,
    selected_id: Option<u64>,
    toggled: BTreeSet<u64>,
    scroll: usize,
    mode: UiMode,
    status_kind: StatusKind,
    status_text: String,
    /// Status line holds "Refreshing..." or a fetch error.
    fetch_status: bool,
    width: usize,
    height: usize,
    theme: ThemeSpec,
    loaded: bool,
    quitting: bool,
}

impl App {
    #[must_use]
    pub fn new(theme: ThemeSpec) -> Self {
        Self {
            rows: Vec::new(),
            selected_idx: 0,
            selected_id: None,
            toggled: BTreeSet::new(),
            scroll: 0,
            mode: UiMode::Main,
            status_kind: StatusKind::Info,
            status_text: String::new(),
            fetch_status: false,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            theme,
            loaded: false,
            quitting: false,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[NotificationView] {
        &self.rows
    }

    #[must_use]
    pub fn selected_idx(&self) -> usize {
        self.selected_idx
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    #[must_use]
    pub fn selected_view(&self) -> Option<&NotificationView> {
        if self.rows.is_empty() {
            return None;
        }
        let idx = self.selected_idx.min(self.rows.len() - 1);
        Some(&self.rows[idx])
    }

    /// Toggled notification ids in ascending order.
    #[must_use]
    pub fn toggled_ids(&self) -> Vec<u64> {
        self.toggled.iter().copied().collect()
    }

    #[must_use]
    pub fn is_toggled(&self, id: u64) -> bool {
        self.toggled.contains(&id)
    }

    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    #[must_use]
    pub fn mode(&self) -> UiMode {
        self.mode
    }

    #[must_use]
    pub fn status_kind(&self) -> StatusKind {
        self.status_kind
    }

    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn quitting(&self) -> bool {
        self.quitting
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.rows.iter().filter(|row| row.unread).count()
    }

    /// Data rows that fit below the header at the current height.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        self.height.saturating_sub(CHROME_ROWS).max(1)
    }

    pub fn set_status(&mut self, kind: StatusKind, text: &str) {
        self.status_kind = kind;
        self.status_text = text.to_owned();
        self.fetch_status = false;
    }

    // -- data ----------------------------------------------------------------

    /// Replace the table rows, keeping the cursor on the same notification
    /// when it survives and dropping toggled ids that disappeared. A pending
    /// refresh or fetch error on the status line is replaced; action
    /// messages are left alone.
    pub fn set_notifications(&mut self, rows: Vec<NotificationView>) {
        let previous_id = self.selected_id;
        let previous_idx = self.selected_idx;
        self.rows = rows;
        self.loaded = true;

        let present: HashSet<u64> = self.rows.iter().map(|row| row.id).collect();
        self.toggled.retain(|id| present.contains(id));
        self.reselect(previous_id, previous_idx);

        if self.fetch_status {
            let count = self.rows.len();
            let noun = if count == 1 {
                "notification"
            } else {
                "notifications"
            };
            self.set_status(StatusKind::Info, &format!("Refreshed {count} {noun}"));
        }
    }

    pub fn set_fetch_error(&mut self, message: &str) {
        self.set_status(StatusKind::Err, message);
        self.fetch_status = true;
    }

    fn reselect(&mut self, previous_id: Option<u64>, previous_idx: usize) {
        if self.rows.is_empty() {
            self.selected_idx = 0;
            self.selected_id = None;
            self.scroll = 0;
            return;
        }

        let by_id = previous_id.and_then(|id| self.rows.iter().position(|row| row.id == id));
        let idx = by_id.unwrap_or_else(|| previous_idx.min(self.rows.len() - 1));
        self.selected_idx = idx;
        self.selected_id = Some(self.rows[idx].id);
        self.ensure_cursor_visible();
    }

    // -- cursor --------------------------------------------------------------

    pub fn move_selection(&mut self, delta: i32) {
        if self.rows.is_empty() {
            self.selected_idx = 0;
            self.selected_id = None;
            return;
        }
        let last = self.rows.len() - 1;
        let step = delta.unsigned_abs() as usize;
        let idx = if delta < 0 {
            self.selected_idx.saturating_sub(step)
        } else {
            self.selected_idx.saturating_add(step).min(last)
        };
        self.selected_idx = idx;
        self.selected_id = Some(self.rows[idx].id);
        self.ensure_cursor_visible();
    }

    fn page_delta(&self) -> i32 {
        i32::try_from(self.visible_rows()).unwrap_or(i32::MAX)
    }

    fn ensure_cursor_visible(&mut self) {
        let visible = self.visible_rows();
        if self.selected_idx < self.scroll {
            self.scroll = self.selected_idx;
        } else if self.selected_idx >= self.scroll + visible {
            self.scroll = self.selected_idx + 1 - visible;
        }
        let max_scroll = self.rows.len().saturating_sub(visible);
        self.scroll = self.scroll.min(max_scroll);
    }

    // -- selection -----------------------------------------------------------

    /// Add the cursor row to the selection, or remove it if already there.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_view().map(|row| row.id) else {
            return;
        };
        if !self.toggled.remove(&id) {
            self.toggled.insert(id);
        }
        let count = self.toggled.len();
        if count == 0 {
            self.set_status(StatusKind::Info, "Selection cleared");
        } else {
            self.set_status(StatusKind::Info, &format!("{count} selected"));
        }
    }

    /// Ids a bulk action applies to: the toggled set, else the cursor row.
    #[must_use]
    pub fn action_targets(&self) -> Vec<u64> {
        if !self.toggled.is_empty() {
            return self.toggled_ids();
        }
        self.selected_view().map(|row| vec![row.id]).unwrap_or_default()
    }

    // -- update --------------------------------------------------------------

    pub fn update(&mut self, event: InputEvent) -> Command {
        if let InputEvent::Resize(resize) = event {
            self.width = resize.width;
            self.height = resize.height;
            self.ensure_cursor_visible();
            return Command::None;
        }

        if self.mode == UiMode::Help {
            if let InputEvent::Key(key) = event {
                if closes_help(key) {
                    self.mode = UiMode::Main;
                }
            }
            return Command::None;
        }

        match translate_input(&event) {
            UiAction::Quit => {
                self.quitting = true;
                Command::Quit
            }
            UiAction::Refresh => {
                self.set_status(StatusKind::Info, "Refreshing...");
                self.fetch_status = true;
                Command::Fetch
            }
            UiAction::Open => self.open_command(),
            UiAction::MarkRead => self.bulk_command(BulkAction::MarkRead),
            UiAction::Mute => self.bulk_command(BulkAction::Mute),
            UiAction::Archive => self.bulk_command(BulkAction::Archive),
            UiAction::ToggleSelect => {
                self.toggle_selected();
                Command::None
            }
            UiAction::MoveUp => {
                self.move_selection(-1);
                Command::None
            }
            UiAction::MoveDown => {
                self.move_selection(1);
                Command::None
            }
            UiAction::PageUp => {
                self.move_selection(-self.page_delta());
                Command::None
            }
            UiAction::PageDown => {
                self.move_selection(self.page_delta());
                Command::None
            }
            UiAction::Top => {
                self.move_selection(i32::MIN);
                Command::None
            }
            UiAction::Bottom => {
                self.move_selection(i32::MAX);
                Command::None
            }
            UiAction::Help => {
                self.mode = UiMode::Help;
                Command::None
            }
            UiAction::Noop => Command::None,
        }
    }

    fn open_command(&mut self) -> Command {
        let Some(row) = self.selected_view() else {
            self.set_status(StatusKind::Info, "No notification selected");
            return Command::None;
        };
        if row.web_url.trim().is_empty() {
            let text = format!("Notification {} has no web URL", row.id);
            self.set_status(StatusKind::Info, &text);
            return Command::None;
        }
        Command::RunAction(ActionKind::Open {
            id: row.id,
            url: row.web_url.clone(),
        })
    }

    fn bulk_command(&mut self, action: BulkAction) -> Command {
        let ids = self.action_targets();
        if ids.is_empty() {
            self.set_status(StatusKind::Info, "No notification selected");
            return Command::None;
        }
        Command::RunAction(ActionKind::Bulk { action, ids })
    }

    /// Apply an action outcome. Successful bulk actions trigger a refetch.
    pub fn handle_action_result(&mut self, result: ActionResult) -> Command {
        if let Some(ref err) = result.error {
            self.set_status(StatusKind::Err, err);
            return Command::None;
        }

        match result.kind {
            ActionType::Bulk(_) => {
                for id in &result.ids {
                    self.toggled.remove(id);
                }
                self.set_status(StatusKind::Ok, &result.message);
                Command::Fetch
            }
            ActionType::Open => {
                self.set_status(StatusKind::Ok, &result.message);
                Command::None
            }
        }
    }

    // -- render --------------------------------------------------------------

    /// Render the full TUI frame.
    #[must_use]
    pub fn render(&self) -> RenderFrame {
        let width = self.width.max(1);
        let height = self.height.max(1);

        if self.mode == UiMode::Help && !self.quitting {
            return render_help_overlay(width, height, self.theme);
        }

        let mut frame = RenderFrame::new(FrameSize { width, height }, self.theme);
        if self.quitting {
            return frame;
        }

        let (table_area, _) = Rect {
            x: 0,
            y: 0,
            width,
            height,
        }
        .split_vertical(height.saturating_sub(2));
        let inner = frame.draw_panel(
            table_area,
            &self.panel_title(),
            BorderStyle::Rounded,
            TextRole::Muted,
        );
        if inner.width > 0 && inner.height > 0 {
            self.render_table(&mut frame, inner);
        }

        if height >= 2 {
            let role = match self.status_kind {
                StatusKind::Info => TextRole::Muted,
                StatusKind::Ok => TextRole::Success,
                StatusKind::Err => TextRole::Danger,
            };
            frame.draw_text(0, height - 2, &clip(&self.status_text, width), role);
        }
        frame.draw_text(0, height - 1, &clip(KEY_HINTS, width), TextRole::Muted);

        frame
    }

    fn panel_title(&self) -> String {
        let mut title = format!(
            "Octobox  {} unread / {} total",
            self.unread_count(),
            self.rows.len()
        );
        if !self.toggled.is_empty() {
            title.push_str(&format!("  {} selected", self.toggled.len()));
        }
        title
    }

    fn render_table(&self, frame: &mut RenderFrame, area: Rect) {
        let columns = notification_columns();
        let widths = layout_columns(&columns, area.width, COLUMN_GAP);
        let titles = columns.map(|column| column.title);
        frame.draw_text(
            area.x,
            area.y,
            &format_row(&columns, &widths, titles),
            TextRole::Info,
        );

        let body_rows = area.height.saturating_sub(1);
        if self.rows.is_empty() {
            if body_rows > 0 {
                let message = if self.loaded {
                    "No notifications"
                } else {
                    "Loading notifications..."
                };
                frame.draw_text(
                    area.x,
                    area.y + 1,
                    &align_cell(message, area.width, columns[0].align),
                    TextRole::Muted,
                );
            }
            return;
        }

        let surface = frame.token_color(StyleToken::Surface);
        for (offset, (idx, row)) in self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(body_rows)
            .enumerate()
        {
            let y = area.y + 1 + offset;
            let text = format_row(&columns, &widths, row.cells());
            let role = self.row_role(row);
            if idx == self.selected_idx {
                frame.fill_row(area.x, y, area.width, surface);
                frame.draw_text_on(area.x, y, &text, role, surface);
            } else {
                frame.draw_text(area.x, y, &text, role);
            }
        }
    }

    /// Toggled rows are red; otherwise unread rows are green and read rows
    /// use the default foreground.
    #[must_use]
    pub fn row_role(&self, row: &NotificationView) -> TextRole {
        if self.toggled.contains(&row.id) {
            TextRole::Danger
        } else if row.unread {
            TextRole::Success
        } else {
            TextRole::Primary
        }
    }
}

fn closes_help(key: KeyEvent) -> bool {
    !key.modifiers.ctrl && matches!(key.key, Key::Escape | Key::Char('q' | '?'))
}

fn format_row(columns: &[TableColumnSpec], widths: &[usize], cells: [&str; 4]) -> String {
    let gap = " ".repeat(COLUMN_GAP);
    columns
        .iter()
        .zip(widths)
        .zip(cells)
        .map(|((column, width), cell)| align_cell(cell, *width, column.align))
        .collect::<Vec<_>>()
        .join(&gap)
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use octobox_api::BulkAction;
    use octobox_term_adapter::input::{InputEvent, Key, KeyEvent, ResizeEvent};
    use octobox_term_adapter::render::TextRole;
    use octobox_term_adapter::style::ThemeSpec;

    use super::{
        ActionKind, ActionResult, ActionType, App, Command, NotificationView, StatusKind, UiMode,
    };

    fn row(id: u64, unread: bool) -> NotificationView {
        NotificationView {
            id,
            kind: "Issue".to_owned(),
            title: format!("Title {id}"),
            repo: "octobox/octobox".to_owned(),
            reason: "mention".to_owned(),
            unread,
            web_url: format!("https://github.com/octobox/octobox/issues/{id}"),
        }
    }

    fn app_with(ids: &[u64]) -> App {
        let mut app = App::new(ThemeSpec::default());
        app.set_notifications(ids.iter().map(|id| row(*id, true)).collect());
        app
    }

    fn key(key: Key) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(key))
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut app = app_with(&[1, 2, 3]);
        app.move_selection(-5);
        assert_eq!(app.selected_idx(), 0);
        app.move_selection(10);
        assert_eq!(app.selected_idx(), 2);
        assert_eq!(app.selected_id(), Some(3));
    }

    #[test]
    fn top_and_bottom_jump() {
        let mut app = app_with(&[1, 2, 3, 4]);
        app.update(key(Key::Char('G')));
        assert_eq!(app.selected_id(), Some(4));
        app.update(key(Key::Home));
        assert_eq!(app.selected_id(), Some(1));
    }

    #[test]
    fn toggle_twice_clears_selection() {
        let mut app = app_with(&[1, 2]);
        app.update(key(Key::Enter));
        assert!(app.is_toggled(1));
        assert_eq!(app.status_text(), "1 selected");
        app.update(key(Key::Enter));
        assert!(app.toggled_ids().is_empty());
        assert_eq!(app.status_text(), "Selection cleared");
    }

    #[test]
    fn toggle_on_empty_table_is_noop() {
        let mut app = App::new(ThemeSpec::default());
        assert_eq!(app.update(key(Key::Enter)), Command::None);
        assert!(app.toggled_ids().is_empty());
    }

    #[test]
    fn bulk_targets_cursor_without_selection() {
        let mut app = app_with(&[5, 6]);
        app.update(key(Key::Down));
        assert_eq!(
            app.update(InputEvent::Key(KeyEvent::ctrl('e'))),
            Command::RunAction(ActionKind::Bulk {
                action: BulkAction::Archive,
                ids: vec![6],
            })
        );
    }

    #[test]
    fn bulk_targets_toggled_ids_in_ascending_order() {
        let mut app = app_with(&[9, 3, 7]);
        app.update(key(Key::Enter));
        app.update(key(Key::Down));
        app.update(key(Key::Down));
        app.update(key(Key::Char(' ')));
        assert_eq!(
            app.update(InputEvent::Key(KeyEvent::ctrl('u'))),
            Command::RunAction(ActionKind::Bulk {
                action: BulkAction::Mute,
                ids: vec![7, 9],
            })
        );
    }

    #[test]
    fn actions_on_empty_table_report_info() {
        let mut app = App::new(ThemeSpec::default());
        assert_eq!(app.update(InputEvent::Key(KeyEvent::ctrl('n'))), Command::None);
        assert_eq!(app.status_text(), "No notification selected");
        assert_eq!(app.update(InputEvent::Key(KeyEvent::ctrl('o'))), Command::None);
    }

    #[test]
    fn open_uses_cursor_row_url() {
        let mut app = app_with(&[4]);
        assert_eq!(
            app.update(InputEvent::Key(KeyEvent::ctrl('o'))),
            Command::RunAction(ActionKind::Open {
                id: 4,
                url: "https://github.com/octobox/octobox/issues/4".to_owned(),
            })
        );
    }

    #[test]
    fn open_without_url_is_refused() {
        let mut app = App::new(ThemeSpec::default());
        let mut bare = row(8, false);
        bare.web_url.clear();
        app.set_notifications(vec![bare]);
        assert_eq!(app.update(InputEvent::Key(KeyEvent::ctrl('o'))), Command::None);
        assert_eq!(app.status_text(), "Notification 8 has no web URL");
    }

    #[test]
    fn refresh_keeps_cursor_on_same_id() {
        let mut app = app_with(&[1, 2, 3]);
        app.move_selection(2);
        app.set_notifications(vec![row(3, true), row(4, true)]);
        assert_eq!(app.selected_idx(), 0);
        assert_eq!(app.selected_id(), Some(3));
    }

    #[test]
    fn refresh_clamps_index_when_cursor_row_vanishes() {
        let mut app = app_with(&[1, 2, 3]);
        app.move_selection(2);
        app.set_notifications(vec![row(1, true)]);
        assert_eq!(app.selected_idx(), 0);
        assert_eq!(app.selected_id(), Some(1));
    }

    #[test]
    fn refresh_prunes_vanished_toggles() {
        let mut app = app_with(&[1, 2]);
        app.update(key(Key::Enter));
        app.update(key(Key::Down));
        app.update(key(Key::Enter));
        app.set_notifications(vec![row(2, false)]);
        assert_eq!(app.toggled_ids(), vec![2]);
    }

    #[test]
    fn successful_fetch_replaces_refresh_status() {
        let mut app = app_with(&[1, 2]);
        assert_eq!(app.update(InputEvent::Key(KeyEvent::ctrl('r'))), Command::Fetch);
        assert_eq!(app.status_text(), "Refreshing...");

        app.set_notifications(vec![row(1, true)]);
        assert_eq!(app.status_kind(), StatusKind::Info);
        assert_eq!(app.status_text(), "Refreshed 1 notification");
    }

    #[test]
    fn successful_fetch_clears_fetch_error_only() {
        let mut app = app_with(&[1, 2]);
        app.set_fetch_error("Refresh failed: timeout");
        app.set_notifications(vec![row(1, true), row(2, true)]);
        assert_eq!(app.status_kind(), StatusKind::Info);
        assert_eq!(app.status_text(), "Refreshed 2 notifications");

        app.set_status(StatusKind::Err, "Could not mute: boom");
        app.set_notifications(vec![row(1, true)]);
        assert_eq!(app.status_kind(), StatusKind::Err);
        assert_eq!(app.status_text(), "Could not mute: boom");
    }

    #[test]
    fn bulk_success_clears_targets_and_refetches() {
        let mut app = app_with(&[1, 2]);
        app.update(key(Key::Enter));
        let command = app.handle_action_result(ActionResult {
            kind: ActionType::Bulk(BulkAction::MarkRead),
            ids: vec![1],
            message: "Marked 1 notification read".to_owned(),
            error: None,
        });
        assert_eq!(command, Command::Fetch);
        assert!(app.toggled_ids().is_empty());
        assert_eq!(app.status_text(), "Marked 1 notification read");
    }

    #[test]
    fn failed_action_keeps_selection() {
        let mut app = app_with(&[1]);
        app.update(key(Key::Enter));
        let command = app.handle_action_result(ActionResult {
            kind: ActionType::Bulk(BulkAction::Mute),
            ids: vec![1],
            message: String::new(),
            error: Some("mute failed: 500".to_owned()),
        });
        assert_eq!(command, Command::None);
        assert_eq!(app.toggled_ids(), vec![1]);
        assert_eq!(app.status_kind(), super::StatusKind::Err);
    }

    #[test]
    fn help_mode_swallows_keys_until_closed() {
        let mut app = app_with(&[1, 2]);
        app.update(key(Key::Char('?')));
        assert_eq!(app.mode(), UiMode::Help);
        assert_eq!(app.update(key(Key::Down)), Command::None);
        assert_eq!(app.selected_idx(), 0);
        app.update(key(Key::Escape));
        assert_eq!(app.mode(), UiMode::Main);
        assert!(!app.quitting());
    }

    #[test]
    fn resize_scrolls_cursor_into_view() {
        let ids: Vec<u64> = (1..=30).collect();
        let mut app = app_with(&ids);
        app.update(key(Key::End));
        assert_eq!(app.scroll(), 30 - app.visible_rows());
        let command = app.update(InputEvent::Resize(ResizeEvent {
            width: 80,
            height: 10,
        }));
        assert_eq!(command, Command::None);
        assert_eq!(app.visible_rows(), 5);
        assert_eq!(app.scroll(), 25);
    }

    #[test]
    fn page_down_moves_by_visible_rows() {
        let ids: Vec<u64> = (1..=30).collect();
        let mut app = app_with(&ids);
        app.update(InputEvent::Resize(ResizeEvent {
            width: 80,
            height: 10,
        }));
        app.update(key(Key::PageDown));
        assert_eq!(app.selected_idx(), 5);
        app.update(key(Key::PageUp));
        assert_eq!(app.selected_idx(), 0);
    }

    #[test]
    fn row_roles_follow_toggle_and_unread_state() {
        let mut app = App::new(ThemeSpec::default());
        app.set_notifications(vec![row(1, true), row(2, false)]);
        assert_eq!(app.row_role(&app.rows()[0]), TextRole::Success);
        assert_eq!(app.row_role(&app.rows()[1]), TextRole::Primary);
        app.update(key(Key::Enter));
        assert_eq!(app.row_role(&app.rows()[0]), TextRole::Danger);
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = App::new(ThemeSpec::default());
        assert_eq!(app.update(key(Key::Char('q'))), Command::Quit);
        assert!(app.quitting());
    }
}
