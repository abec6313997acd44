//! Backends the UI loop calls synchronously.
//!
//! [`HttpNotificationBackend`] talks to a live Octobox instance;
//! [`InMemoryNotificationBackend`] keeps everything in memory for tests.

use octobox_api::{BulkAction, Notification, OctoboxClient};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

pub trait NotificationBackend {
    fn list(&mut self) -> Result<Vec<Notification>, String>;
    fn apply(&mut self, action: BulkAction, ids: &[u64]) -> Result<(), String>;
    fn open_url(&mut self, url: &str) -> Result<(), String>;
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Blocking wrapper around the async [`OctoboxClient`].
pub struct HttpNotificationBackend {
    client: OctoboxClient,
    runtime: Runtime,
}

impl HttpNotificationBackend {
    pub fn new(client: OctoboxClient) -> Result<Self, String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| format!("create tokio runtime: {err}"))?;
        Ok(Self { client, runtime })
    }
}

impl NotificationBackend for HttpNotificationBackend {
    fn list(&mut self) -> Result<Vec<Notification>, String> {
        let response = self
            .runtime
            .block_on(self.client.notifications())
            .map_err(|err| err.to_string())?;
        Ok(response.notifications)
    }

    fn apply(&mut self, action: BulkAction, ids: &[u64]) -> Result<(), String> {
        self.runtime
            .block_on(self.client.apply(action, ids))
            .map_err(|err| err.to_string())?;
        info!(action = action.label(), ?ids, "bulk action applied");
        Ok(())
    }

    fn open_url(&mut self, url: &str) -> Result<(), String> {
        check_browsable(url)?;
        debug!(url, "opening browser");
        open::that(url).map_err(|err| {
            warn!(url, %err, "browser launch failed");
            format!("launch browser: {err}")
        })
    }
}

/// Only web links are handed to the platform opener.
fn check_browsable(url: &str) -> Result<(), String> {
    let lower = url.trim().to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        Ok(())
    } else {
        Err(format!("refusing to open non-web url {url:?}"))
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    List,
    Apply { action: BulkAction, ids: Vec<u64> },
    Open { url: String },
}

/// In-memory backend. Mark read clears `unread`; mute and archive drop the
/// rows, matching what the service's default inbox view shows afterwards.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNotificationBackend {
    notifications: Vec<Notification>,
    calls: Vec<BackendCall>,
    list_error: Option<String>,
    apply_error: Option<String>,
    open_error: Option<String>,
}

impl InMemoryNotificationBackend {
    #[must_use]
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn set_notifications(&mut self, notifications: Vec<Notification>) {
        self.notifications = notifications;
    }

    #[must_use]
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Make every `list` call fail with `message` until cleared with `None`.
    pub fn fail_list(&mut self, message: Option<&str>) {
        self.list_error = message.map(str::to_owned);
    }

    pub fn fail_apply(&mut self, message: Option<&str>) {
        self.apply_error = message.map(str::to_owned);
    }

    pub fn fail_open(&mut self, message: Option<&str>) {
        self.open_error = message.map(str::to_owned);
    }
}

impl NotificationBackend for InMemoryNotificationBackend {
    fn list(&mut self) -> Result<Vec<Notification>, String> {
        self.calls.push(BackendCall::List);
        if let Some(err) = &self.list_error {
            return Err(err.clone());
        }
        Ok(self.notifications.clone())
    }

    fn apply(&mut self, action: BulkAction, ids: &[u64]) -> Result<(), String> {
        self.calls.push(BackendCall::Apply {
            action,
            ids: ids.to_vec(),
        });
        if let Some(err) = &self.apply_error {
            return Err(err.clone());
        }
        match action {
            BulkAction::MarkRead => {
                for notification in &mut self.notifications {
                    if ids.contains(&notification.id) {
                        notification.unread = false;
                    }
                }
            }
            BulkAction::Mute | BulkAction::Archive => {
                self.notifications
                    .retain(|notification| !ids.contains(&notification.id));
            }
        }
        Ok(())
    }

    fn open_url(&mut self, url: &str) -> Result<(), String> {
        self.calls.push(BackendCall::Open {
            url: url.to_owned(),
        });
        if let Some(err) = &self.open_error {
            return Err(err.clone());
        }
        check_browsable(url)
    }
}
