//! Wire types for the notifications endpoints.

use serde::{Deserialize, Serialize};

/// Subject block of a notification (the issue, PR, release, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSubject {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Repository a notification belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationRepo {
    pub id: u64,
    pub name: String,
    pub owner: String,
    #[serde(rename = "repo_url")]
    pub url: String,
}

/// One entry of `GET /notifications.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    pub id: u64,
    pub github_id: u64,
    pub reason: String,
    pub unread: bool,
    pub web_url: String,
    pub subject: NotificationSubject,
    pub repo: NotificationRepo,
}

/// Paging block. Older servers omit it entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub total_notifications: u64,
    pub page: u64,
    pub total_pages: u64,
    pub per_page: u64,
}

/// Root object of `GET /notifications.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsResponse {
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Bulk operations accepted by the `*_selected.json` endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkAction {
    MarkRead,
    Mute,
    Archive,
}

impl BulkAction {
    pub const ALL: [Self; 3] = [Self::MarkRead, Self::Mute, Self::Archive];

    /// Endpoint path relative to the service base URL.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::MarkRead => "/notifications/mark_read_selected.json",
            Self::Mute => "/notifications/mute_selected.json",
            Self::Archive => "/notifications/archive_selected.json",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MarkRead => "mark read",
            Self::Mute => "mute",
            Self::Archive => "archive",
        }
    }
}
