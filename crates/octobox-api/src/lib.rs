//! Typed async client for the Octobox notifications REST API.

pub mod client;
pub mod error;
pub mod types;

pub use client::OctoboxClient;
pub use error::ClientError;
pub use types::{
    BulkAction, Notification, NotificationRepo, NotificationSubject, NotificationsResponse,
    Pagination,
};
