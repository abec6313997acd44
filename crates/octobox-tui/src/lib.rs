//! Terminal client for the Octobox notification service.
//!
//! `app` holds the table state machine, `dispatch` runs the commands it
//! returns against a [`backend::NotificationBackend`], and `terminal` drives
//! both from crossterm events.

pub mod app;
pub mod backend;
pub mod config;
pub mod dispatch;
pub mod help_overlay;
pub mod logging;
pub mod snapshot;
pub mod terminal;
pub mod theme;

pub use app::{App, Command, NotificationView};
pub use backend::{HttpNotificationBackend, InMemoryNotificationBackend, NotificationBackend};
pub use dispatch::dispatch_command;
