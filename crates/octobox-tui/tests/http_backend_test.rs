//! The blocking HTTP backend against a wiremock server.
//!
//! The mock server lives on its own multi-thread runtime; the backend blocks
//! on its private current-thread runtime from the test thread.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use octobox_api::{BulkAction, OctoboxClient};
use octobox_term_adapter::style::ThemeSpec;
use octobox_tui::app::{App, Command};
use octobox_tui::backend::{HttpNotificationBackend, NotificationBackend};
use octobox_tui::dispatch::dispatch_command;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn start_server() -> (Runtime, MockServer) {
    let runtime = Runtime::new().expect("mock server runtime");
    let server = runtime.block_on(MockServer::start());
    (runtime, server)
}

fn backend_for(server: &MockServer) -> HttpNotificationBackend {
    let client = OctoboxClient::new(&server.uri(), "token-123").unwrap();
    HttpNotificationBackend::new(client).unwrap()
}

fn inbox() -> serde_json::Value {
    json!({
        "notifications": [
            {
                "id": 11,
                "github_id": 501,
                "reason": "assign",
                "unread": true,
                "web_url": "https://github.com/octobox/octobox/issues/11",
                "subject": {"title": "Assigned issue", "type": "Issue"},
                "repo": {"id": 1, "name": "octobox/octobox", "owner": "octobox",
                         "repo_url": "https://github.com/octobox/octobox"}
            }
        ]
    })
}

#[test]
fn list_decodes_notifications() {
    let (runtime, server) = start_server();
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/notifications.json"))
            .and(header("authorization", "Bearer token-123"))
            .and(header("x-octobox-api", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(inbox()))
            .mount(&server),
    );

    let mut backend = backend_for(&server);
    let notifications = backend.list().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].id, 11);
    assert_eq!(notifications[0].subject.title, "Assigned issue");
}

#[test]
fn apply_posts_form_ids() {
    let (runtime, server) = start_server();
    runtime.block_on(
        Mock::given(method("POST"))
            .and(path("/notifications/mark_read_selected.json"))
            .and(body_string("id%5B%5D=11&id%5B%5D=12"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server),
    );

    let mut backend = backend_for(&server);
    backend.apply(BulkAction::MarkRead, &[11, 12]).unwrap();
    runtime.block_on(server.verify());
}

#[test]
fn server_error_surfaces_on_status_line() {
    let (runtime, server) = start_server();
    runtime.block_on(async {
        Mock::given(method("GET"))
            .and(path("/notifications.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(inbox()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/notifications/archive_selected.json"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;
    });

    let mut backend = backend_for(&server);
    let mut app = App::new(ThemeSpec::default());
    dispatch_command(Command::Fetch, &mut app, &mut backend);
    assert_eq!(app.rows().len(), 1);

    let command = app.update(octobox_term_adapter::input::InputEvent::Key(
        octobox_term_adapter::input::KeyEvent::ctrl('e'),
    ));
    dispatch_command(command, &mut app, &mut backend);

    assert_eq!(app.rows().len(), 1);
    assert_eq!(
        app.status_text(),
        "Could not archive: /notifications/archive_selected.json returned 503: maintenance"
    );
}

#[test]
fn open_url_refuses_non_web_links() {
    let (_runtime, server) = start_server();
    let mut backend = backend_for(&server);
    let err = backend.open_url("file:///etc/passwd").unwrap_err();
    assert!(err.contains("non-web url"));
}
