use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use octobox_api::OctoboxClient;
use octobox_tui::app::App;
use octobox_tui::backend::HttpNotificationBackend;
use octobox_tui::config::{self, Cli};
use octobox_tui::{logging, snapshot, terminal, theme};
use tracing::{debug, error};

fn main() -> ExitCode {
    let config = match config::load(Cli::parse()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("octobox-tui: {err}");
            return ExitCode::from(2);
        }
    };

    let interactive =
        !config.snapshot && std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    let target = logging::log_target(interactive, config.log_file.as_deref());
    let _log_guard = logging::init_logging(&target, &config.log_level);
    debug!(?config, interactive, "starting");

    let client = match OctoboxClient::new(&config.url, &config.token) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("octobox-tui: {err}");
            return ExitCode::from(2);
        }
    };
    let mut backend = match HttpNotificationBackend::new(client) {
        Ok(backend) => backend,
        Err(err) => {
            eprintln!("octobox-tui: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = if interactive {
        let app = App::new(theme::resolve_theme(config.theme));
        terminal::run(app, &mut backend, config.refresh_interval)
    } else {
        snapshot::run_snapshot(&mut backend, &mut std::io::stdout().lock())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "exiting with error");
            eprintln!("octobox-tui: {err}");
            ExitCode::FAILURE
        }
    }
}
