//! Runtime configuration.
//!
//! Precedence: command-line flag > environment variable > config file >
//! built-in default. Flags and environment are read by clap; the TOML file
//! fills whatever they leave unset.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use octobox_term_adapter::style::ThemeKind;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "octobox-tui",
    version,
    about = "Terminal client for Octobox notifications"
)]
pub struct Cli {
    /// Base URL of the Octobox instance
    #[arg(long, env = "OCTOBOX_URL")]
    pub url: Option<String>,

    /// Octobox API token
    #[arg(long, env = "OCTOBOX_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Color theme: dark, light or high-contrast
    #[arg(long, env = "OCTOBOX_THEME")]
    pub theme: Option<String>,

    /// Refetch every N seconds (0 disables)
    #[arg(long = "refresh-interval", env = "OCTOBOX_REFRESH_INTERVAL", value_name = "SECS")]
    pub refresh_interval: Option<u64>,

    /// Log file used while the terminal UI is running
    #[arg(long, env = "OCTOBOX_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Config file (default: <config dir>/octobox/config.toml)
    #[arg(long, env = "OCTOBOX_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the notification table once and exit
    #[arg(long)]
    pub snapshot: bool,
}

/// Keys accepted in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    pub theme: Option<String>,
    pub refresh_interval_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing {name}: pass --{flag}, set {env}, or add `{key}` to the config file")]
    Missing {
        name: &'static str,
        flag: &'static str,
        env: &'static str,
        key: &'static str,
    },

    #[error("unknown theme {0:?} (expected dark, light or high-contrast)")]
    InvalidTheme(String),
}

/// Fully resolved settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub token: String,
    /// `None` means detect from the terminal.
    pub theme: Option<ThemeKind>,
    pub refresh_interval: Option<Duration>,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    pub snapshot: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("theme", &self.theme)
            .field("refresh_interval", &self.refresh_interval)
            .field("log_file", &self.log_file)
            .field("log_level", &self.log_level)
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

impl Config {
    /// Merge parsed flags/env over file values and apply defaults.
    pub fn resolve(cli: Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let url = non_empty(cli.url)
            .or_else(|| non_empty(file.url))
            .ok_or(ConfigError::Missing {
                name: "service url",
                flag: "url",
                env: "OCTOBOX_URL",
                key: "url",
            })?;
        let token = non_empty(cli.token)
            .or_else(|| non_empty(file.token))
            .ok_or(ConfigError::Missing {
                name: "api token",
                flag: "token",
                env: "OCTOBOX_API_TOKEN",
                key: "token",
            })?;

        let theme = match non_empty(cli.theme).or_else(|| non_empty(file.theme)) {
            Some(raw) => Some(ThemeKind::parse(&raw).ok_or(ConfigError::InvalidTheme(raw))?),
            None => None,
        };

        let refresh_interval = cli
            .refresh_interval
            .or(file.refresh_interval_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let log_file = cli
            .log_file
            .or(file.log_file)
            .or_else(default_log_file);
        let log_level = non_empty(cli.log_level)
            .or_else(|| non_empty(file.log_level))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned());

        Ok(Self {
            url,
            token,
            theme,
            refresh_interval,
            log_file,
            log_level,
            snapshot: cli.snapshot,
        })
    }
}

/// Read the config file and resolve it against `cli`.
pub fn load(cli: Cli) -> Result<Config, ConfigError> {
    let file = load_file_config(cli.config.as_deref())?;
    Config::resolve(cli, file)
}

/// Load `explicit` if given (it must exist), else the default path if it
/// exists, else an empty config.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(FileConfig::default()),
        },
    };
    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse_file_config(&raw, &path)
}

pub fn parse_file_config(raw: &str, path: &Path) -> Result<FileConfig, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("octobox").join("config.toml"))
}

#[must_use]
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("octobox-tui").join("octobox-tui.log"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use octobox_term_adapter::style::ThemeKind;

    use super::{load_file_config, parse_file_config, Cli, Config, ConfigError, FileConfig};

    fn cli(url: Option<&str>, token: Option<&str>) -> Cli {
        Cli {
            url: url.map(str::to_owned),
            token: token.map(str::to_owned),
            ..Cli::default()
        }
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig {
            url: Some("https://file.example".to_owned()),
            token: Some("file-token".to_owned()),
            theme: Some("light".to_owned()),
            refresh_interval_secs: Some(60),
            ..FileConfig::default()
        };
        let mut flags = cli(Some("https://flag.example"), None);
        flags.theme = Some("high-contrast".to_owned());
        let config = Config::resolve(flags, file).unwrap();
        assert_eq!(config.url, "https://flag.example");
        assert_eq!(config.token, "file-token");
        assert_eq!(config.theme, Some(ThemeKind::HighContrast));
        assert_eq!(config.refresh_interval, Some(Duration::from_secs(60)));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn zero_refresh_interval_disables_refresh() {
        let mut flags = cli(Some("u"), Some("t"));
        flags.refresh_interval = Some(0);
        let file = FileConfig {
            refresh_interval_secs: Some(30),
            ..FileConfig::default()
        };
        assert_eq!(Config::resolve(flags, file).unwrap().refresh_interval, None);
    }

    #[test]
    fn missing_token_is_reported() {
        let err = Config::resolve(cli(Some("u"), Some("  ")), FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { env: "OCTOBOX_API_TOKEN", .. }));
        assert!(err.to_string().contains("--token"));
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let mut flags = cli(Some("u"), Some("t"));
        flags.theme = Some("solarized".to_owned());
        assert!(matches!(
            Config::resolve(flags, FileConfig::default()),
            Err(ConfigError::InvalidTheme(raw)) if raw == "solarized"
        ));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = Config::resolve(cli(Some("u"), Some("s3cret")), FileConfig::default()).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn parses_file_keys() {
        let parsed = parse_file_config(
            "url = \"https://octobox.example\"\ntoken = \"abc\"\nrefresh_interval_secs = 120\nlog_level = \"debug\"\n",
            Path::new("config.toml"),
        )
        .unwrap();
        assert_eq!(parsed.url.as_deref(), Some("https://octobox.example"));
        assert_eq!(parsed.refresh_interval_secs, Some(120));
        assert_eq!(parsed.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_file_key_is_a_parse_error() {
        let err = parse_file_config("colour = \"red\"\n", Path::new("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_file_is_loaded_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url = \"https://disk.example\"").unwrap();
        let loaded = load_file_config(Some(file.path())).unwrap();
        assert_eq!(loaded.url.as_deref(), Some("https://disk.example"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("absent.toml");
        assert!(matches!(
            load_file_config(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn clap_parses_flags() {
        use clap::Parser;

        let parsed = Cli::try_parse_from([
            "octobox-tui",
            "--url",
            "https://octobox.example",
            "--token",
            "abc",
            "--refresh-interval",
            "15",
            "--snapshot",
        ])
        .unwrap();
        assert_eq!(parsed.url.as_deref(), Some("https://octobox.example"));
        assert_eq!(parsed.refresh_interval, Some(15));
        assert!(parsed.snapshot);
    }
}
