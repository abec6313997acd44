//! Theme selection from configuration and terminal capability hints.

use octobox_term_adapter::style::{ThemeKind, ThemeSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorCapability {
    Ansi16,
    Ansi256,
    TrueColor,
}

/// Classify a terminal from `TERM`, `COLORTERM` and whether `NO_COLOR` is set.
#[must_use]
pub fn capability_from_env(
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: bool,
) -> TerminalColorCapability {
    if no_color {
        return TerminalColorCapability::Ansi16;
    }
    let colorterm = colorterm.unwrap_or_default().to_ascii_lowercase();
    if colorterm == "truecolor" || colorterm == "24bit" {
        return TerminalColorCapability::TrueColor;
    }
    let term = term.unwrap_or_default().to_ascii_lowercase();
    if term.is_empty() || term == "dumb" || term == "linux" || term.starts_with("vt") {
        return TerminalColorCapability::Ansi16;
    }
    TerminalColorCapability::Ansi256
}

#[must_use]
pub fn detect_terminal_color_capability() -> TerminalColorCapability {
    let term = std::env::var("TERM").ok();
    let colorterm = std::env::var("COLORTERM").ok();
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
    capability_from_env(term.as_deref(), colorterm.as_deref(), no_color)
}

#[must_use]
pub fn theme_for_capability(capability: TerminalColorCapability) -> ThemeSpec {
    match capability {
        TerminalColorCapability::Ansi16 => ThemeSpec::for_kind(ThemeKind::HighContrast),
        TerminalColorCapability::Ansi256 | TerminalColorCapability::TrueColor => {
            ThemeSpec::for_kind(ThemeKind::Dark)
        }
    }
}

/// A configured theme wins; otherwise the terminal decides.
#[must_use]
pub fn resolve_theme(configured: Option<ThemeKind>) -> ThemeSpec {
    match configured {
        Some(kind) => ThemeSpec::for_kind(kind),
        None => theme_for_capability(detect_terminal_color_capability()),
    }
}
