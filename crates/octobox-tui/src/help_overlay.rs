use octobox_term_adapter::render::{FrameSize, RenderFrame, TextRole};
use octobox_term_adapter::style::ThemeSpec;

/// Render the key binding help screen.
#[must_use]
pub fn render_help_overlay(width: usize, height: usize, theme: ThemeSpec) -> RenderFrame {
    let mut frame = RenderFrame::new(FrameSize { width, height }, theme);
    if width == 0 || height == 0 {
        return frame;
    }

    for (row, line) in help_lines().iter().enumerate() {
        if row >= height {
            break;
        }
        let role = match row {
            0 => TextRole::Accent,
            2 | 7 | 12 => TextRole::Muted,
            _ => TextRole::Primary,
        };
        frame.draw_text(0, row, &truncate(line, width), role);
    }

    frame
}

#[must_use]
pub fn help_lines() -> Vec<&'static str> {
    vec![
        "Octobox TUI Help",
        "",
        "Navigation:",
        "  up/k down/j move | pgup/pgdn page | home/g end/G first/last",
        "  enter/space select or deselect the row (selected rows are red)",
        "  ctrl+r refresh | ? toggle help | esc/q quit",
        "",
        "Actions (selected rows, or the cursor row when none are selected):",
        "  ctrl+n mark as read",
        "  ctrl+u mute",
        "  ctrl+e archive",
        "",
        "Cursor row only:",
        "  ctrl+o open in browser",
        "",
        "Press q, esc, or ? to close help.",
    ]
}

fn truncate(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_owned();
    }
    if max_chars <= 1 {
        return "…".chars().take(max_chars).collect();
    }
    let mut out: String = input.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
