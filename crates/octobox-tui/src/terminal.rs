//! crossterm runtime: owns the terminal, pumps events into the app, and
//! repaints the frame it renders.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event as TerminalEvent, KeyCode as TerminalKeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use octobox_term_adapter::input::{InputEvent, Key, KeyEvent, Modifiers, ResizeEvent};
use octobox_term_adapter::render::{CellStyle, RenderFrame, TermColor};
use tracing::{debug, info};

use crate::app::{App, Command};
use crate::backend::NotificationBackend;
use crate::dispatch::dispatch_command;

/// Poll timeout when periodic refresh is off.
const IDLE_POLL: Duration = Duration::from_secs(1);

pub fn run(
    mut app: App,
    backend: &mut dyn NotificationBackend,
    refresh_interval: Option<Duration>,
) -> Result<(), String> {
    let mut terminal_session =
        TerminalSession::enter().map_err(|err| format!("enter terminal mode: {err}"))?;

    let (width, height) = terminal_size().map_err(|err| format!("read terminal size: {err}"))?;
    let _ = app.update(InputEvent::Resize(ResizeEvent { width, height }));
    render_frame(&mut terminal_session.stdout, &app.render())
        .map_err(|err| format!("render frame: {err}"))?;
    dispatch_command(Command::Fetch, &mut app, backend);
    info!(rows = app.rows().len(), "initial fetch done");

    let mut dirty = true;
    let mut next_refresh = refresh_interval.map(|interval| Instant::now() + interval);

    loop {
        if dirty {
            let frame = app.render();
            render_frame(&mut terminal_session.stdout, &frame)
                .map_err(|err| format!("render frame: {err}"))?;
            dirty = false;
        }

        if app.quitting() {
            break;
        }

        let now = Instant::now();
        if let (Some(deadline), Some(interval)) = (next_refresh, refresh_interval) {
            if now >= deadline {
                debug!("periodic refresh");
                dirty |= dispatch_command(Command::Fetch, &mut app, backend);
                next_refresh = Some(Instant::now() + interval);
                continue;
            }
        }

        let timeout = next_refresh.map_or(IDLE_POLL, |deadline| {
            deadline.saturating_duration_since(now)
        });
        let has_event =
            event::poll(timeout).map_err(|err| format!("poll terminal event: {err}"))?;
        if !has_event {
            continue;
        }

        let event = event::read().map_err(|err| format!("read terminal event: {err}"))?;
        if is_interrupt(&event) {
            break;
        }

        if let Some(input) = map_terminal_event(event) {
            let command = app.update(input);
            dirty = true;
            dirty |= dispatch_command(command, &mut app, backend);
        }
    }

    Ok(())
}

fn terminal_size() -> io::Result<(usize, usize)> {
    let (width, height) = terminal::size()?;
    Ok((usize::from(width), usize::from(height)))
}

/// Convert a crossterm event into an adapter input event. Key releases and
/// mouse/focus/paste events are dropped.
#[must_use]
pub fn map_terminal_event(event: TerminalEvent) -> Option<InputEvent> {
    match event {
        TerminalEvent::Resize(width, height) => Some(InputEvent::Resize(ResizeEvent {
            width: usize::from(width),
            height: usize::from(height),
        })),
        TerminalEvent::Key(key_event) => {
            if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                return None;
            }

            let key = match key_event.code {
                TerminalKeyCode::Char(ch) => Key::Char(ch),
                TerminalKeyCode::Enter => Key::Enter,
                TerminalKeyCode::Esc => Key::Escape,
                TerminalKeyCode::Tab | TerminalKeyCode::BackTab => Key::Tab,
                TerminalKeyCode::Backspace => Key::Backspace,
                TerminalKeyCode::Up => Key::Up,
                TerminalKeyCode::Down => Key::Down,
                TerminalKeyCode::Left => Key::Left,
                TerminalKeyCode::Right => Key::Right,
                TerminalKeyCode::Home => Key::Home,
                TerminalKeyCode::End => Key::End,
                TerminalKeyCode::PageUp => Key::PageUp,
                TerminalKeyCode::PageDown => Key::PageDown,
                _ => return None,
            };

            let mut modifiers = Modifiers {
                shift: key_event.modifiers.contains(KeyModifiers::SHIFT),
                ctrl: key_event.modifiers.contains(KeyModifiers::CONTROL),
                alt: key_event.modifiers.contains(KeyModifiers::ALT),
            };
            if matches!(key_event.code, TerminalKeyCode::BackTab) {
                modifiers.shift = true;
            }

            Some(InputEvent::Key(KeyEvent { key, modifiers }))
        }
        _ => None,
    }
}

fn is_interrupt(event: &TerminalEvent) -> bool {
    let TerminalEvent::Key(key_event) = event else {
        return false;
    };

    if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return false;
    }

    matches!(key_event.code, TerminalKeyCode::Char('c'))
        && key_event.modifiers.contains(KeyModifiers::CONTROL)
}

/// Paint every cell of `frame`, emitting style changes only between runs of
/// differently styled cells.
pub fn render_frame<W: Write>(out: &mut W, frame: &RenderFrame) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    let size = frame.size();

    for y in 0..size.height {
        queue!(out, MoveTo(0, to_u16(y)))?;
        let mut style = None;
        for x in 0..size.width {
            if let Some(cell) = frame.cell(x, y) {
                if style != Some(cell.style) {
                    queue_style(out, cell.style)?;
                    style = Some(cell.style);
                }
                queue!(out, Print(cell.glyph))?;
            }
        }
    }

    queue!(out, SetAttribute(Attribute::Reset))?;
    out.flush()
}

fn to_crossterm_color(color: TermColor) -> Color {
    match color {
        TermColor::Ansi256(idx) => Color::AnsiValue(idx),
        TermColor::Rgb(r, g, b) => Color::Rgb { r, g, b },
    }
}

fn queue_style<W: Write>(out: &mut W, style: CellStyle) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(to_crossterm_color(style.fg)),
        SetBackgroundColor(to_crossterm_color(style.bg)),
    )?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    } else if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Raw mode plus alternate screen for as long as the value lives.
struct TerminalSession {
    stdout: io::Stdout,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(
            stdout,
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self { stdout })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            LeaveAlternateScreen,
            Show
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use crossterm::event::{
        Event as TerminalEvent, KeyCode, KeyEvent as TerminalKeyEvent, KeyEventKind,
        KeyEventState, KeyModifiers,
    };
    use octobox_term_adapter::input::{InputEvent, Key, KeyEvent, ResizeEvent};
    use octobox_term_adapter::render::{FrameSize, RenderFrame, TextRole};
    use octobox_term_adapter::style::ThemeSpec;

    use super::{is_interrupt, map_terminal_event, render_frame, to_u16};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> TerminalEvent {
        TerminalEvent::Key(TerminalKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn ctrl_letters_map_with_ctrl_modifier() {
        assert_eq!(
            map_terminal_event(press(KeyCode::Char('e'), KeyModifiers::CONTROL)),
            Some(InputEvent::Key(KeyEvent::ctrl('e')))
        );
    }

    #[test]
    fn navigation_keys_map() {
        assert_eq!(
            map_terminal_event(press(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(InputEvent::Key(KeyEvent::plain(Key::PageDown)))
        );
        assert_eq!(
            map_terminal_event(press(KeyCode::Home, KeyModifiers::NONE)),
            Some(InputEvent::Key(KeyEvent::plain(Key::Home)))
        );
    }

    #[test]
    fn backtab_becomes_shift_tab() {
        let mapped = map_terminal_event(press(KeyCode::BackTab, KeyModifiers::NONE));
        let Some(InputEvent::Key(key)) = mapped else {
            panic!("expected key event, got {mapped:?}");
        };
        assert_eq!(key.key, Key::Tab);
        assert!(key.modifiers.shift);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = TerminalEvent::Key(TerminalKeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_terminal_event(release), None);
    }

    #[test]
    fn resize_maps_to_adapter_resize() {
        assert_eq!(
            map_terminal_event(TerminalEvent::Resize(120, 40)),
            Some(InputEvent::Resize(ResizeEvent {
                width: 120,
                height: 40,
            }))
        );
    }

    #[test]
    fn ctrl_c_is_interrupt() {
        assert!(is_interrupt(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_interrupt(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_interrupt(&TerminalEvent::FocusGained));
    }

    #[test]
    fn render_frame_prints_every_glyph() {
        let mut frame = RenderFrame::new(
            FrameSize {
                width: 5,
                height: 2,
            },
            ThemeSpec::default(),
        );
        frame.draw_text(0, 0, "octo", TextRole::Success);
        frame.draw_text(0, 1, "box", TextRole::Primary);
        let mut out = Vec::new();
        render_frame(&mut out, &frame).unwrap();
        let ansi = String::from_utf8(out).unwrap();
        for glyph in ['o', 'c', 't', 'b', 'x'] {
            assert!(ansi.contains(glyph));
        }
        assert!(ansi.contains("\x1b[38;5;41m"));
    }

    #[test]
    fn to_u16_saturates() {
        assert_eq!(to_u16(7), 7);
        assert_eq!(to_u16(usize::MAX), u16::MAX);
    }
}
