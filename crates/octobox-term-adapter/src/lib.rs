//! octobox-term-adapter: boundary layer between the Octobox TUI and the terminal.
//!
//! The app crate draws into a [`render::RenderFrame`], reads canonical
//! [`input::InputEvent`]s, and never touches terminal backend types directly.

/// Style and theme primitives consumed by the TUI crate.
pub mod style {
    /// Logical theme choices supported by the adapter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ThemeKind {
        Dark,
        Light,
        HighContrast,
    }

    impl ThemeKind {
        /// Parse a configuration value (`dark`, `light`, `high-contrast`).
        #[must_use]
        pub fn parse(raw: &str) -> Option<Self> {
            match raw.trim().to_ascii_lowercase().as_str() {
                "dark" => Some(Self::Dark),
                "light" => Some(Self::Light),
                "high-contrast" | "high_contrast" | "highcontrast" => Some(Self::HighContrast),
                _ => None,
            }
        }

        #[must_use]
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Dark => "dark",
                Self::Light => "light",
                Self::HighContrast => "high-contrast",
            }
        }
    }

    /// Stable style tokens exposed to application crates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum StyleToken {
        Background,
        Surface,
        Foreground,
        Muted,
        Accent,
        Success,
        Danger,
        Warning,
        Info,
        Focus,
    }

    /// Adapter palette uses terminal 256-color indexes for portability.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Palette {
        pub background: u8,
        pub surface: u8,
        pub foreground: u8,
        pub muted: u8,
        pub accent: u8,
        pub success: u8,
        pub danger: u8,
        pub warning: u8,
        pub info: u8,
        pub focus: u8,
    }

    /// Typography emphasis policy per theme.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TypographySpec {
        pub accent_bold: bool,
        pub danger_bold: bool,
        pub info_bold: bool,
        pub muted_dim: bool,
        pub focus_underline: bool,
    }

    /// Theme specification exposed to the TUI crate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ThemeSpec {
        pub kind: ThemeKind,
        pub palette: Palette,
        pub typography: TypographySpec,
    }

    impl ThemeSpec {
        /// Returns the color index for a stable style token.
        #[must_use]
        pub fn color(self, token: StyleToken) -> u8 {
            match token {
                StyleToken::Background => self.palette.background,
                StyleToken::Surface => self.palette.surface,
                StyleToken::Foreground => self.palette.foreground,
                StyleToken::Muted => self.palette.muted,
                StyleToken::Accent => self.palette.accent,
                StyleToken::Success => self.palette.success,
                StyleToken::Danger => self.palette.danger,
                StyleToken::Warning => self.palette.warning,
                StyleToken::Info => self.palette.info,
                StyleToken::Focus => self.palette.focus,
            }
        }

        /// Builds a theme for the requested style family.
        ///
        /// Success, danger and info stay in the green, red and blue families
        /// in every theme: row state is communicated by those three colors.
        #[must_use]
        pub fn for_kind(kind: ThemeKind) -> Self {
            let palette = match kind {
                ThemeKind::Dark => Palette {
                    background: 16,
                    surface: 237,
                    foreground: 255,
                    muted: 244,
                    accent: 45,
                    success: 41,
                    danger: 196,
                    warning: 220,
                    info: 33,
                    focus: 81,
                },
                ThemeKind::Light => Palette {
                    background: 255,
                    surface: 252,
                    foreground: 234,
                    muted: 244,
                    accent: 25,
                    success: 28,
                    danger: 160,
                    warning: 172,
                    info: 19,
                    focus: 21,
                },
                ThemeKind::HighContrast => Palette {
                    background: 0,
                    surface: 8,
                    foreground: 15,
                    muted: 7,
                    accent: 14,
                    success: 10,
                    danger: 9,
                    warning: 11,
                    info: 12,
                    focus: 11,
                },
            };
            let typography = match kind {
                ThemeKind::Dark | ThemeKind::Light => TypographySpec {
                    accent_bold: true,
                    danger_bold: false,
                    info_bold: true,
                    muted_dim: kind == ThemeKind::Dark,
                    focus_underline: true,
                },
                ThemeKind::HighContrast => TypographySpec {
                    accent_bold: true,
                    danger_bold: true,
                    info_bold: true,
                    muted_dim: false,
                    focus_underline: true,
                },
            };
            Self {
                kind,
                palette,
                typography,
            }
        }
    }

    impl Default for ThemeSpec {
        fn default() -> Self {
            Self::for_kind(ThemeKind::Dark)
        }
    }
}

/// Render and frame primitives consumed by the TUI crate.
pub mod render {
    use super::style::{StyleToken, ThemeSpec};
    use super::widgets::BorderStyle;

    /// Terminal color: ANSI256 index or 24-bit RGB.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TermColor {
        Ansi256(u8),
        Rgb(u8, u8, u8),
    }

    impl TermColor {
        /// Convert to ANSI256 index (lossy for RGB).
        #[must_use]
        pub fn as_ansi256(self) -> u8 {
            match self {
                Self::Ansi256(idx) => idx,
                Self::Rgb(r, g, b) => {
                    if r == g && g == b {
                        if r < 8 {
                            return 16;
                        }
                        if r > 248 {
                            return 231;
                        }
                        return (((u16::from(r) - 8) * 24 / 247) as u8) + 232;
                    }
                    16 + 36 * cube_level(r) + 6 * cube_level(g) + cube_level(b)
                }
            }
        }
    }

    fn cube_level(value: u8) -> u8 {
        const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
        LEVELS
            .iter()
            .enumerate()
            .min_by_key(|(_, level)| u8::abs_diff(value, **level))
            .map_or(0, |(idx, _)| idx as u8)
    }

    /// Frame dimensions in terminal cells.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameSize {
        pub width: usize,
        pub height: usize,
    }

    /// A rectangular region within a frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Rect {
        pub x: usize,
        pub y: usize,
        pub width: usize,
        pub height: usize,
    }

    impl Rect {
        /// Inner region after removing border (1 cell each side).
        #[must_use]
        pub fn inner(self) -> Self {
            if self.width < 2 || self.height < 2 {
                return Self {
                    x: self.x,
                    y: self.y,
                    width: 0,
                    height: 0,
                };
            }
            Self {
                x: self.x + 1,
                y: self.y + 1,
                width: self.width - 2,
                height: self.height - 2,
            }
        }

        /// Split into top (height=`top_height`) and bottom.
        #[must_use]
        pub fn split_vertical(self, top_height: usize) -> (Self, Self) {
            let top_h = top_height.min(self.height);
            (
                Self {
                    height: top_h,
                    ..self
                },
                Self {
                    y: self.y + top_h,
                    height: self.height - top_h,
                    ..self
                },
            )
        }
    }

    /// Cell style represented as terminal colors and text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellStyle {
        pub fg: TermColor,
        pub bg: TermColor,
        pub bold: bool,
        pub dim: bool,
        pub underline: bool,
    }

    /// A single frame cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameCell {
        pub glyph: char,
        pub style: CellStyle,
    }

    /// Semantic role for rendered text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TextRole {
        Primary,
        Muted,
        Accent,
        Success,
        Danger,
        Warning,
        Info,
        Focus,
    }

    struct BorderChars {
        top_left: char,
        top_right: char,
        bottom_left: char,
        bottom_right: char,
        horizontal: char,
        vertical: char,
    }

    fn border_chars(style: BorderStyle) -> BorderChars {
        match style {
            BorderStyle::Rounded => BorderChars {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            },
            BorderStyle::Plain => BorderChars {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
            BorderStyle::Ascii => BorderChars {
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                horizontal: '-',
                vertical: '|',
            },
        }
    }

    /// Cell grid the app renders into; the terminal runtime flushes it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RenderFrame {
        size: FrameSize,
        cells: Vec<FrameCell>,
        theme: ThemeSpec,
    }

    impl RenderFrame {
        /// Create a blank frame using the provided adapter theme.
        #[must_use]
        pub fn new(size: FrameSize, theme: ThemeSpec) -> Self {
            let default_cell = FrameCell {
                glyph: ' ',
                style: CellStyle {
                    fg: TermColor::Ansi256(theme.color(StyleToken::Foreground)),
                    bg: TermColor::Ansi256(theme.color(StyleToken::Background)),
                    bold: false,
                    dim: false,
                    underline: false,
                },
            };
            Self {
                size,
                cells: vec![default_cell; size.width.saturating_mul(size.height)],
                theme,
            }
        }

        #[must_use]
        pub fn theme(&self) -> ThemeSpec {
            self.theme
        }

        #[must_use]
        pub fn size(&self) -> FrameSize {
            self.size
        }

        /// Returns one frame cell for assertions/snapshot helpers.
        #[must_use]
        pub fn cell(&self, x: usize, y: usize) -> Option<FrameCell> {
            if x >= self.size.width || y >= self.size.height {
                return None;
            }
            Some(self.cells[y * self.size.width + x])
        }

        /// Write a single cell, clipped to frame bounds.
        pub fn set_cell(&mut self, x: usize, y: usize, cell: FrameCell) {
            if x >= self.size.width || y >= self.size.height {
                return;
            }
            self.cells[y * self.size.width + x] = cell;
        }

        /// Draw text on a single row on the theme background, clipped to frame width.
        pub fn draw_text(&mut self, x: usize, y: usize, text: &str, role: TextRole) {
            let bg = self.background();
            self.draw_text_on(x, y, text, role, bg);
        }

        /// Draw role-colored text over an explicit background.
        pub fn draw_text_on(&mut self, x: usize, y: usize, text: &str, role: TextRole, bg: TermColor) {
            let style = self.role_style(role, bg);
            self.draw_styled_text(x, y, text, style);
        }

        /// Draw text with a fully explicit cell style.
        pub fn draw_styled_text(&mut self, x: usize, y: usize, text: &str, style: CellStyle) {
            if y >= self.size.height {
                return;
            }
            for (offset, glyph) in text.chars().enumerate() {
                let col = x + offset;
                if col >= self.size.width {
                    break;
                }
                self.cells[y * self.size.width + col] = FrameCell { glyph, style };
            }
        }

        /// Paint `width` blank cells of row `y` with a background color.
        pub fn fill_row(&mut self, x: usize, y: usize, width: usize, bg: TermColor) {
            let style = self.role_style(TextRole::Primary, bg);
            for col in x..x.saturating_add(width) {
                self.set_cell(col, y, FrameCell { glyph: ' ', style });
            }
        }

        /// Draw a bordered panel with a title into a rectangular region.
        ///
        /// Returns the inner `Rect` (content area inside the border).
        pub fn draw_panel(
            &mut self,
            rect: Rect,
            title: &str,
            border: BorderStyle,
            border_role: TextRole,
        ) -> Rect {
            if rect.width < 2 || rect.height < 2 {
                return Rect {
                    x: rect.x,
                    y: rect.y,
                    width: 0,
                    height: 0,
                };
            }

            let chars = border_chars(border);
            let bg = self.background();
            let border_style = CellStyle {
                bold: false,
                underline: false,
                dim: false,
                ..self.role_style(border_role, bg)
            };
            let right = rect.x + rect.width - 1;
            let bottom = rect.y + rect.height - 1;

            for row in rect.y..=bottom {
                self.fill_row(rect.x, row, rect.width, bg);
            }

            let corners = [
                (rect.x, rect.y, chars.top_left),
                (right, rect.y, chars.top_right),
                (rect.x, bottom, chars.bottom_left),
                (right, bottom, chars.bottom_right),
            ];
            for (x, y, glyph) in corners {
                self.set_cell(
                    x,
                    y,
                    FrameCell {
                        glyph,
                        style: border_style,
                    },
                );
            }
            for col in (rect.x + 1)..right {
                for row in [rect.y, bottom] {
                    self.set_cell(
                        col,
                        row,
                        FrameCell {
                            glyph: chars.horizontal,
                            style: border_style,
                        },
                    );
                }
            }
            for row in (rect.y + 1)..bottom {
                for col in [rect.x, right] {
                    self.set_cell(
                        col,
                        row,
                        FrameCell {
                            glyph: chars.vertical,
                            style: border_style,
                        },
                    );
                }
            }

            if !title.is_empty() && rect.width > 4 {
                let title_max = rect.width - 4;
                let label: String = title.chars().take(title_max).collect();
                let title_style = CellStyle {
                    bold: true,
                    ..border_style
                };
                let text = format!(" {label} ");
                for (offset, glyph) in text.chars().enumerate() {
                    let col = rect.x + 1 + offset;
                    if col >= right {
                        break;
                    }
                    self.set_cell(
                        col,
                        rect.y,
                        FrameCell {
                            glyph,
                            style: title_style,
                        },
                    );
                }
            }

            rect.inner()
        }

        #[must_use]
        pub fn row_text(&self, y: usize) -> String {
            if y >= self.size.height {
                return String::new();
            }
            let start = y * self.size.width;
            let end = start + self.size.width;
            self.cells[start..end].iter().map(|cell| cell.glyph).collect()
        }

        /// Text-only snapshot helper for lightweight regression tests.
        #[must_use]
        pub fn snapshot(&self) -> String {
            (0..self.size.height)
                .map(|row| self.row_text(row))
                .collect::<Vec<_>>()
                .join("\n")
        }

        /// Returns the `TermColor` for a semantic role.
        #[must_use]
        pub fn color_for_role(&self, role: TextRole) -> TermColor {
            TermColor::Ansi256(match role {
                TextRole::Primary => self.theme.color(StyleToken::Foreground),
                TextRole::Muted => self.theme.color(StyleToken::Muted),
                TextRole::Accent => self.theme.color(StyleToken::Accent),
                TextRole::Success => self.theme.color(StyleToken::Success),
                TextRole::Danger => self.theme.color(StyleToken::Danger),
                TextRole::Warning => self.theme.color(StyleToken::Warning),
                TextRole::Info => self.theme.color(StyleToken::Info),
                TextRole::Focus => self.theme.color(StyleToken::Focus),
            })
        }

        /// Theme color for a token, as a terminal color.
        #[must_use]
        pub fn token_color(&self, token: StyleToken) -> TermColor {
            TermColor::Ansi256(self.theme.color(token))
        }

        /// Full cell style for a role on the given background.
        #[must_use]
        pub fn role_style(&self, role: TextRole, bg: TermColor) -> CellStyle {
            let typography = self.theme.typography;
            let (bold, dim, underline) = match role {
                TextRole::Primary | TextRole::Success | TextRole::Warning => (false, false, false),
                TextRole::Muted => (false, typography.muted_dim, false),
                TextRole::Accent => (typography.accent_bold, false, false),
                TextRole::Danger => (typography.danger_bold, false, false),
                TextRole::Info => (typography.info_bold, false, false),
                TextRole::Focus => (true, false, typography.focus_underline),
            };
            CellStyle {
                fg: self.color_for_role(role),
                bg,
                bold,
                dim,
                underline,
            }
        }

        fn background(&self) -> TermColor {
            self.token_color(StyleToken::Background)
        }
    }
}

/// Table and panel primitives consumed by the TUI crate.
pub mod widgets {
    /// Border treatment exposed by the adapter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BorderStyle {
        Plain,
        Rounded,
        Ascii,
    }

    /// Text alignment for table headers and cells.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TextAlign {
        Left,
        Center,
        Right,
    }

    /// One table column. `width` is the preferred width; flex columns also
    /// absorb any spare width.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TableColumnSpec {
        pub key: &'static str,
        pub title: &'static str,
        pub width: u16,
        pub align: TextAlign,
        pub flex: bool,
    }

    /// Notification table columns, in display order.
    #[must_use]
    pub fn notification_columns() -> [TableColumnSpec; 4] {
        [
            TableColumnSpec {
                key: "type",
                title: "Type",
                width: 12,
                align: TextAlign::Center,
                flex: false,
            },
            TableColumnSpec {
                key: "title",
                title: "Title",
                width: 30,
                align: TextAlign::Center,
                flex: true,
            },
            TableColumnSpec {
                key: "repo",
                title: "Repo",
                width: 20,
                align: TextAlign::Center,
                flex: false,
            },
            TableColumnSpec {
                key: "reason",
                title: "Reason",
                width: 14,
                align: TextAlign::Center,
                flex: false,
            },
        ]
    }

    /// Fit columns into `total_width` cells with `gap` cells between columns.
    ///
    /// Spare width goes to flex columns (first flex column takes the
    /// remainder). When space is short the widest column shrinks first.
    #[must_use]
    pub fn layout_columns(specs: &[TableColumnSpec], total_width: usize, gap: usize) -> Vec<usize> {
        if specs.is_empty() {
            return Vec::new();
        }
        let gaps = gap.saturating_mul(specs.len() - 1);
        let available = total_width.saturating_sub(gaps);
        let mut widths: Vec<usize> = specs.iter().map(|spec| usize::from(spec.width)).collect();
        let wanted: usize = widths.iter().sum();

        if wanted <= available {
            let flex: Vec<usize> = specs
                .iter()
                .enumerate()
                .filter(|(_, spec)| spec.flex)
                .map(|(idx, _)| idx)
                .collect();
            if let Some(&first) = flex.first() {
                let spare = available - wanted;
                let share = spare / flex.len();
                for idx in &flex {
                    widths[*idx] += share;
                }
                widths[first] += spare % flex.len();
            }
            return widths;
        }

        let mut overflow = wanted - available;
        while overflow > 0 {
            let Some((widest, _)) = widths
                .iter()
                .enumerate()
                .max_by(|(left_idx, left), (right_idx, right)| {
                    left.cmp(right).then_with(|| right_idx.cmp(left_idx))
                })
            else {
                break;
            };
            if widths[widest] == 0 {
                break;
            }
            widths[widest] -= 1;
            overflow -= 1;
        }
        widths
    }

    /// Fit `text` into exactly `width` cells: truncate with `~`, then pad.
    #[must_use]
    pub fn align_cell(text: &str, width: usize, align: TextAlign) -> String {
        if width == 0 {
            return String::new();
        }
        let len = text.chars().count();
        if len > width {
            if width == 1 {
                return "~".to_owned();
            }
            let mut out: String = text.chars().take(width - 1).collect();
            out.push('~');
            return out;
        }
        let pad = width - len;
        let (left, right) = match align {
            TextAlign::Left => (0, pad),
            TextAlign::Right => (pad, 0),
            TextAlign::Center => (pad / 2, pad - pad / 2),
        };
        format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
    }
}

/// Snapshot helpers for adapter-based render abstractions.
pub mod snapshot;

/// Canonical input events and the default key-to-action mapping.
pub mod input {
    /// Canonical key set exposed to the TUI crate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Key {
        Char(char),
        Enter,
        Escape,
        Tab,
        Backspace,
        Up,
        Down,
        Left,
        Right,
        Home,
        End,
        PageUp,
        PageDown,
    }

    /// Canonical keyboard modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers {
        pub shift: bool,
        pub ctrl: bool,
        pub alt: bool,
    }

    impl Modifiers {
        #[must_use]
        pub const fn none() -> Self {
            Self {
                shift: false,
                ctrl: false,
                alt: false,
            }
        }

        #[must_use]
        pub const fn ctrl() -> Self {
            Self {
                shift: false,
                ctrl: true,
                alt: false,
            }
        }
    }

    /// Canonical key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeyEvent {
        pub key: Key,
        pub modifiers: Modifiers,
    }

    impl KeyEvent {
        #[must_use]
        pub const fn plain(key: Key) -> Self {
            Self {
                key,
                modifiers: Modifiers::none(),
            }
        }

        #[must_use]
        pub const fn ctrl(ch: char) -> Self {
            Self {
                key: Key::Char(ch),
                modifiers: Modifiers::ctrl(),
            }
        }
    }

    /// Canonical frame resize event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResizeEvent {
        pub width: usize,
        pub height: usize,
    }

    /// Input stream event consumed by the app.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum InputEvent {
        Key(KeyEvent),
        Resize(ResizeEvent),
    }

    /// High-level actions produced by input translation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum UiAction {
        Noop,
        Quit,
        Refresh,
        Open,
        MarkRead,
        Mute,
        Archive,
        ToggleSelect,
        MoveUp,
        MoveDown,
        PageUp,
        PageDown,
        Top,
        Bottom,
        Help,
    }

    /// Translator trait allowing alternate keymaps.
    pub trait InputTranslator {
        fn translate(&self, event: &InputEvent) -> UiAction;
    }

    /// Default notification-table keymap.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct DefaultInputTranslator;

    impl InputTranslator for DefaultInputTranslator {
        fn translate(&self, event: &InputEvent) -> UiAction {
            let InputEvent::Key(KeyEvent { key, modifiers }) = *event else {
                return UiAction::Noop;
            };
            if modifiers.ctrl {
                return match key {
                    Key::Char('r') => UiAction::Refresh,
                    Key::Char('o') => UiAction::Open,
                    Key::Char('n') => UiAction::MarkRead,
                    Key::Char('u') => UiAction::Mute,
                    Key::Char('e') => UiAction::Archive,
                    Key::Char('c') => UiAction::Quit,
                    _ => UiAction::Noop,
                };
            }
            match key {
                Key::Escape | Key::Char('q') => UiAction::Quit,
                Key::Enter | Key::Char(' ') => UiAction::ToggleSelect,
                Key::Up | Key::Char('k') => UiAction::MoveUp,
                Key::Down | Key::Char('j') => UiAction::MoveDown,
                Key::PageUp => UiAction::PageUp,
                Key::PageDown => UiAction::PageDown,
                Key::Home | Key::Char('g') => UiAction::Top,
                Key::End | Key::Char('G') => UiAction::Bottom,
                Key::Char('?') => UiAction::Help,
                _ => UiAction::Noop,
            }
        }
    }

    /// Convenience function for consumers that do not need custom mapping.
    #[must_use]
    pub fn translate_input(event: &InputEvent) -> UiAction {
        DefaultInputTranslator.translate(event)
    }
}
