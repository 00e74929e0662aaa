//! Auto-sizing chat input of the preview.
//!
//! Row counts come from a character-width heuristic rather than real text
//! layout, so proportional fonts can be misestimated.

pub const MIN_ROWS: u32 = 1;
pub const MAX_ROWS: u32 = 12;

/// Usable width of the preview's input box in CSS pixels.
pub const DEFAULT_CONTENT_WIDTH_PX: f32 = 180.0;
/// Average glyph width of the 14px input font.
pub const DEFAULT_AVG_CHAR_WIDTH_PX: f32 = 7.0;

/// Estimate visible rows for `text`.
///
/// Every explicit line takes at least one row, long lines wrap at
/// `floor(width / avg)` characters, and the total is clamped to
/// [`MIN_ROWS`]..=[`MAX_ROWS`].
pub fn estimate_rows(text: &str, content_width_px: f32, avg_char_width_px: f32) -> u32 {
    let per_line = if avg_char_width_px > 0.0 {
        (content_width_px / avg_char_width_px).floor().max(1.0) as usize
    } else {
        1
    };

    let rows: usize = text
        .split('\n')
        .map(|line| line.chars().count().div_ceil(per_line).max(1))
        .sum();

    u32::try_from(rows).unwrap_or(MAX_ROWS).clamp(MIN_ROWS, MAX_ROWS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    /// Modifier held. With Enter it inserts a line break instead of sending.
    pub shift: bool,
}

impl KeyPress {
    pub fn enter() -> Self {
        Self { key: Key::Enter, shift: false }
    }

    pub fn shift_enter() -> Self {
        Self { key: Key::Enter, shift: true }
    }
}

/// What a key press did to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Submitted,
    NewLine,
    Ignored,
}

pub type SubmitHandler = Box<dyn FnMut(String) + Send>;

pub struct ChatInput {
    value: String,
    rows: u32,
    content_width_px: f32,
    avg_char_width_px: f32,
    on_submit: Option<SubmitHandler>,
}

impl Default for ChatInput {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_WIDTH_PX, DEFAULT_AVG_CHAR_WIDTH_PX)
    }
}

impl ChatInput {
    pub fn new(content_width_px: f32, avg_char_width_px: f32) -> Self {
        Self {
            value: String::new(),
            rows: MIN_ROWS,
            content_width_px,
            avg_char_width_px,
            on_submit: None,
        }
    }

    pub fn on_submit(mut self, handler: SubmitHandler) -> Self {
        self.on_submit = Some(handler);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Replace the text and recompute rows.
    pub fn input(&mut self, text: impl Into<String>) {
        self.value = text.into();
        self.recompute();
    }

    /// The box was resized: same text, new wrap width.
    pub fn set_content_width(&mut self, content_width_px: f32) {
        self.content_width_px = content_width_px;
        self.recompute();
    }

    pub fn key_down(&mut self, press: KeyPress) -> KeyOutcome {
        if press.key != Key::Enter {
            return KeyOutcome::Ignored;
        }
        if press.shift {
            self.value.push('\n');
            self.recompute();
            return KeyOutcome::NewLine;
        }
        if self.value.trim().is_empty() {
            return KeyOutcome::Ignored;
        }

        let message = std::mem::take(&mut self.value);
        self.rows = MIN_ROWS;
        if let Some(handler) = self.on_submit.as_mut() {
            handler(message);
        }
        KeyOutcome::Submitted
    }

    fn recompute(&mut self) {
        self.rows = estimate_rows(&self.value, self.content_width_px, self.avg_char_width_px);
    }
}

impl std::fmt::Debug for ChatInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatInput")
            .field("value", &self.value)
            .field("rows", &self.rows)
            .finish_non_exhaustive()
    }
}
