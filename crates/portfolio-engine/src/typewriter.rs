//! Character-by-character text reveal.
//!
//! [`Typewriter`] is the pure state machine; it owns no timers. Hosts call
//! [`Typewriter::start`] once the start delay has elapsed and
//! [`Typewriter::tick`] on every interval tick. See
//! [`crate::scheduler::TypewriterDriver`] for a host built on the virtual
//! clock.
//!
//! ```text
//! Idle --start--> Typing --last character--> Done
//! Typing | Done --reconfigure--> Idle
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Interval between revealed characters
pub const DEFAULT_TICK: Duration = Duration::from_millis(70);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypewriterPhase {
    /// Waiting for the start delay
    Idle,
    Typing,
    Done,
}

/// Result of a single [`Typewriter::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One more character is visible
    Advanced,
    /// The last character became visible; the machine is now `Done`
    Finished,
    /// Not typing, nothing changed
    Ignored,
}

/// What a renderer needs to draw the current frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypewriterView {
    pub revealed: String,
    pub typing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Typewriter {
    text: String,
    delay: Duration,
    phase: TypewriterPhase,
    /// Byte offset of the end of the revealed prefix
    revealed_bytes: usize,
    revealed_chars: usize,
    total_chars: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, delay: Duration) -> Self {
        let text = text.into();
        let total_chars = text.chars().count();
        Self {
            phase: Self::initial_phase(&text),
            text,
            delay,
            revealed_bytes: 0,
            revealed_chars: 0,
            total_chars,
        }
    }

    fn initial_phase(text: &str) -> TypewriterPhase {
        if text.is_empty() {
            TypewriterPhase::Done
        } else {
            TypewriterPhase::Idle
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    /// Revealed prefix of the source text
    pub fn revealed(&self) -> &str {
        &self.text[..self.revealed_bytes]
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed_chars
    }

    pub fn len(&self) -> usize {
        self.total_chars
    }

    pub fn is_empty(&self) -> bool {
        self.total_chars == 0
    }

    /// True from the last reset until every character is visible.
    ///
    /// Empty text is never typing.
    pub fn is_typing(&self) -> bool {
        self.phase != TypewriterPhase::Done
    }

    pub fn caret_visible(&self) -> bool {
        self.is_typing()
    }

    /// Whether a host still has to schedule timers for this machine
    pub fn needs_timers(&self) -> bool {
        self.phase != TypewriterPhase::Done
    }

    /// Start delay has elapsed. Returns `false` outside `Idle`.
    pub fn start(&mut self) -> bool {
        if self.phase != TypewriterPhase::Idle {
            return false;
        }
        self.phase = TypewriterPhase::Typing;
        true
    }

    pub fn tick(&mut self) -> Tick {
        if self.phase != TypewriterPhase::Typing {
            return Tick::Ignored;
        }

        if let Some(next) = self.text[self.revealed_bytes..].chars().next() {
            self.revealed_bytes += next.len_utf8();
            self.revealed_chars += 1;
        }

        if self.revealed_chars >= self.total_chars {
            self.phase = TypewriterPhase::Done;
            Tick::Finished
        } else {
            Tick::Advanced
        }
    }

    /// Switch to new text or delay.
    ///
    /// Any change discards the revealed prefix and returns to `Idle` (or
    /// `Done` for empty text). Returns `false` when nothing changed.
    pub fn reconfigure(&mut self, text: &str, delay: Duration) -> bool {
        if self.text == text && self.delay == delay {
            return false;
        }
        *self = Self::new(text, delay);
        true
    }

    pub fn view(&self) -> TypewriterView {
        TypewriterView {
            revealed: self.revealed().to_string(),
            typing: self.is_typing(),
        }
    }
}
