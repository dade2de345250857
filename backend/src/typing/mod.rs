//! Human-paced typing of a query
//!
//! The simulator owns the target string and the prefix displayed so far. Each
//! call to [`TypingSimulator::type_next`] appends one character and reports
//! how long to wait before the next one. Scheduling that wait is the caller's
//! job; the simulator only hands out a token so the caller can tell whether a
//! scheduled continuation still belongs to the live sequence.
//!
//! # Delay policy
//!
//! | character                    | delay after appending |
//! |------------------------------|-----------------------|
//! | `,` `，`                     | 300                   |
//! | `.` `!` `?` `。`             | 500                   |
//! | space                        | 100                   |
//! | ASCII letter                 | uniform in [40, 70)   |
//! | anything else (CJK, digits)  | uniform in [30, 70)   |

use crate::core::time::Millis;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use tracing::trace;

pub const COMMA_PAUSE: Millis = 300;
pub const SENTENCE_PAUSE: Millis = 500;
pub const SPACE_PAUSE: Millis = 100;

/// Delay to wait after appending `ch`
///
/// # Example
/// ```
/// use agent_demo_core_rs::typing::char_delay;
/// use agent_demo_core_rs::RngManager;
///
/// let mut rng = RngManager::new(1);
/// assert_eq!(char_delay('，', &mut rng), 300);
/// assert_eq!(char_delay('。', &mut rng), 500);
/// assert_eq!(char_delay(' ', &mut rng), 100);
/// assert!((40..70).contains(&char_delay('q', &mut rng)));
/// assert!((30..70).contains(&char_delay('投', &mut rng)));
/// ```
pub fn char_delay(ch: char, rng: &mut RngManager) -> Millis {
    match ch {
        ',' | '，' => COMMA_PAUSE,
        '.' | '!' | '?' | '。' => SENTENCE_PAUSE,
        ' ' => SPACE_PAUSE,
        c if c.is_ascii_alphabetic() => rng.range(40, 70),
        _ => rng.range(30, 70),
    }
}

/// One appended character and the pause that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedChar {
    pub ch: char,
    pub delay_after: Millis,
}

/// Character-by-character typing state
///
/// # Example
/// ```
/// use agent_demo_core_rs::{RngManager, TypingSimulator};
///
/// let mut typing = TypingSimulator::new();
/// let mut rng = RngManager::new(9);
/// typing.start("A,B.");
///
/// let typed: Vec<char> = std::iter::from_fn(|| typing.type_next(&mut rng))
///     .map(|t| t.ch)
///     .collect();
///
/// assert_eq!(typed, vec!['A', ',', 'B', '.']);
/// assert_eq!(typing.displayed(), "A,B.");
/// assert!(typing.type_next(&mut rng).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypingSimulator {
    target: Vec<char>,
    displayed: String,
    position: usize,
    token: u64,
    active: bool,
}

impl TypingSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin typing `target` from an empty prefix
    ///
    /// Any sequence in progress is superseded. Returns the token of the new
    /// sequence.
    pub fn start(&mut self, target: &str) -> u64 {
        self.token += 1;
        self.target = target.chars().collect();
        self.displayed.clear();
        self.position = 0;
        self.active = !self.target.is_empty();
        trace!(token = self.token, chars = self.target.len(), "typing started");
        self.token
    }

    /// Append the next character
    ///
    /// Returns `None` once the target is fully displayed or the sequence was
    /// cancelled.
    pub fn type_next(&mut self, rng: &mut RngManager) -> Option<TypedChar> {
        if !self.active {
            return None;
        }
        let ch = *self.target.get(self.position)?;
        self.displayed.push(ch);
        self.position += 1;
        if self.position >= self.target.len() {
            self.active = false;
        }
        Some(TypedChar {
            ch,
            delay_after: char_delay(ch, rng),
        })
    }

    /// Stop the live sequence where it is
    ///
    /// The displayed prefix is kept. Returns how many characters had been typed
    /// if a sequence was actually interrupted.
    pub fn cancel(&mut self) -> Option<usize> {
        self.token += 1;
        if !self.active {
            return None;
        }
        self.active = false;
        Some(self.position)
    }

    /// Replace the displayed text outright, cancelling any live sequence
    pub fn overwrite(&mut self, text: &str) -> Option<usize> {
        let interrupted = self.cancel();
        self.target = text.chars().collect();
        self.position = self.target.len();
        self.displayed = text.to_string();
        interrupted
    }

    /// Token of the live (or most recent) sequence
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Whether characters remain to be typed
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    /// Characters typed so far in the current sequence
    pub fn typed_chars(&self) -> usize {
        self.position
    }
}
