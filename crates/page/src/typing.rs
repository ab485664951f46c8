//! Looping type-then-delete word cycler for the hero headline.
//!
//! Each [`Typewriter::tick`] yields the text to display and how long to wait
//! before the next tick. A word is typed one character at a time, held once
//! complete, deleted one character at a time, and then the next word starts.

use landing_fx_core::error::FxError;
use landing_fx_core::params::{param_strings, param_usize};
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_WORDS: [&str; 8] = [
    "Network",
    "Branding",
    "Software",
    "Media production",
    "Digital Marketing",
    "Innovation",
    "Strategy",
    "Web Development",
];

const DEFAULT_TYPE_MS: u32 = 80;
const DEFAULT_DELETE_MS: u32 = 60;
const DEFAULT_HOLD_MS: u32 = 1200;

/// Delays between ticks, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTiming {
    pub type_ms: u32,
    pub delete_ms: u32,
    /// Pause after a word is fully typed.
    pub hold_ms: u32,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            type_ms: DEFAULT_TYPE_MS,
            delete_ms: DEFAULT_DELETE_MS,
            hold_ms: DEFAULT_HOLD_MS,
        }
    }
}

impl TypingTiming {
    pub fn from_json(params: &Value) -> Self {
        let ms = |name: &str, default: u32| {
            u32::try_from(param_usize(params, name, default as usize)).unwrap_or(default)
        };
        Self {
            type_ms: ms("type_ms", DEFAULT_TYPE_MS),
            delete_ms: ms("delete_ms", DEFAULT_DELETE_MS),
            hold_ms: ms("hold_ms", DEFAULT_HOLD_MS),
        }
    }
}

/// Output of one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeTick {
    pub text: String,
    pub delay_ms: u32,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    words: Vec<String>,
    timing: TypingTiming,
    word: usize,
    /// Characters currently shown.
    shown: usize,
    deleting: bool,
}

impl Typewriter {
    /// Rejects an empty list and empty words, either of which would stall
    /// the cycle.
    pub fn new(words: Vec<String>, timing: TypingTiming) -> Result<Self, FxError> {
        if words.is_empty() {
            return Err(FxError::InvalidConfig("typing word list is empty".into()));
        }
        if let Some(i) = words.iter().position(|w| w.is_empty()) {
            return Err(FxError::InvalidConfig(format!("typing word {i} is empty")));
        }
        Ok(Self {
            words,
            timing,
            word: 0,
            shown: 0,
            deleting: false,
        })
    }

    /// Reads `words` and the timing keys from a JSON params object.
    pub fn from_json(params: &Value) -> Result<Self, FxError> {
        Self::new(
            param_strings(params, "words", &DEFAULT_WORDS),
            TypingTiming::from_json(params),
        )
    }

    /// The word being typed or deleted.
    pub fn current_word(&self) -> &str {
        &self.words[self.word]
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Advances one character and returns the text to show with the delay
    /// before the next tick. Completing a word holds; emptying one moves on
    /// to the next word, wrapping around.
    pub fn tick(&mut self) -> TypeTick {
        let len = self.words[self.word].chars().count();
        if !self.deleting {
            self.shown += 1;
            let text = self.prefix(self.shown);
            if self.shown == len {
                self.deleting = true;
                return TypeTick {
                    text,
                    delay_ms: self.timing.hold_ms,
                };
            }
            TypeTick {
                text,
                delay_ms: self.timing.type_ms,
            }
        } else {
            self.shown -= 1;
            let text = self.prefix(self.shown);
            if self.shown == 0 {
                self.deleting = false;
                self.word = (self.word + 1) % self.words.len();
            }
            TypeTick {
                text,
                delay_ms: self.timing.delete_ms,
            }
        }
    }

    fn prefix(&self, chars: usize) -> String {
        self.words[self.word].chars().take(chars).collect()
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| (*w).to_owned()).collect(),
            timing: TypingTiming::default(),
            word: 0,
            shown: 0,
            deleting: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn writer(words: &[&str]) -> Typewriter {
        Typewriter::new(
            words.iter().map(|w| (*w).to_owned()).collect(),
            TypingTiming::default(),
        )
        .unwrap()
    }

    #[test]
    fn types_word_then_holds() {
        let mut w = writer(&["Net"]);
        assert_eq!(w.tick(), TypeTick { text: "N".into(), delay_ms: 80 });
        assert_eq!(w.tick(), TypeTick { text: "Ne".into(), delay_ms: 80 });
        assert_eq!(w.tick(), TypeTick { text: "Net".into(), delay_ms: 1200 });
        assert!(w.is_deleting());
    }

    #[test]
    fn deletes_then_moves_to_next_word() {
        let mut w = writer(&["ab", "cd"]);
        w.tick();
        w.tick();
        assert_eq!(w.tick(), TypeTick { text: "a".into(), delay_ms: 60 });
        assert_eq!(w.tick(), TypeTick { text: "".into(), delay_ms: 60 });
        assert_eq!(w.current_word(), "cd");
        assert_eq!(w.tick().text, "c");
    }

    #[test]
    fn wraps_back_to_first_word() {
        let mut w = writer(&["x", "y"]);
        // "x": type, delete; "y": type, delete.
        for _ in 0..4 {
            w.tick();
        }
        assert_eq!(w.current_word(), "x");
    }

    #[test]
    fn slices_by_character_not_byte() {
        let mut w = writer(&["héllo"]);
        w.tick();
        assert_eq!(w.tick().text, "hé");
    }

    #[test]
    fn default_starts_with_network() {
        let mut w = Typewriter::default();
        assert_eq!(w.current_word(), "Network");
        assert_eq!(w.tick().text, "N");
    }

    #[test]
    fn empty_word_list_is_rejected() {
        let result = Typewriter::new(Vec::new(), TypingTiming::default());
        assert!(matches!(result, Err(FxError::InvalidConfig(_))));
    }

    #[test]
    fn empty_word_is_rejected() {
        let result = Typewriter::new(vec!["ok".into(), String::new()], TypingTiming::default());
        assert!(result.is_err());
    }

    #[test]
    fn from_json_reads_words_and_timing() {
        let mut w = Typewriter::from_json(&json!({"words": ["Hi"], "type_ms": 10, "hold_ms": 5}))
            .unwrap();
        assert_eq!(w.tick().delay_ms, 10);
        assert_eq!(w.tick().delay_ms, 5);
        assert_eq!(w.tick().delay_ms, 60);
    }

    #[test]
    fn full_cycle_tick_count() {
        // Each word takes len ticks to type and len ticks to delete.
        let mut w = Typewriter::default();
        let total: usize = DEFAULT_WORDS.iter().map(|s| 2 * s.chars().count()).sum();
        for _ in 0..total {
            w.tick();
        }
        assert_eq!(w.current_word(), "Network");
        assert!(!w.is_deleting());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn text_is_always_a_prefix_of_current_or_previous_word(ticks in 0_usize..500) {
                let mut w = Typewriter::default();
                for _ in 0..ticks {
                    let before = w.current_word().to_owned();
                    let tick = w.tick();
                    prop_assert!(before.starts_with(&tick.text));
                }
            }
        }
    }
}
