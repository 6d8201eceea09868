//! Typing-effect animator for the hero role line.

use std::time::Duration;

pub const TYPE_INTERVAL: Duration = Duration::from_millis(100);
pub const HOLD_FULL: Duration = Duration::from_millis(1000);
pub const DELETE_INTERVAL: Duration = Duration::from_millis(50);
pub const HOLD_EMPTY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Typing,
    HoldingFull,
    Deleting,
    HoldingEmpty,
}

impl Stage {
    const fn step(self) -> Duration {
        match self {
            Stage::Typing => TYPE_INTERVAL,
            Stage::HoldingFull => HOLD_FULL,
            Stage::Deleting => DELETE_INTERVAL,
            Stage::HoldingEmpty => HOLD_EMPTY,
        }
    }
}

/// Cycles through words: type, hold, delete, hold, next word.
///
/// Driven by frame deltas; owns no timers.
#[derive(Debug, Clone)]
pub struct Typewriter {
    words: Vec<Vec<char>>,
    word: usize,
    shown: usize,
    stage: Stage,
    pending: Duration,
    text: String,
}

impl Typewriter {
    #[must_use]
    pub fn new(words: &[String]) -> Self {
        let words: Vec<Vec<char>> = words
            .iter()
            .map(|w| w.trim().chars().collect::<Vec<_>>())
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            words,
            word: 0,
            shown: 0,
            stage: Stage::Typing,
            pending: Duration::ZERO,
            text: String::new(),
        }
    }

    /// Currently visible prefix of the active word.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Full text of the active word.
    #[must_use]
    pub fn current_word(&self) -> String {
        self.words
            .get(self.word)
            .map(|w| w.iter().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn advance(&mut self, delta: Duration) {
        if self.words.is_empty() {
            return;
        }
        self.pending = self.pending.saturating_add(delta);
        let mut changed = false;
        while self.pending >= self.stage.step() {
            self.pending -= self.stage.step();
            self.step();
            changed = true;
        }
        if changed {
            self.text = self.words[self.word][..self.shown].iter().collect();
        }
    }

    fn step(&mut self) {
        let len = self.words[self.word].len();
        match self.stage {
            Stage::Typing => {
                self.shown = (self.shown + 1).min(len);
                if self.shown == len {
                    self.stage = Stage::HoldingFull;
                }
            }
            Stage::HoldingFull => self.stage = Stage::Deleting,
            Stage::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.stage = Stage::HoldingEmpty;
                }
            }
            Stage::HoldingEmpty => {
                self.word = (self.word + 1) % self.words.len();
                self.stage = Stage::Typing;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn types_one_char_per_interval() {
        let mut tw = Typewriter::new(&words(&["Rust", "Go"]));
        assert_eq!(tw.text(), "");
        tw.advance(Duration::from_millis(99));
        assert_eq!(tw.text(), "");
        tw.advance(Duration::from_millis(1));
        assert_eq!(tw.text(), "R");
        tw.advance(TYPE_INTERVAL * 3);
        assert_eq!(tw.text(), "Rust");
    }

    #[test]
    fn holds_then_deletes_then_advances() {
        let mut tw = Typewriter::new(&words(&["ab", "xyz"]));
        tw.advance(TYPE_INTERVAL * 2);
        assert_eq!(tw.text(), "ab");

        tw.advance(HOLD_FULL - Duration::from_millis(1));
        assert_eq!(tw.text(), "ab");
        tw.advance(Duration::from_millis(1));
        tw.advance(DELETE_INTERVAL);
        assert_eq!(tw.text(), "a");
        tw.advance(DELETE_INTERVAL);
        assert_eq!(tw.text(), "");

        tw.advance(HOLD_EMPTY);
        assert_eq!(tw.current_word(), "xyz");
        tw.advance(TYPE_INTERVAL);
        assert_eq!(tw.text(), "x");
    }

    #[test]
    fn full_word_stays_visible_for_hold_plus_one_delete_step() {
        let mut tw = Typewriter::new(&words(&["ab", "xyz"]));
        let at = |tw: &mut Typewriter, elapsed: &mut u64, ms: u64| {
            tw.advance(Duration::from_millis(ms - *elapsed));
            *elapsed = ms;
            tw.text().to_string()
        };
        let mut elapsed = 0;
        assert_eq!(at(&mut tw, &mut elapsed, 199), "a");
        assert_eq!(at(&mut tw, &mut elapsed, 200), "ab");
        assert_eq!(at(&mut tw, &mut elapsed, 1249), "ab");
        assert_eq!(at(&mut tw, &mut elapsed, 1250), "a");
        assert_eq!(at(&mut tw, &mut elapsed, 1300), "");
        assert_eq!(at(&mut tw, &mut elapsed, 1599), "");
        assert_eq!(at(&mut tw, &mut elapsed, 1600), "x");
    }

    #[test]
    fn wraps_to_first_word() {
        let mut tw = Typewriter::new(&words(&["a", "b"]));
        let cycle = TYPE_INTERVAL + HOLD_FULL + DELETE_INTERVAL + HOLD_EMPTY;
        tw.advance(cycle * 2);
        assert_eq!(tw.current_word(), "a");
    }

    #[test]
    fn large_delta_catches_up() {
        let mut tw = Typewriter::new(&words(&["hello"]));
        tw.advance(Duration::from_secs(1));
        assert_eq!(tw.text(), "hello");
    }

    #[test]
    fn empty_word_list_is_inert() {
        let mut tw = Typewriter::new(&words(&["", "  "]));
        assert!(tw.is_empty());
        tw.advance(Duration::from_secs(10));
        assert_eq!(tw.text(), "");
        assert_eq!(tw.current_word(), "");
    }

    #[test]
    fn multibyte_words_slice_on_chars() {
        let mut tw = Typewriter::new(&words(&["héllo"]));
        tw.advance(TYPE_INTERVAL * 2);
        assert_eq!(tw.text(), "hé");
    }
}
