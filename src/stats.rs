use crate::util::{per_minute, percentage, round1};
use serde::{Deserialize, Serialize};
use std::time::Instant;

const HANGUL_SYLLABLE_FIRST: u32 = 0xAC00;
const HANGUL_SYLLABLE_LAST: u32 = 0xD7A3;
const HANGUL_FINAL_CONSONANTS: u32 = 28;

/// Word-level correctness tally for the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordStats {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
}

impl WordStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare typed words against the target position by position.
    ///
    /// Target words with no typed counterpart count as incorrect. Typed words
    /// past the end of the target are ignored, so `correct + incorrect`
    /// always equals `total`.
    pub fn update<S: AsRef<str>, T: AsRef<str>>(&mut self, input_words: &[S], target_words: &[T]) {
        for (i, target) in target_words.iter().enumerate() {
            match input_words.get(i) {
                Some(word) if word.as_ref() == target.as_ref() => self.correct += 1,
                _ => self.incorrect += 1,
            }
        }
        self.total += target_words.len();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Percentage of correct words, one decimal, 0.0 before any update
    pub fn accuracy(&self) -> f64 {
        percentage(self.correct, self.total).map_or(0.0, round1)
    }
}

/// Flat view of the session statistics handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_words: usize,
    pub correct_words: usize,
    pub incorrect_words: usize,
    pub wpm: f64,
    pub cpm: f64,
    pub accuracy: f64,
}

/// Timing and keystroke accounting for a typing session
#[derive(Debug, Clone)]
pub struct TypingStats {
    pub word_stats: WordStats,
    pub elapsed_times: Vec<f64>,
    pub total_keystrokes: usize,
    started_at: Instant,
}

impl Default for TypingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TypingStats {
    pub fn new() -> Self {
        Self {
            word_stats: WordStats::new(),
            elapsed_times: Vec::new(),
            total_keystrokes: 0,
            started_at: Instant::now(),
        }
    }

    /// Record one submitted sentence.
    ///
    /// The time since the previous submission (or since construction) is
    /// appended to `elapsed_times` and the clock restarts for the next one.
    pub fn update<S: AsRef<str>, T: AsRef<str>>(&mut self, input_words: &[S], target_words: &[T]) {
        let now = Instant::now();
        self.elapsed_times
            .push(now.duration_since(self.started_at).as_secs_f64());
        self.started_at = now;

        self.word_stats.update(input_words, target_words);
        self.total_keystrokes += input_words
            .iter()
            .map(|w| Self::count_keystrokes(w.as_ref()))
            .sum::<usize>();
    }

    /// Estimate physical keypresses needed to type `text`.
    ///
    /// A Hangul syllable is typed as initial consonant + vowel, plus a final
    /// consonant when it has one. Everything else, including standalone
    /// jamo, is a single keypress.
    pub fn count_keystrokes(text: &str) -> usize {
        text.chars()
            .map(|c| {
                let code = c as u32;
                if (HANGUL_SYLLABLE_FIRST..=HANGUL_SYLLABLE_LAST).contains(&code) {
                    if (code - HANGUL_SYLLABLE_FIRST) % HANGUL_FINAL_CONSONANTS != 0 {
                        3
                    } else {
                        2
                    }
                } else {
                    1
                }
            })
            .sum()
    }

    fn total_elapsed_secs(&self) -> f64 {
        self.elapsed_times.iter().sum()
    }

    /// Target words per minute across all submissions
    pub fn get_wpm(&self) -> f64 {
        per_minute(self.word_stats.total, self.total_elapsed_secs()).map_or(0.0, round1)
    }

    /// Keystrokes per minute across all submissions
    pub fn get_cpm(&self) -> f64 {
        per_minute(self.total_keystrokes, self.total_elapsed_secs()).map_or(0.0, round1)
    }

    pub fn to_summary(&self) -> StatsSummary {
        StatsSummary {
            total_words: self.word_stats.total,
            correct_words: self.word_stats.correct,
            incorrect_words: self.word_stats.incorrect,
            wpm: self.get_wpm(),
            cpm: self.get_cpm(),
            accuracy: self.word_stats.accuracy(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
