use crate::error::SessionError;
use crate::extract::{is_url, ContentExtractor, HttpPageFetcher, PageFetcher};
use crate::stats::TypingStats;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Where the active sentence set came from
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InputMethod {
    /// Typed or pasted text, or a URL to scrape
    #[default]
    Manual,
    /// Sentences produced by a language model, refilled set by set
    Generated,
    /// Lines from an uploaded text file
    FileUpload,
}

/// Coarse state of a [`SessionManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No sentences loaded
    Empty,
    /// Sentences loaded, practice in progress
    Active,
    /// A generated set was finished; a new set must be loaded
    SetComplete,
}

/// Position report for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based position within the current set
    pub current_index: usize,
    pub total_sentences: usize,
    pub completed_sentences: usize,
}

/// Split raw text into trimmed, non-blank lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Owns the active sentence set, the position within it and the session statistics
#[derive(Debug)]
pub struct SessionManager<F: PageFetcher = HttpPageFetcher> {
    pub current_sentences: Vec<String>,
    pub current_index: usize,
    /// Bumped on every advance so the UI can mount a fresh input widget
    pub input_key: usize,
    /// Sentences finished across every set, including earlier generated batches
    pub total_sentences_completed: usize,
    pub current_input_method: InputMethod,
    pub stats: TypingStats,
    awaiting_reload: bool,
    extractor: ContentExtractor<F>,
}

impl SessionManager<HttpPageFetcher> {
    pub fn new() -> Self {
        Self::with_extractor(ContentExtractor::default())
    }
}

impl Default for SessionManager<HttpPageFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PageFetcher> SessionManager<F> {
    pub fn with_extractor(extractor: ContentExtractor<F>) -> Self {
        Self {
            current_sentences: Vec::new(),
            current_index: 0,
            input_key: 0,
            total_sentences_completed: 0,
            current_input_method: InputMethod::default(),
            stats: TypingStats::new(),
            awaiting_reload: false,
            extractor,
        }
    }

    /// Replace the active set and rewind to its first sentence.
    ///
    /// Statistics and the completed-sentence count carry over.
    pub fn load_sentences(&mut self, sentences: Vec<String>) -> Result<(), SessionError> {
        if sentences.is_empty() {
            return Err(SessionError::EmptySentences);
        }

        info!(
            count = sentences.len(),
            method = %self.current_input_method,
            "loaded sentence set"
        );
        self.current_sentences = sentences;
        self.current_index = 0;
        self.input_key = 0;
        self.awaiting_reload = false;
        Ok(())
    }

    /// The sentence to type next, or "" when nothing is loaded
    pub fn get_current_sentence(&self) -> &str {
        self.current_sentences
            .get(self.current_index)
            .map_or("", String::as_str)
    }

    /// Score one submitted line against the current sentence and advance.
    ///
    /// Returns `false` without touching any state when `text` is empty or no
    /// sentences are loaded.
    pub fn handle_input(&mut self, text: &str) -> bool {
        if text.is_empty() || self.current_sentences.is_empty() {
            return false;
        }

        let input_words: Vec<&str> = text.split_whitespace().collect();
        let target = self
            .current_sentences
            .get(self.current_index)
            .map_or("", String::as_str);
        let target_words: Vec<&str> = target.split_whitespace().collect();
        self.stats.update(&input_words, &target_words);
        trace!(
            index = self.current_index,
            correct = self.stats.word_stats.correct,
            total = self.stats.word_stats.total,
            "scored input"
        );

        self.move_to_next()
    }

    /// Advance to the next sentence.
    ///
    /// At the end of a set the set length is added to
    /// `total_sentences_completed`. Generated sets then stay on their last
    /// sentence until [`load_sentences`](Self::load_sentences) supplies a new
    /// batch; every other input method loops back to the first sentence.
    pub fn move_to_next(&mut self) -> bool {
        if self.current_sentences.is_empty() {
            return false;
        }

        self.input_key += 1;
        let next_index = self.current_index + 1;

        if next_index >= self.current_sentences.len() {
            self.total_sentences_completed += self.current_sentences.len();
            if self.current_input_method == InputMethod::Generated {
                self.awaiting_reload = true;
                debug!(
                    completed = self.total_sentences_completed,
                    "generated set finished, awaiting reload"
                );
            } else {
                self.current_index = 0;
                debug!(
                    completed = self.total_sentences_completed,
                    "set finished, looping"
                );
            }
        } else {
            self.current_index = next_index;
        }

        true
    }

    pub fn get_progress(&self) -> Progress {
        Progress {
            current_index: self.current_index + 1,
            total_sentences: self.current_sentences.len(),
            completed_sentences: self.total_sentences_completed,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.current_sentences.is_empty() {
            SessionState::Empty
        } else if self.awaiting_reload {
            SessionState::SetComplete
        } else {
            SessionState::Active
        }
    }

    /// Turn raw input into a sentence list.
    ///
    /// A bare URL is replaced by the text extracted from that page first.
    /// The result is every non-blank line, trimmed, in order.
    pub fn process_input_text(&self, text: &str) -> Result<Vec<String>, SessionError> {
        if is_url(text) {
            info!(url = text, "input is a URL, extracting page text");
            let extracted = self.extractor.extract_text_from_url(text)?;
            return Ok(split_lines(&extracted));
        }
        Ok(split_lines(text))
    }

    pub fn set_input_method(&mut self, method: InputMethod) {
        self.current_input_method = method;
    }

    /// Rewind to the start of the current set
    pub fn reset_session(&mut self) {
        self.current_index = 0;
        self.input_key = 0;
        self.awaiting_reload = false;
    }

    /// Drop the sentence set, statistics and all counters
    pub fn reset_all(&mut self) {
        self.reset_session();
        self.current_sentences.clear();
        self.total_sentences_completed = 0;
        self.stats.reset();
    }
}
