use crate::{
    config::{Config, FileConfig},
    error::PracticeError,
    extract::PageFetcher,
    generator::{generate_or_default, Language, SentenceGenerator},
    session::{InputMethod, SessionManager, SessionState},
};
use tracing::info;

/// What a practice run should be built from
#[derive(Debug, Clone, PartialEq)]
pub enum SentenceSource {
    /// Pasted text, one sentence per line, or a single URL
    Manual { text: String },
    /// A fresh batch from the sentence generator
    Generated { language: Language },
    /// A window of lines from an uploaded file
    FileUpload {
        text: String,
        start_line: usize,
        count: usize,
    },
}

impl SentenceSource {
    pub fn input_method(&self) -> InputMethod {
        match self {
            SentenceSource::Manual { .. } => InputMethod::Manual,
            SentenceSource::Generated { .. } => InputMethod::Generated,
            SentenceSource::FileUpload { .. } => InputMethod::FileUpload,
        }
    }
}

/// Lines `start_line..start_line + count` of `lines`.
///
/// `start_line` is clamped to the number of lines and `count` to the
/// configured sentence range.
pub fn select_file_window(lines: &[String], start_line: usize, count: usize, file: &FileConfig) -> Vec<String> {
    let start = start_line.min(lines.len());
    let count = count.clamp(file.min_sentences, file.max_sentences.max(file.min_sentences));
    let end = start.saturating_add(count).min(lines.len());
    lines[start..end].to_vec()
}

/// Reset `manager` and load a new sentence set from `source`.
///
/// Returns the number of sentences loaded. Text with no usable lines gives
/// [`PracticeError::NoText`]; URL extraction failures propagate.
pub fn start_practice<F, G>(
    manager: &mut SessionManager<F>,
    source: &SentenceSource,
    generator: &G,
    config: &Config,
) -> Result<usize, PracticeError>
where
    F: PageFetcher,
    G: SentenceGenerator + ?Sized,
{
    manager.reset_all();
    manager.set_input_method(source.input_method());

    let sentences = match source {
        SentenceSource::Manual { text } => manager.process_input_text(text)?,
        SentenceSource::Generated { language } => {
            generate_or_default(generator, *language, config.generation.sentences_per_set)
        }
        SentenceSource::FileUpload {
            text,
            start_line,
            count,
        } => {
            let lines = manager.process_input_text(text)?;
            select_file_window(&lines, *start_line, *count, &config.file)
        }
    };

    if sentences.is_empty() {
        return Err(PracticeError::NoText);
    }

    let loaded = sentences.len();
    manager.load_sentences(sentences)?;
    info!(method = %source.input_method(), loaded, "practice started");
    Ok(loaded)
}

/// Load the next generated batch once the current one is finished.
///
/// Returns whether a new set was loaded.
pub fn refill_if_complete<F, G>(
    manager: &mut SessionManager<F>,
    generator: &G,
    language: Language,
    count: usize,
) -> Result<bool, PracticeError>
where
    F: PageFetcher,
    G: SentenceGenerator + ?Sized,
{
    if manager.state() != SessionState::SetComplete {
        return Ok(false);
    }
    let sentences = generate_or_default(generator, language, count);
    manager.load_sentences(sentences)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::extract::{ContentExtractor, StaticPageFetcher};
    use crate::generator::default_sentences;
    use assert_matches::assert_matches;
    use std::cell::Cell;

    struct Numbered {
        calls: Cell<usize>,
    }

    impl Numbered {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl SentenceGenerator for Numbered {
        fn generate(&self, _: Language, count: usize) -> Result<Vec<String>, GenerationError> {
            let batch = self.calls.get();
            self.calls.set(batch + 1);
            Ok((0..count).map(|i| format!("batch {batch} line {i}")).collect())
        }
    }

    struct Unavailable;

    impl SentenceGenerator for Unavailable {
        fn generate(&self, _: Language, _: usize) -> Result<Vec<String>, GenerationError> {
            Err(GenerationError::Disabled)
        }
    }

    fn manager() -> SessionManager<StaticPageFetcher> {
        SessionManager::with_extractor(ContentExtractor::new(StaticPageFetcher::new()))
    }

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn test_file_window() {
        let file = FileConfig::default();
        assert_eq!(select_file_window(&lines(20), 3, 2, &file), vec!["line 3", "line 4"]);
    }

    #[test]
    fn test_file_window_clamps_start() {
        let file = FileConfig::default();
        assert!(select_file_window(&lines(5), 99, 3, &file).is_empty());
        assert_eq!(select_file_window(&lines(5), 4, 3, &file), vec!["line 4"]);
    }

    #[test]
    fn test_file_window_clamps_count() {
        let file = FileConfig::default();
        assert_eq!(select_file_window(&lines(5), 0, 0, &file).len(), 1);
        assert_eq!(select_file_window(&lines(80), 0, 500, &file).len(), 50);
    }

    #[test]
    fn test_start_manual() {
        let mut m = manager();
        let source = SentenceSource::Manual {
            text: "one two\n\nthree four\n".into(),
        };
        let loaded = start_practice(&mut m, &source, &Unavailable, &Config::default()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(m.current_input_method, InputMethod::Manual);
        assert_eq!(m.get_current_sentence(), "one two");
    }

    #[test]
    fn test_start_manual_blank_is_no_text() {
        let mut m = manager();
        let source = SentenceSource::Manual { text: "  \n ".into() };
        assert_matches!(
            start_practice(&mut m, &source, &Unavailable, &Config::default()),
            Err(PracticeError::NoText)
        );
        assert_eq!(m.state(), SessionState::Empty);
    }

    #[test]
    fn test_start_resets_previous_run() {
        let mut m = manager();
        let config = Config::default();
        let first = SentenceSource::Manual { text: "alpha beta".into() };
        start_practice(&mut m, &first, &Unavailable, &config).unwrap();
        m.handle_input("alpha beta");
        assert_eq!(m.total_sentences_completed, 1);

        let second = SentenceSource::Manual { text: "gamma delta".into() };
        start_practice(&mut m, &second, &Unavailable, &config).unwrap();
        assert_eq!(m.total_sentences_completed, 0);
        assert_eq!(m.stats.word_stats.total, 0);
    }

    #[test]
    fn test_start_generated_uses_set_size() {
        let mut m = manager();
        let source = SentenceSource::Generated {
            language: Language::English,
        };
        let loaded = start_practice(&mut m, &source, &Numbered::new(), &Config::default()).unwrap();

        assert_eq!(loaded, 5);
        assert_eq!(m.current_input_method, InputMethod::Generated);
        assert_eq!(m.get_current_sentence(), "batch 0 line 0");
    }

    #[test]
    fn test_start_generated_falls_back() {
        let mut m = manager();
        let source = SentenceSource::Generated {
            language: Language::Korean,
        };
        start_practice(&mut m, &source, &Unavailable, &Config::default()).unwrap();
        assert_eq!(m.current_sentences, default_sentences());
    }

    #[test]
    fn test_start_file_upload() {
        let mut m = manager();
        let source = SentenceSource::FileUpload {
            text: "a one\nb two\n\nc three\nd four\n".into(),
            start_line: 1,
            count: 2,
        };
        let loaded = start_practice(&mut m, &source, &Unavailable, &Config::default()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(m.current_sentences, vec!["b two", "c three"]);
        assert_eq!(m.current_input_method, InputMethod::FileUpload);
    }

    #[test]
    fn test_start_file_upload_past_end_is_no_text() {
        let mut m = manager();
        let source = SentenceSource::FileUpload {
            text: "only line".into(),
            start_line: 10,
            count: 5,
        };
        assert_matches!(
            start_practice(&mut m, &source, &Unavailable, &Config::default()),
            Err(PracticeError::NoText)
        );
    }

    #[test]
    fn test_start_manual_url_failure_propagates() {
        let fetcher = StaticPageFetcher::new().with_status("https://example.com/gone", 410);
        let mut m = SessionManager::with_extractor(ContentExtractor::new(fetcher));
        let source = SentenceSource::Manual {
            text: "https://example.com/gone".into(),
        };
        assert_matches!(
            start_practice(&mut m, &source, &Unavailable, &Config::default()),
            Err(PracticeError::Session(_))
        );
    }

    #[test]
    fn test_refill_after_generated_set() {
        let mut m = manager();
        let generator = Numbered::new();
        let mut config = Config::default();
        config.generation.sentences_per_set = 2;
        let source = SentenceSource::Generated {
            language: Language::English,
        };
        start_practice(&mut m, &source, &generator, &config).unwrap();

        assert!(!refill_if_complete(&mut m, &generator, Language::English, 2).unwrap());

        m.handle_input("batch 0 line 0");
        m.handle_input("batch 0 line 1");
        assert_eq!(m.state(), SessionState::SetComplete);

        assert!(refill_if_complete(&mut m, &generator, Language::English, 2).unwrap());
        assert_eq!(m.get_current_sentence(), "batch 1 line 0");
        assert_eq!(m.total_sentences_completed, 2);
        assert_eq!(m.stats.word_stats.correct, 8);
    }
}
