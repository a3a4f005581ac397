use clap::{ArgGroup, Parser};
use std::{
    error::Error,
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};
use tadak::{
    config::{Config, ConfigStore, FileConfigStore, DEFAULT_SENTENCES},
    extract::{is_url, ContentExtractor, PageFetcher},
    generator::{ChatCompletionsGenerator, Language, SentenceGenerator},
    logging::init_logging,
    practice::{refill_if_complete, start_practice, SentenceSource},
    InputMethod, PracticeError, SessionManager,
};
use tracing::debug;

/// typing practice with word-level scoring and Korean-aware keystroke counting
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type each sentence shown and press enter. Sentences come from pasted text, a web page, a text file, or a language model. Statistics are printed as JSON when input ends."
)]
#[clap(group(ArgGroup::new("source").args(["text", "url", "file", "generate"])))]
pub struct Cli {
    /// practice text, one sentence per line (a bare URL is scraped)
    #[clap(short = 't', long)]
    text: Option<String>,

    /// web page to pull practice sentences from
    #[clap(short = 'u', long)]
    url: Option<String>,

    /// text file to practise line by line
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// first file line to practise (0-based)
    #[clap(long, requires = "file")]
    start: Option<usize>,

    /// number of file lines to practise
    #[clap(long, requires = "file")]
    count: Option<usize>,

    /// generate sentences in this language
    #[clap(short = 'g', long, value_enum)]
    generate: Option<Language>,

    /// path to a JSON config file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// raise log verbosity (-v warn, -vv info, -vvv debug)
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Resolve the arguments to a sentence source
    fn to_source(&self, config: &Config) -> Result<SentenceSource, Box<dyn Error>> {
        if let Some(ref url) = self.url {
            if !is_url(url) {
                return Err(format!("not an http(s) URL: {url}").into());
            }
            return Ok(SentenceSource::Manual { text: url.clone() });
        }

        if let Some(ref path) = self.file {
            let text = fs::read_to_string(path)?;
            return Ok(SentenceSource::FileUpload {
                text,
                start_line: self.start.unwrap_or(config.file.default_start_line),
                count: self.count.unwrap_or(config.file.default_sentences),
            });
        }

        if let Some(language) = self.generate {
            return Ok(SentenceSource::Generated { language });
        }

        if let Some(ref text) = self.text {
            return Ok(SentenceSource::Manual { text: text.clone() });
        }

        // No source flag: the configured input method decides
        match config.input_method {
            InputMethod::Generated => Ok(SentenceSource::Generated {
                language: config.generation.default_language,
            }),
            InputMethod::Manual | InputMethod::FileUpload => Ok(SentenceSource::Manual {
                text: DEFAULT_SENTENCES.to_string(),
            }),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let store = cli
        .config
        .as_ref()
        .map_or_else(FileConfigStore::new, FileConfigStore::with_path);
    let config = store.load();
    debug!(path = %store.path().display(), "configuration loaded");

    let source = cli.to_source(&config)?;
    let language = match source {
        SentenceSource::Generated { language } => language,
        _ => config.generation.default_language,
    };

    let mut manager = SessionManager::with_extractor(ContentExtractor::with_http(&config.fetch));
    let generator = ChatCompletionsGenerator::from_env(&config.generation, config.fetch.timeout());

    match start_practice(&mut manager, &source, &generator, &config) {
        Ok(_) => {}
        Err(PracticeError::NoText) => {
            eprintln!("warning: no text to practise");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run(
        &mut manager,
        &generator,
        language,
        config.generation.sentences_per_set,
        stdin.lock(),
        &mut stdout,
    )
}

/// Prompt for each sentence and score the typed lines until input ends
fn run<F, G, R, W>(
    manager: &mut SessionManager<F>,
    generator: &G,
    language: Language,
    set_size: usize,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn Error>>
where
    F: PageFetcher,
    G: SentenceGenerator,
    R: BufRead,
    W: Write,
{
    prompt(manager, out)?;

    for line in input.lines() {
        let line = line?;
        if manager.handle_input(&line) {
            refill_if_complete(manager, generator, language, set_size)?;
            let stats = manager.stats.to_summary();
            writeln!(
                out,
                "  accuracy {:.1}%  wpm {:.1}  cpm {:.1}",
                stats.accuracy, stats.wpm, stats.cpm
            )?;
        }
        prompt(manager, out)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&manager.stats.to_summary())?)?;
    Ok(())
}

fn prompt<F: PageFetcher, W: Write>(manager: &SessionManager<F>, out: &mut W) -> io::Result<()> {
    let progress = manager.get_progress();
    writeln!(
        out,
        "[{}/{} | done {}] {}",
        progress.current_index,
        progress.total_sentences,
        progress.completed_sentences,
        manager.get_current_sentence()
    )?;
    out.flush()
}
