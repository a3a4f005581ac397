use crate::config::{GenerationConfig, DEFAULT_SENTENCES};
use crate::error::GenerationError;
use crate::session::split_lines;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

/// Language of generated practice sentences
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    Korean,
    English,
}

impl Language {
    /// Prompt asking for `count` practice sentences, one per line
    pub fn prompt(&self, count: usize) -> String {
        match self {
            Language::Korean => format!(
                "타자 연습에 쓸 자연스러운 한국어 문장을 {count}개 만들어 주세요. \
                 한 줄에 한 문장씩, 번호나 따옴표 없이 문장만 적어 주세요."
            ),
            Language::English => format!(
                "Write {count} natural English sentences for typing practice. \
                 Put one sentence per line with no numbering or quotes."
            ),
        }
    }
}

/// Produces practice sentences on demand
pub trait SentenceGenerator {
    fn generate(&self, language: Language, count: usize) -> Result<Vec<String>, GenerationError>;
}

/// Generate a set, falling back to the built-in sentences on any failure
pub fn generate_or_default<G: SentenceGenerator + ?Sized>(
    generator: &G,
    language: Language,
    count: usize,
) -> Vec<String> {
    match generator.generate(language, count) {
        Ok(sentences) if !sentences.is_empty() => sentences,
        Ok(_) => {
            warn!(%language, "generator returned no sentences, using defaults");
            default_sentences()
        }
        Err(e) => {
            warn!(%language, error = %e, "sentence generation failed, using defaults");
            default_sentences()
        }
    }
}

pub fn default_sentences() -> Vec<String> {
    split_lines(DEFAULT_SENTENCES)
}

#[derive(Clone, Debug)]
pub struct ChatCompletionsConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatCompletionsConfig {
    /// Read credentials from `TADAK_AI_API_KEY`, `TADAK_AI_BASE_URL` and
    /// `TADAK_AI_MODEL`. Returns `None` without an API key.
    #[must_use]
    pub fn from_env(generation: &GenerationConfig) -> Option<Self> {
        let api_key = env::var("TADAK_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("TADAK_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("TADAK_AI_MODEL").unwrap_or_else(|_| generation.model.clone());
        Some(Self {
            base_url,
            api_key,
            model,
            temperature: generation.temperature,
            max_tokens: generation.max_tokens,
        })
    }
}

/// Generator backed by an OpenAI-compatible chat completions endpoint
#[derive(Clone, Debug)]
pub struct ChatCompletionsGenerator {
    config: Option<ChatCompletionsConfig>,
    timeout: Duration,
}

impl ChatCompletionsGenerator {
    #[must_use]
    pub fn new(config: Option<ChatCompletionsConfig>, timeout: Duration) -> Self {
        Self { config, timeout }
    }

    #[must_use]
    pub fn from_env(generation: &GenerationConfig, timeout: Duration) -> Self {
        Self::new(ChatCompletionsConfig::from_env(generation), timeout)
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

impl SentenceGenerator for ChatCompletionsGenerator {
    fn generate(&self, language: Language, count: usize) -> Result<Vec<String>, GenerationError> {
        let config = self.config.as_ref().ok_or(GenerationError::Disabled)?;

        let url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: language.prompt(count),
            }],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        debug!(%language, count, model = %config.model, "requesting sentences");
        let client = Client::builder().timeout(self.timeout).build()?;
        let response = client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json()?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyResponse)?;

        let sentences = split_lines(&content);
        if sentences.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(sentences)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
