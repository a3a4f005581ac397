use crate::app_dirs::AppDirs;
use crate::generator::Language;
use crate::session::InputMethod;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Built-in practice text used when nothing else is available
pub const DEFAULT_SENTENCES: &str = "수고했어 오늘도 좋은 하루 보내세요
타이핑 연습을 시작해 보겠습니다
하나 둘 셋 넷 다섯 여섯 일곱
오늘 날씨가 참 좋네요";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub sentences_per_set: usize,
    pub default_language: Language,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 200,
            sentences_per_set: 5,
            default_language: Language::Korean,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    pub default_start_line: usize,
    pub min_sentences: usize,
    pub max_sentences: usize,
    pub default_sentences: usize,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            default_start_line: 0,
            min_sentences: 1,
            max_sentences: 50,
            default_sentences: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("tadak/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub input_method: InputMethod,
    pub generation: GenerationConfig,
    pub file: FileConfig,
    pub fetch: FetchConfig,
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn test_save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nested").join("config.json"));
        let cfg = Config {
            input_method: InputMethod::Generated,
            generation: GenerationConfig {
                model: "gpt-4o-mini".into(),
                temperature: 0.2,
                max_tokens: 120,
                sentences_per_set: 3,
                default_language: Language::English,
            },
            file: FileConfig {
                default_start_line: 4,
                min_sentences: 2,
                max_sentences: 20,
                default_sentences: 5,
            },
            fetch: FetchConfig {
                timeout_secs: 3,
                user_agent: "custom-agent".into(),
            },
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "input_method": "file-upload", "fetch": { "timeout_secs": 2 } }"#)
            .unwrap();
        let cfg = FileConfigStore::with_path(&path).load();

        assert_eq!(cfg.input_method, InputMethod::FileUpload);
        assert_eq!(cfg.fetch.timeout(), Duration::from_secs(2));
        assert_eq!(cfg.fetch.user_agent, FetchConfig::default().user_agent);
        assert_eq!(cfg.generation, GenerationConfig::default());
    }

    #[test]
    fn test_default_sentences_have_four_lines() {
        assert_eq!(DEFAULT_SENTENCES.lines().count(), 4);
    }
}
