// Library surface for the driver binary and integration tests.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod logging;
pub mod practice;
pub mod session;
pub mod stats;
pub mod util;

pub use error::{ExtractionError, GenerationError, PracticeError, SessionError};
pub use session::{InputMethod, Progress, SessionManager, SessionState};
pub use stats::{StatsSummary, TypingStats, WordStats};
