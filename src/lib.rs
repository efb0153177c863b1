//! Word Forge - wordlist generation for authorized password auditing
//!
//! Builds candidate lists from personal keywords, exhaustive charset
//! enumeration, a mix of both, or secure random sampling, and streams them
//! to any writer one line at a time.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod generate;
pub mod profile;
pub mod sink;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, Preset};
pub use error::{Result, WordForgeError};
pub use generate::{
    estimate, Alphabet, CapacityWarning, CharClass, CharsetEnumerator, KeywordMutator, RandomSampler,
};
pub use profile::TargetProfile;
pub use types::{
    AffixSet, GenerationMode, GenerationRequest, LengthPolicy, LengthRange, RunSummary, Stage,
    StageSummary,
};

// Re-export main functionality
pub use engine::{EngineConfig, Orchestrator, Progress, RunPlan};
pub use sink::{write_capped, write_unique, LineWriter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
