//! Runtime configuration from the environment and stored presets

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, DEFAULT_WARN_BYTES};
use crate::error::{Result, WordForgeError};
use crate::profile::TargetProfile;
use crate::sink::DEFAULT_FLUSH_INTERVAL;
use crate::types::GenerationRequest;
use crate::config_error;

pub const ENV_OUTPUT_DIR: &str = "WORDFORGE_OUTPUT_DIR";
pub const ENV_FLUSH_INTERVAL: &str = "WORDFORGE_FLUSH_INTERVAL";
pub const ENV_WARN_BYTES: &str = "WORDFORGE_WARN_BYTES";
pub const ENV_LOG: &str = "WORDFORGE_LOG";

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory interactive runs write into
    pub output_dir: PathBuf,
    pub flush_interval: u64,
    /// Capacity warning threshold in bytes, 0 disables the warning
    pub warn_bytes: u64,
    /// Tracing filter directive, `None` leaves the binary default
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            warn_bytes: DEFAULT_WARN_BYTES,
            log_filter: None,
        }
    }
}

impl AppConfig {
    /// Read `WORDFORGE_*` variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let flush_interval = match get(ENV_FLUSH_INTERVAL) {
            Some(raw) => parse_number::<u64>(ENV_FLUSH_INTERVAL, &raw)?,
            None => defaults.flush_interval,
        };
        if flush_interval == 0 {
            return Err(config_error!("{} must be at least 1", ENV_FLUSH_INTERVAL));
        }

        let warn_bytes = match get(ENV_WARN_BYTES) {
            Some(raw) => parse_number::<u64>(ENV_WARN_BYTES, &raw)?,
            None => defaults.warn_bytes,
        };

        Ok(Self {
            output_dir: get(ENV_OUTPUT_DIR).map(PathBuf::from).unwrap_or(defaults.output_dir),
            flush_interval,
            warn_bytes,
            log_filter: get(ENV_LOG),
        })
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            capacity_threshold_bytes: self.warn_bytes,
        }
    }

    /// Resolve an output file name against the output directory
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        let path = Path::new(file_name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output_dir.join(path)
        }
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse::<T>()
        .map_err(|_| config_error!("{} must be a non-negative integer, got '{}'", key, raw))
}

/// Stored run: a request plus where to write it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(flatten)]
    pub request: GenerationRequest,
    /// Optional profile whose keywords and affixes are appended to the request
    #[serde(default)]
    pub profile: Option<TargetProfile>,
    pub output: PathBuf,
}

impl Preset {
    /// Load a preset from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error!("Cannot read preset {}: {}", path.display(), e))?;

        let preset: Preset = serde_json::from_str(&content).map_err(|e| {
            WordForgeError::parse(format!("Invalid preset {}: {}", path.display(), e), Some(content.clone()))
        })?;

        tracing::debug!(path = %path.display(), mode = %preset.request.mode, "Preset loaded");
        Ok(preset)
    }

    /// Final request with the profile merged in
    pub fn resolve(&self) -> Result<GenerationRequest> {
        let mut request = self.request.clone();
        if let Some(profile) = &self.profile {
            let affixes = profile.affixes()?;
            request.keywords.extend(profile.keywords());
            request.numbers.extend(affixes.numbers);
            request.symbols.extend(affixes.symbols);
        }
        request.check()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenerationMode;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.warn_bytes, 107_374_182_400);
        assert_eq!(config.flush_interval, 1024);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_OUTPUT_DIR, "/tmp/lists"),
            (ENV_FLUSH_INTERVAL, " 10 "),
            (ENV_WARN_BYTES, "0"),
            (ENV_LOG, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/lists"));
        assert_eq!(config.flush_interval, 10);
        assert_eq!(config.engine().capacity_threshold_bytes, 0);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.output_path("a.txt"), PathBuf::from("/tmp/lists/a.txt"));
        assert_eq!(config.output_path("/abs/b.txt"), PathBuf::from("/abs/b.txt"));
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_WARN_BYTES, "lots")])).unwrap_err();
        assert!(matches!(err, WordForgeError::Config { .. }));
        assert!(err.to_string().contains(ENV_WARN_BYTES));

        assert!(AppConfig::from_lookup(lookup(&[(ENV_FLUSH_INTERVAL, "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[(ENV_FLUSH_INTERVAL, "-3")])).is_err());
    }

    #[test]
    fn test_preset_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "mode": "hybrid",
                "keywords": ["rex"],
                "range": {{ "min": 3, "max": 5 }},
                "limit": 20,
                "profile": {{ "name": "alice", "birthdate": "1990" }},
                "output": "out.txt"
            }}"#
        )
        .unwrap();

        let preset = Preset::load(file.path()).unwrap();
        assert_eq!(preset.output, PathBuf::from("out.txt"));
        assert_eq!(preset.request.mode, GenerationMode::Hybrid);

        let request = preset.resolve().unwrap();
        assert_eq!(request.keywords[0], "rex");
        assert_eq!(request.keywords[1], "alice");
        assert_eq!(request.numbers, vec!["1990", "90", "1990"]);
        assert_eq!(request.cap(), Some(20));
    }

    #[test]
    fn test_preset_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            Preset::load(file.path()),
            Err(WordForgeError::Parse { content: Some(_), .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "mode": "smart" }}"#).unwrap();
        // Output path is required
        assert!(Preset::load(file.path()).is_err());

        assert!(matches!(
            Preset::load("/nonexistent/preset.json"),
            Err(WordForgeError::Config { .. })
        ));
    }

    #[test]
    fn test_preset_resolve_enforces_bounds() {
        let load = |json: &str| {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, "{}", json).unwrap();
            Preset::load(file.path()).unwrap()
        };

        let huge = load(r#"{"mode":"brute","range":{"min":1,"max":5000},"limit":10,"output":"o.txt"}"#);
        assert!(matches!(huge.resolve(), Err(WordForgeError::Validation { .. })));

        let long_random = load(r#"{"mode":"random","random_length":1048576,"output":"o.txt"}"#);
        assert!(matches!(long_random.resolve(), Err(WordForgeError::Validation { .. })));

        let many_random = load(r#"{"mode":"random","random_count":10000001,"output":"o.txt"}"#);
        assert!(many_random.resolve().is_err());

        let newline = load(r#"{"mode":"brute","charset":"a\n","range":{"min":1,"max":2},"output":"o.txt"}"#);
        assert!(matches!(newline.resolve(), Err(WordForgeError::Validation { .. })));

        // Profile fields are checked after the merge
        let profile = load(r#"{"mode":"smart","profile":{"name":"al\rice"},"output":"o.txt"}"#);
        assert!(profile.resolve().is_err());

        let ok = load(r#"{"mode":"brute","charset":"ab","range":{"min":1,"max":64},"output":"o.txt"}"#);
        assert!(ok.resolve().is_ok());
    }
}
