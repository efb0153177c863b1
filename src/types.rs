//! Core types and structures for word-forge

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WordForgeError};
use crate::generate::{Alphabet, CharClass};
use crate::validation_error;

/// Generation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Keyword mutation only
    #[default]
    Smart,
    /// Charset enumeration only
    Brute,
    /// Keyword mutation, then enumeration with the remaining budget
    Hybrid,
    /// Independent random strings
    Random,
}

impl GenerationMode {
    pub const ALL: [GenerationMode; 4] = [
        GenerationMode::Smart,
        GenerationMode::Brute,
        GenerationMode::Hybrid,
        GenerationMode::Random,
    ];

    /// Whether this mode runs the charset enumerator
    pub fn enumerates(&self) -> bool {
        matches!(self, GenerationMode::Brute | GenerationMode::Hybrid)
    }

    /// Whether this mode runs the keyword mutator
    pub fn mutates(&self) -> bool {
        matches!(self, GenerationMode::Smart | GenerationMode::Hybrid)
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationMode::Smart => write!(f, "smart"),
            GenerationMode::Brute => write!(f, "brute"),
            GenerationMode::Hybrid => write!(f, "hybrid"),
            GenerationMode::Random => write!(f, "random"),
        }
    }
}

/// Generation stage inside a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Mutation,
    Enumeration,
    Random,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Mutation => write!(f, "mutation"),
            Stage::Enumeration => write!(f, "enumeration"),
            Stage::Random => write!(f, "random"),
        }
    }
}

/// Inclusive candidate length interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    /// Create a validated range
    pub fn new(min: usize, max: usize) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    /// Check `1 <= min <= max`
    pub fn validate(&self) -> Result<()> {
        if self.min == 0 || self.min > self.max {
            return Err(WordForgeError::invalid_range(self.min, self.max));
        }
        Ok(())
    }

    /// Whether a candidate of `len` characters is inside the range
    pub fn contains(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }

    pub fn lengths(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

impl Default for LengthRange {
    fn default() -> Self {
        Self { min: 6, max: 8 }
    }
}

impl std::fmt::Display for LengthRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

pub const RANDOM_MIN_LENGTH: usize = 4;
pub const RANDOM_DEFAULT_COUNT: u64 = 50;
pub const RANDOM_MAX_COUNT: u64 = 10_000_000;

/// Length bounds, defaults and line limits for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthPolicy {
    pub min_allowed: usize,
    pub max_allowed: usize,
    pub default_min: usize,
    pub default_max: usize,
    /// Largest accepted line limit (random mode: largest count)
    pub max_limit: u64,
}

impl LengthPolicy {
    pub fn for_mode(mode: GenerationMode) -> Self {
        match mode {
            GenerationMode::Smart => Self {
                min_allowed: 1,
                max_allowed: 128,
                default_min: 6,
                default_max: 8,
                max_limit: 1_000_000_000,
            },
            GenerationMode::Brute => Self {
                min_allowed: 1,
                max_allowed: 64,
                default_min: 4,
                default_max: 6,
                max_limit: 1_000_000_000_000,
            },
            GenerationMode::Hybrid => Self {
                min_allowed: 1,
                max_allowed: 64,
                default_min: 6,
                default_max: 10,
                max_limit: 1_000_000_000_000,
            },
            GenerationMode::Random => Self {
                min_allowed: RANDOM_MIN_LENGTH,
                max_allowed: 128,
                default_min: RANDOM_MIN_LENGTH,
                default_max: 12,
                max_limit: RANDOM_MAX_COUNT,
            },
        }
    }
}

/// Numeric and symbol affixes used by the keyword mutator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixSet {
    pub numbers: Vec<String>,
    pub symbols: Vec<String>,
}

impl AffixSet {
    pub fn new(numbers: Vec<String>, symbols: Vec<String>) -> Self {
        Self { numbers, symbols }
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty() && self.symbols.is_empty()
    }
}

/// Everything the engine needs for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    pub mode: GenerationMode,
    pub keywords: Vec<String>,
    pub numbers: Vec<String>,
    pub symbols: Vec<String>,
    pub range: LengthRange,
    /// Maximum lines to write, 0 = unlimited
    pub limit: u64,
    pub classes: Vec<CharClass>,
    /// Explicit characters; takes precedence over `classes` when set
    pub charset: Option<String>,
    pub random_count: u64,
    pub random_length: usize,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Smart,
            keywords: Vec::new(),
            numbers: Vec::new(),
            symbols: Vec::new(),
            range: LengthRange::default(),
            limit: 0,
            classes: CharClass::ALL.to_vec(),
            charset: None,
            random_count: RANDOM_DEFAULT_COUNT,
            random_length: 12,
        }
    }
}

impl GenerationRequest {
    /// Alphabet selected by this request
    pub fn alphabet(&self) -> Alphabet {
        match &self.charset {
            Some(chars) => Alphabet::from_chars(chars.chars()),
            None => Alphabet::from_classes(&self.classes),
        }
    }

    pub fn affixes(&self) -> AffixSet {
        AffixSet::new(self.numbers.clone(), self.symbols.clone())
    }

    /// Check the request against its mode's bounds.
    ///
    /// Seed strings and the charset must be free of control characters so
    /// every candidate stays on a single output line.
    pub fn check(&self) -> Result<()> {
        let policy = LengthPolicy::for_mode(self.mode);

        if self.mode == GenerationMode::Random {
            if !(policy.min_allowed..=policy.max_allowed).contains(&self.random_length) {
                return Err(validation_error!(
                    "Random password length must be between {} and {}, got {}",
                    policy.min_allowed,
                    policy.max_allowed,
                    self.random_length
                ));
            }
            if !(1..=policy.max_limit).contains(&self.random_count) {
                return Err(validation_error!(
                    "Random password count must be between 1 and {}, got {}",
                    policy.max_limit,
                    self.random_count
                ));
            }
        } else {
            self.range.validate()?;
            if self.range.max > policy.max_allowed {
                return Err(validation_error!(
                    "Maximum length for {} mode is {}, got {}",
                    self.mode,
                    policy.max_allowed,
                    self.range.max
                ));
            }
            if self.limit > policy.max_limit {
                return Err(validation_error!(
                    "Line limit for {} mode is at most {}, got {}",
                    self.mode,
                    policy.max_limit,
                    self.limit
                ));
            }
        }

        if let Some(charset) = &self.charset {
            check_printable("charset", charset)?;
        }
        for (field, values) in [("keywords", &self.keywords), ("numbers", &self.numbers), ("symbols", &self.symbols)] {
            for value in values {
                check_printable(field, value)?;
            }
        }
        Ok(())
    }

    /// `Some(limit)` when a cap is set
    pub fn cap(&self) -> Option<u64> {
        (self.limit > 0).then_some(self.limit)
    }
}

fn check_printable(field: &str, value: &str) -> Result<()> {
    if value.chars().any(char::is_control) {
        return Err(validation_error!("{} must not contain control characters: {:?}", field, value));
    }
    Ok(())
}

/// Lines written by one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage: Stage,
    pub written: u64,
}

/// Result of a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: GenerationMode,
    pub stages: Vec<StageSummary>,
    pub total_written: u64,
    /// Enumerable candidates for the alphabet and range, when the mode enumerates
    pub estimate: Option<String>,
    pub approx_size: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Lines written by a given stage
    pub fn written_by(&self, stage: Stage) -> u64 {
        self.stages
            .iter()
            .filter(|s| s.stage == stage)
            .map(|s| s.written)
            .sum()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_range_validation() {
        assert!(LengthRange::new(1, 1).is_ok());
        assert!(LengthRange::new(4, 8).is_ok());
        assert!(matches!(
            LengthRange::new(8, 4),
            Err(WordForgeError::InvalidRange { min: 8, max: 4 })
        ));
        assert!(LengthRange::new(0, 4).is_err());
    }

    #[test]
    fn test_length_range_contains() {
        let range = LengthRange::new(3, 5).unwrap();
        assert!(!range.contains(2));
        assert!(range.contains(3));
        assert!(range.contains(5));
        assert!(!range.contains(6));
        assert_eq!(range.to_string(), "3-5");
    }

    #[test]
    fn test_request_alphabet_prefers_charset() {
        let mut request = GenerationRequest::default();
        assert_eq!(request.alphabet().len(), 94);

        request.charset = Some("abca".to_string());
        assert_eq!(request.alphabet().as_str(), "abc");
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{"mode":"brute","range":{"min":1,"max":2},"limit":10}"#).unwrap();
        assert_eq!(request.mode, GenerationMode::Brute);
        assert_eq!(request.cap(), Some(10));
        assert_eq!(request.classes, CharClass::ALL.to_vec());
        assert_eq!(request.random_length, 12);
    }

    #[test]
    fn test_mode_policies() {
        let smart = LengthPolicy::for_mode(GenerationMode::Smart);
        assert_eq!((smart.default_min, smart.default_max, smart.max_allowed), (6, 8, 128));

        let brute = LengthPolicy::for_mode(GenerationMode::Brute);
        assert_eq!((brute.default_min, brute.default_max, brute.max_allowed), (4, 6, 64));

        let hybrid = LengthPolicy::for_mode(GenerationMode::Hybrid);
        assert_eq!((hybrid.default_min, hybrid.default_max), (6, 10));

        let random = LengthPolicy::for_mode(GenerationMode::Random);
        assert_eq!((random.min_allowed, random.default_max), (4, 12));
        assert_eq!(random.max_limit, RANDOM_MAX_COUNT);
    }

    #[test]
    fn test_check_enforces_mode_bounds() {
        let mut request = GenerationRequest {
            mode: GenerationMode::Brute,
            range: LengthRange::new(1, 64).unwrap(),
            ..Default::default()
        };
        assert!(request.check().is_ok());

        request.range = LengthRange::new(1, 5000).unwrap();
        assert!(matches!(request.check(), Err(WordForgeError::Validation { .. })));

        // Smart mode allows longer candidates
        request.mode = GenerationMode::Smart;
        request.range = LengthRange::new(1, 128).unwrap();
        assert!(request.check().is_ok());
        request.limit = 1_000_000_001;
        assert!(request.check().is_err());

        // Inverted ranges keep their own error
        request.range = LengthRange { min: 9, max: 3 };
        assert!(matches!(request.check(), Err(WordForgeError::InvalidRange { .. })));
    }

    #[test]
    fn test_check_random_bounds() {
        let mut request = GenerationRequest {
            mode: GenerationMode::Random,
            ..Default::default()
        };
        assert!(request.check().is_ok());

        request.random_length = 1 << 20;
        assert!(matches!(request.check(), Err(WordForgeError::Validation { .. })));
        request.random_length = 3;
        assert!(request.check().is_err());

        request.random_length = 12;
        request.random_count = 0;
        assert!(request.check().is_err());
        request.random_count = RANDOM_MAX_COUNT + 1;
        assert!(request.check().is_err());
    }

    #[test]
    fn test_check_rejects_line_breaks() {
        let mut request = GenerationRequest {
            mode: GenerationMode::Brute,
            charset: Some("a\n".to_string()),
            range: LengthRange::new(1, 2).unwrap(),
            ..Default::default()
        };
        let err = request.check().unwrap_err();
        assert!(matches!(err, WordForgeError::Validation { .. }));
        assert!(err.to_string().contains("charset"));

        request.charset = Some("ab".to_string());
        request.keywords = vec!["bo\rb".to_string()];
        assert!(request.check().unwrap_err().to_string().contains("keywords"));

        request.keywords.clear();
        request.symbols = vec!["\t".to_string()];
        assert!(request.check().is_err());
    }

    #[test]
    fn test_mode_flags() {
        assert!(GenerationMode::Hybrid.mutates());
        assert!(GenerationMode::Hybrid.enumerates());
        assert!(!GenerationMode::Smart.enumerates());
        assert!(!GenerationMode::Random.mutates());
        assert_eq!(format!("{:?}", GenerationMode::Brute), "Brute");
    }
}
