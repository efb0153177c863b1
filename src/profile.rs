//! Target profile - personal details turned into mutator seeds

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WordForgeError};
use crate::types::{AffixSet, GenerationMode, GenerationRequest, LengthRange};

static DIGITS: OnceLock<Regex> = OnceLock::new();

/// All-digit matcher, compiled once per process
fn digits() -> Result<&'static Regex> {
    if let Some(re) = DIGITS.get() {
        return Ok(re);
    }
    let re = Regex::new(r"^\d+$").map_err(|e| WordForgeError::internal(e.to_string()))?;
    Ok(DIGITS.get_or_init(|| re))
}

/// Details collected about a target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetProfile {
    pub name: String,
    pub nickname: String,
    /// `ddmmyyyy` or `yyyy`; only all-digit values feed the numeric affixes
    pub birthdate: String,
    pub pet: String,
    pub partner: String,
    pub favorite: String,
    pub phone: String,
    pub extras: Vec<String>,
    pub symbols: Vec<String>,
    pub numbers: Vec<String>,
}

impl TargetProfile {
    /// Named fields in a fixed order followed by the extra keywords.
    /// Empty fields are kept; the mutator skips them.
    pub fn keywords(&self) -> Vec<String> {
        [
            &self.name,
            &self.nickname,
            &self.birthdate,
            &self.pet,
            &self.partner,
            &self.favorite,
            &self.phone,
        ]
        .into_iter()
        .cloned()
        .chain(self.extras.iter().cloned())
        .collect()
    }

    /// User numbers plus the birthdate, its last two and its last four digits
    pub fn numeric_affixes(&self) -> Result<Vec<String>> {
        let mut numbers = self.numbers.clone();

        if digits()?.is_match(&self.birthdate) {
            let chars: Vec<char> = self.birthdate.chars().collect();
            let tail = |n: usize| chars[chars.len() - n..].iter().collect::<String>();

            numbers.push(self.birthdate.clone());
            if chars.len() >= 2 {
                numbers.push(tail(2));
            }
            if chars.len() >= 4 {
                numbers.push(tail(4));
            }
        }

        Ok(numbers)
    }

    pub fn affixes(&self) -> Result<AffixSet> {
        Ok(AffixSet::new(self.numeric_affixes()?, self.symbols.clone()))
    }

    /// Build a mutation request from this profile
    pub fn request(&self, mode: GenerationMode, range: LengthRange, limit: u64) -> Result<GenerationRequest> {
        let AffixSet { numbers, symbols } = self.affixes()?;
        Ok(GenerationRequest {
            mode,
            keywords: self.keywords(),
            numbers,
            symbols,
            range,
            limit,
            ..Default::default()
        })
    }
}

/// Split a comma separated list, trimming items and dropping empty ones
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
