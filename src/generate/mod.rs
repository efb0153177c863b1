//! Candidate generators
//!
//! - Keyword mutation (personal seeds → variants)
//! - Charset enumeration (full Cartesian product over a length range)
//! - Random sampling (independent fixed-length strings)
//! - Combinatorial estimation for capacity planning

pub mod enumerator;
pub mod estimate;
pub mod mutator;
pub mod random;

pub use enumerator::CharsetEnumerator;
pub use estimate::{
    approx_bytes, assess_capacity, enumeration_bytes, estimate, estimate_bytes, format_size,
    CapacityWarning,
};
pub use mutator::{KeywordMutator, Mutations};
pub use random::{ByteSource, RandomSampler};

use serde::{Deserialize, Serialize};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Fixed character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    /// a-z
    Lowercase,
    /// A-Z
    Uppercase,
    /// 0-9
    Digits,
    /// ASCII punctuation
    Punctuation,
}

impl CharClass {
    /// All classes in alphabet order
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digits,
        CharClass::Punctuation,
    ];

    pub fn chars(&self) -> &'static str {
        match self {
            CharClass::Lowercase => LOWERCASE,
            CharClass::Uppercase => UPPERCASE,
            CharClass::Digits => DIGITS,
            CharClass::Punctuation => PUNCTUATION,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CharClass::Lowercase => "lowercase a-z",
            CharClass::Uppercase => "uppercase A-Z",
            CharClass::Digits => "digits 0-9",
            CharClass::Punctuation => "symbols",
        }
    }
}

impl std::fmt::Display for CharClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ordered set of distinct characters used for enumeration and sampling
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Concatenate classes in the fixed class order, whatever order they are given in
    pub fn from_classes(classes: &[CharClass]) -> Self {
        let mut selected: Vec<CharClass> = classes.to_vec();
        selected.sort();
        selected.dedup();
        Self::from_chars(selected.iter().flat_map(|c| c.chars().chars()))
    }

    /// Build from explicit characters; later duplicates and control
    /// characters are dropped, so every candidate fits on one line
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut out: Vec<char> = Vec::new();
        for ch in chars {
            if !ch.is_control() && !out.contains(&ch) {
                out.push(ch);
            }
        }
        Self { chars: out }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    pub fn as_str(&self) -> String {
        self.chars.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_sizes() {
        assert_eq!(CharClass::Lowercase.chars().len(), 26);
        assert_eq!(CharClass::Uppercase.chars().len(), 26);
        assert_eq!(CharClass::Digits.chars().len(), 10);
        assert_eq!(CharClass::Punctuation.chars().len(), 32);
    }

    #[test]
    fn test_class_order_is_fixed() {
        let a = Alphabet::from_classes(&[CharClass::Digits, CharClass::Lowercase]);
        assert_eq!(a.len(), 36);
        assert_eq!(a.chars()[0], 'a');
        assert_eq!(a.chars()[26], '0');
    }

    #[test]
    fn test_full_alphabet() {
        let a = Alphabet::from_classes(&CharClass::ALL);
        assert_eq!(a.len(), 94);
        assert!(a.contains('~'));
        assert!(a.contains('Z'));
    }

    #[test]
    fn test_from_chars_dedups() {
        let a = Alphabet::from_chars("abba".chars());
        assert_eq!(a.as_str(), "ab");
        assert!(Alphabet::from_classes(&[]).is_empty());
    }

    #[test]
    fn test_from_chars_drops_control_characters() {
        let alphabet = Alphabet::from_chars("a\nb\r\t".chars());
        assert_eq!(alphabet.as_str(), "ab");
        assert!(Alphabet::from_chars("\n".chars()).is_empty());
    }
}
