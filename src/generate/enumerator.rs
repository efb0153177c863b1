//! Charset enumerator - every string over an alphabet, length by length

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use super::estimate::estimate;
use super::Alphabet;
use crate::error::{Result, WordForgeError};
use crate::types::{GenerationMode, LengthRange};

/// Lazy Cartesian-product enumerator.
///
/// Lengths ascend from `range.min` to `range.max`; inside one length the
/// leftmost character varies slowest, following the alphabet's order. State
/// is an odometer of alphabet indices, so memory stays O(max length)
/// whatever the size of the space.
#[derive(Debug, Clone)]
pub struct CharsetEnumerator {
    alphabet: Vec<char>,
    range: LengthRange,
    length: usize,
    digits: Vec<usize>,
    emitted: u64,
    exhausted: bool,
}

impl CharsetEnumerator {
    /// Create an enumerator. The range must be valid and the alphabet non-empty.
    pub fn new(alphabet: &Alphabet, range: LengthRange) -> Result<Self> {
        range.validate()?;
        if alphabet.is_empty() {
            return Err(WordForgeError::empty_alphabet(GenerationMode::Brute));
        }

        Ok(Self {
            alphabet: alphabet.chars().to_vec(),
            range,
            length: range.min,
            digits: vec![0; range.min],
            emitted: 0,
            exhausted: false,
        })
    }

    /// Total number of candidates over the whole range
    pub fn total(&self) -> BigUint {
        estimate(self.alphabet.len(), self.range)
    }

    /// Candidates produced so far
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Length of the next candidate
    pub fn current_length(&self) -> usize {
        self.length
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Rewind to the first candidate
    pub fn reset(&mut self) {
        self.length = self.range.min;
        self.digits = vec![0; self.range.min];
        self.emitted = 0;
        self.exhausted = false;
    }

    /// Candidate at `index` among the strings of exactly `length` characters
    pub fn candidate_at(&self, length: usize, index: &BigUint) -> Option<String> {
        if !self.range.contains(length) {
            return None;
        }

        let base = BigUint::from(self.alphabet.len());
        if *index >= base.pow(length as u32) {
            return None;
        }

        let mut result = vec![self.alphabet[0]; length];
        let mut n = index.clone();
        for slot in result.iter_mut().rev() {
            let digit = (&n % &base).to_usize()?;
            *slot = self.alphabet[digit];
            n /= &base;
            if n.is_zero() {
                break;
            }
        }

        Some(result.into_iter().collect())
    }

    /// Generate next batch of candidates
    pub fn next_batch(&mut self, count: usize) -> Vec<String> {
        self.by_ref().take(count).collect()
    }

    fn current(&self) -> String {
        self.digits.iter().map(|&d| self.alphabet[d]).collect()
    }

    fn advance(&mut self) {
        let base = self.alphabet.len();
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < base {
                return;
            }
            *digit = 0;
        }

        // Every position rolled over: move to the next length
        self.length += 1;
        if self.length > self.range.max {
            self.exhausted = true;
        } else {
            self.digits = vec![0; self.length];
        }
    }
}

impl Iterator for CharsetEnumerator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let candidate = self.current();
        self.advance();
        self.emitted += 1;
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn enumerator(chars: &str, min: usize, max: usize) -> CharsetEnumerator {
        let alphabet = Alphabet::from_chars(chars.chars());
        CharsetEnumerator::new(&alphabet, LengthRange::new(min, max).unwrap()).unwrap()
    }

    #[test]
    fn test_lexicographic_order() {
        let all: Vec<String> = enumerator("ab", 1, 2).collect();
        assert_eq!(all, vec!["a", "b", "aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn test_count_matches_estimate_without_duplicates() {
        let gen = enumerator("xyz", 2, 4);
        let total = gen.total().to_u64().unwrap();
        let all: Vec<String> = gen.collect();
        assert_eq!(all.len() as u64, total);
        assert_eq!(total, 9 + 27 + 81);

        let unique: HashSet<&String> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_first_candidates_of_letters() {
        let alphabet = Alphabet::from_classes(&[crate::generate::CharClass::Lowercase]);
        let mut gen = CharsetEnumerator::new(&alphabet, LengthRange::new(4, 4).unwrap()).unwrap();
        assert_eq!(gen.next_batch(3), vec!["aaaa", "aaab", "aaac"]);
        assert_eq!(gen.emitted(), 3);
        assert_eq!(gen.total(), BigUint::from(456_976u32));
    }

    #[test]
    fn test_candidate_at() {
        let gen = enumerator("abcdefghijklmnopqrstuvwxyz", 4, 4);
        assert_eq!(gen.candidate_at(4, &BigUint::from(0u32)), Some("aaaa".to_string()));
        assert_eq!(gen.candidate_at(4, &BigUint::from(25u32)), Some("aaaz".to_string()));
        assert_eq!(gen.candidate_at(4, &BigUint::from(26u32)), Some("aaba".to_string()));
        assert_eq!(gen.candidate_at(4, &BigUint::from(456_976u32)), None);
        assert_eq!(gen.candidate_at(3, &BigUint::from(0u32)), None);
    }

    #[test]
    fn test_candidate_at_agrees_with_iteration() {
        let gen = enumerator("01x", 3, 3);
        for (i, candidate) in gen.clone().enumerate() {
            assert_eq!(gen.candidate_at(3, &BigUint::from(i)), Some(candidate));
        }
    }

    #[test]
    fn test_restartable() {
        let mut gen = enumerator("ab", 1, 2);
        let first: Vec<String> = gen.by_ref().collect();
        assert!(gen.is_exhausted());
        assert_eq!(gen.next(), None);

        gen.reset();
        let second: Vec<String> = gen.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_char_alphabet() {
        let all: Vec<String> = enumerator("z", 1, 3).collect();
        assert_eq!(all, vec!["z", "zz", "zzz"]);
    }

    #[test]
    fn test_rejects_bad_input() {
        let empty = Alphabet::default();
        assert!(matches!(
            CharsetEnumerator::new(&empty, LengthRange::new(1, 2).unwrap()),
            Err(WordForgeError::EmptyAlphabet { .. })
        ));

        let alphabet = Alphabet::from_chars("ab".chars());
        let bad = LengthRange { min: 3, max: 2 };
        assert!(matches!(
            CharsetEnumerator::new(&alphabet, bad),
            Err(WordForgeError::InvalidRange { .. })
        ));
    }
}
