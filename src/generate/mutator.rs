//! Keyword mutator - personal seeds → realistic password variants
//!
//! Each keyword is expanded with case/reverse/leet transforms, then decorated
//! with numeric and symbol affixes, then combined with the other keywords.
//! Everything is collected into a set, filtered by length and sorted so the
//! same input always yields the same sequence.

use std::collections::HashSet;

use crate::types::{AffixSet, LengthRange};

/// Maximum number of keywords joined into one combination
pub const MAX_COMBINATION_DEPTH: usize = 3;

/// Leetspeak substitution table, applied to every occurrence at once
const LEET_TABLE: &[(char, char)] = &[('a', '@'), ('s', '$'), ('i', '1'), ('o', '0')];

/// Expands keywords into candidate passwords
#[derive(Debug, Clone)]
pub struct KeywordMutator {
    keywords: Vec<String>,
    affixes: AffixSet,
    range: LengthRange,
}

impl KeywordMutator {
    /// Empty keywords are ignored
    pub fn new(keywords: &[String], affixes: AffixSet, range: LengthRange) -> Self {
        Self {
            keywords: keywords.iter().filter(|k| !k.is_empty()).cloned().collect(),
            affixes,
            range,
        }
    }

    /// Keywords that take part in mutation
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Build every variant and return the in-range ones in sorted order
    pub fn generate(&self) -> Mutations {
        let mut set: HashSet<String> = HashSet::new();

        for keyword in &self.keywords {
            set.extend(transforms(keyword));
        }

        // Affix only the transformed words, not what this loop adds
        let snapshot: Vec<String> = set.iter().cloned().collect();
        for base in &snapshot {
            self.add_affixed(base, &mut set);
        }

        self.add_combinations(&mut set);

        let mut words: Vec<String> = set
            .into_iter()
            .filter(|w| self.range.contains(w.chars().count()))
            .collect();
        words.sort();

        tracing::debug!(
            keywords = self.keywords.len(),
            candidates = words.len(),
            range = %self.range,
            "Keyword mutation completed"
        );

        Mutations {
            inner: words.into_iter(),
        }
    }

    fn add_affixed(&self, base: &str, set: &mut HashSet<String>) {
        let AffixSet { numbers, symbols } = &self.affixes;

        for n in numbers {
            set.insert(format!("{}{}", base, n));
            set.insert(format!("{}{}", n, base));
        }
        for s in symbols {
            set.insert(format!("{}{}", base, s));
            set.insert(format!("{}{}", s, base));
        }
        for n in numbers {
            for s in symbols {
                set.insert(format!("{}{}{}", base, s, n));
                set.insert(format!("{}{}{}", n, s, base));
                set.insert(format!("{}{}{}", base, n, s));
            }
        }
    }

    fn add_combinations(&self, set: &mut HashSet<String>) {
        let depth = MAX_COMBINATION_DEPTH.min(self.keywords.len());

        for size in 2..=depth {
            for selection in permutations(self.keywords.len(), size) {
                let joined: String = selection.iter().map(|&i| self.keywords[i].as_str()).collect();

                for n in &self.affixes.numbers {
                    set.insert(format!("{}{}", joined, n));
                    set.insert(format!("{}{}", n, joined));
                }
                for s in &self.affixes.symbols {
                    set.insert(format!("{}{}", joined, s));
                    set.insert(format!("{}{}", s, joined));
                }
                set.insert(joined);
            }
        }
    }
}

/// Sorted mutation output
#[derive(Debug, Clone)]
pub struct Mutations {
    inner: std::vec::IntoIter<String>,
}

impl Iterator for Mutations {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Mutations {}

/// Identity, lower, upper, capitalized, reversed and leet forms of a keyword
fn transforms(keyword: &str) -> [String; 6] {
    [
        keyword.to_string(),
        keyword.to_lowercase(),
        keyword.to_uppercase(),
        capitalize(keyword),
        keyword.chars().rev().collect(),
        leet(keyword),
    ]
}

/// First character upper case, the rest lower case
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

fn leet(word: &str) -> String {
    word.chars()
        .map(|c| {
            LEET_TABLE
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |&(_, to)| to)
        })
        .collect()
}

/// Ordered selections of `k` distinct indices out of `n`
fn permutations(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn extend(n: usize, k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in 0..n {
            if !current.contains(&i) {
                current.push(i);
                extend(n, k, current, out);
                current.pop();
            }
        }
    }

    let mut out = Vec::new();
    if k <= n {
        extend(n, k, &mut Vec::with_capacity(k), &mut out);
    }
    out
}
