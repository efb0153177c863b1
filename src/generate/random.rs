//! Random password sampler

use rand::{CryptoRng, RngCore};

use super::Alphabet;
use crate::error::{Result, WordForgeError};
use crate::types::GenerationMode;

/// Source of cryptographically strong bytes
pub trait ByteSource {
    fn fill_random(&mut self, buf: &mut [u8]) -> Result<()>;
}

impl<R: RngCore + CryptoRng> ByteSource for R {
    fn fill_random(&mut self, buf: &mut [u8]) -> Result<()> {
        self.try_fill_bytes(buf)
            .map_err(|e| WordForgeError::random_source(e.to_string()))
    }
}

/// Draws `count` independent strings of `length` characters.
///
/// Each character is `alphabet[byte % alphabet.len()]`. When the alphabet
/// size does not divide 256 the low indices are slightly favoured (for the
/// 94-character alphabet the first 68 characters come up 3/256 of the time,
/// the rest 2/256). The selection is kept as-is so output matches the
/// established wordlist distribution.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    alphabet: Vec<char>,
    length: usize,
    count: u64,
}

impl RandomSampler {
    pub fn new(alphabet: &Alphabet, length: usize, count: u64) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(WordForgeError::empty_alphabet(GenerationMode::Random));
        }
        if length == 0 {
            return Err(WordForgeError::validation("Random password length must be at least 1"));
        }

        Ok(Self {
            alphabet: alphabet.chars().to_vec(),
            length,
            count,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Draw a single password
    pub fn draw<B: ByteSource + ?Sized>(&self, source: &mut B) -> Result<String> {
        let mut bytes = vec![0u8; self.length];
        source.fill_random(&mut bytes)?;

        let size = self.alphabet.len();
        Ok(bytes
            .iter()
            .map(|&b| self.alphabet[b as usize % size])
            .collect())
    }

    /// Lazily draw all `count` passwords
    pub fn sample<'a, B: ByteSource + ?Sized>(&'a self, source: &'a mut B) -> Samples<'a, B> {
        Samples {
            sampler: self,
            source,
            remaining: self.count,
        }
    }
}

/// Iterator over sampled passwords
pub struct Samples<'a, B: ByteSource + ?Sized> {
    sampler: &'a RandomSampler,
    source: &'a mut B,
    remaining: u64,
}

impl<B: ByteSource + ?Sized> Iterator for Samples<'_, B> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.sampler.draw(self.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::CharClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Emits 0, 1, 2, ... so selections are predictable
    struct Counter(u8);

    impl ByteSource for Counter {
        fn fill_random(&mut self, buf: &mut [u8]) -> Result<()> {
            for b in buf.iter_mut() {
                *b = self.0;
                self.0 = self.0.wrapping_add(1);
            }
            Ok(())
        }
    }

    struct Broken;

    impl ByteSource for Broken {
        fn fill_random(&mut self, _buf: &mut [u8]) -> Result<()> {
            Err(WordForgeError::random_source("entropy pool closed"))
        }
    }

    #[test]
    fn test_count_and_length() {
        let alphabet = Alphabet::from_classes(&CharClass::ALL);
        let sampler = RandomSampler::new(&alphabet, 8, 100).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let out: Vec<String> = sampler.sample(&mut rng).collect::<Result<_>>().unwrap();
        assert_eq!(out.len(), 100);
        for pw in &out {
            assert_eq!(pw.chars().count(), 8);
            assert!(pw.chars().all(|c| alphabet.contains(c)));
        }
    }

    #[test]
    fn test_modulo_selection() {
        let alphabet = Alphabet::from_chars("abc".chars());
        let sampler = RandomSampler::new(&alphabet, 4, 2).unwrap();
        let mut source = Counter(0);

        let out: Vec<String> = sampler.sample(&mut source).collect::<Result<_>>().unwrap();
        assert_eq!(out, vec!["abca", "bcab"]);

        let mut source = Counter(255);
        // 255 % 3 == 0, then wraps to 0
        assert_eq!(sampler.draw(&mut source).unwrap(), "aabc");
    }

    #[test]
    fn test_os_rng_source() {
        let alphabet = Alphabet::from_classes(&[CharClass::Digits]);
        let sampler = RandomSampler::new(&alphabet, 16, 1).unwrap();
        let pw = sampler.draw(&mut rand::rngs::OsRng).unwrap();
        assert!(pw.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            RandomSampler::new(&Alphabet::default(), 8, 1),
            Err(WordForgeError::EmptyAlphabet { .. })
        ));
        let alphabet = Alphabet::from_chars("ab".chars());
        assert!(RandomSampler::new(&alphabet, 0, 1).is_err());

        let sampler = RandomSampler::new(&alphabet, 4, 3).unwrap();
        let mut broken = Broken;
        let first = sampler.sample(&mut broken).next().unwrap();
        assert!(matches!(first, Err(WordForgeError::RandomSource { .. })));
    }
}
