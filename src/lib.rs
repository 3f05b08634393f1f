//! Random password generation over a configurable character set.
//!
//! The effective alphabet is always the 52 ASCII letters, optionally followed by the ten digits
//! and a symbol set. Every position of a password is sampled uniformly from that alphabet.

use std::collections::HashSet;

use log::{debug, trace};
use rand::{CryptoRng, Rng};

mod password;
pub mod password_generation;

pub use password::GenerationConfig;
pub use password::Password;

pub static LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub static DIGITS: &str = "0123456789";
pub static DEFAULT_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}~";

/// The longest password [`PasswordGenerator`] will produce.
pub const MAX_LENGTH: i64 = 4096;

/// Generate a password with the default symbol set and the thread-local RNG.
pub fn generate(config: &GenerationConfig) -> Result<Password, InvalidConfig> {
    PasswordGenerator::default().generate(config)
}

/// Generates passwords. Holds the symbol set used when a config asks for symbols; otherwise
/// stateless, so one instance can be shared freely.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PasswordGenerator {
    symbols: Vec<char>,
}

impl PasswordGenerator {
    /// Use a custom symbol set instead of [`DEFAULT_SYMBOLS`].
    ///
    /// The set must be non-empty, and may not repeat a character or contain letters, digits,
    /// whitespace or control characters; those would either already be in the alphabet or be
    /// unusable in a password.
    pub fn with_symbols(symbols: &str) -> Result<PasswordGenerator, InvalidConfig> {
        if symbols.is_empty() {
            return Err(ConfigProblem::EmptySymbolSet.into());
        }
        let mut seen = HashSet::new();
        for ch in symbols.chars() {
            if ch.is_ascii_alphanumeric() || ch.is_whitespace() || ch.is_control() {
                return Err(ConfigProblem::DisallowedSymbol(ch).into());
            }
            if !seen.insert(ch) {
                return Err(ConfigProblem::DuplicateSymbol(ch).into());
            }
        }
        debug!("using a custom symbol set of {} characters", seen.len());
        Ok(PasswordGenerator {
            symbols: symbols.chars().collect(),
        })
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// The characters a password generated with `config` can contain.
    pub fn alphabet(&self, config: &GenerationConfig) -> Alphabet {
        let mut chars = Vec::with_capacity(LETTERS.len() + DIGITS.len() + self.symbols.len());
        chars.extend(LETTERS.chars());
        if config.include_digits {
            chars.extend(DIGITS.chars());
        }
        if config.include_symbols {
            chars.extend_from_slice(&self.symbols);
        }
        Alphabet(chars)
    }

    pub fn generate(&self, config: &GenerationConfig) -> Result<Password, InvalidConfig> {
        self.generate_with_rng(&mut rand::thread_rng(), config)
    }

    /// Like [`PasswordGenerator::generate`], drawing randomness from `rng`.
    ///
    /// A length of zero yields the empty password; a negative length, or one above
    /// [`MAX_LENGTH`], is an error.
    pub fn generate_with_rng<R>(
        &self,
        rng: &mut R,
        config: &GenerationConfig,
    ) -> Result<Password, InvalidConfig>
    where
        R: Rng + CryptoRng + ?Sized,
    {
        if config.length < 0 {
            return Err(ConfigProblem::NegativeLength(config.length).into());
        }
        if config.length > MAX_LENGTH {
            return Err(ConfigProblem::LengthTooLarge(config.length).into());
        }
        let length = config.length as usize;
        let alphabet = self.alphabet(config);
        trace!(
            "generating a password of length {} from {} characters",
            length,
            alphabet.len()
        );
        Ok(password_generation::generate_random_password(
            rng,
            alphabet.as_slice(),
            length,
        ))
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        PasswordGenerator {
            symbols: DEFAULT_SYMBOLS.chars().collect(),
        }
    }
}

/// The effective alphabet for a config. Never empty, and never repeats a character.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alphabet(Vec<char>);

impl Alphabet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Bits of entropy in a password of `length` characters sampled from this alphabet.
    pub fn entropy_bits(&self, length: usize) -> f64 {
        if length == 0 || self.0.is_empty() {
            return 0.0;
        }
        length as f64 * (self.0.len() as f64).log2()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in &self.0 {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid generation config: {0}")]
pub struct InvalidConfig(ConfigProblem);

impl InvalidConfig {
    pub fn problem(&self) -> &ConfigProblem {
        &self.0
    }
}

impl From<ConfigProblem> for InvalidConfig {
    fn from(problem: ConfigProblem) -> InvalidConfig {
        InvalidConfig(problem)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigProblem {
    #[error("the length must not be negative, but was {0}")]
    NegativeLength(i64),
    #[error("the length must be at most {}, but was {}", MAX_LENGTH, .0)]
    LengthTooLarge(i64),
    #[error("the symbol set is empty")]
    EmptySymbolSet,
    #[error("the symbol set contains {0:?}, which is a letter, digit, whitespace or control character")]
    DisallowedSymbol(char),
    #[error("the symbol set contains {0:?} more than once")]
    DuplicateSymbol(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(length: i64, include_digits: bool, include_symbols: bool) -> GenerationConfig {
        GenerationConfig::new(length, include_digits, include_symbols)
    }

    #[test]
    fn password_length() {
        for length in [1, 8, 16, 32, 100] {
            let password = generate(&config(length, true, true)).unwrap();
            assert_eq!(password.len(), length as usize);
        }
    }

    #[test]
    fn letters_only() {
        let mut rng = StdRng::seed_from_u64(3);
        let generator = PasswordGenerator::default();
        for _ in 0..50 {
            let password = generator
                .generate_with_rng(&mut rng, &config(64, false, false))
                .unwrap();
            assert!(password.as_str().chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn letters_and_digits() {
        let password = generate(&config(8, true, false)).unwrap();
        assert_eq!(password.len(), 8);
        assert!(password.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn every_character_is_in_the_alphabet() {
        let mut rng = StdRng::seed_from_u64(11);
        let generator = PasswordGenerator::default();
        let config = config(256, true, true);
        let alphabet = generator.alphabet(&config);
        let password = generator.generate_with_rng(&mut rng, &config).unwrap();
        assert!(password.as_str().chars().all(|c| alphabet.contains(c)));
    }

    #[test]
    fn zero_length_is_empty() {
        let password = generate(&config(0, true, true)).unwrap();
        assert_eq!(password.as_str(), "");
    }

    #[test]
    fn negative_length_is_rejected() {
        let err = generate(&config(-1, false, false)).unwrap_err();
        assert_eq!(err.problem(), &ConfigProblem::NegativeLength(-1));
        assert_eq!(
            err.to_string(),
            "invalid generation config: the length must not be negative, but was -1"
        );
    }

    #[test]
    fn length_above_maximum_is_rejected() {
        let password = generate(&config(MAX_LENGTH, true, true)).unwrap();
        assert_eq!(password.len(), MAX_LENGTH as usize);

        let err = generate(&config(MAX_LENGTH + 1, false, false)).unwrap_err();
        assert_eq!(err.problem(), &ConfigProblem::LengthTooLarge(MAX_LENGTH + 1));

        let err = generate(&config(i64::MAX, false, false)).unwrap_err();
        assert_eq!(err.problem(), &ConfigProblem::LengthTooLarge(i64::MAX));
        assert_eq!(
            err.to_string(),
            format!(
                "invalid generation config: the length must be at most 4096, but was {}",
                i64::MAX
            )
        );
    }

    #[test]
    fn alphabet_sizes() {
        let generator = PasswordGenerator::default();
        assert_eq!(generator.alphabet(&config(1, false, false)).len(), 52);
        assert_eq!(generator.alphabet(&config(1, true, false)).len(), 62);
        assert_eq!(generator.alphabet(&config(1, false, true)).len(), 71);
        assert_eq!(generator.alphabet(&config(1, true, true)).len(), 81);
    }

    #[test]
    fn symbols_grow_the_alphabet() {
        let generator = PasswordGenerator::default();
        for include_digits in [false, true] {
            let without = generator.alphabet(&config(1, include_digits, false));
            let with = generator.alphabet(&config(1, include_digits, true));
            assert!(with.len() > without.len());
            assert!(without.iter().all(|c| with.contains(c)));
        }
    }

    #[test]
    fn alphabet_has_no_duplicates() {
        let alphabet = PasswordGenerator::default().alphabet(&config(1, true, true));
        let distinct = alphabet.iter().collect::<HashSet<_>>();
        assert_eq!(distinct.len(), alphabet.len());
    }

    #[test]
    fn custom_symbols() {
        let generator = PasswordGenerator::with_symbols("#%").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let config = config(300, false, true);
        let password = generator.generate_with_rng(&mut rng, &config).unwrap();
        assert!(password
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '#' || c == '%'));
        assert_eq!(generator.alphabet(&config).len(), 54);
    }

    #[test]
    fn custom_symbols_are_validated() {
        let problem = |s: &str| PasswordGenerator::with_symbols(s).unwrap_err().problem().clone();
        assert_eq!(problem(""), ConfigProblem::EmptySymbolSet);
        assert_eq!(problem("!a"), ConfigProblem::DisallowedSymbol('a'));
        assert_eq!(problem("!7"), ConfigProblem::DisallowedSymbol('7'));
        assert_eq!(problem("! "), ConfigProblem::DisallowedSymbol(' '));
        assert_eq!(problem("!?!"), ConfigProblem::DuplicateSymbol('!'));
    }

    #[test]
    fn entropy() {
        let alphabet = PasswordGenerator::default().alphabet(&config(1, false, false));
        assert_eq!(alphabet.entropy_bits(0), 0.0);
        let bits = alphabet.entropy_bits(10);
        assert!((bits - 10.0 * 52f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn alphabet_display() {
        let generator = PasswordGenerator::with_symbols("$").unwrap();
        let alphabet = generator.alphabet(&config(1, true, true));
        assert_eq!(alphabet.to_string(), format!("{LETTERS}{DIGITS}$"));
    }
}
