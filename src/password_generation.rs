//! Utilities for generating passwords.

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

/// Generate a password by uniformly sampling the given alphabet, once per position.
///
/// `rand`'s underlying uniform sampler does the right thing to prevent bias: if it can't generate
/// a value that is within the given range (or really, a multiple of the range), it re-samples.
///
/// An empty alphabet yields an empty password, whatever `len` is. Bounding `len` is up to the
/// caller.
pub fn generate_random_password<R>(rng: &mut R, alphabet: &[char], len: usize) -> crate::Password
where
    R: Rng + CryptoRng + ?Sized,
{
    let mut password = String::new();
    for _ in 0..len {
        match alphabet.choose(rng) {
            Some(ch) => password.push(*ch),
            None => break,
        }
    }
    crate::Password(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_only_from_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let alphabet = ['x', 'y', 'z'];
        let password = generate_random_password(&mut rng, &alphabet, 200);
        assert_eq!(password.len(), 200);
        assert!(password.as_str().chars().all(|c| alphabet.contains(&c)));
    }

    #[test]
    fn reaches_every_character() {
        let mut rng = StdRng::seed_from_u64(42);
        let alphabet = ['a', 'b', 'c', 'd'];
        let password = generate_random_password(&mut rng, &alphabet, 500);
        for ch in alphabet {
            assert!(password.as_str().contains(ch), "{ch} was never sampled");
        }
    }

    #[test]
    fn empty_alphabet_gives_empty_password() {
        let mut rng = StdRng::seed_from_u64(1);
        let password = generate_random_password(&mut rng, &[], 10);
        assert!(password.is_empty());
    }

    #[test]
    fn zero_length() {
        let mut rng = StdRng::seed_from_u64(1);
        let password = generate_random_password(&mut rng, &['a'], 0);
        assert_eq!(password.as_str(), "");
    }
}
