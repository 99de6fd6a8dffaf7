//! Random test data for the personal information form.
//!
//! Strings are sampled character by character from [`ALPHABET`]; lengths are
//! uniform in a half-open range. The default source is the thread RNG, so
//! values differ between runs; inject a seeded RNG for reproducible data.

use rand::rngs::ThreadRng;
use rand::Rng;

/// Characters used in generated strings
pub const ALPHABET: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Domain of generated e-mail addresses
pub const EMAIL_DOMAIN: &str = "@google.com";

/// First name length range `[min, max)`
pub const FIRST_NAME_LEN: (usize, usize) = (3, 7);
/// Last name length range `[min, max)`
pub const LAST_NAME_LEN: (usize, usize) = (5, 14);
/// E-mail local part length range `[min, max)`
pub const EMAIL_LOCAL_LEN: (usize, usize) = (2, 10);

/// Test data generator
#[derive(Debug, Clone)]
pub struct Generators<R = ThreadRng> {
    rng: R,
}

impl Default for Generators<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Generators<ThreadRng> {
    /// Generator backed by the thread RNG
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl<R: Rng> Generators<R> {
    /// Generator backed by a caller-supplied RNG
    #[must_use]
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// First name of 3 to 6 letters
    pub fn generate_first_name(&mut self) -> String {
        self.random_string(FIRST_NAME_LEN.0, FIRST_NAME_LEN.1)
    }

    /// Last name of 5 to 13 letters
    pub fn generate_last_name(&mut self) -> String {
        self.random_string(LAST_NAME_LEN.0, LAST_NAME_LEN.1)
    }

    /// `<local>@google.com` with a local part of 2 to 9 letters
    pub fn generate_email(&mut self) -> String {
        let mut email = self.random_string(EMAIL_LOCAL_LEN.0, EMAIL_LOCAL_LEN.1);
        email.push_str(EMAIL_DOMAIN);
        email
    }

    /// Random letters, count uniform in `[min, max)`; `min` when the range is
    /// empty
    pub fn random_string(&mut self, min: usize, max: usize) -> String {
        let count = if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        };
        (0..count)
            .map(|_| char::from(ALPHABET[self.rng.gen_range(0..ALPHABET.len())]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn letters_only(s: &str) -> bool {
        s.bytes().all(|b| ALPHABET.contains(&b))
    }

    mod length_tests {
        use super::*;

        #[test]
        fn test_first_name_length() {
            let mut generators = Generators::new();
            for _ in 0..200 {
                let name = generators.generate_first_name();
                assert!((3..7).contains(&name.len()), "{name}");
                assert!(letters_only(&name));
            }
        }

        #[test]
        fn test_last_name_length() {
            let mut generators = Generators::new();
            for _ in 0..200 {
                let name = generators.generate_last_name();
                assert!((5..14).contains(&name.len()), "{name}");
            }
        }

        #[test]
        fn test_email_shape() {
            let mut generators = Generators::new();
            for _ in 0..200 {
                let email = generators.generate_email();
                let local = email.strip_suffix(EMAIL_DOMAIN).unwrap();
                assert!((2..10).contains(&local.len()), "{email}");
                assert!(letters_only(local));
            }
        }

        #[test]
        fn test_empty_range_uses_min() {
            let mut generators = Generators::new();
            assert_eq!(generators.random_string(4, 4).len(), 4);
            assert_eq!(generators.random_string(4, 1).len(), 4);
            assert!(generators.random_string(0, 0).is_empty());
        }
    }

    mod variation_tests {
        use super::*;

        #[test]
        fn test_repeated_outputs_differ() {
            let mut generators = Generators::new();
            let emails: std::collections::HashSet<_> =
                (0..20).map(|_| generators.generate_email()).collect();
            assert!(emails.len() > 1);
        }

        #[test]
        fn test_seeded_rng_is_reproducible() {
            let mut a = Generators::with_rng(StdRng::seed_from_u64(7));
            let mut b = Generators::with_rng(StdRng::seed_from_u64(7));
            assert_eq!(a.generate_last_name(), b.generate_last_name());
            assert_eq!(a.generate_email(), b.generate_email());
        }
    }

    proptest! {
        #[test]
        fn prop_length_in_half_open_range(seed in any::<u64>(), min in 0usize..20, span in 1usize..20) {
            let mut generators = Generators::with_rng(StdRng::seed_from_u64(seed));
            let s = generators.random_string(min, min + span);
            prop_assert!(s.len() >= min && s.len() < min + span);
            prop_assert!(letters_only(&s));
        }
    }
}
