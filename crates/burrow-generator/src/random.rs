use crate::Generator;
use burrow_core::ShortCode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of every generated code.
pub const CODE_LENGTH: usize = 6;

/// Draws 6-character codes uniformly from `[a-zA-Z0-9]`.
///
/// Each character is chosen independently, giving 62^6 possible codes.
#[derive(Debug)]
pub struct RandomGenerator {
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a reproducible generator from a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        // A poisoned lock still holds a usable rng.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let code: String = (0..CODE_LENGTH)
            .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
            .collect();
        ShortCode::new_unchecked(code)
    }
}
