use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The fixed 62-character alphanumeric alphabet all random strings draw from.
pub const ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random test-data generator over an explicit RNG handle.
///
/// Not cryptographically secure; suitable only for producing throwaway form
/// input.
pub struct DataGen {
    rng: StdRng,
}

impl DataGen {
    /// Entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible suites.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `length` characters drawn uniformly from [`ALPHABET`].
    pub fn random_string(&mut self, length: usize) -> String {
        (0..length)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// Syntactically valid, semantically meaningless address:
    /// `<8 chars>@<5 chars>.com`.
    pub fn random_email(&mut self) -> String {
        let username = self.random_string(8);
        let domain = self.random_string(5);
        format!("{username}@{domain}.com")
    }
}

impl Default for DataGen {
    fn default() -> Self {
        Self::new()
    }
}
