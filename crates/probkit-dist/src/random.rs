//! The single injectable source of randomness.
//!
//! Every randomized operation in the toolkit takes `&mut R where R: Rng + ?Sized`.
//! Analyses construct one [`RandomSource`] at startup and pass it everywhere, so
//! that seeding it once fully determines all derived randomness.
//!
//! # Example
//!
//! ```
//! use probkit_dist::{cdf::Cdf, random::RandomSource};
//!
//! let cdf = Cdf::from_values([1, 2, 2, 3, 5]).unwrap();
//!
//! let mut rng1 = RandomSource::seed_from_u64(17);
//! let mut rng2 = RandomSource::seed_from_u64(17);
//! assert_eq!(cdf.sample(10, &mut rng1).unwrap(), cdf.sample(10, &mut rng2).unwrap());
//! ```

use std::{fmt, str::FromStr};

use rand::{
    Rng, RngCore, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic analyses.
///
/// A 128-bit value used to initialize [`RandomSource`]. The same seed always
/// reproduces the same sequence of draws, resamples and permutations.
///
/// Serialized as a 32-character hex string. Parsed from either that hex form
/// or a decimal `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; 16]);

impl Seed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    fn from_hex(hex_str: &str) -> Result<Self, String> {
        if hex_str.len() != 32 {
            return Err(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            ));
        }
        let num = u128::from_str_radix(hex_str, 16)
            .map_err(|e| format!("invalid hex: {hex_str} ({e})"))?;
        Ok(Self(num.to_be_bytes()))
    }

    fn to_hex(self) -> String {
        format!("{:032x}", u128::from_be_bytes(self.0))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl FromStr for Seed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 32 characters is always the hex form, even if every digit is decimal
        if s.len() != 32
            && let Ok(num) = s.parse::<u64>()
        {
            return Ok(Self::from(num));
        }
        Self::from_hex(s)
    }
}

impl Serialize for Seed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `Seed` values with `rng.random()`.
impl Distribution<Seed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Seed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        Seed(seed)
    }
}

/// Seedable pseudo-random source shared by all randomized operations.
///
/// Implements [`RngCore`], so it can be handed to any operation expecting
/// `&mut impl Rng`.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: Pcg32,
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource {
    /// Creates a source seeded from the thread-local generator.
    ///
    /// For reproducible analyses, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a source whose whole draw sequence is determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: Seed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Like [`Self::with_seed`], with a `u64` seed.
    #[must_use]
    pub fn seed_from_u64(seed: u64) -> Self {
        Self::with_seed(Seed::from(seed))
    }

    /// Restarts the draw sequence from `seed`.
    pub fn reseed(&mut self, seed: Seed) {
        self.rng = Pcg32::from_seed(seed.0);
    }

    /// Draws a uniform number in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random()
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng.fill_bytes(dst);
    }
}
