//! Reproducible per-test random seeds.
//!
//! Every test that draws random data gets its own seeds, derived from a stable
//! hash of the test's name and parameters. Two independent seeds are produced
//! so separate random sources inside one test do not correlate.

use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestSeeds {
    pub primary: u64,
    /// 32 bits wide, for consumers that only take 32-bit seeds.
    pub secondary: u32,
}

fn digest_u64(id: &str, salt: &str, params: &[&dyn std::fmt::Display]) -> u64 {
    // length-prefix every field so ("ab","c") and ("a","bc") differ
    fn field(hasher: &mut Sha256, bytes: &[u8]) {
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }

    let mut hasher = Sha256::new();
    field(&mut hasher, id.as_bytes());
    field(&mut hasher, salt.as_bytes());
    for p in params {
        field(&mut hasher, p.to_string().as_bytes());
    }
    let out = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&out[..8]);
    u64::from_le_bytes(bytes)
}

impl TestSeeds {
    /// `id` should name the calling test; `params` are its parameters, if any.
    pub fn derive(id: &str, params: &[&dyn std::fmt::Display]) -> Self {
        Self {
            primary: digest_u64(id, "", params),
            secondary: (digest_u64(id, "#secondary", params) % (1u64 << 32)) as u32,
        }
    }

    pub fn primary_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.primary)
    }

    pub fn secondary_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.secondary as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn stable_for_same_inputs() {
        let a = TestSeeds::derive("render_plan", &[&100, &"greys"]);
        let b = TestSeeds::derive("render_plan", &[&100, &"greys"]);
        assert_eq!(a, b);
        let x: f64 = a.primary_rng().random();
        let y: f64 = b.primary_rng().random();
        assert_eq!(x, y);
    }

    #[test]
    fn differs_across_ids_and_params() {
        let base = TestSeeds::derive("t", &[&1]);
        assert_ne!(base, TestSeeds::derive("u", &[&1]));
        assert_ne!(base, TestSeeds::derive("t", &[&2]));
        assert_ne!(
            TestSeeds::derive("t", &[&"ab", &"c"]),
            TestSeeds::derive("t", &[&"a", &"bc"])
        );
    }

    #[test]
    fn salted_id_does_not_alias_another_test() {
        let plain = TestSeeds::derive("x", &[&3]);
        let salted = TestSeeds::derive("x#secondary", &[&3]);
        assert_ne!(plain.secondary, salted.primary as u32);
    }

    #[test]
    fn primary_and_secondary_are_independent() {
        let s = TestSeeds::derive("independent", &[]);
        assert_ne!(s.primary, s.secondary as u64);
    }
}
