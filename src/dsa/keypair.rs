//! Key pairs and key generation
//!
//! A [`KeyPair`] is always bound to the [`DomainParameters`] it was derived
//! from; the two together form a [`KeyMaterial`] snapshot, the unit of
//! regeneration, import, and export.

use crate::dsa::params::{
    generate_parameters_with_rng, DomainParameters, DsaParamSpec, DSA_1024_160,
};
use crate::dsa::signature::{sign_message_with_rng, Signature};
use crate::dsa::verification::{verify_signature, verify_signature_text};
use crate::{Error, Result};
use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::Zero;
use rand_core::{CryptoRng, OsRng, RngCore};

/// Maximum resampling attempts for the private exponent
pub const MAX_KEYGEN_ATTEMPTS: usize = 100;

/// DSA key pair: private exponent `x` and public value `y = g^x mod p`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// Private exponent, absent for imported public-only material
    pub x: Option<BigUint>,
    /// Public value `y = g^x mod p`
    pub y: BigUint,
}

impl KeyPair {
    /// Borrow the private exponent, or fail if only the public half is bound
    pub fn private(&self) -> Result<&BigUint> {
        self.x.as_ref().ok_or(Error::MissingPrivateKey)
    }

    /// Whether a private exponent is bound
    pub fn has_private(&self) -> bool {
        self.x.is_some()
    }

    /// The public half of this key pair
    pub fn public_only(&self) -> KeyPair {
        KeyPair {
            x: None,
            y: self.y.clone(),
        }
    }
}

/// Generate a key pair using the OS randomness source
pub fn generate_keypair(params: &DomainParameters) -> Result<KeyPair> {
    generate_keypair_with_rng(params, &mut OsRng)
}

/// Generate a key pair with a provided RNG
///
/// The private exponent is drawn with one bit less than `q`, so `0 < x < q`
/// holds without an explicit range reduction; a zero draw is resampled.
pub fn generate_keypair_with_rng<R: RngCore + CryptoRng>(
    params: &DomainParameters,
    rng: &mut R,
) -> Result<KeyPair> {
    let exponent_bits = params.q.bits() - 1;
    for _ in 0..MAX_KEYGEN_ATTEMPTS {
        let x = rng.gen_biguint(exponent_bits);
        if x.is_zero() {
            continue;
        }
        let y = params.g.modpow(&x, &params.p);
        return Ok(KeyPair { x: Some(x), y });
    }
    Err(Error::KeyGenerationFailed)
}

/// One immutable snapshot of domain parameters plus the key pair bound to
/// them
///
/// Regeneration and import always build a whole new value; the engine swaps
/// snapshots atomically and never patches individual fields. A caller that
/// assembles mismatched fields by hand gets a mathematically inconsistent
/// pair, which is not auto-repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    /// Domain parameters the key pair was derived from
    pub params: DomainParameters,
    /// Key pair bound to `params`
    pub keys: KeyPair,
}

impl KeyMaterial {
    /// Generate a fresh snapshot for the standard 1024/160-bit target
    pub fn generate() -> Result<Self> {
        Self::generate_with_rng(DSA_1024_160, &mut OsRng)
    }

    /// Generate a fresh snapshot for a given target with a provided RNG
    pub fn generate_with_rng<R: RngCore + CryptoRng>(
        spec: DsaParamSpec,
        rng: &mut R,
    ) -> Result<Self> {
        let params = generate_parameters_with_rng(spec, rng)?;
        let keys = generate_keypair_with_rng(&params, rng)?;
        Ok(Self { params, keys })
    }

    /// Sign a message under this snapshot using the OS randomness source
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        self.sign_with_rng(message, &mut OsRng)
    }

    /// Sign a message under this snapshot with a provided RNG
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        &self,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Signature> {
        let x = self.keys.private()?;
        sign_message_with_rng(&self.params, x, message, rng)
    }

    /// Verify a signature under this snapshot
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        verify_signature(&self.params, &self.keys.y, message, signature)
    }

    /// Verify two-line hex signature text under this snapshot
    pub fn verify_text(&self, message: &[u8], signature_text: &str) -> bool {
        verify_signature_text(&self.params, &self.keys.y, message, signature_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SMALL_SPEC: DsaParamSpec = DsaParamSpec {
        p_bits: 128,
        q_bits: 32,
        mr_rounds: 20,
    };

    fn small_params(seed: u64) -> DomainParameters {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_parameters_with_rng(SMALL_SPEC, &mut rng).unwrap()
    }

    #[test]
    fn test_keypair_satisfies_invariants() {
        let params = small_params(5);
        let mut rng = StdRng::seed_from_u64(6);
        let keys = generate_keypair_with_rng(&params, &mut rng).unwrap();

        let x = keys.private().unwrap();
        assert!(!x.is_zero());
        assert!(*x < params.q);
        assert_eq!(keys.y, params.g.modpow(x, &params.p));
    }

    #[test]
    fn test_successive_keypairs_differ() {
        let params = small_params(5);
        let mut rng = StdRng::seed_from_u64(6);
        let first = generate_keypair_with_rng(&params, &mut rng).unwrap();
        let second = generate_keypair_with_rng(&params, &mut rng).unwrap();

        assert_ne!(first.x, second.x);
    }

    #[test]
    fn test_keypair_is_deterministic_under_fixed_seed() {
        let params = small_params(5);
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);

        let a = generate_keypair_with_rng(&params, &mut rng_a).unwrap();
        let b = generate_keypair_with_rng(&params, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_public_only_pair_cannot_sign() {
        let mut rng = StdRng::seed_from_u64(9);
        let material = KeyMaterial::generate_with_rng(SMALL_SPEC, &mut rng).unwrap();

        let public = KeyMaterial {
            params: material.params.clone(),
            keys: material.keys.public_only(),
        };
        assert!(!public.keys.has_private());
        assert_eq!(public.keys.private(), Err(Error::MissingPrivateKey));
        assert_eq!(
            public.sign_with_rng(b"message", &mut rng),
            Err(Error::MissingPrivateKey)
        );
    }

    #[test]
    fn test_snapshot_signs_and_verifies() {
        let mut rng = StdRng::seed_from_u64(13);
        let material = KeyMaterial::generate_with_rng(SMALL_SPEC, &mut rng).unwrap();

        let signature = material.sign_with_rng(b"snapshot", &mut rng).unwrap();
        assert!(material.verify(b"snapshot", &signature));
        assert!(!material.verify(b"snapshot!", &signature));
    }
}
