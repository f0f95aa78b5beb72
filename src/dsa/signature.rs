//! DSA signature generation
//!
//! Signatures are produced fresh per call from an ephemeral nonce `k`; the
//! nonce is never cached or reused, since a repeated `k` lets anyone solve
//! for the private exponent. The classical resampling rules apply: `k` is
//! drawn from `[1, q-1]`, and both `r = 0` and `s = 0` trigger a redraw.

use crate::dsa::params::DomainParameters;
use crate::{Error, Result};
use num_bigint_dig::{BigUint, ModInverse, RandBigInt};
use num_traits::{Num, One, Zero};
use rand_core::{CryptoRng, OsRng, RngCore};
use sha2::{Digest, Sha256};

/// Maximum nonce resampling attempts per signing call
pub const MAX_SIGN_ATTEMPTS: usize = 100;

/// DSA signature: the pair `(r, s)` with `0 < r < q` and `0 < s < q`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// First signature component, `(g^k mod p) mod q`
    pub r: BigUint,
    /// Second signature component, `k^-1 (h + x*r) mod q`
    pub s: BigUint,
}

impl Signature {
    /// Render as the two-line lowercase-hex text format: `r`, a line break,
    /// then `s`
    pub fn to_text(&self) -> String {
        format!("{}\n{}", self.r.to_str_radix(16), self.s.to_str_radix(16))
    }

    /// Parse the two-line hex text format
    ///
    /// Anything other than exactly two hexadecimal tokens separated by a
    /// line break is [`Error::InvalidSignatureFormat`]. Range checks belong
    /// to the verifier, not the parser.
    pub fn from_text(text: &str) -> Result<Self> {
        let tokens: Vec<&str> = text.trim().lines().map(str::trim).collect();
        if tokens.len() != 2 {
            return Err(Error::InvalidSignatureFormat);
        }
        let r = BigUint::from_str_radix(tokens[0], 16)
            .map_err(|_| Error::InvalidSignatureFormat)?;
        let s = BigUint::from_str_radix(tokens[1], 16)
            .map_err(|_| Error::InvalidSignatureFormat)?;
        Ok(Self { r, s })
    }
}

/// Digest a message and interpret the output as a non-negative big-endian
/// integer
///
/// The raw message bytes are hashed directly; no text decoding happens on
/// the way in.
pub fn hash_message<D: Digest>(message: &[u8]) -> BigUint {
    let digest = D::digest(message);
    BigUint::from_bytes_be(digest.as_slice())
}

/// Modular inverse of `value` with respect to `modulus`, if it exists
pub(crate) fn mod_inverse(value: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    value
        .clone()
        .mod_inverse(modulus)
        .and_then(|inverse| inverse.to_biguint())
}

/// Sign a message with SHA-256 using the OS randomness source
pub fn sign_message(
    params: &DomainParameters,
    private_key: &BigUint,
    message: &[u8],
) -> Result<Signature> {
    sign_message_with_rng(params, private_key, message, &mut OsRng)
}

/// Sign a message with SHA-256 and a provided RNG
pub fn sign_message_with_rng<R: RngCore + CryptoRng>(
    params: &DomainParameters,
    private_key: &BigUint,
    message: &[u8],
    rng: &mut R,
) -> Result<Signature> {
    sign_digest_with_rng::<Sha256, R>(params, private_key, message, rng)
}

/// Sign a message with an injected digest capability and a provided RNG
pub fn sign_digest_with_rng<D: Digest, R: RngCore + CryptoRng>(
    params: &DomainParameters,
    private_key: &BigUint,
    message: &[u8],
    rng: &mut R,
) -> Result<Signature> {
    let p = &params.p;
    let q = &params.q;
    let h = hash_message::<D>(message);
    let one = BigUint::one();

    for _ in 0..MAX_SIGN_ATTEMPTS {
        let k = rng.gen_biguint_range(&one, q);
        let r = params.g.modpow(&k, p) % q;
        if r.is_zero() {
            continue;
        }

        // Guaranteed to exist for prime q and 0 < k < q; a failure here
        // means the parameters are corrupted.
        let k_inv = mod_inverse(&k, q).ok_or(Error::ModularInverseUndefined)?;
        let s = (&k_inv * ((&h + private_key * &r) % q)) % q;
        if s.is_zero() {
            continue;
        }

        return Ok(Signature { r, s });
    }

    Err(Error::SigningFailed)
}
