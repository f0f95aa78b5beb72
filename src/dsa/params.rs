//! DSA parameter sets and domain-parameter generation
//!
//! This module contains the parameter-set targets and the prime-order
//! subgroup search: a prime `q`, a prime modulus `p` with `q | (p-1)`, and a
//! generator `g` of the order-`q` subgroup of `(Z/pZ)*`.

use crate::{Error, Result};
use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::{BigUint, RandBigInt, RandPrime};
use num_traits::{One, Zero};
use rand_core::{CryptoRng, OsRng, RngCore};

/// Maximum draws of a candidate subgroup order `q`
pub const MAX_SUBGROUP_ATTEMPTS: usize = 1_000;

/// Maximum draws of a candidate modulus `p = k*q + 1`
///
/// Prime density near 2^1024 makes the expected draw count a few hundred;
/// the ceiling turns a degenerate randomness source into an explicit error
/// instead of a hang.
pub const MAX_MODULUS_ATTEMPTS: usize = 100_000;

/// Maximum draws of a candidate generator seed `h`
pub const MAX_GENERATOR_ATTEMPTS: usize = 1_000;

/// Miller-Rabin rounds used by the consistency self-check
pub const CONSISTENCY_MR_ROUNDS: usize = 20;

/// DSA parameter-set specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DsaParamSpec {
    /// Bit length of the prime modulus `p`
    pub p_bits: usize,
    /// Bit length of the prime subgroup order `q`
    pub q_bits: usize,
    /// Miller-Rabin rounds for the modulus primality test
    pub mr_rounds: usize,
}

/// The standard 1024-bit modulus / 160-bit subgroup parameter target
pub const DSA_1024_160: DsaParamSpec = DsaParamSpec {
    p_bits: 1024,
    q_bits: 160,
    mr_rounds: 40,
};

impl DsaParamSpec {
    /// Check that the specification describes a generatable parameter set
    pub const fn is_valid(self) -> bool {
        self.q_bits >= 2 && self.q_bits < self.p_bits && self.mr_rounds > 0
    }

    /// Bit length of the multiplier `k` in `p = k*q + 1`
    pub const fn multiplier_bits(self) -> usize {
        self.p_bits - self.q_bits
    }
}

/// DSA domain parameters: prime modulus `p`, prime subgroup order `q`, and
/// generator `g` of the order-`q` subgroup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParameters {
    /// Prime modulus
    pub p: BigUint,
    /// Prime subgroup order, divides `p - 1`
    pub q: BigUint,
    /// Generator with `g^q mod p == 1` and `1 < g < p`
    pub g: BigUint,
}

impl DomainParameters {
    /// Check the structural invariants: `p` and `q` probable primes,
    /// `q | (p-1)`, `1 < g < p`, and `g^q mod p == 1`
    ///
    /// Bit-length targets are a property of the generating [`DsaParamSpec`],
    /// not of the value itself, and are not checked here.
    pub fn is_consistent(&self) -> bool {
        let one = BigUint::one();
        if self.g <= one || self.g >= self.p {
            return false;
        }
        if self.q.is_zero() || !((self.p.clone() - 1u32) % &self.q).is_zero() {
            return false;
        }
        if !probably_prime(&self.q, CONSISTENCY_MR_ROUNDS)
            || !probably_prime(&self.p, CONSISTENCY_MR_ROUNDS)
        {
            return false;
        }
        self.g.modpow(&self.q, &self.p) == one
    }
}

/// Generate domain parameters for the standard 1024/160-bit target using the
/// OS randomness source
pub fn generate_parameters() -> Result<DomainParameters> {
    generate_parameters_with_rng(DSA_1024_160, &mut OsRng)
}

/// Generate domain parameters for a given target with a provided RNG
pub fn generate_parameters_with_rng<R: RngCore + CryptoRng>(
    spec: DsaParamSpec,
    rng: &mut R,
) -> Result<DomainParameters> {
    if !spec.is_valid() {
        return Err(Error::InvalidParameter);
    }

    let q = sample_subgroup_order(spec, rng)?;
    let p = sample_modulus(spec, &q, rng)?;
    let g = sample_generator(spec, &p, &q, rng)?;

    Ok(DomainParameters { p, q, g })
}

/// Draw a probable prime `q` of exactly `spec.q_bits` bits
fn sample_subgroup_order<R: RngCore + CryptoRng>(
    spec: DsaParamSpec,
    rng: &mut R,
) -> Result<BigUint> {
    for _ in 0..MAX_SUBGROUP_ATTEMPTS {
        let q = rng.gen_prime(spec.q_bits);
        if q.bits() == spec.q_bits {
            return Ok(q);
        }
    }
    Err(Error::ParameterGenerationFailed)
}

/// Draw `k` until `p = k*q + 1` is a probable prime of exactly `spec.p_bits`
/// bits
fn sample_modulus<R: RngCore + CryptoRng>(
    spec: DsaParamSpec,
    q: &BigUint,
    rng: &mut R,
) -> Result<BigUint> {
    for _ in 0..MAX_MODULUS_ATTEMPTS {
        let k = rng.gen_biguint(spec.multiplier_bits());
        let p = k * q + 1u32;
        if p.bits() == spec.p_bits && probably_prime(&p, spec.mr_rounds) {
            return Ok(p);
        }
    }
    Err(Error::ParameterGenerationFailed)
}

/// Draw `h` until `g = h^((p-1)/q) mod p` lands outside the trivial subgroup
fn sample_generator<R: RngCore + CryptoRng>(
    spec: DsaParamSpec,
    p: &BigUint,
    q: &BigUint,
    rng: &mut R,
) -> Result<BigUint> {
    let exponent = (p.clone() - 1u32) / q;
    for _ in 0..MAX_GENERATOR_ATTEMPTS {
        let h = rng.gen_biguint(spec.p_bits - 1);
        let g = h.modpow(&exponent, p);
        if g > BigUint::one() {
            return Ok(g);
        }
    }
    Err(Error::ParameterGenerationFailed)
}
