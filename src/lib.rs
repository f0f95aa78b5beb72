#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Yamata: a classical DSA signature library
//!
//! This library implements the Digital Signature Algorithm over multiprecision
//! modular arithmetic, with injected randomness and hashing capabilities for
//! deterministic, reproducible testing.

pub mod dsa;

// Re-export main types and functions
pub use dsa::{
    DomainParameters, DsaParamSpec, DSA_1024_160,
    generate_parameters, generate_parameters_with_rng,
    KeyPair, KeyMaterial, generate_keypair, generate_keypair_with_rng,
    Signature, sign_message, sign_message_with_rng, sign_digest_with_rng,
    hash_message,
    verify_signature, verify_digest, verify_signature_text,
    DsaEngine,
};

/// Common error types for the library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Invalid parameter specification provided
    InvalidParameter,
    /// Domain-parameter search exhausted its iteration ceiling
    ParameterGenerationFailed,
    /// Key generation failed
    KeyGenerationFailed,
    /// Signature generation failed
    SigningFailed,
    /// Signing requested without a bound private exponent
    MissingPrivateKey,
    /// Malformed key-material text
    ParameterParse,
    /// Signature text is not exactly two hexadecimal tokens
    InvalidSignatureFormat,
    /// A required modular inverse does not exist
    ModularInverseUndefined,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidParameter => write!(f, "Invalid parameter specification"),
            Error::ParameterGenerationFailed => write!(f, "Domain-parameter generation failed"),
            Error::KeyGenerationFailed => write!(f, "Key generation failed"),
            Error::SigningFailed => write!(f, "Signature generation failed"),
            Error::MissingPrivateKey => write!(f, "No private key available"),
            Error::ParameterParse => write!(f, "Malformed key-material text"),
            Error::InvalidSignatureFormat => write!(f, "Invalid signature format"),
            Error::ModularInverseUndefined => write!(f, "Modular inverse does not exist"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for operations that may fail
pub type Result<T> = core::result::Result<T, Error>;
