//! Classical DSA implementation
//!
//! This module provides the complete DSA engine: prime-order subgroup search,
//! key derivation, signature generation, and total signature verification,
//! together with the text formats shared with external key and signature
//! stores.

pub mod encoding;
pub mod engine;
pub mod keypair;
pub mod params;
pub mod signature;
pub mod verification;

// Re-export key types and functions
pub use engine::DsaEngine;
pub use keypair::{generate_keypair, generate_keypair_with_rng, KeyMaterial, KeyPair};
pub use params::{
    generate_parameters, generate_parameters_with_rng, DomainParameters, DsaParamSpec, DSA_1024_160,
};
pub use signature::{
    hash_message, sign_digest_with_rng, sign_message, sign_message_with_rng, Signature,
};
pub use verification::{verify_digest, verify_signature, verify_signature_text};
