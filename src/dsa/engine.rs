//! Current-key-material engine with atomic snapshot replacement
//!
//! The engine owns the single "current key material" cell that signing and
//! verification read from. Regeneration and import build a complete new
//! [`KeyMaterial`] value and swap one reference; individual fields are never
//! patched in place, so a sign or verify call always sees one consistent
//! snapshot even while another thread replaces the material. In-flight calls
//! keep their snapshot alive through the [`Arc`] they cloned.

use crate::dsa::keypair::KeyMaterial;
use crate::dsa::params::{DsaParamSpec, DSA_1024_160};
use crate::dsa::signature::Signature;
use crate::Result;
use rand_core::{CryptoRng, OsRng, RngCore};
use std::sync::{Arc, RwLock};

/// Swappable holder of the current parameter and key snapshot
#[derive(Debug)]
pub struct DsaEngine {
    current: RwLock<Arc<KeyMaterial>>,
}

impl DsaEngine {
    /// Wrap existing key material
    pub fn new(material: KeyMaterial) -> Self {
        Self {
            current: RwLock::new(Arc::new(material)),
        }
    }

    /// Generate a fresh engine for the standard 1024/160-bit target
    pub fn generate() -> Result<Self> {
        KeyMaterial::generate().map(Self::new)
    }

    /// Generate a fresh engine for a given target with a provided RNG
    pub fn generate_with_rng<R: RngCore + CryptoRng>(
        spec: DsaParamSpec,
        rng: &mut R,
    ) -> Result<Self> {
        KeyMaterial::generate_with_rng(spec, rng).map(Self::new)
    }

    /// Read the current snapshot
    pub fn snapshot(&self) -> Arc<KeyMaterial> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Atomically install a whole new snapshot, returning it
    pub fn replace(&self, material: KeyMaterial) -> Arc<KeyMaterial> {
        self.install(Arc::new(material))
    }

    /// Regenerate for the standard target and swap the snapshot in
    pub fn regenerate(&self) -> Result<Arc<KeyMaterial>> {
        self.regenerate_with_rng(DSA_1024_160, &mut OsRng)
    }

    /// Regenerate with a provided RNG and swap the snapshot in
    ///
    /// The search runs outside the lock; readers keep serving the old
    /// snapshot until the new one is complete.
    pub fn regenerate_with_rng<R: RngCore + CryptoRng>(
        &self,
        spec: DsaParamSpec,
        rng: &mut R,
    ) -> Result<Arc<KeyMaterial>> {
        let material = KeyMaterial::generate_with_rng(spec, rng)?;
        Ok(self.install(Arc::new(material)))
    }

    /// Parse key-material text and swap the snapshot in
    pub fn import_text(&self, text: &str) -> Result<Arc<KeyMaterial>> {
        let material = KeyMaterial::from_text(text)?;
        Ok(self.install(Arc::new(material)))
    }

    /// Export the current snapshot including the private exponent
    pub fn export_private(&self) -> String {
        self.snapshot().export_private()
    }

    /// Export the public values of the current snapshot
    pub fn export_public(&self) -> String {
        self.snapshot().export_public()
    }

    /// Sign a message under the current snapshot with OS randomness
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        self.snapshot().sign(message)
    }

    /// Sign a message under the current snapshot with a provided RNG
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        &self,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Signature> {
        self.snapshot().sign_with_rng(message, rng)
    }

    /// Verify a signature under the current snapshot
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.snapshot().verify(message, signature)
    }

    /// Verify two-line hex signature text under the current snapshot
    pub fn verify_text(&self, message: &[u8], signature_text: &str) -> bool {
        self.snapshot().verify_text(message, signature_text)
    }

    fn install(&self, fresh: Arc<KeyMaterial>) -> Arc<KeyMaterial> {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = fresh.clone();
        fresh
    }
}
