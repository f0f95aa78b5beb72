//! DSA signature verification
//!
//! Verification is a total predicate over arbitrary untrusted input:
//! malformed signature text, out-of-range components, and failed congruences
//! all resolve to `false`. No error escapes this module.

use crate::dsa::params::DomainParameters;
use crate::dsa::signature::{hash_message, mod_inverse, Signature};
use num_bigint_dig::BigUint;
use num_traits::Zero;
use sha2::{Digest, Sha256};

/// Verify a SHA-256 signature over a message
pub fn verify_signature(
    params: &DomainParameters,
    public_key: &BigUint,
    message: &[u8],
    signature: &Signature,
) -> bool {
    verify_digest::<Sha256>(params, public_key, message, signature)
}

/// Verify a signature with an injected digest capability
pub fn verify_digest<D: Digest>(
    params: &DomainParameters,
    public_key: &BigUint,
    message: &[u8],
    signature: &Signature,
) -> bool {
    let p = &params.p;
    let q = &params.q;

    if signature.r.is_zero()
        || signature.r >= *q
        || signature.s.is_zero()
        || signature.s >= *q
    {
        return false;
    }

    let h = hash_message::<D>(message);
    let w = match mod_inverse(&signature.s, q) {
        Some(w) => w,
        None => return false,
    };
    let u1 = (&h * &w) % q;
    let u2 = (&signature.r * &w) % q;

    let v = ((params.g.modpow(&u1, p) * public_key.modpow(&u2, p)) % p) % q;
    v == signature.r
}

/// Verify the two-line hex signature text form
///
/// Parse failures are swallowed into `false`; callers get a plain yes/no
/// answer for any input text.
pub fn verify_signature_text(
    params: &DomainParameters,
    public_key: &BigUint,
    message: &[u8],
    signature_text: &str,
) -> bool {
    match Signature::from_text(signature_text) {
        Ok(signature) => verify_signature(params, public_key, message, &signature),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsa::keypair::{generate_keypair_with_rng, KeyPair};
    use crate::dsa::params::{generate_parameters_with_rng, DsaParamSpec};
    use crate::dsa::signature::sign_message_with_rng;
    use num_traits::One;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SMALL_SPEC: DsaParamSpec = DsaParamSpec {
        p_bits: 128,
        q_bits: 32,
        mr_rounds: 20,
    };

    fn fixture(seed: u64) -> (DomainParameters, KeyPair) {
        let mut rng = StdRng::seed_from_u64(seed);
        let params = generate_parameters_with_rng(SMALL_SPEC, &mut rng).unwrap();
        let keys = generate_keypair_with_rng(&params, &mut rng).unwrap();
        (params, keys)
    }

    #[test]
    fn test_round_trip_verifies() {
        let (params, keys) = fixture(31);
        let mut rng = StdRng::seed_from_u64(32);
        let x = keys.private().unwrap();

        for message in [&b"hello"[..], b"", b"\xde\xad\xbe\xef"] {
            let signature = sign_message_with_rng(&params, x, message, &mut rng).unwrap();
            assert!(verify_signature(&params, &keys.y, message, &signature));
            assert!(verify_signature_text(
                &params,
                &keys.y,
                message,
                &signature.to_text()
            ));
        }
    }

    #[test]
    fn test_rejects_tampered_message() {
        let (params, keys) = fixture(33);
        let mut rng = StdRng::seed_from_u64(34);
        let x = keys.private().unwrap();

        let signature = sign_message_with_rng(&params, x, b"hello", &mut rng).unwrap();
        assert!(verify_signature(&params, &keys.y, b"hello", &signature));
        assert!(!verify_signature(&params, &keys.y, b"hellp", &signature));
        assert!(!verify_signature(&params, &keys.y, b"hello ", &signature));
        assert!(!verify_signature(&params, &keys.y, b"Hello", &signature));
    }

    #[test]
    fn test_rejects_tampered_components() {
        let (params, keys) = fixture(35);
        let mut rng = StdRng::seed_from_u64(36);
        let x = keys.private().unwrap();

        let signature = sign_message_with_rng(&params, x, b"payload", &mut rng).unwrap();

        let mut bumped_r = signature.clone();
        bumped_r.r = (bumped_r.r + 1u32) % &params.q;
        assert!(!verify_signature(&params, &keys.y, b"payload", &bumped_r));

        let mut bumped_s = signature.clone();
        bumped_s.s = (bumped_s.s + 1u32) % &params.q;
        assert!(!verify_signature(&params, &keys.y, b"payload", &bumped_s));
    }

    #[test]
    fn test_rejects_out_of_range_components() {
        let (params, keys) = fixture(37);
        let mut rng = StdRng::seed_from_u64(38);
        let x = keys.private().unwrap();

        let signature = sign_message_with_rng(&params, x, b"range", &mut rng).unwrap();

        let zero_r = Signature {
            r: BigUint::zero(),
            s: signature.s.clone(),
        };
        assert!(!verify_signature(&params, &keys.y, b"range", &zero_r));

        let oversized_s = Signature {
            r: signature.r.clone(),
            s: params.q.clone() + 1u32,
        };
        assert!(!verify_signature(&params, &keys.y, b"range", &oversized_s));

        let equal_q = Signature {
            r: params.q.clone(),
            s: signature.s,
        };
        assert!(!verify_signature(&params, &keys.y, b"range", &equal_q));
    }

    #[test]
    fn test_rejects_wrong_public_key() {
        let (params, keys) = fixture(39);
        let mut rng = StdRng::seed_from_u64(40);
        let x = keys.private().unwrap();

        let signature = sign_message_with_rng(&params, x, b"owner", &mut rng).unwrap();
        let other = generate_keypair_with_rng(&params, &mut rng).unwrap();
        assert!(!verify_signature(&params, &other.y, b"owner", &signature));
    }

    #[test]
    fn test_text_form_never_panics_on_garbage() {
        let (params, keys) = fixture(41);

        for garbage in [
            "",
            "not-a-signature",
            "1f",
            "1f\n2e\n3d",
            "xyz\nabc",
            "1f\n",
            "\n\n",
            "-1\n2",
        ] {
            assert!(!verify_signature_text(&params, &keys.y, b"msg", garbage));
        }
    }

    #[test]
    fn test_text_form_accepts_trailing_newline() {
        let (params, keys) = fixture(43);
        let mut rng = StdRng::seed_from_u64(44);
        let x = keys.private().unwrap();

        let signature = sign_message_with_rng(&params, x, b"newline", &mut rng).unwrap();
        let text = format!("{}\n", signature.to_text());
        assert!(verify_signature_text(&params, &keys.y, b"newline", &text));
    }

    #[test]
    fn test_verifier_uses_only_public_values() {
        // The verifier signature takes params and y alone; a public-only
        // import is enough to validate signatures from the private holder.
        let (params, keys) = fixture(45);
        let mut rng = StdRng::seed_from_u64(46);
        let signature = sign_message_with_rng(
            &params,
            keys.private().unwrap(),
            b"public check",
            &mut rng,
        )
        .unwrap();

        let public = keys.public_only();
        assert!(public.x.is_none());
        assert!(verify_signature(&params, &public.y, b"public check", &signature));
        assert!(public.y > BigUint::one());
    }
}
