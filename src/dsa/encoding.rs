//! Key-material text import and export
//!
//! The line-oriented format shared with external key stores, one `key=value`
//! per line, lowercase hexadecimal values without a `0x` prefix:
//!
//! ```text
//! p=<hex>
//! q=<hex>
//! g=<hex>
//! x=<hex>
//! y=<hex>
//! ```
//!
//! The public form omits the `x` line. On import, unknown keys are ignored
//! and an absent (or empty) `x` yields public-only key material.

use crate::dsa::keypair::{KeyMaterial, KeyPair};
use crate::dsa::params::DomainParameters;
use crate::{Error, Result};
use num_bigint_dig::BigUint;
use num_traits::Num;
use std::collections::HashMap;

fn parse_hex(text: &str) -> Result<BigUint> {
    BigUint::from_str_radix(text, 16).map_err(|_| Error::ParameterParse)
}

impl KeyMaterial {
    /// Export the full snapshot, including the private exponent when bound
    pub fn export_private(&self) -> String {
        let mut lines = vec![
            format!("p={}", self.params.p.to_str_radix(16)),
            format!("q={}", self.params.q.to_str_radix(16)),
            format!("g={}", self.params.g.to_str_radix(16)),
        ];
        if let Some(x) = &self.keys.x {
            lines.push(format!("x={}", x.to_str_radix(16)));
        }
        lines.push(format!("y={}", self.keys.y.to_str_radix(16)));
        lines.join("\n")
    }

    /// Export only the public values `p`, `q`, `g`, `y`
    pub fn export_public(&self) -> String {
        format!(
            "p={}\nq={}\ng={}\ny={}",
            self.params.p.to_str_radix(16),
            self.params.q.to_str_radix(16),
            self.params.g.to_str_radix(16),
            self.keys.y.to_str_radix(16)
        )
    }

    /// Parse the `key=value` text form into a snapshot
    ///
    /// `p`, `q`, `g`, and `y` must be present and well-formed hex; a missing
    /// or empty `x` produces public-only material. Lines without `=` and
    /// unrecognized keys are skipped. No mathematical consistency check is
    /// performed here; callers that need one can ask the parameters via
    /// [`DomainParameters::is_consistent`].
    pub fn from_text(text: &str) -> Result<Self> {
        let mut fields: HashMap<&str, &str> = HashMap::new();
        for line in text.lines() {
            if let Some((key, value)) = line.split_once('=') {
                fields.insert(key.trim(), value.trim());
            }
        }

        let required = |name: &str| -> Result<BigUint> {
            fields
                .get(name)
                .ok_or(Error::ParameterParse)
                .and_then(|value| parse_hex(value))
        };

        let p = required("p")?;
        let q = required("q")?;
        let g = required("g")?;
        let y = required("y")?;
        let x = match fields.get("x") {
            Some(value) if !value.is_empty() => Some(parse_hex(value)?),
            _ => None,
        };

        Ok(KeyMaterial {
            params: DomainParameters { p, q, g },
            keys: KeyPair { x, y },
        })
    }
}
