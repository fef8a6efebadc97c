//! Hash helpers sobre blake3. El fingerprint de un template se calcula sobre
//! su JSON canónico, así que dos templates con los mismos pasos y metadata
//! producen el mismo hash aunque difiera el orden de las claves.

use blake3::Hasher;
use serde_json::Value;

use super::to_canonical_json;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

/// Hashea un `Value` canonicalizado.
pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}
