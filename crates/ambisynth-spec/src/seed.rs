//! Seed normalization.
//!
//! Profile documents accept seeds as JSON integers or strings. Generators
//! need a `u32`. Small non-negative integers (or strings that spell one)
//! pass through unchanged; anything else is hashed with BLAKE3 so that any
//! seed a user types reproducibly maps to the same noise.

use serde_json::Value;

/// Returns true if a raw seed value counts as "not set".
pub fn is_empty_seed(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Resolves a raw seed value to a `u32`, or `None` if it is empty.
pub fn resolve_seed(value: &Value) -> Option<u32> {
    if is_empty_seed(value) {
        return None;
    }
    let seed = match value {
        Value::Number(n) => match n.as_u64().and_then(|v| u32::try_from(v).ok()) {
            Some(seed) => seed,
            None => hash_seed(&n.to_string()),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<u32>() {
                Ok(seed) => seed,
                Err(_) => hash_seed(trimmed),
            }
        }
        other => hash_seed(&other.to_string()),
    };
    Some(seed)
}

/// Derives a `u32` seed from arbitrary text.
///
/// BLAKE3 of the UTF-8 bytes, truncated to the first 4 bytes little-endian.
pub fn hash_seed(text: &str) -> u32 {
    let hash = blake3::hash(text.as_bytes());
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
