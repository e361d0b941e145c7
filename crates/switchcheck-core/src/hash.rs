use xxhash_rust::xxh64::xxh64;

const BASE62_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encode a u64 value as a base62 string (11 chars, zero-padded).
fn base62_encode(mut value: u64) -> String {
    let mut result = Vec::with_capacity(11);
    while value > 0 {
        result.push(BASE62_CHARS[(value % 62) as usize] as char);
        value /= 62;
    }
    while result.len() < 11 {
        result.push('0');
    }
    result.iter().rev().collect()
}

/// Fingerprint of a serialized catalog: base62(xxhash64(serialized)).
///
/// The serialized form has sorted keys, so equal catalogs always hash equal.
pub fn fingerprint_catalog(serialized: &str) -> String {
    base62_encode(xxh64(serialized.as_bytes(), 0))
}
