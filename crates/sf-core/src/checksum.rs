//! SHA-256 fingerprints for foreign-key edges.

use sha2::{Digest, Sha256};

/// Length of the hex-encoded foreign-key fingerprint.
const FK_HASH_LEN: usize = 16;

/// Compute SHA256 checksum of a string
pub fn compute_checksum(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

/// Stable fingerprint of a foreign-key four-tuple.
///
/// Hashes the canonical reference path, so the same declaration always
/// produces the same hash across runs. Truncated to 16 hex characters;
/// parallel edges between the same tables differ in their column pair and
/// therefore in their hash.
pub fn fk_hash(from_table: &str, from_column: &str, to_table: &str, to_column: &str) -> String {
    let path = reference_path(from_table, from_column, to_table, to_column);
    let mut digest = compute_checksum(&path);
    digest.truncate(FK_HASH_LEN);
    digest
}

/// Canonical `"from_table.from_column=to_table.to_column"` form of one
/// foreign-key relation.
pub fn reference_path(
    from_table: &str,
    from_column: &str,
    to_table: &str,
    to_column: &str,
) -> String {
    format!("{from_table}.{from_column}={to_table}.{to_column}")
}
