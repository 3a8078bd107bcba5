//! Content-identity digest of input text
//!
//! Output files are named after the record they contain plus a short
//! digest of the report that produced them, so distinct reports never
//! overwrite each other's output.

use sha2::{Digest, Sha256};

/// Number of digest characters used in output names
pub const SHORT_DIGEST_LEN: usize = 8;

/// Lowercase hex SHA-256 of `text`
pub fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// The first [`SHORT_DIGEST_LEN`] characters of [`sha256_hex`]
pub fn short_digest(text: &str) -> String {
    let mut digest = sha256_hex(text);
    digest.truncate(SHORT_DIGEST_LEN);
    digest
}
