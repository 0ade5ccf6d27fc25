use sha2::{Digest, Sha256};

/// Length of a stored password digest in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// Hash a plaintext password for storage.
///
/// A single unsalted SHA-256 pass, lowercase hex. This matches the format
/// already stored in users' browsers, so it cannot be strengthened without a
/// migration of existing records.
pub fn hash_password(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}

/// True if `value` has the shape of a stored digest.
pub fn is_password_digest(value: &str) -> bool {
    value.len() == DIGEST_HEX_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
