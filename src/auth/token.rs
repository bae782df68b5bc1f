use sha2::{Digest, Sha256};

/// 32 random bytes, hex encoded. Used for session and reset tokens.
pub fn generate() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

/// SHA-256 hex digest. Only digests of tokens are ever stored.
pub fn hash(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
