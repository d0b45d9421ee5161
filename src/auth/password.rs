/// Hash a plaintext password for storage.
pub fn hash(plaintext: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plaintext, cost)
}

/// Verify plaintext against a stored hash; constant-time via bcrypt.
pub fn verify(plaintext: &str, stored_hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(plaintext, stored_hash)
}
