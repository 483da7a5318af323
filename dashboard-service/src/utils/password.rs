use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Plaintext password. Deliberately has no `Display` impl so it cannot
/// end up in logs by accident.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub fn new(password: String) -> Self {
        Self(password)
    }

    /// Hash with Argon2id and a fresh random salt. The salt is encoded
    /// into the resulting PHC string.
    pub fn hash(&self) -> Result<PasswordHashString, anyhow::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(self.0.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();

        Ok(PasswordHashString(hash))
    }
}

/// A stored Argon2 hash in PHC string format.
#[derive(Debug, Clone)]
pub struct PasswordHashString(String);

impl PasswordHashString {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Constant-time check of `password` against this hash.
    pub fn verify(&self, password: &Password) -> Result<(), anyhow::Error> {
        let parsed = PasswordHash::new(&self.0)
            .map_err(|e| anyhow::anyhow!("Invalid password hash format: {}", e))?;

        Argon2::default()
            .verify_password(password.0.as_bytes(), &parsed)
            .map_err(|_| anyhow::anyhow!("Password verification failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_produces_argon2_phc_string() {
        let password = Password::new("mySecurePassword123".to_string());
        let hash = password.hash().expect("Failed to hash password");

        assert!(hash.as_str().starts_with("$argon2"));
    }

    #[test]
    fn verify_accepts_correct_password() {
        let password = Password::new("mySecurePassword123".to_string());
        let hash = password.hash().expect("Failed to hash password");

        assert!(hash.verify(&password).is_ok());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = Password::new("mySecurePassword123".to_string());
        let hash = password.hash().expect("Failed to hash password");

        let wrong = Password::new("wrongPassword".to_string());
        assert!(hash.verify(&wrong).is_err());
    }

    #[test]
    fn same_password_hashes_to_distinct_strings() {
        let password = Password::new("mySecurePassword123".to_string());
        let first = password.hash().expect("Failed to hash password");
        let second = password.hash().expect("Failed to hash password");

        // Random salt means distinct hashes for the same input
        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify(&password).is_ok());
        assert!(second.verify(&password).is_ok());
    }
}
