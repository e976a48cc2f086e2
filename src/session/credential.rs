use anyhow::{Result, anyhow};
use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand_core::OsRng;

/// The shared admin secret, kept only as an argon2 hash once constructed.
///
/// This is a single static secret with no per-user identity. It gates
/// in-session views only; nothing server-side beyond the visitor's own session
/// is protected by it.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    password_hash: String,
}

impl AdminCredential {
    pub fn from_secret(secret: &str) -> Result<Self> {
        let password_hash = hash_password(secret)
            .map_err(|err| anyhow!("failed to hash admin secret: {err}"))?;
        Ok(Self { password_hash })
    }

    /// Exact, case-sensitive match against the configured secret.
    pub fn verify(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.password_hash)
    }
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed = PasswordHash::new(password_hash);
    match parsed {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_exact_secret_matches() {
        let credential = AdminCredential::from_secret("VIS-BEST").unwrap();

        assert!(credential.verify("VIS-BEST"));
        assert!(!credential.verify("vis-best"));
        assert!(!credential.verify("VIS-BEST "));
        assert!(!credential.verify(""));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
