use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;

use common::error::{AppError, Res};

pub fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Six-digit one-time passcode. The range keeps it exactly six
/// characters, no padding needed.
pub fn generate_otp() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}

/// Passcodes are stored hashed like passwords; only the emailed copy is
/// plaintext.
pub fn hash_otp(otp: &str) -> Res<String> {
    hash_password(otp)
}

pub fn verify_otp(otp: &str, hash: &str) -> bool {
    verify_password(otp, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..50 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn otp_hash_verifies_only_matching_code() {
        let hash = hash_otp("483920").unwrap();
        assert!(verify_otp("483920", &hash));
        assert!(!verify_otp("000000", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
