//! Argon2id password hashes stored on user records.
//!
//! The stored form is a PHC string such as
//! `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`. Cost parameters travel
//! with each record, so verification keeps working after the defaults move.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

const ALGORITHM: &str = "argon2id";

/// Errors raised when hashing a password or parsing a stored hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The value is not a PHC string carrying a salt and hash.
    #[error("password hash is not a valid PHC string: {0}")]
    Malformed(String),
    /// The PHC algorithm identifier is not `argon2id`.
    #[error("unsupported password hash algorithm `{0}`")]
    UnsupportedAlgorithm(String),
    /// Argon2 refused the input or parameters.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Validated Argon2id PHC string.
///
/// # Examples
/// ```
/// use salad_backend::domain::PasswordHash;
///
/// # fn main() -> Result<(), salad_backend::domain::PasswordHashError> {
/// let hash = PasswordHash::generate("s3cret")?;
/// let parsed: PasswordHash = hash.to_string().parse()?;
/// assert!(parsed.verify("s3cret"));
/// assert!(!parsed.verify("guess"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt and the default Argon2id cost.
    pub fn generate(password: &str) -> Result<Self, PasswordHashError> {
        Self::generate_with(password, Params::default())
    }

    /// Hash `password` with explicit Argon2id cost parameters.
    pub fn generate_with(password: &str, params: Params) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| PasswordHashError::Hashing(err.to_string()))
    }

    /// Check `password` using the parameters recorded in the hash.
    pub fn verify(&self, password: &str) -> bool {
        password_hash::PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

impl std::str::FromStr for PasswordHash {
    type Err = PasswordHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = password_hash::PasswordHash::new(s)
            .map_err(|err| PasswordHashError::Malformed(err.to_string()))?;
        if parsed.algorithm.as_str() != ALGORITHM {
            return Err(PasswordHashError::UnsupportedAlgorithm(
                parsed.algorithm.as_str().to_owned(),
            ));
        }
        if parsed.salt.is_none() || parsed.hash.is_none() {
            return Err(PasswordHashError::Malformed("missing salt or hash".to_owned()));
        }
        Ok(Self(s.to_owned()))
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cheap() -> Params {
        Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
            .expect("minimum parameters are valid")
    }

    #[rstest]
    fn default_hashes_are_memory_hard_argon2id() {
        let hash = PasswordHash::generate("password").expect("hash");
        let stored = hash.to_string();

        assert!(
            stored.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"),
            "unexpected PHC prefix: {stored}"
        );
        assert!(hash.verify("password"));
        assert!(!hash.verify("Password"));
    }

    #[rstest]
    fn stored_form_round_trips_and_keeps_its_parameters(cheap: Params) {
        let hash = PasswordHash::generate_with("s3cret", cheap).expect("hash");
        let parsed: PasswordHash = hash.to_string().parse().expect("parses");

        assert_eq!(parsed, hash);
        assert!(parsed.to_string().contains("m=8,t=1,p=1"));
        assert!(parsed.verify("s3cret"));
        assert!(!parsed.verify("guess"));
    }

    #[rstest]
    fn salts_differ_between_hashes(cheap: Params) {
        let first = PasswordHash::generate_with("same", cheap.clone()).expect("hash");
        let second = PasswordHash::generate_with("same", cheap).expect("hash");
        assert_ne!(first, second);
        assert!(first.verify("same") && second.verify("same"));
    }

    #[rstest]
    #[case::bare_digest("5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8")]
    #[case::legacy_salted_digest("sha256$00$00")]
    #[case::missing_hash("$argon2id$v=19$m=8,t=1,p=1")]
    fn rejects_values_that_are_not_argon2_phc_strings(#[case] raw: &str) {
        let err = raw.parse::<PasswordHash>().expect_err("malformed");
        assert!(matches!(err, PasswordHashError::Malformed(_)), "{err:?}");
    }

    #[rstest]
    fn rejects_other_argon2_variants(cheap: Params) {
        let argon2i = PasswordHash::generate_with("pw", cheap)
            .expect("hash")
            .to_string()
            .replacen("$argon2id$", "$argon2i$", 1);
        let err = argon2i.parse::<PasswordHash>().expect_err("unsupported");
        assert_eq!(err, PasswordHashError::UnsupportedAlgorithm("argon2i".to_owned()));
    }

    #[rstest]
    fn debug_output_hides_the_hash(cheap: Params) {
        let hash = PasswordHash::generate_with("secret", cheap).expect("hash");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }
}
