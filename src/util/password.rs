use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{auth::AuthError, Error};

/// Well-formed Argon2id hash with the default parameters that no password matches.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hash `password` with Argon2id and a random salt, returning the PHC string.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

/// Verify `password` against a stored PHC hash.
///
/// A mismatch is reported as [`AuthError::InvalidCredentials`]; a stored value that
/// isn't a valid hash is a [`Error::PasswordHash`].
pub fn verify_password(password: &str, hash: &str) -> Result<(), Error> {
    let parsed = PasswordHash::new(hash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials.into())
}

/// Spend the same Argon2 work as [`verify_password`] for an account that doesn't exist.
///
/// Always returns [`AuthError::InvalidCredentials`] so unknown and known emails answer
/// alike.
pub fn reject_unknown_account(password: &str) -> Error {
    let _ = verify_password(password, DUMMY_HASH);

    AuthError::InvalidCredentials.into()
}
