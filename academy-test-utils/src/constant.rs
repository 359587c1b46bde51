//! Placeholder values shared by fixtures and tests.

/// Stored in the password column of fixture rows. It is not a valid argon2
/// hash, so fixture accounts can never authenticate.
pub static TEST_PASSWORD_PLACEHOLDER: &str = "not-a-password-hash";

/// Plaintext password used by tests that register accounts through services.
pub static TEST_PASSWORD: &str = "correct horse battery staple";

/// One mebibyte, handy for storage quota arithmetic.
pub const MIB: i64 = 1024 * 1024;
