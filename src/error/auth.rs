use entity::sea_orm_active_enums::AdminRole;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is deactivated")]
    AccountInactive,
    #[error("Operation requires role {required:?} but admin has role {actual:?}")]
    InsufficientRole {
        required: AdminRole,
        actual: AdminRole,
    },
}
