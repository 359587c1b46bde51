use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Player ID {player_id} does not belong to academy ID {academy_id}")]
    PlayerNotInAcademy { academy_id: i32, player_id: i32 },
    #[error("Document ID {0} is already verified")]
    AlreadyVerified(i32),
    #[error("Document file size must be positive, got {0}")]
    InvalidFileSize(i64),
}
