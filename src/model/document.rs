use entity::sea_orm_active_enums::DocumentType;

/// Metadata of an uploaded file. The file itself is stored outside the database.
#[derive(Clone, Debug)]
pub struct NewDocument {
    pub player_id: Option<i32>,
    pub file_name: String,
    pub original_name: String,
    pub file_path: String,
    /// Size in bytes, counted against the plan's storage quota
    pub file_size: i64,
    pub mime_type: String,
    pub document_type: DocumentType,
    pub description: Option<String>,
}
