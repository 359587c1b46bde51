use serde_json::Value as JsonValue;

/// Audit log entry to append.
#[derive(Clone, Debug, Default)]
pub struct NewActivity {
    pub academy_id: Option<i32>,
    pub admin_id: Option<i32>,
    pub action: String,
    pub description: String,
    pub metadata: Option<JsonValue>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl NewActivity {
    pub fn new(action: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn academy(mut self, academy_id: i32) -> Self {
        self.academy_id = Some(academy_id);
        self
    }

    pub fn admin(mut self, admin_id: i32) -> Self {
        self.admin_id = Some(admin_id);
        self
    }

    pub fn metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
