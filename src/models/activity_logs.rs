#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct ActivityLogRow {
    pub id: String,
    pub participant_email: String,
    pub action: String,
    pub detail: Option<String>,
    pub created_at: String,
}
