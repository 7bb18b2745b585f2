#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct SupportTicketRow {
    pub id: String,
    pub participant_email: String,
    pub category: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub admin_response: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
