#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct PayoutRequestRow {
    pub id: String,
    pub participant_email: String,
    pub amount: i64,
    pub destination_address: String,
    pub status: String,
    pub created_at: String,
    pub processed_at: Option<String>,
}
