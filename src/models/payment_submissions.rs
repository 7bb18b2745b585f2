#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct PaymentSubmissionRow {
    pub id: String,
    pub participant_email: String,
    pub amount: i64,
    pub method: String,
    pub screenshot_ref: Option<String>,
    pub status: String,
    pub review_note: Option<String>,
    pub reviewed_by: Option<String>,
    pub created_at: String,
    pub reviewed_at: Option<String>,
}
