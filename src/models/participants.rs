#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ParticipantRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub wallet_address: String,
    pub password_hash: String,
    pub status: String,
    pub activation_fee_paid: i64,
    pub activation_deadline: String,
    pub wallet_balance: i64,
    pub total_contributed: i64,
    pub risk_score: i64,
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub referral_count: i64,
    pub referral_earnings: i64,
    pub created_at: String,
}
