use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::participant_repo;
use crate::models::ParticipantRow;

// The public shape of a participant record: everything the dashboard shows,
// never the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantView {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub wallet_address: String,
    pub status: String,
    pub activation_fee_paid: bool,
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

pub fn participant_view(row: &ParticipantRow) -> ParticipantView {
    ParticipantView {
        id: row.id.clone(),
        full_name: row.full_name.clone(),
        email: row.email.clone(),
        phone: row.phone.clone(),
        wallet_address: row.wallet_address.clone(),
        status: row.status.clone(),
        activation_fee_paid: row.activation_fee_paid == 1,
        activation_deadline: row.activation_deadline.clone(),
        wallet_balance: row.wallet_balance,
        total_contributed: row.total_contributed,
        risk_score: row.risk_score,
        referral_code: row.referral_code.clone(),
        referred_by: row.referred_by.clone(),
        referral_count: row.referral_count,
        referral_earnings: row.referral_earnings,
        created_at: row.created_at.clone(),
    }
}

pub async fn load_profile(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Option<ParticipantView>> {
    let Some(row) = participant_repo::find_by_email(pool, &email.trim().to_lowercase()).await?
    else {
        return Ok(None);
    };
    Ok(Some(participant_view(&row)))
}

pub async fn list_all_views(pool: &SqlitePool) -> sqlx::Result<Vec<ParticipantView>> {
    let rows = participant_repo::list_all(pool).await?;
    Ok(rows.iter().map(participant_view).collect())
}
