use sqlx::SqlitePool;

use crate::models::ParticipantRow;

const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO participants (
  id,
  full_name,
  email,
  phone,
  wallet_address,
  password_hash,
  status,
  activation_fee_paid,
  activation_deadline,
  wallet_balance,
  total_contributed,
  risk_score,
  referral_code,
  referred_by,
  referral_count,
  referral_earnings,
  created_at
) VALUES (?, ?, ?, ?, ?, ?, 'pending', 0, ?, 0, 0, 0, ?, ?, 0, 0, ?)
"#;

pub struct NewParticipant<'a> {
    pub id: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub wallet_address: &'a str,
    pub password_hash: &'a str,
    pub activation_deadline: &'a str,
    pub referral_code: &'a str,
    pub referred_by: Option<&'a str>,
    pub created_at: &'a str,
}

pub async fn insert_participant(
    pool: &SqlitePool,
    participant: NewParticipant<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PARTICIPANT)
        .bind(participant.id)
        .bind(participant.full_name)
        .bind(participant.email)
        .bind(participant.phone)
        .bind(participant.wallet_address)
        .bind(participant.password_hash)
        .bind(participant.activation_deadline)
        .bind(participant.referral_code)
        .bind(participant.referred_by)
        .bind(participant.created_at)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_FIND_BY_EMAIL: &str = r#"
SELECT
    id,
    full_name,
    email,
    phone,
    wallet_address,
    password_hash,
    status,
    activation_fee_paid,
    activation_deadline,
    wallet_balance,
    total_contributed,
    risk_score,
    referral_code,
    referred_by,
    referral_count,
    referral_earnings,
    created_at
FROM participants
WHERE email = ?
LIMIT 1
"#;

pub async fn find_by_email(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Option<ParticipantRow>> {
    sqlx::query_as::<_, ParticipantRow>(SQL_FIND_BY_EMAIL)
        .bind(email)
        .fetch_optional(pool)
        .await
}

const SQL_FIND_BY_REFERRAL_CODE: &str = r#"
SELECT
    id,
    full_name,
    email,
    phone,
    wallet_address,
    password_hash,
    status,
    activation_fee_paid,
    activation_deadline,
    wallet_balance,
    total_contributed,
    risk_score,
    referral_code,
    referred_by,
    referral_count,
    referral_earnings,
    created_at
FROM participants
WHERE referral_code = ?
LIMIT 1
"#;

pub async fn find_by_referral_code(
    pool: &SqlitePool,
    referral_code: &str,
) -> sqlx::Result<Option<ParticipantRow>> {
    sqlx::query_as::<_, ParticipantRow>(SQL_FIND_BY_REFERRAL_CODE)
        .bind(referral_code)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_ALL: &str = r#"
SELECT
    id,
    full_name,
    email,
    phone,
    wallet_address,
    password_hash,
    status,
    activation_fee_paid,
    activation_deadline,
    wallet_balance,
    total_contributed,
    risk_score,
    referral_code,
    referred_by,
    referral_count,
    referral_earnings,
    created_at
FROM participants
ORDER BY created_at DESC
"#;

pub async fn list_all(pool: &SqlitePool) -> sqlx::Result<Vec<ParticipantRow>> {
    sqlx::query_as::<_, ParticipantRow>(SQL_LIST_ALL)
        .fetch_all(pool)
        .await
}

pub async fn count_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await
}

pub async fn count_by_phone(pool: &SqlitePool, phone: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE phone = ?")
        .bind(phone)
        .fetch_one(pool)
        .await
}

pub async fn count_by_wallet_address(
    pool: &SqlitePool,
    wallet_address: &str,
) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE wallet_address = ?")
        .bind(wallet_address)
        .fetch_one(pool)
        .await
}

pub async fn count_by_referral_code(
    pool: &SqlitePool,
    referral_code: &str,
) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE referral_code = ?")
        .bind(referral_code)
        .fetch_one(pool)
        .await
}

const SQL_APPLY_ACTIVATION_CREDIT: &str = r#"
UPDATE participants
SET activation_fee_paid = 1,
    status = 'active',
    wallet_balance = wallet_balance + ?,
    total_contributed = total_contributed + ?
WHERE email = ?
"#;

pub async fn apply_activation_credit(
    pool: &SqlitePool,
    email: &str,
    bonus: i64,
    contributed: i64,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_APPLY_ACTIVATION_CREDIT)
        .bind(bonus)
        .bind(contributed)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_CREDIT_REFERRER: &str = r#"
UPDATE participants
SET referral_count = referral_count + 1,
    referral_earnings = referral_earnings + ?,
    wallet_balance = wallet_balance + ?
WHERE referral_code = ?
"#;

pub async fn credit_referrer(
    pool: &SqlitePool,
    referral_code: &str,
    bonus: i64,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_CREDIT_REFERRER)
        .bind(bonus)
        .bind(bonus)
        .bind(referral_code)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn adjust_wallet_balance(
    pool: &SqlitePool,
    email: &str,
    delta: i64,
) -> sqlx::Result<u64> {
    let res =
        sqlx::query("UPDATE participants SET wallet_balance = wallet_balance + ? WHERE email = ?")
            .bind(delta)
            .bind(email)
            .execute(pool)
            .await?;
    Ok(res.rows_affected())
}

const SQL_FREEZE_EXPIRED: &str = r#"
UPDATE participants
SET status = 'frozen'
WHERE activation_deadline < ?
  AND activation_fee_paid = 0
  AND status != 'frozen'
"#;

pub async fn freeze_expired(pool: &SqlitePool, now: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_FREEZE_EXPIRED).bind(now).execute(pool).await?;
    Ok(res.rows_affected())
}

pub async fn update_risk_score(
    pool: &SqlitePool,
    email: &str,
    risk_score: i64,
) -> sqlx::Result<u64> {
    let res = sqlx::query("UPDATE participants SET risk_score = ? WHERE email = ?")
        .bind(risk_score)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn count_total(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants")
        .fetch_one(pool)
        .await
}

pub async fn count_by_status(pool: &SqlitePool, status: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await
}

pub async fn sum_contributed(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COALESCE(SUM(total_contributed), 0) FROM participants")
        .fetch_one(pool)
        .await
}

pub async fn count_flagged(pool: &SqlitePool, threshold: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE risk_score >= ?")
        .bind(threshold)
        .fetch_one(pool)
        .await
}
