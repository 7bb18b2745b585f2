use sqlx::SqlitePool;

use crate::models::PayoutRequestRow;

const SQL_INSERT_PAYOUT: &str = r#"
INSERT INTO payout_requests (
  id,
  participant_email,
  amount,
  destination_address,
  status,
  created_at
) VALUES (?, ?, ?, ?, 'pending', ?)
"#;

pub struct NewPayoutRequest<'a> {
    pub id: &'a str,
    pub participant_email: &'a str,
    pub amount: i64,
    pub destination_address: &'a str,
    pub created_at: &'a str,
}

pub async fn insert_payout(
    pool: &SqlitePool,
    payout: NewPayoutRequest<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PAYOUT)
        .bind(payout.id)
        .bind(payout.participant_email)
        .bind(payout.amount)
        .bind(payout.destination_address)
        .bind(payout.created_at)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_FIND_BY_ID: &str = r#"
SELECT
    id,
    participant_email,
    amount,
    destination_address,
    status,
    created_at,
    processed_at
FROM payout_requests
WHERE id = ?
LIMIT 1
"#;

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<PayoutRequestRow>> {
    sqlx::query_as::<_, PayoutRequestRow>(SQL_FIND_BY_ID)
        .bind(id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_BY_EMAIL: &str = r#"
SELECT
    id,
    participant_email,
    amount,
    destination_address,
    status,
    created_at,
    processed_at
FROM payout_requests
WHERE participant_email = ?
ORDER BY created_at DESC
"#;

pub async fn list_by_email(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Vec<PayoutRequestRow>> {
    sqlx::query_as::<_, PayoutRequestRow>(SQL_LIST_BY_EMAIL)
        .bind(email)
        .fetch_all(pool)
        .await
}

const SQL_LIST_BY_STATUS: &str = r#"
SELECT
    id,
    participant_email,
    amount,
    destination_address,
    status,
    created_at,
    processed_at
FROM payout_requests
WHERE status = ?
ORDER BY created_at DESC
"#;

pub async fn list_by_status(
    pool: &SqlitePool,
    status: &str,
) -> sqlx::Result<Vec<PayoutRequestRow>> {
    sqlx::query_as::<_, PayoutRequestRow>(SQL_LIST_BY_STATUS)
        .bind(status)
        .fetch_all(pool)
        .await
}

const SQL_MARK_PROCESSED: &str = r#"
UPDATE payout_requests
SET status = ?,
    processed_at = ?
WHERE id = ?
"#;

pub async fn mark_processed(
    pool: &SqlitePool,
    id: &str,
    status: &str,
    processed_at: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_MARK_PROCESSED)
        .bind(status)
        .bind(processed_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn count_by_status(pool: &SqlitePool, status: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM payout_requests WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await
}

pub async fn sum_by_status(pool: &SqlitePool, status: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM payout_requests WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await
}

pub async fn sum_requested_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount), 0) FROM payout_requests WHERE participant_email = ? AND status != 'rejected'",
    )
    .bind(email)
    .fetch_one(pool)
    .await
}
