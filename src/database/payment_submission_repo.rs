use sqlx::SqlitePool;

use crate::models::PaymentSubmissionRow;

const SQL_INSERT_SUBMISSION: &str = r#"
INSERT INTO payment_submissions (
  id,
  participant_email,
  amount,
  method,
  screenshot_ref,
  status,
  created_at
) VALUES (?, ?, ?, ?, ?, 'pending', ?)
"#;

pub struct NewPaymentSubmission<'a> {
    pub id: &'a str,
    pub participant_email: &'a str,
    pub amount: i64,
    pub method: &'a str,
    pub screenshot_ref: Option<&'a str>,
    pub created_at: &'a str,
}

pub async fn insert_submission(
    pool: &SqlitePool,
    submission: NewPaymentSubmission<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_SUBMISSION)
        .bind(submission.id)
        .bind(submission.participant_email)
        .bind(submission.amount)
        .bind(submission.method)
        .bind(submission.screenshot_ref)
        .bind(submission.created_at)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_FIND_BY_ID: &str = r#"
SELECT
    id,
    participant_email,
    amount,
    method,
    screenshot_ref,
    status,
    review_note,
    reviewed_by,
    created_at,
    reviewed_at
FROM payment_submissions
WHERE id = ?
LIMIT 1
"#;

pub async fn find_by_id(
    pool: &SqlitePool,
    id: &str,
) -> sqlx::Result<Option<PaymentSubmissionRow>> {
    sqlx::query_as::<_, PaymentSubmissionRow>(SQL_FIND_BY_ID)
        .bind(id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_BY_EMAIL: &str = r#"
SELECT
    id,
    participant_email,
    amount,
    method,
    screenshot_ref,
    status,
    review_note,
    reviewed_by,
    created_at,
    reviewed_at
FROM payment_submissions
WHERE participant_email = ?
ORDER BY created_at DESC
"#;

pub async fn list_by_email(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Vec<PaymentSubmissionRow>> {
    sqlx::query_as::<_, PaymentSubmissionRow>(SQL_LIST_BY_EMAIL)
        .bind(email)
        .fetch_all(pool)
        .await
}

const SQL_LIST_BY_STATUS: &str = r#"
SELECT
    id,
    participant_email,
    amount,
    method,
    screenshot_ref,
    status,
    review_note,
    reviewed_by,
    created_at,
    reviewed_at
FROM payment_submissions
WHERE status = ?
ORDER BY created_at DESC
"#;

pub async fn list_by_status(
    pool: &SqlitePool,
    status: &str,
) -> sqlx::Result<Vec<PaymentSubmissionRow>> {
    sqlx::query_as::<_, PaymentSubmissionRow>(SQL_LIST_BY_STATUS)
        .bind(status)
        .fetch_all(pool)
        .await
}

const SQL_MARK_REVIEWED: &str = r#"
UPDATE payment_submissions
SET status = ?,
    review_note = ?,
    reviewed_by = ?,
    reviewed_at = ?
WHERE id = ?
"#;

pub async fn mark_reviewed(
    pool: &SqlitePool,
    id: &str,
    status: &str,
    review_note: Option<&str>,
    reviewed_by: &str,
    reviewed_at: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_MARK_REVIEWED)
        .bind(status)
        .bind(review_note)
        .bind(reviewed_by)
        .bind(reviewed_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn count_by_status(pool: &SqlitePool, status: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM payment_submissions WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await
}

pub async fn count_rejected_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM payment_submissions WHERE participant_email = ? AND status = 'rejected'",
    )
    .bind(email)
    .fetch_one(pool)
    .await
}
