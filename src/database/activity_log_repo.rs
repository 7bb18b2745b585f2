use sqlx::SqlitePool;

use crate::models::ActivityLogRow;

// The demo store keeps only the 100 most-recent entries; the trim runs after
// every insert so the table never grows past the cap.
pub const ACTIVITY_LOG_CAP: i64 = 100;

const SQL_INSERT_LOG: &str = r#"
INSERT INTO activity_logs (
  id,
  participant_email,
  action,
  detail,
  created_at
) VALUES (?, ?, ?, ?, ?)
"#;

const SQL_TRIM_TO_CAP: &str = r#"
DELETE FROM activity_logs
WHERE id NOT IN (
  SELECT id FROM activity_logs
  ORDER BY created_at DESC, id DESC
  LIMIT ?
)
"#;

pub struct NewActivityLog<'a> {
    pub id: &'a str,
    pub participant_email: &'a str,
    pub action: &'a str,
    pub detail: Option<&'a str>,
    pub created_at: &'a str,
}

pub async fn insert_log(pool: &SqlitePool, log: NewActivityLog<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_LOG)
        .bind(log.id)
        .bind(log.participant_email)
        .bind(log.action)
        .bind(log.detail)
        .bind(log.created_at)
        .execute(pool)
        .await?;

    sqlx::query(SQL_TRIM_TO_CAP)
        .bind(ACTIVITY_LOG_CAP)
        .execute(pool)
        .await?;

    Ok(res.rows_affected())
}

const SQL_LIST_RECENT: &str = r#"
SELECT
    id,
    participant_email,
    action,
    detail,
    created_at
FROM activity_logs
ORDER BY created_at DESC, id DESC
LIMIT ?
"#;

pub async fn list_recent(pool: &SqlitePool, limit: i64) -> sqlx::Result<Vec<ActivityLogRow>> {
    sqlx::query_as::<_, ActivityLogRow>(SQL_LIST_RECENT)
        .bind(limit)
        .fetch_all(pool)
        .await
}

const SQL_LIST_BY_EMAIL: &str = r#"
SELECT
    id,
    participant_email,
    action,
    detail,
    created_at
FROM activity_logs
WHERE participant_email = ?
ORDER BY created_at DESC, id DESC
LIMIT ?
"#;

pub async fn list_by_email(
    pool: &SqlitePool,
    email: &str,
    limit: i64,
) -> sqlx::Result<Vec<ActivityLogRow>> {
    sqlx::query_as::<_, ActivityLogRow>(SQL_LIST_BY_EMAIL)
        .bind(email)
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn count_total(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM activity_logs")
        .fetch_one(pool)
        .await
}
