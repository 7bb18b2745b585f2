use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::activity_log_repo;
use crate::models::ActivityLogRow;

pub enum AppendOutcome {
    Appended(String),
    MissingField(&'static str),
}

pub async fn append_entry(
    pool: &SqlitePool,
    email: &str,
    action: &str,
    detail: Option<&str>,
) -> sqlx::Result<AppendOutcome> {
    let email = email.trim().to_lowercase();
    let action = action.trim();
    if email.is_empty() {
        return Ok(AppendOutcome::MissingField("email"));
    }
    if action.is_empty() {
        return Ok(AppendOutcome::MissingField("action"));
    }

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339();
    activity_log_repo::insert_log(
        pool,
        activity_log_repo::NewActivityLog {
            id: &id,
            participant_email: &email,
            action,
            detail: detail.map(str::trim).filter(|d| !d.is_empty()),
            created_at: &created_at,
        },
    )
    .await?;
    Ok(AppendOutcome::Appended(id))
}

pub async fn list_for_participant(
    pool: &SqlitePool,
    email: &str,
    limit: Option<i64>,
) -> sqlx::Result<Vec<ActivityLogRow>> {
    let limit = limit.unwrap_or(50).clamp(1, activity_log_repo::ACTIVITY_LOG_CAP);
    activity_log_repo::list_by_email(pool, &email.trim().to_lowercase(), limit).await
}

pub async fn list_recent(
    pool: &SqlitePool,
    limit: Option<i64>,
) -> sqlx::Result<Vec<ActivityLogRow>> {
    let limit = limit.unwrap_or(50).clamp(1, activity_log_repo::ACTIVITY_LOG_CAP);
    activity_log_repo::list_recent(pool, limit).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        schema::init(&pool).await.expect("schema init");
        pool
    }

    #[tokio::test]
    async fn append_and_fetch() {
        let pool = test_pool().await;
        let outcome = append_entry(&pool, "p@example.com", "wallet_connected", Some("0xabc"))
            .await
            .unwrap();
        assert!(matches!(outcome, AppendOutcome::Appended(_)));

        let entries = list_for_participant(&pool, "p@example.com", None)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "wallet_connected");
        assert_eq!(entries[0].detail.as_deref(), Some("0xabc"));
    }

    #[tokio::test]
    async fn append_requires_an_action() {
        let pool = test_pool().await;
        let outcome = append_entry(&pool, "p@example.com", "  ", None).await.unwrap();
        assert!(matches!(outcome, AppendOutcome::MissingField("action")));
    }

    #[tokio::test]
    async fn the_log_is_capped_at_100_entries() {
        let pool = test_pool().await;
        for i in 0..110 {
            append_entry(&pool, "p@example.com", "ping", Some(&i.to_string()))
                .await
                .unwrap();
        }
        let total = crate::database::activity_log_repo::count_total(&pool)
            .await
            .unwrap();
        assert_eq!(total, activity_log_repo::ACTIVITY_LOG_CAP);
    }
}
