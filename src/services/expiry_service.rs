use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::participant_repo;

#[derive(Debug, Serialize)]
pub struct ExpirySweepReport {
    pub frozen: u64,
}

// One bulk update: participants past their activation deadline with the fee
// unpaid are frozen. Anyone who paid is never touched.
pub async fn freeze_expired_participants(pool: &SqlitePool) -> sqlx::Result<ExpirySweepReport> {
    let now = Utc::now().to_rfc3339();
    let frozen = participant_repo::freeze_expired(pool, &now).await?;
    Ok(ExpirySweepReport { frozen })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;
    use crate::services::payment_service::{self, SubmissionInput, SubmissionOutcome};
    use crate::services::registration_service::{self, RegistrationInput};
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

    async fn register(pool: &SqlitePool, email: &str) {
        registration_service::register_participant(
            pool,
            RegistrationInput {
                full_name: "Test Person".to_string(),
                email: email.to_string(),
                phone: format!("+31-{}", email.len()),
                wallet_address: format!("0x{}", email),
                password: "hunter2".to_string(),
                referral_code: None,
            },
        )
        .await
        .unwrap();
    }

    async fn backdate_deadline(pool: &SqlitePool, email: &str) {
        sqlx::query("UPDATE participants SET activation_deadline = ? WHERE email = ?")
            .bind("2000-01-01T00:00:00+00:00")
            .bind(email)
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn sweep_freezes_only_expired_unpaid_participants() {
        let pool = test_pool().await;
        register(&pool, "expired@example.com").await;
        register(&pool, "in-window@example.com").await;
        register(&pool, "paid@example.com").await;
        backdate_deadline(&pool, "expired@example.com").await;
        backdate_deadline(&pool, "paid@example.com").await;

        // paid@ has an approved payment, so the sweep must skip them.
        let outcome = payment_service::submit_payment(
            &pool,
            SubmissionInput {
                email: "paid@example.com".to_string(),
                amount: 100,
                method: "bank_transfer".to_string(),
                screenshot: None,
            },
        )
        .await
        .unwrap();
        let SubmissionOutcome::Submitted(submission) = outcome else {
            panic!("submission refused");
        };
        payment_service::review_submission(&pool, &submission.id, "approve", None, "admin")
            .await
            .unwrap();

        let report = freeze_expired_participants(&pool).await.unwrap();
        assert_eq!(report.frozen, 1);

        let expired = crate::database::participant_repo::find_by_email(&pool, "expired@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(expired.status, "frozen");
        let in_window =
            crate::database::participant_repo::find_by_email(&pool, "in-window@example.com")
                .await
                .unwrap()
                .unwrap();
        assert_eq!(in_window.status, "pending");
        let paid = crate::database::participant_repo::find_by_email(&pool, "paid@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(paid.status, "active");
    }

    #[tokio::test]
    async fn sweep_is_idempotent() {
        let pool = test_pool().await;
        register(&pool, "expired@example.com").await;
        backdate_deadline(&pool, "expired@example.com").await;

        let first = freeze_expired_participants(&pool).await.unwrap();
        assert_eq!(first.frozen, 1);
        let second = freeze_expired_participants(&pool).await.unwrap();
        assert_eq!(second.frozen, 0);
    }
}
