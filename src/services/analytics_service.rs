use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::{
    participant_repo, payment_submission_repo, payout_request_repo, support_ticket_repo,
};
use crate::services::risk_service;

#[derive(Debug, Serialize)]
pub struct PlatformStats {
    pub total_participants: i64,
    pub active_participants: i64,
    pub frozen_participants: i64,
    pub pending_participants: i64,
    pub pending_submissions: i64,
    pub total_contributed: i64,
    pub pending_payouts: i64,
    pub pending_payout_amount: i64,
    pub open_tickets: i64,
    pub flagged_participants: i64,
}

pub async fn load_platform_stats(pool: &SqlitePool) -> sqlx::Result<PlatformStats> {
    Ok(PlatformStats {
        total_participants: participant_repo::count_total(pool).await?,
        active_participants: participant_repo::count_by_status(pool, "active").await?,
        frozen_participants: participant_repo::count_by_status(pool, "frozen").await?,
        pending_participants: participant_repo::count_by_status(pool, "pending").await?,
        pending_submissions: payment_submission_repo::count_by_status(pool, "pending").await?,
        total_contributed: participant_repo::sum_contributed(pool).await?,
        pending_payouts: payout_request_repo::count_by_status(pool, "pending").await?,
        pending_payout_amount: payout_request_repo::sum_by_status(pool, "pending").await?,
        open_tickets: support_ticket_repo::count_open(pool).await?,
        flagged_participants: participant_repo::count_flagged(
            pool,
            risk_service::RISK_FLAG_THRESHOLD,
        )
        .await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;
    use crate::services::payment_service::{self, SubmissionInput};
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

    #[tokio::test]
    async fn stats_reflect_the_store() {
        let pool = test_pool().await;
        let empty = load_platform_stats(&pool).await.unwrap();
        assert_eq!(empty.total_participants, 0);
        assert_eq!(empty.pending_submissions, 0);

        registration_service::register_participant(
            &pool,
            RegistrationInput {
                full_name: "Test Person".to_string(),
                email: "p@example.com".to_string(),
                phone: "+31-1".to_string(),
                wallet_address: "0xp".to_string(),
                password: "hunter2".to_string(),
                referral_code: None,
            },
        )
        .await
        .unwrap();
        payment_service::submit_payment(
            &pool,
            SubmissionInput {
                email: "p@example.com".to_string(),
                amount: 250,
                method: "bank_transfer".to_string(),
                screenshot: None,
            },
        )
        .await
        .unwrap();

        let stats = load_platform_stats(&pool).await.unwrap();
        assert_eq!(stats.total_participants, 1);
        assert_eq!(stats.pending_participants, 1);
        assert_eq!(stats.pending_submissions, 1);
        assert_eq!(stats.total_contributed, 0);
    }
}
