use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::{participant_repo, payment_submission_repo, payout_request_repo};

pub const RISK_FLAG_THRESHOLD: i64 = 50;

const WEIGHT_REJECTED_SUBMISSION: i64 = 25;
const WEIGHT_FROZEN: i64 = 20;
const WEIGHT_PAYOUTS_EXCEED_CONTRIBUTIONS: i64 = 15;
const WEIGHT_DORMANT_PAST_DEADLINE: i64 = 10;

#[derive(Debug, Serialize)]
pub struct RiskFlagView {
    pub email: String,
    pub full_name: String,
    pub status: String,
    pub risk_score: i64,
}

#[derive(Debug, Serialize)]
pub struct RiskRecomputeReport {
    pub scanned: usize,
    pub flagged: Vec<RiskFlagView>,
}

// A heuristic, not a model: a handful of additive signals clamped to 0..=100.
pub async fn recompute_risk_scores(pool: &SqlitePool) -> sqlx::Result<RiskRecomputeReport> {
    let now = Utc::now().to_rfc3339();
    let participants = participant_repo::list_all(pool).await?;
    let scanned = participants.len();
    let mut flagged = Vec::new();

    for participant in participants {
        let rejected =
            payment_submission_repo::count_rejected_by_email(pool, &participant.email).await?;
        let requested =
            payout_request_repo::sum_requested_by_email(pool, &participant.email).await?;

        let mut score = rejected * WEIGHT_REJECTED_SUBMISSION;
        if participant.status == "frozen" {
            score += WEIGHT_FROZEN;
        }
        if requested > participant.total_contributed {
            score += WEIGHT_PAYOUTS_EXCEED_CONTRIBUTIONS;
        }
        if participant.total_contributed == 0
            && participant.activation_fee_paid == 0
            && participant.activation_deadline < now
        {
            score += WEIGHT_DORMANT_PAST_DEADLINE;
        }
        let score = score.clamp(0, 100);

        participant_repo::update_risk_score(pool, &participant.email, score).await?;
        if score >= RISK_FLAG_THRESHOLD {
            flagged.push(RiskFlagView {
                email: participant.email,
                full_name: participant.full_name,
                status: participant.status,
                risk_score: score,
            });
        }
    }

    Ok(RiskRecomputeReport { scanned, flagged })
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

    async fn reject_a_submission(pool: &SqlitePool, email: &str) {
        let outcome = payment_service::submit_payment(
            pool,
            SubmissionInput {
                email: email.to_string(),
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
        payment_service::review_submission(pool, &submission.id, "reject", None, "admin")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn fresh_participant_scores_zero() {
        let pool = test_pool().await;
        register(&pool, "fresh@example.com").await;
        let report = recompute_risk_scores(&pool).await.unwrap();
        assert_eq!(report.scanned, 1);
        assert!(report.flagged.is_empty());

        let row = crate::database::participant_repo::find_by_email(&pool, "fresh@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.risk_score, 0);
    }

    #[tokio::test]
    async fn repeated_rejections_cross_the_flag_threshold() {
        let pool = test_pool().await;
        register(&pool, "risky@example.com").await;
        reject_a_submission(&pool, "risky@example.com").await;
        reject_a_submission(&pool, "risky@example.com").await;

        let report = recompute_risk_scores(&pool).await.unwrap();
        assert_eq!(report.flagged.len(), 1);
        assert_eq!(report.flagged[0].email, "risky@example.com");
        assert_eq!(report.flagged[0].risk_score, 2 * WEIGHT_REJECTED_SUBMISSION);
    }

    #[tokio::test]
    async fn the_score_is_clamped_at_100() {
        let pool = test_pool().await;
        register(&pool, "risky@example.com").await;
        for _ in 0..6 {
            reject_a_submission(&pool, "risky@example.com").await;
        }
        let report = recompute_risk_scores(&pool).await.unwrap();
        assert_eq!(report.flagged[0].risk_score, 100);
    }
}
