use chrono::Utc;
use sqlx::SqlitePool;
use tracing::error;
use uuid::Uuid;

use crate::database::{activity_log_repo, participant_repo, payout_request_repo};
use crate::models::PayoutRequestRow;

pub enum PayoutRequestOutcome {
    Requested(PayoutRequestRow),
    ParticipantNotFound,
    NotActive,
    InvalidAmount,
    MissingDestination,
    InsufficientBalance,
}

pub async fn request_payout(
    pool: &SqlitePool,
    email: &str,
    amount: i64,
    destination_address: &str,
) -> sqlx::Result<PayoutRequestOutcome> {
    let email = email.trim().to_lowercase();
    let destination_address = destination_address.trim();

    let Some(participant) = participant_repo::find_by_email(pool, &email).await? else {
        return Ok(PayoutRequestOutcome::ParticipantNotFound);
    };
    if participant.status != "active" {
        return Ok(PayoutRequestOutcome::NotActive);
    }
    if amount <= 0 {
        return Ok(PayoutRequestOutcome::InvalidAmount);
    }
    if destination_address.is_empty() {
        return Ok(PayoutRequestOutcome::MissingDestination);
    }
    if participant.wallet_balance < amount {
        return Ok(PayoutRequestOutcome::InsufficientBalance);
    }

    // Deduct first, then record the request. The two writes are not wrapped
    // in a transaction; a failed insert re-credits the balance best-effort.
    participant_repo::adjust_wallet_balance(pool, &email, -amount).await?;

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339();
    let insert_result = payout_request_repo::insert_payout(
        pool,
        payout_request_repo::NewPayoutRequest {
            id: &id,
            participant_email: &email,
            amount,
            destination_address,
            created_at: &created_at,
        },
    )
    .await;

    if let Err(e) = insert_result {
        if let Err(rollback_err) =
            participant_repo::adjust_wallet_balance(pool, &email, amount).await
        {
            error!(
                "Payout insert failed for {} and balance rollback also failed: {}",
                email, rollback_err
            );
        }
        return Err(e);
    }

    let log_id = Uuid::new_v4().to_string();
    let detail = format!("amount={} destination={}", amount, destination_address);
    activity_log_repo::insert_log(
        pool,
        activity_log_repo::NewActivityLog {
            id: &log_id,
            participant_email: &email,
            action: "payout_requested",
            detail: Some(&detail),
            created_at: &created_at,
        },
    )
    .await?;

    let Some(row) = payout_request_repo::find_by_id(pool, &id).await? else {
        return Err(sqlx::Error::RowNotFound);
    };
    Ok(PayoutRequestOutcome::Requested(row))
}

pub async fn list_for_participant(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Vec<PayoutRequestRow>> {
    payout_request_repo::list_by_email(pool, &email.trim().to_lowercase()).await
}

pub async fn list_by_status(
    pool: &SqlitePool,
    status: &str,
) -> sqlx::Result<Vec<PayoutRequestRow>> {
    payout_request_repo::list_by_status(pool, status).await
}

pub enum ProcessOutcome {
    Processed(PayoutRequestRow),
    NotFound,
    AlreadyProcessed,
    InvalidDecision,
}

pub async fn process_payout(
    pool: &SqlitePool,
    payout_id: &str,
    decision: &str,
) -> sqlx::Result<ProcessOutcome> {
    let Some(payout) = payout_request_repo::find_by_id(pool, payout_id).await? else {
        return Ok(ProcessOutcome::NotFound);
    };
    if payout.status != "pending" {
        return Ok(ProcessOutcome::AlreadyProcessed);
    }

    let processed_at = Utc::now().to_rfc3339();
    let action = match decision {
        "paid" => {
            payout_request_repo::mark_processed(pool, payout_id, "paid", &processed_at).await?;
            "payout_paid"
        }
        "rejected" => {
            // A rejected payout refunds the deducted amount.
            payout_request_repo::mark_processed(pool, payout_id, "rejected", &processed_at)
                .await?;
            participant_repo::adjust_wallet_balance(
                pool,
                &payout.participant_email,
                payout.amount,
            )
            .await?;
            "payout_rejected"
        }
        _ => return Ok(ProcessOutcome::InvalidDecision),
    };

    let log_id = Uuid::new_v4().to_string();
    activity_log_repo::insert_log(
        pool,
        activity_log_repo::NewActivityLog {
            id: &log_id,
            participant_email: &payout.participant_email,
            action,
            detail: Some(payout_id),
            created_at: &processed_at,
        },
    )
    .await?;

    let Some(row) = payout_request_repo::find_by_id(pool, payout_id).await? else {
        return Err(sqlx::Error::RowNotFound);
    };
    Ok(ProcessOutcome::Processed(row))
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

    // Register, submit, approve: leaves the participant active with a
    // wallet_balance of ACTIVATION_BONUS.
    async fn activated_participant(pool: &SqlitePool, email: &str) {
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
        let outcome = payment_service::submit_payment(
            pool,
            SubmissionInput {
                email: email.to_string(),
                amount: 500,
                method: "bank_transfer".to_string(),
                screenshot: None,
            },
        )
        .await
        .unwrap();
        let SubmissionOutcome::Submitted(submission) = outcome else {
            panic!("submission refused");
        };
        payment_service::review_submission(pool, &submission.id, "approve", None, "admin")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn payout_deducts_the_balance() {
        let pool = test_pool().await;
        activated_participant(&pool, "p@example.com").await;

        let outcome = request_payout(&pool, "p@example.com", 150, "0xdest")
            .await
            .unwrap();
        let PayoutRequestOutcome::Requested(row) = outcome else {
            panic!("payout refused");
        };
        assert_eq!(row.status, "pending");
        assert_eq!(row.amount, 150);

        let participant = crate::database::participant_repo::find_by_email(&pool, "p@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            participant.wallet_balance,
            payment_service::ACTIVATION_BONUS - 150
        );
    }

    #[tokio::test]
    async fn insufficient_balance_is_refused_without_deduction() {
        let pool = test_pool().await;
        activated_participant(&pool, "p@example.com").await;

        let outcome = request_payout(&pool, "p@example.com", 10_000, "0xdest")
            .await
            .unwrap();
        assert!(matches!(outcome, PayoutRequestOutcome::InsufficientBalance));

        let participant = crate::database::participant_repo::find_by_email(&pool, "p@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(participant.wallet_balance, payment_service::ACTIVATION_BONUS);
    }

    #[tokio::test]
    async fn inactive_participant_cannot_request() {
        let pool = test_pool().await;
        registration_service::register_participant(
            &pool,
            RegistrationInput {
                full_name: "Pending Person".to_string(),
                email: "pending@example.com".to_string(),
                phone: "+31-0".to_string(),
                wallet_address: "0xpending".to_string(),
                password: "hunter2".to_string(),
                referral_code: None,
            },
        )
        .await
        .unwrap();
        let outcome = request_payout(&pool, "pending@example.com", 10, "0xdest")
            .await
            .unwrap();
        assert!(matches!(outcome, PayoutRequestOutcome::NotActive));
    }

    #[tokio::test]
    async fn rejecting_a_payout_refunds_the_amount() {
        let pool = test_pool().await;
        activated_participant(&pool, "p@example.com").await;
        let outcome = request_payout(&pool, "p@example.com", 150, "0xdest")
            .await
            .unwrap();
        let PayoutRequestOutcome::Requested(payout) = outcome else {
            panic!("payout refused");
        };

        let outcome = process_payout(&pool, &payout.id, "rejected").await.unwrap();
        let ProcessOutcome::Processed(row) = outcome else {
            panic!("processing refused");
        };
        assert_eq!(row.status, "rejected");
        assert!(row.processed_at.is_some());

        let participant = crate::database::participant_repo::find_by_email(&pool, "p@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(participant.wallet_balance, payment_service::ACTIVATION_BONUS);
    }

    #[tokio::test]
    async fn paying_a_payout_keeps_the_deduction() {
        let pool = test_pool().await;
        activated_participant(&pool, "p@example.com").await;
        let outcome = request_payout(&pool, "p@example.com", 150, "0xdest")
            .await
            .unwrap();
        let PayoutRequestOutcome::Requested(payout) = outcome else {
            panic!("payout refused");
        };

        let outcome = process_payout(&pool, &payout.id, "paid").await.unwrap();
        let ProcessOutcome::Processed(row) = outcome else {
            panic!("processing refused");
        };
        assert_eq!(row.status, "paid");

        let second = process_payout(&pool, &payout.id, "paid").await.unwrap();
        assert!(matches!(second, ProcessOutcome::AlreadyProcessed));
    }
}
