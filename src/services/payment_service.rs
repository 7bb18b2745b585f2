use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{activity_log_repo, participant_repo, payment_submission_repo};
use crate::models::PaymentSubmissionRow;

// Credited to the participant's wallet when a proof of payment is approved.
pub const ACTIVATION_BONUS: i64 = 200;

#[derive(Debug)]
pub struct ScreenshotUpload {
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct SubmissionInput {
    pub email: String,
    pub amount: i64,
    pub method: String,
    pub screenshot: Option<ScreenshotUpload>,
}

pub enum SubmissionOutcome {
    Submitted(PaymentSubmissionRow),
    ParticipantNotFound,
    InvalidAmount,
    MissingMethod,
}

pub async fn submit_payment(
    pool: &SqlitePool,
    input: SubmissionInput,
) -> sqlx::Result<SubmissionOutcome> {
    let email = input.email.trim().to_lowercase();
    let method = input.method.trim();

    if participant_repo::find_by_email(pool, &email).await?.is_none() {
        return Ok(SubmissionOutcome::ParticipantNotFound);
    }
    if input.amount <= 0 {
        return Ok(SubmissionOutcome::InvalidAmount);
    }
    if method.is_empty() {
        return Ok(SubmissionOutcome::MissingMethod);
    }

    // Screenshots are kept as data-URL references on the submission row.
    let screenshot_ref = input.screenshot.as_ref().map(|shot| {
        format!(
            "data:{};base64,{}",
            shot.mime,
            general_purpose::STANDARD.encode(&shot.bytes)
        )
    });

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339();
    payment_submission_repo::insert_submission(
        pool,
        payment_submission_repo::NewPaymentSubmission {
            id: &id,
            participant_email: &email,
            amount: input.amount,
            method,
            screenshot_ref: screenshot_ref.as_deref(),
            created_at: &created_at,
        },
    )
    .await?;

    let detail = format!("amount={} method={}", input.amount, method);
    let log_id = Uuid::new_v4().to_string();
    activity_log_repo::insert_log(
        pool,
        activity_log_repo::NewActivityLog {
            id: &log_id,
            participant_email: &email,
            action: "payment_submitted",
            detail: Some(&detail),
            created_at: &created_at,
        },
    )
    .await?;

    let Some(row) = payment_submission_repo::find_by_id(pool, &id).await? else {
        return Err(sqlx::Error::RowNotFound);
    };
    Ok(SubmissionOutcome::Submitted(row))
}

pub async fn list_for_participant(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Vec<PaymentSubmissionRow>> {
    payment_submission_repo::list_by_email(pool, &email.trim().to_lowercase()).await
}

pub async fn list_by_status(
    pool: &SqlitePool,
    status: &str,
) -> sqlx::Result<Vec<PaymentSubmissionRow>> {
    payment_submission_repo::list_by_status(pool, status).await
}

pub enum ReviewOutcome {
    Approved(PaymentSubmissionRow),
    Rejected(PaymentSubmissionRow),
    NotFound,
    AlreadyReviewed,
    InvalidDecision,
}

pub async fn review_submission(
    pool: &SqlitePool,
    submission_id: &str,
    decision: &str,
    note: Option<&str>,
    reviewed_by: &str,
) -> sqlx::Result<ReviewOutcome> {
    let Some(submission) = payment_submission_repo::find_by_id(pool, submission_id).await? else {
        return Ok(ReviewOutcome::NotFound);
    };
    if submission.status != "pending" {
        return Ok(ReviewOutcome::AlreadyReviewed);
    }

    let reviewed_at = Utc::now().to_rfc3339();
    match decision {
        "approve" => {
            payment_submission_repo::mark_reviewed(
                pool,
                submission_id,
                "confirmed",
                note,
                reviewed_by,
                &reviewed_at,
            )
            .await?;
            participant_repo::apply_activation_credit(
                pool,
                &submission.participant_email,
                ACTIVATION_BONUS,
                submission.amount,
            )
            .await?;

            let log_id = Uuid::new_v4().to_string();
            activity_log_repo::insert_log(
                pool,
                activity_log_repo::NewActivityLog {
                    id: &log_id,
                    participant_email: &submission.participant_email,
                    action: "payment_approved",
                    detail: Some(submission_id),
                    created_at: &reviewed_at,
                },
            )
            .await?;

            let Some(row) = payment_submission_repo::find_by_id(pool, submission_id).await? else {
                return Err(sqlx::Error::RowNotFound);
            };
            Ok(ReviewOutcome::Approved(row))
        }
        "reject" => {
            // Rejection touches the submission only; the participant row stays
            // untouched and feeds the risk recompute later.
            payment_submission_repo::mark_reviewed(
                pool,
                submission_id,
                "rejected",
                note,
                reviewed_by,
                &reviewed_at,
            )
            .await?;

            let log_id = Uuid::new_v4().to_string();
            activity_log_repo::insert_log(
                pool,
                activity_log_repo::NewActivityLog {
                    id: &log_id,
                    participant_email: &submission.participant_email,
                    action: "payment_rejected",
                    detail: Some(submission_id),
                    created_at: &reviewed_at,
                },
            )
            .await?;

            let Some(row) = payment_submission_repo::find_by_id(pool, submission_id).await? else {
                return Err(sqlx::Error::RowNotFound);
            };
            Ok(ReviewOutcome::Rejected(row))
        }
        _ => Ok(ReviewOutcome::InvalidDecision),
    }
}
