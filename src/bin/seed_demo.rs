use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::env;

use flowchain::database::schema;
use flowchain::services::payment_service::{self, SubmissionInput, SubmissionOutcome};
use flowchain::services::registration_service::{self, RegistrationInput, RegistrationOutcome};
use flowchain::services::support_service;

// Seeds a small demo dataset: one activated participant, one with a pending
// proof of payment, and an open support ticket. Pointless against the
// in-memory store, so a file-backed DATABASE_URL is required.

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL moet in .env staan");
    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("Kan niet verbinden met DB");
    schema::init(&pool).await.expect("Kan schema niet aanmaken");

    match seed(&pool).await {
        Ok(report) => {
            println!(
                "demo seed: participants={}, approved={}, pending={}, tickets={}",
                report.participants, report.approved, report.pending, report.tickets
            );
        }
        Err(e) => {
            eprintln!("demo seed failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[derive(Default)]
struct SeedReport {
    participants: u32,
    approved: u32,
    pending: u32,
    tickets: u32,
}

async fn seed(pool: &SqlitePool) -> sqlx::Result<SeedReport> {
    let mut report = SeedReport::default();

    let demo = [
        ("Ada Okafor", "ada@demo.flowchain.app", "+31-600-0001", "0xada0"),
        ("Bram de Wit", "bram@demo.flowchain.app", "+31-600-0002", "0xbram"),
        ("Chen Li", "chen@demo.flowchain.app", "+31-600-0003", "0xchen"),
    ];
    for (full_name, email, phone, wallet) in demo {
        let outcome = registration_service::register_participant(
            pool,
            RegistrationInput {
                full_name: full_name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                wallet_address: wallet.to_string(),
                password: "demo-password".to_string(),
                referral_code: None,
            },
        )
        .await?;
        if matches!(outcome, RegistrationOutcome::Registered(_)) {
            report.participants += 1;
        }
    }

    // Ada gets approved and becomes active.
    if let SubmissionOutcome::Submitted(submission) = payment_service::submit_payment(
        pool,
        SubmissionInput {
            email: "ada@demo.flowchain.app".to_string(),
            amount: 500,
            method: "bank_transfer".to_string(),
            screenshot: None,
        },
    )
    .await?
    {
        payment_service::review_submission(pool, &submission.id, "approve", None, "seed").await?;
        report.approved += 1;
    }

    // Bram stays pending in the review queue.
    if let SubmissionOutcome::Submitted(_) = payment_service::submit_payment(
        pool,
        SubmissionInput {
            email: "bram@demo.flowchain.app".to_string(),
            amount: 250,
            method: "usdt".to_string(),
            screenshot: None,
        },
    )
    .await?
    {
        report.pending += 1;
    }

    support_service::create_ticket(
        pool,
        "chen@demo.flowchain.app",
        "activation",
        "Deadline question",
        "How long do I have to submit my proof of payment?",
    )
    .await?;
    report.tickets += 1;

    Ok(report)
}
