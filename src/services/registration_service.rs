use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{activity_log_repo, participant_repo};
use crate::services::auth_service;
use crate::services::participant_service::{self, ParticipantView};

pub const REFERRAL_BONUS: i64 = 25;
pub const ACTIVATION_WINDOW_HOURS: i64 = 72;

#[derive(Debug, Default)]
pub struct RegistrationInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub wallet_address: String,
    pub password: String,
    pub referral_code: Option<String>,
}

pub enum RegistrationOutcome {
    Registered(ParticipantView),
    MissingField(&'static str),
    InvalidEmail,
    DuplicateEmail,
    DuplicatePhone,
    DuplicateWallet,
}

pub async fn register_participant(
    pool: &SqlitePool,
    input: RegistrationInput,
) -> sqlx::Result<RegistrationOutcome> {
    let full_name = input.full_name.trim();
    let email = input.email.trim().to_lowercase();
    let phone = input.phone.trim();
    let wallet_address = input.wallet_address.trim();
    let password = input.password.trim();

    if full_name.is_empty() {
        return Ok(RegistrationOutcome::MissingField("full_name"));
    }
    if email.is_empty() {
        return Ok(RegistrationOutcome::MissingField("email"));
    }
    if phone.is_empty() {
        return Ok(RegistrationOutcome::MissingField("phone"));
    }
    if wallet_address.is_empty() {
        return Ok(RegistrationOutcome::MissingField("wallet_address"));
    }
    if password.is_empty() {
        return Ok(RegistrationOutcome::MissingField("password"));
    }
    if !email.contains('@') {
        return Ok(RegistrationOutcome::InvalidEmail);
    }

    if participant_repo::count_by_email(pool, &email).await? > 0 {
        return Ok(RegistrationOutcome::DuplicateEmail);
    }
    if participant_repo::count_by_phone(pool, phone).await? > 0 {
        return Ok(RegistrationOutcome::DuplicatePhone);
    }
    if participant_repo::count_by_wallet_address(pool, wallet_address).await? > 0 {
        return Ok(RegistrationOutcome::DuplicateWallet);
    }

    // Unknown referral codes are ignored silently; only a resolvable code
    // earns the referrer a credit.
    let referred_by = match input.referral_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => {
            let code = code.to_uppercase();
            if participant_repo::count_by_referral_code(pool, &code).await? > 0 {
                Some(code)
            } else {
                None
            }
        }
        _ => None,
    };

    let id = Uuid::new_v4().to_string();
    let referral_code = fresh_referral_code(pool).await?;
    let now = Utc::now();
    let created_at = now.to_rfc3339();
    let activation_deadline = (now + Duration::hours(ACTIVATION_WINDOW_HOURS)).to_rfc3339();
    let password_hash = auth_service::hash_password(password);

    participant_repo::insert_participant(
        pool,
        participant_repo::NewParticipant {
            id: &id,
            full_name,
            email: &email,
            phone,
            wallet_address,
            password_hash: &password_hash,
            activation_deadline: &activation_deadline,
            referral_code: &referral_code,
            referred_by: referred_by.as_deref(),
            created_at: &created_at,
        },
    )
    .await?;

    if let Some(code) = referred_by.as_deref() {
        participant_repo::credit_referrer(pool, code, REFERRAL_BONUS).await?;
    }

    let log_id = Uuid::new_v4().to_string();
    activity_log_repo::insert_log(
        pool,
        activity_log_repo::NewActivityLog {
            id: &log_id,
            participant_email: &email,
            action: "registered",
            detail: referred_by.as_deref(),
            created_at: &created_at,
        },
    )
    .await?;

    let Some(row) = participant_repo::find_by_email(pool, &email).await? else {
        return Err(sqlx::Error::RowNotFound);
    };
    Ok(RegistrationOutcome::Registered(
        participant_service::participant_view(&row),
    ))
}

// Codes are short enough that a collision is possible; re-roll until free.
async fn fresh_referral_code(pool: &SqlitePool) -> sqlx::Result<String> {
    loop {
        let code = generate_referral_code();
        if participant_repo::count_by_referral_code(pool, &code).await? == 0 {
            return Ok(code);
        }
    }
}

pub fn generate_referral_code() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..6)
        .map(|_| (rng.sample(rand::distr::Alphanumeric) as char).to_ascii_uppercase())
        .collect();
    format!("FLOW-{}", suffix)
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

    fn input(email: &str, phone: &str, wallet: &str) -> RegistrationInput {
        RegistrationInput {
            full_name: "Test Person".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            wallet_address: wallet.to_string(),
            password: "hunter2".to_string(),
            referral_code: None,
        }
    }

    #[tokio::test]
    async fn registers_a_new_participant_as_pending() {
        let pool = test_pool().await;
        let outcome = register_participant(&pool, input("a@example.com", "+311", "0xabc"))
            .await
            .unwrap();
        let RegistrationOutcome::Registered(view) = outcome else {
            panic!("expected registration to succeed");
        };
        assert_eq!(view.email, "a@example.com");
        assert_eq!(view.status, "pending");
        assert!(!view.activation_fee_paid);
        assert_eq!(view.wallet_balance, 0);
        assert!(view.referral_code.starts_with("FLOW-"));
    }

    #[tokio::test]
    async fn duplicate_email_is_refused() {
        let pool = test_pool().await;
        register_participant(&pool, input("dup@example.com", "+311", "0xabc"))
            .await
            .unwrap();
        let outcome = register_participant(&pool, input("dup@example.com", "+322", "0xdef"))
            .await
            .unwrap();
        assert!(matches!(outcome, RegistrationOutcome::DuplicateEmail));
    }

    #[tokio::test]
    async fn duplicate_phone_and_wallet_are_refused() {
        let pool = test_pool().await;
        register_participant(&pool, input("a@example.com", "+311", "0xabc"))
            .await
            .unwrap();
        let outcome = register_participant(&pool, input("b@example.com", "+311", "0xdef"))
            .await
            .unwrap();
        assert!(matches!(outcome, RegistrationOutcome::DuplicatePhone));
        let outcome = register_participant(&pool, input("c@example.com", "+333", "0xabc"))
            .await
            .unwrap();
        assert!(matches!(outcome, RegistrationOutcome::DuplicateWallet));
    }

    #[tokio::test]
    async fn missing_fields_and_bad_email_are_refused() {
        let pool = test_pool().await;
        let mut no_name = input("a@example.com", "+311", "0xabc");
        no_name.full_name = "  ".to_string();
        assert!(matches!(
            register_participant(&pool, no_name).await.unwrap(),
            RegistrationOutcome::MissingField("full_name")
        ));
        let bad_email = input("not-an-email", "+311", "0xabc");
        assert!(matches!(
            register_participant(&pool, bad_email).await.unwrap(),
            RegistrationOutcome::InvalidEmail
        ));
    }

    #[tokio::test]
    async fn valid_referral_code_credits_the_referrer() {
        let pool = test_pool().await;
        let outcome = register_participant(&pool, input("ref@example.com", "+311", "0xabc"))
            .await
            .unwrap();
        let RegistrationOutcome::Registered(referrer) = outcome else {
            panic!("referrer registration failed");
        };

        let mut referred = input("new@example.com", "+322", "0xdef");
        referred.referral_code = Some(referrer.referral_code.clone());
        let outcome = register_participant(&pool, referred).await.unwrap();
        let RegistrationOutcome::Registered(view) = outcome else {
            panic!("referred registration failed");
        };
        assert_eq!(view.referred_by.as_deref(), Some(referrer.referral_code.as_str()));

        let updated = crate::database::participant_repo::find_by_email(&pool, "ref@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.referral_count, 1);
        assert_eq!(updated.referral_earnings, REFERRAL_BONUS);
        assert_eq!(updated.wallet_balance, REFERRAL_BONUS);
    }

    #[tokio::test]
    async fn unknown_referral_code_changes_nothing() {
        let pool = test_pool().await;
        let mut referred = input("new@example.com", "+322", "0xdef");
        referred.referral_code = Some("FLOW-NOBODY".to_string());
        let outcome = register_participant(&pool, referred).await.unwrap();
        let RegistrationOutcome::Registered(view) = outcome else {
            panic!("registration failed");
        };
        assert!(view.referred_by.is_none());
    }
}
