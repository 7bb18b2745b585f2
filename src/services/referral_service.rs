use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::participant_repo;

#[derive(Debug, Serialize)]
pub struct ReferralView {
    pub full_name: String,
    pub referral_code: String,
    pub referral_count: i64,
    pub referral_earnings: i64,
}

pub async fn lookup_referral(
    pool: &SqlitePool,
    code: &str,
) -> sqlx::Result<Option<ReferralView>> {
    let code = code.trim().to_uppercase();
    let Some(row) = participant_repo::find_by_referral_code(pool, &code).await? else {
        return Ok(None);
    };
    Ok(Some(ReferralView {
        full_name: row.full_name,
        referral_code: row.referral_code,
        referral_count: row.referral_count,
        referral_earnings: row.referral_earnings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;
    use crate::services::registration_service::{self, RegistrationInput, RegistrationOutcome};
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
    async fn resolves_a_known_code_case_insensitively() {
        let pool = test_pool().await;
        let outcome = registration_service::register_participant(
            &pool,
            RegistrationInput {
                full_name: "Referrer".to_string(),
                email: "r@example.com".to_string(),
                phone: "+31-1".to_string(),
                wallet_address: "0xr".to_string(),
                password: "hunter2".to_string(),
                referral_code: None,
            },
        )
        .await
        .unwrap();
        let RegistrationOutcome::Registered(view) = outcome else {
            panic!("registration failed");
        };

        let found = lookup_referral(&pool, &view.referral_code.to_lowercase())
            .await
            .unwrap()
            .expect("code should resolve");
        assert_eq!(found.full_name, "Referrer");
        assert_eq!(found.referral_count, 0);
    }

    #[tokio::test]
    async fn unknown_code_is_none() {
        let pool = test_pool().await;
        assert!(lookup_referral(&pool, "FLOW-XXXXXX").await.unwrap().is_none());
    }
}
