use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::participant_repo;
use crate::models::ParticipantRow;

// Back-office credentials are a hardcoded comparison with env overrides,
// not a credential store.

fn admin_email() -> String {
    std::env::var("FLOWCHAIN_ADMIN_EMAIL").unwrap_or_else(|_| "admin@flowchain.app".to_string())
}

fn admin_password() -> String {
    std::env::var("FLOWCHAIN_ADMIN_PASSWORD").unwrap_or_else(|_| "flowchain-admin".to_string())
}

fn super_admin_email() -> String {
    std::env::var("FLOWCHAIN_SUPER_ADMIN_EMAIL")
        .unwrap_or_else(|_| "root@flowchain.app".to_string())
}

fn super_admin_password() -> String {
    std::env::var("FLOWCHAIN_SUPER_ADMIN_PASSWORD")
        .unwrap_or_else(|_| "flowchain-root".to_string())
}

pub fn admin_token() -> String {
    std::env::var("FLOWCHAIN_ADMIN_TOKEN").unwrap_or_else(|_| "fcp-admin-token".to_string())
}

pub fn super_admin_token() -> String {
    std::env::var("FLOWCHAIN_SUPER_ADMIN_TOKEN")
        .unwrap_or_else(|_| "fcp-super-admin-token".to_string())
}

pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

// Participant tokens are opaque strings; the server never validates them
// beyond bearer presence, so a fresh one is minted on every login.
pub fn mint_participant_token() -> String {
    format!("fcp_{}", Uuid::new_v4().simple())
}

pub enum ParticipantLoginOutcome {
    LoggedIn {
        token: String,
        participant: ParticipantRow,
    },
    InvalidCredentials,
}

pub async fn login_participant(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> sqlx::Result<ParticipantLoginOutcome> {
    let Some(participant) =
        participant_repo::find_by_email(pool, &email.trim().to_lowercase()).await?
    else {
        return Ok(ParticipantLoginOutcome::InvalidCredentials);
    };

    if participant.password_hash != hash_password(password) {
        return Ok(ParticipantLoginOutcome::InvalidCredentials);
    }

    // Frozen participants still log in; the dashboard shows the frozen notice.
    Ok(ParticipantLoginOutcome::LoggedIn {
        token: mint_participant_token(),
        participant,
    })
}

pub enum AdminLoginOutcome {
    LoggedIn { token: String, role: &'static str },
    InvalidCredentials,
}

pub fn login_admin(email: &str, password: &str) -> AdminLoginOutcome {
    let email = email.trim();
    if email == super_admin_email() && password == super_admin_password() {
        return AdminLoginOutcome::LoggedIn {
            token: super_admin_token(),
            role: "super_admin",
        };
    }
    if email == admin_email() && password == admin_password() {
        return AdminLoginOutcome::LoggedIn {
            token: admin_token(),
            role: "admin",
        };
    }
    AdminLoginOutcome::InvalidCredentials
}

pub fn resolve_admin_role(token: &str) -> Option<&'static str> {
    if token == super_admin_token() {
        Some("super_admin")
    } else if token == admin_token() {
        Some("admin")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_password_is_stable_hex() {
        let a = hash_password("secret");
        let b = hash_password("secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_password("other"));
    }

    #[test]
    fn admin_login_matches_hardcoded_pairs() {
        match login_admin("admin@flowchain.app", "flowchain-admin") {
            AdminLoginOutcome::LoggedIn { role, .. } => assert_eq!(role, "admin"),
            AdminLoginOutcome::InvalidCredentials => panic!("admin login refused"),
        }
        match login_admin("root@flowchain.app", "flowchain-root") {
            AdminLoginOutcome::LoggedIn { role, .. } => assert_eq!(role, "super_admin"),
            AdminLoginOutcome::InvalidCredentials => panic!("super admin login refused"),
        }
        assert!(matches!(
            login_admin("admin@flowchain.app", "wrong"),
            AdminLoginOutcome::InvalidCredentials
        ));
    }

    #[test]
    fn admin_role_resolves_by_token_equality() {
        assert_eq!(resolve_admin_role(&admin_token()), Some("admin"));
        assert_eq!(resolve_admin_role(&super_admin_token()), Some("super_admin"));
        assert_eq!(resolve_admin_role("fcp_not-a-real-token"), None);
    }
}
