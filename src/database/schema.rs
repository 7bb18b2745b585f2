use sqlx::SqlitePool;

// The demo store is an in-memory SQLite database, so the schema is applied
// idempotently at every startup instead of through an external migration step.

const SQL_CREATE_PARTICIPANTS: &str = r#"
CREATE TABLE IF NOT EXISTS participants (
  id TEXT PRIMARY KEY,
  full_name TEXT NOT NULL,
  email TEXT NOT NULL UNIQUE,
  phone TEXT NOT NULL UNIQUE,
  wallet_address TEXT NOT NULL UNIQUE,
  password_hash TEXT NOT NULL,
  status TEXT NOT NULL DEFAULT 'pending',
  activation_fee_paid INTEGER NOT NULL DEFAULT 0,
  activation_deadline TEXT NOT NULL,
  wallet_balance INTEGER NOT NULL DEFAULT 0,
  total_contributed INTEGER NOT NULL DEFAULT 0,
  risk_score INTEGER NOT NULL DEFAULT 0,
  referral_code TEXT NOT NULL UNIQUE,
  referred_by TEXT,
  referral_count INTEGER NOT NULL DEFAULT 0,
  referral_earnings INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL
)
"#;

const SQL_CREATE_PAYMENT_SUBMISSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS payment_submissions (
  id TEXT PRIMARY KEY,
  participant_email TEXT NOT NULL,
  amount INTEGER NOT NULL,
  method TEXT NOT NULL,
  screenshot_ref TEXT,
  status TEXT NOT NULL DEFAULT 'pending',
  review_note TEXT,
  reviewed_by TEXT,
  created_at TEXT NOT NULL,
  reviewed_at TEXT
)
"#;

const SQL_CREATE_PAYOUT_REQUESTS: &str = r#"
CREATE TABLE IF NOT EXISTS payout_requests (
  id TEXT PRIMARY KEY,
  participant_email TEXT NOT NULL,
  amount INTEGER NOT NULL,
  destination_address TEXT NOT NULL,
  status TEXT NOT NULL DEFAULT 'pending',
  created_at TEXT NOT NULL,
  processed_at TEXT
)
"#;

const SQL_CREATE_SUPPORT_TICKETS: &str = r#"
CREATE TABLE IF NOT EXISTS support_tickets (
  id TEXT PRIMARY KEY,
  participant_email TEXT NOT NULL,
  category TEXT NOT NULL,
  subject TEXT NOT NULL,
  message TEXT NOT NULL,
  status TEXT NOT NULL DEFAULT 'open',
  admin_response TEXT,
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
)
"#;

const SQL_CREATE_ACTIVITY_LOGS: &str = r#"
CREATE TABLE IF NOT EXISTS activity_logs (
  id TEXT PRIMARY KEY,
  participant_email TEXT NOT NULL,
  action TEXT NOT NULL,
  detail TEXT,
  created_at TEXT NOT NULL
)
"#;

pub async fn init(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_PARTICIPANTS).execute(pool).await?;
    sqlx::query(SQL_CREATE_PAYMENT_SUBMISSIONS)
        .execute(pool)
        .await?;
    sqlx::query(SQL_CREATE_PAYOUT_REQUESTS).execute(pool).await?;
    sqlx::query(SQL_CREATE_SUPPORT_TICKETS).execute(pool).await?;
    sqlx::query(SQL_CREATE_ACTIVITY_LOGS).execute(pool).await?;
    Ok(())
}
