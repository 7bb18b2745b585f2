use sqlx::SqlitePool;

use crate::models::SupportTicketRow;

const SQL_INSERT_TICKET: &str = r#"
INSERT INTO support_tickets (
  id,
  participant_email,
  category,
  subject,
  message,
  status,
  created_at,
  updated_at
) VALUES (?, ?, ?, ?, ?, 'open', ?, ?)
"#;

pub struct NewSupportTicket<'a> {
    pub id: &'a str,
    pub participant_email: &'a str,
    pub category: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    pub created_at: &'a str,
}

pub async fn insert_ticket(
    pool: &SqlitePool,
    ticket: NewSupportTicket<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_TICKET)
        .bind(ticket.id)
        .bind(ticket.participant_email)
        .bind(ticket.category)
        .bind(ticket.subject)
        .bind(ticket.message)
        .bind(ticket.created_at)
        .bind(ticket.created_at)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_FIND_BY_ID: &str = r#"
SELECT
    id,
    participant_email,
    category,
    subject,
    message,
    status,
    admin_response,
    created_at,
    updated_at
FROM support_tickets
WHERE id = ?
LIMIT 1
"#;

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<SupportTicketRow>> {
    sqlx::query_as::<_, SupportTicketRow>(SQL_FIND_BY_ID)
        .bind(id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_BY_EMAIL: &str = r#"
SELECT
    id,
    participant_email,
    category,
    subject,
    message,
    status,
    admin_response,
    created_at,
    updated_at
FROM support_tickets
WHERE participant_email = ?
ORDER BY created_at DESC
"#;

pub async fn list_by_email(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Vec<SupportTicketRow>> {
    sqlx::query_as::<_, SupportTicketRow>(SQL_LIST_BY_EMAIL)
        .bind(email)
        .fetch_all(pool)
        .await
}

const SQL_LIST_ALL: &str = r#"
SELECT
    id,
    participant_email,
    category,
    subject,
    message,
    status,
    admin_response,
    created_at,
    updated_at
FROM support_tickets
ORDER BY created_at DESC
"#;

pub async fn list_all(pool: &SqlitePool) -> sqlx::Result<Vec<SupportTicketRow>> {
    sqlx::query_as::<_, SupportTicketRow>(SQL_LIST_ALL)
        .fetch_all(pool)
        .await
}

const SQL_LIST_BY_STATUS: &str = r#"
SELECT
    id,
    participant_email,
    category,
    subject,
    message,
    status,
    admin_response,
    created_at,
    updated_at
FROM support_tickets
WHERE status = ?
ORDER BY created_at DESC
"#;

pub async fn list_by_status(
    pool: &SqlitePool,
    status: &str,
) -> sqlx::Result<Vec<SupportTicketRow>> {
    sqlx::query_as::<_, SupportTicketRow>(SQL_LIST_BY_STATUS)
        .bind(status)
        .fetch_all(pool)
        .await
}

const SQL_SET_RESPONSE: &str = r#"
UPDATE support_tickets
SET admin_response = ?,
    status = ?,
    updated_at = ?
WHERE id = ?
"#;

pub async fn set_response(
    pool: &SqlitePool,
    id: &str,
    response: &str,
    status: &str,
    updated_at: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_SET_RESPONSE)
        .bind(response)
        .bind(status)
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn count_open(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM support_tickets WHERE status = 'open'")
        .fetch_one(pool)
        .await
}
