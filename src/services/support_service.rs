use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::support_ticket_repo;
use crate::models::SupportTicketRow;

pub enum TicketOutcome {
    Created(SupportTicketRow),
    MissingField(&'static str),
}

pub async fn create_ticket(
    pool: &SqlitePool,
    email: &str,
    category: &str,
    subject: &str,
    message: &str,
) -> sqlx::Result<TicketOutcome> {
    let email = email.trim().to_lowercase();
    let category = category.trim();
    let subject = subject.trim();
    let message = message.trim();

    if email.is_empty() {
        return Ok(TicketOutcome::MissingField("email"));
    }
    if category.is_empty() {
        return Ok(TicketOutcome::MissingField("category"));
    }
    if subject.is_empty() {
        return Ok(TicketOutcome::MissingField("subject"));
    }
    if message.is_empty() {
        return Ok(TicketOutcome::MissingField("message"));
    }

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339();
    support_ticket_repo::insert_ticket(
        pool,
        support_ticket_repo::NewSupportTicket {
            id: &id,
            participant_email: &email,
            category,
            subject,
            message,
            created_at: &created_at,
        },
    )
    .await?;

    let Some(row) = support_ticket_repo::find_by_id(pool, &id).await? else {
        return Err(sqlx::Error::RowNotFound);
    };
    Ok(TicketOutcome::Created(row))
}

pub async fn list_for_participant(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Vec<SupportTicketRow>> {
    support_ticket_repo::list_by_email(pool, &email.trim().to_lowercase()).await
}

pub async fn list_all(
    pool: &SqlitePool,
    status: Option<&str>,
) -> sqlx::Result<Vec<SupportTicketRow>> {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        Some(status) => support_ticket_repo::list_by_status(pool, status).await,
        None => support_ticket_repo::list_all(pool).await,
    }
}

pub enum RespondOutcome {
    Responded(SupportTicketRow),
    NotFound,
    MissingResponse,
}

pub async fn respond_to_ticket(
    pool: &SqlitePool,
    ticket_id: &str,
    response: &str,
    status: Option<&str>,
) -> sqlx::Result<RespondOutcome> {
    let response = response.trim();
    if response.is_empty() {
        return Ok(RespondOutcome::MissingResponse);
    }
    if support_ticket_repo::find_by_id(pool, ticket_id).await?.is_none() {
        return Ok(RespondOutcome::NotFound);
    }

    let status = status
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("resolved");
    let updated_at = Utc::now().to_rfc3339();
    support_ticket_repo::set_response(pool, ticket_id, response, status, &updated_at).await?;

    let Some(row) = support_ticket_repo::find_by_id(pool, ticket_id).await? else {
        return Err(sqlx::Error::RowNotFound);
    };
    Ok(RespondOutcome::Responded(row))
}
