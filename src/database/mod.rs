pub mod activity_log_repo;
pub mod participant_repo;
pub mod payment_submission_repo;
pub mod payout_request_repo;
pub mod schema;
pub mod support_ticket_repo;
