pub mod activity_logs;
pub mod participants;
pub mod payment_submissions;
pub mod payout_requests;
pub mod support_tickets;

pub use activity_logs::ActivityLogRow;
pub use participants::ParticipantRow;
pub use payment_submissions::PaymentSubmissionRow;
pub use payout_requests::PayoutRequestRow;
pub use support_tickets::SupportTicketRow;
