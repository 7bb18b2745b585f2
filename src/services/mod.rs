pub mod activity_service;
pub mod analytics_service;
pub mod assistant_service;
pub mod auth_service;
pub mod expiry_service;
pub mod leaderboard_service;
pub mod participant_service;
pub mod payment_service;
pub mod payout_service;
pub mod referral_service;
pub mod registration_service;
pub mod risk_service;
pub mod support_service;
