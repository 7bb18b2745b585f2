pub mod activity;
pub mod admin;
pub mod assistant;
pub mod leaderboard;
pub mod participants;
pub mod payments;
pub mod payouts;
pub mod referrals;
pub mod support;
