//! BuildFlow Engine - Reward rules, leaderboards, and reconciliation

pub mod config;
pub mod dashboard;
pub mod leaderboard;
pub mod notifier;
pub mod reconcile;
pub mod rules;

pub use rules::evaluator::evaluate_submission;
