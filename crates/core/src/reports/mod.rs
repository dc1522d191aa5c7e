//! Daily statement aggregation over recorded transactions.

pub mod service;
pub mod types;

pub use service::daily_stats;
pub use types::{DailyStats, TransactionSummary};
