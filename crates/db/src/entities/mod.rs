//! `SeaORM` entity definitions.

pub mod activity_log;
pub mod customers;
pub mod transactions;
pub mod wallet_balance;
