//! Repository implementations of the core storage ports.

pub mod activity;
pub mod balance;
pub mod customer;
pub mod recorder;
pub mod transaction;

pub use activity::ActivityLogRepository;
pub use balance::WalletBalanceRepository;
pub use customer::CustomerRepository;
pub use recorder::DbRecorder;
pub use transaction::TransactionRepository;
