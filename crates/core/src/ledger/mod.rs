//! Wallet ledger: the only component permitted to change the wallet balance.

pub mod error;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use service::LedgerService;
pub use store::{ActivityRecorder, BalanceRegister, StoreError};
pub use types::{
    ActivityKind, LedgerReceipt, NewActivity, NewTransaction, TransactionKind, TransactionStatus,
};
