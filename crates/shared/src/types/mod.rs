//! Common types used across the application.

pub mod money;

pub use money::{round_money, validate_non_negative_amount, validate_positive_amount};

use uuid::Uuid;

/// The fixed identifier of the singleton wallet balance row.
///
/// There is exactly one shared wallet; every balance read and write targets
/// this row.
pub const WALLET_BALANCE_ID: Uuid = Uuid::nil();
