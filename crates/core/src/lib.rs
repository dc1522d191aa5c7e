//! Core business logic for Tillbook.
//!
//! This crate contains the wallet ledger service, the customer deposit
//! workflow, and the reporting aggregator. It has no web or database
//! dependencies: persistence is reached through the port traits in
//! [`ledger::store`] and [`customer::store`], implemented by the db crate.

pub mod customer;
pub mod ledger;
pub mod reports;

#[cfg(test)]
pub(crate) mod testing;
