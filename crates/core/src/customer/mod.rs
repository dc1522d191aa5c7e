//! Customer deposit workflow: keeps customer rows and the wallet balance
//! synchronized through create/edit/delete.

pub mod error;
pub mod store;
pub mod types;
pub mod workflow;

pub use error::WorkflowError;
pub use store::CustomerStore;
pub use types::{CustomerRecord, DepositOutcome};
pub use workflow::CustomerWorkflow;
