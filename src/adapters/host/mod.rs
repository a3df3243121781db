//! Host collaborator contracts
//!
//! The export core never talks to the modeling host directly. It is written
//! against the traits in [`traits`], which the embedding application (or the
//! local command bridge in [`crate::adapters::local`]) implements.

pub mod traits;

pub use traits::{Exporter, ProgressSink, TransactionScope, TransactionalUnit};

#[cfg(test)]
pub use traits::{MockExporter, MockProgressSink, MockTransactionalUnit};
