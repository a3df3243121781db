//! Transactional units for the command bridge
//!
//! The bridge program has no document state of its own, so a unit only
//! guards sequencing: one open unit at a time, and every start is matched by
//! exactly one commit or rollback.

use crate::adapters::host::TransactionalUnit;
use crate::domain::HostError;

/// Tracks the open unit of a bridge session
#[derive(Debug, Default)]
pub struct SessionTransactions {
    open: Option<String>,
    committed: usize,
    rolled_back: usize,
}

impl SessionTransactions {
    /// Create a session with no open unit
    pub fn new() -> Self {
        Self::default()
    }

    /// Label of the open unit, if any
    pub fn open_unit(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Units committed so far
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Units rolled back so far
    pub fn rolled_back(&self) -> usize {
        self.rolled_back
    }
}

impl TransactionalUnit for SessionTransactions {
    fn start(&mut self, label: &str) -> Result<(), HostError> {
        if let Some(open) = &self.open {
            return Err(HostError::TransactionStart(format!(
                "cannot start '{label}' while '{open}' is open"
            )));
        }
        tracing::debug!(label, "Transaction started");
        self.open = Some(label.to_string());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), HostError> {
        let label = self
            .open
            .take()
            .ok_or_else(|| HostError::TransactionCommit("no open transaction".to_string()))?;
        tracing::debug!(label = %label, "Transaction committed");
        self.committed += 1;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), HostError> {
        let label = self
            .open
            .take()
            .ok_or_else(|| HostError::TransactionRollback("no open transaction".to_string()))?;
        tracing::info!(label = %label, "Transaction rolled back");
        self.rolled_back += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_commit() {
        let mut session = SessionTransactions::new();
        session.start("Export A101").unwrap();
        assert_eq!(session.open_unit(), Some("Export A101"));

        session.commit().unwrap();
        assert_eq!(session.open_unit(), None);
        assert_eq!(session.committed(), 1);
    }

    #[test]
    fn test_nested_start_rejected() {
        let mut session = SessionTransactions::new();
        session.start("Export A101").unwrap();
        assert!(matches!(
            session.start("Export A102"),
            Err(HostError::TransactionStart(_))
        ));
    }

    #[test]
    fn test_commit_without_start() {
        let mut session = SessionTransactions::new();
        assert!(session.commit().is_err());
        assert!(session.rollback().is_err());
    }

    #[test]
    fn test_rollback_closes_unit() {
        let mut session = SessionTransactions::new();
        session.start("Export combined PDF").unwrap();
        session.rollback().unwrap();

        assert_eq!(session.rolled_back(), 1);
        assert!(session.start("Export A101").is_ok());
    }
}
