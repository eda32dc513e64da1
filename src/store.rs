use thiserror::Error;

use crate::error::Result;
use crate::models::NormalizedTransaction;

/// Which constraint an insert tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// The fingerprint column's UNIQUE constraint — the row is a duplicate.
    Uniqueness,
    /// Any other constraint (length bounds, foreign key, ...).
    Other,
}

/// Why the store refused a row. Callers branch on this instead of
/// pattern-matching backend error codes.
#[derive(Error, Debug)]
pub enum InsertError {
    #[error("{1}")]
    Constraint(ConstraintKind, String),

    #[error("{0}")]
    Rejected(String),
}

/// The persistence contract the import executor runs against. One insert per
/// call, atomic per row; the fingerprint uniqueness constraint is the sole
/// dedup mechanism.
pub trait TransactionStore {
    /// Insert a single transaction keyed by its fingerprint.
    fn insert_transaction(
        &self,
        txn: &NormalizedTransaction,
        fingerprint: &str,
    ) -> std::result::Result<(), InsertError>;

    /// Lowest existing user id, used as the default when no explicit user is
    /// configured. None when the users table is empty.
    fn lowest_user_id(&self) -> Result<Option<i64>>;
}
