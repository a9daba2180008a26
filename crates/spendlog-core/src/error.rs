use thiserror::Error;

/// Error taxonomy for ledger operations. All variants are recoverable and
/// surface to the user as a transient notice; none are fatal.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No expense to undo")]
    NothingToUndo,
    #[error("No expense to redo")]
    NothingToRedo,
    #[error("Persistence failure: {0}")]
    Persistence(String),
    #[error("Import failed: {0}")]
    Import(String),
    #[error("Export failed: {0}")]
    Export(String),
}
