use thiserror::Error;

/// Typed failures of ledger operations. Every precondition failure rolls
/// the transaction back; no partial state is ever committed.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(sqlx::Error),

    #[error("Invalid amount: must be positive")]
    InvalidAmount,

    #[error("Invalid recipient")]
    InvalidRecipient,

    #[error("Recipient not found")]
    RecipientNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Item not found")]
    ItemNotFound,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Item out of stock")]
    OutOfStock,

    #[error("Not found")]
    NotFound,

    #[error("Request already processed")]
    AlreadyProcessed,

    #[error("Uncirculated supply exhausted")]
    SupplyExhausted,

    #[error("Operation timed out waiting for a lock, try again")]
    Busy,
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        if is_lock_timeout(&e) {
            LedgerError::Busy
        } else {
            LedgerError::Storage(e)
        }
    }
}

/// Postgres `lock_not_available` (55P03), raised when `lock_timeout` expires.
fn is_lock_timeout(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("55P03"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_io_error_maps_to_storage() {
        let e = sqlx::Error::PoolTimedOut;
        match LedgerError::from(e) {
            LedgerError::Storage(_) => {}
            other => panic!("expected Storage, got {:?}", other),
        }
    }

    #[test]
    fn test_error_messages_are_specific() {
        // The gateway renders these to callers; each kind must read distinctly.
        assert_eq!(
            LedgerError::InsufficientBalance.to_string(),
            "Insufficient balance"
        );
        assert_eq!(
            LedgerError::AlreadyProcessed.to_string(),
            "Request already processed"
        );
        assert_eq!(
            LedgerError::SupplyExhausted.to_string(),
            "Uncirculated supply exhausted"
        );
    }
}
