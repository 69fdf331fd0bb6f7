//! Ledger: the only component that moves VTC between accounts.
//!
//! Every operation runs as exactly one database transaction. Account rows
//! are locked `FOR UPDATE` in ascending `account_id` order regardless of
//! transfer direction; redemption locks the item row before the account row.
//! Lock waits are bounded by `lock_timeout`, surfaced as [`LedgerError::Busy`].

pub mod error;
pub mod mint;
pub mod redeem;
pub mod transfer;

pub use error::LedgerError;
pub use mint::mint;
pub use redeem::{RedeemReceipt, redeem};
pub use transfer::{TransferReceipt, transfer};

use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};

/// Bounded lock wait for every ledger transaction. A blocked operation
/// aborts with `55P03` instead of holding its partial locks indefinitely.
pub(crate) const LOCK_TIMEOUT_SQL: &str = "SET LOCAL lock_timeout = '3s'";

/// Canonical lock order for a pair of account rows: always ascending id.
pub(crate) fn lock_order(a: i64, b: i64) -> (i64, i64) {
    if a < b { (a, b) } else { (b, a) }
}

/// Acquire an exclusive row lock on an account and return its balance.
pub(crate) async fn lock_balance(
    tx: &mut Transaction<'_, Postgres>,
    account_id: i64,
) -> Result<Option<Decimal>, LedgerError> {
    let balance = sqlx::query_scalar::<_, Decimal>(
        "SELECT balance FROM accounts WHERE account_id = $1 FOR UPDATE",
    )
    .bind(account_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(balance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_order_is_ascending() {
        assert_eq!(lock_order(1, 2), (1, 2));
        assert_eq!(lock_order(2, 1), (1, 2));
        assert_eq!(lock_order(7, 7), (7, 7));
    }

    #[test]
    fn test_lock_order_direction_independent() {
        // Opposite-direction transfers between the same pair must agree
        // on which row locks first.
        assert_eq!(lock_order(42, 99), lock_order(99, 42));
    }
}
