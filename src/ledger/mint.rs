//! Mint: credit VTC into an account from the system treasury. Used only by
//! the recharge-approval path, inside the approval's own transaction; the
//! matching debit is the supply tracker's uncirculated decrement.

use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};

use super::{LedgerError, lock_balance};
use crate::account::TxKind;

/// Credit `amount` to `account_id` and append the `top-up` record.
/// Runs inside the caller's open transaction; the caller commits.
pub async fn mint(
    tx: &mut Transaction<'_, Postgres>,
    account_id: i64,
    amount: Decimal,
    description: &str,
) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }

    let balance = lock_balance(tx, account_id)
        .await?
        .ok_or(LedgerError::UserNotFound)?;

    sqlx::query("UPDATE accounts SET balance = balance + $1 WHERE account_id = $2")
        .bind(amount)
        .bind(account_id)
        .execute(&mut **tx)
        .await?;

    sqlx::query(
        r#"INSERT INTO transactions (account_id, kind, amount, description)
           VALUES ($1, $2, $3, $4)"#,
    )
    .bind(account_id)
    .bind(TxKind::TopUp.id())
    .bind(amount)
    .bind(description)
    .execute(&mut **tx)
    .await?;

    Ok(balance + amount)
}
