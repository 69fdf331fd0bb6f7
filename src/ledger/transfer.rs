//! Peer-to-peer transfer: debit sender, credit recipient, append the
//! mirrored transaction pair. One commit boundary for all four effects.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{LOCK_TIMEOUT_SQL, LedgerError, lock_balance, lock_order};
use crate::account::{AccountRepository, TxKind};

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct TransferReceipt {
    /// Shared by both transaction records of this transfer
    pub transfer_group: Uuid,
    pub recipient_id: i64,
    pub amount: Decimal,
    pub sender_balance: Decimal,
}

/// Move `amount` VTC from `sender_id` to the account registered under
/// `recipient_email`.
///
/// Self-transfer and an unknown recipient fail before any lock is taken.
/// The sender's balance is re-checked under lock, so two contending
/// transfers can never both pass the funds check.
pub async fn transfer(
    pool: &PgPool,
    sender_id: i64,
    recipient_email: &str,
    amount: Decimal,
    memo: Option<&str>,
) -> Result<TransferReceipt, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }

    let sender = AccountRepository::get_by_id(pool, sender_id)
        .await
        .map_err(LedgerError::from)?
        .ok_or(LedgerError::UserNotFound)?;

    let recipient = AccountRepository::get_by_email(pool, recipient_email)
        .await
        .map_err(LedgerError::from)?
        .ok_or(LedgerError::RecipientNotFound)?;

    if recipient.account_id == sender_id {
        return Err(LedgerError::InvalidRecipient);
    }
    let recipient_id = recipient.account_id;

    let mut tx = pool.begin().await?;
    sqlx::query(LOCK_TIMEOUT_SQL).execute(&mut *tx).await?;

    // Ascending-id order, whichever direction the money flows.
    let (first, second) = lock_order(sender_id, recipient_id);
    let first_balance = lock_balance(&mut tx, first).await?;
    let second_balance = lock_balance(&mut tx, second).await?;

    let (sender_balance, recipient_balance) = if first == sender_id {
        (first_balance, second_balance)
    } else {
        (second_balance, first_balance)
    };
    let sender_balance = sender_balance.ok_or(LedgerError::UserNotFound)?;
    if recipient_balance.is_none() {
        return Err(LedgerError::RecipientNotFound);
    }

    if sender_balance < amount {
        return Err(LedgerError::InsufficientBalance);
    }

    sqlx::query("UPDATE accounts SET balance = balance - $1 WHERE account_id = $2")
        .bind(amount)
        .bind(sender_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE accounts SET balance = balance + $1 WHERE account_id = $2")
        .bind(amount)
        .bind(recipient_id)
        .execute(&mut *tx)
        .await?;

    let transfer_group = Uuid::new_v4();
    let memo_suffix = memo
        .filter(|m| !m.trim().is_empty())
        .map(|m| format!(": {}", m.trim()))
        .unwrap_or_default();

    sqlx::query(
        r#"INSERT INTO transactions (account_id, kind, amount, description, transfer_group)
           VALUES ($1, $2, $3, $4, $5)"#,
    )
    .bind(sender_id)
    .bind(TxKind::TransferOut.id())
    .bind(amount)
    .bind(format!("Transfer to {}{}", recipient.username, memo_suffix))
    .bind(transfer_group)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"INSERT INTO transactions (account_id, kind, amount, description, transfer_group)
           VALUES ($1, $2, $3, $4, $5)"#,
    )
    .bind(recipient_id)
    .bind(TxKind::TransferIn.id())
    .bind(amount)
    .bind(format!("Transfer from {}{}", sender.username, memo_suffix))
    .bind(transfer_group)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        sender_id,
        recipient_id,
        amount = %amount,
        transfer_group = %transfer_group,
        "transfer committed"
    );

    Ok(TransferReceipt {
        transfer_group,
        recipient_id,
        amount,
        sender_balance: sender_balance - amount,
    })
}
