//! Redemption: spend VTC on a store item. Balance debit and stock decrement
//! commit together or not at all.

use rust_decimal::Decimal;
use sqlx::{PgPool, Row};

use super::{LOCK_TIMEOUT_SQL, LedgerError, lock_balance};
use crate::account::TxKind;

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct RedeemReceipt {
    pub item_id: i64,
    pub price: Decimal,
    pub new_balance: Decimal,
}

/// Redeem one unit of `item_id` against `user_id`'s balance.
///
/// Lock order is item row first, then account row. Stock and balance are
/// both re-validated under lock; catalog snapshots shown to the user may
/// be stale by the time the redemption runs.
pub async fn redeem(pool: &PgPool, user_id: i64, item_id: i64) -> Result<RedeemReceipt, LedgerError> {
    let mut tx = pool.begin().await?;
    sqlx::query(LOCK_TIMEOUT_SQL).execute(&mut *tx).await?;

    let item_row = sqlx::query(
        "SELECT name, price, stock FROM store_items WHERE item_id = $1 FOR UPDATE",
    )
    .bind(item_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(LedgerError::ItemNotFound)?;

    let name: String = item_row.get("name");
    let price: Decimal = item_row.get("price");
    let stock: i32 = item_row.get("stock");

    if stock <= 0 {
        return Err(LedgerError::OutOfStock);
    }

    let balance = lock_balance(&mut tx, user_id)
        .await?
        .ok_or(LedgerError::UserNotFound)?;

    if balance < price {
        return Err(LedgerError::InsufficientBalance);
    }

    sqlx::query("UPDATE store_items SET stock = stock - 1 WHERE item_id = $1")
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE accounts SET balance = balance - $1 WHERE account_id = $2")
        .bind(price)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"INSERT INTO transactions (account_id, kind, amount, description)
           VALUES ($1, $2, $3, $4)"#,
    )
    .bind(user_id)
    .bind(TxKind::Expense.id())
    .bind(price)
    .bind(format!("Redeemed {}", name))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(user_id, item_id, price = %price, "redemption committed");

    Ok(RedeemReceipt {
        item_id,
        price,
        new_balance: balance - price,
    })
}
