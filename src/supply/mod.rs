//! System supply tracker: total supply minus uncirculated treasury balance
//! gives the circulating supply. Only the recharge-approval path moves VTC
//! out of the treasury.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::ledger::LedgerError;

/// The wallet's single currency symbol
pub const CURRENCY_SYMBOL: &str = "VTC";

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct SupplyInfo {
    pub symbol: String,
    pub total_supply: Decimal,
    pub uncirculated_balance: Decimal,
    pub circulating_supply: Decimal,
}

/// Read-only supply snapshot
pub async fn info(pool: &PgPool) -> Result<SupplyInfo, LedgerError> {
    let row = sqlx::query(
        "SELECT total_supply, uncirculated_balance FROM system_supply WHERE symbol = $1",
    )
    .bind(CURRENCY_SYMBOL)
    .fetch_optional(pool)
    .await?
    .ok_or(LedgerError::NotFound)?;

    let total_supply: Decimal = row.get("total_supply");
    let uncirculated_balance: Decimal = row.get("uncirculated_balance");

    Ok(SupplyInfo {
        symbol: CURRENCY_SYMBOL.to_string(),
        total_supply,
        uncirculated_balance,
        circulating_supply: total_supply - uncirculated_balance,
    })
}

/// Current circulating supply
pub async fn circulating(pool: &PgPool) -> Result<Decimal, LedgerError> {
    Ok(info(pool).await?.circulating_supply)
}

/// Move `amount` out of the treasury. Runs inside the recharge-approval
/// transaction; the conditional update keeps `uncirculated_balance` from
/// ever going negative.
pub async fn decrease_uncirculated(
    tx: &mut Transaction<'_, Postgres>,
    amount: Decimal,
) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }

    let result = sqlx::query(
        r#"UPDATE system_supply
           SET uncirculated_balance = uncirculated_balance - $1
           WHERE symbol = $2 AND uncirculated_balance >= $1"#,
    )
    .bind(amount)
    .bind(CURRENCY_SYMBOL)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(LedgerError::SupplyExhausted);
    }

    Ok(())
}
