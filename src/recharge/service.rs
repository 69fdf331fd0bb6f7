use rust_decimal::Decimal;
use sqlx::{PgPool, Row};

use super::models::{Decision, RechargeRequest, RechargeStatus};
use crate::ledger::{self, LedgerError};
use crate::supply;

pub struct RechargeService;

impl RechargeService {
    /// Submit a new fiat top-up request. No balance effect; the request
    /// waits in `pending` until an admin resolves it.
    pub async fn submit(
        pool: &PgPool,
        account_id: i64,
        amount_fiat: Decimal,
        method: &str,
        reference: &str,
    ) -> Result<i64, LedgerError> {
        if amount_fiat <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        let request_id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO recharge_requests (account_id, amount_fiat, method, reference, status)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING request_id"#,
        )
        .bind(account_id)
        .bind(amount_fiat)
        .bind(method)
        .bind(reference)
        .bind(RechargeStatus::Pending.id())
        .fetch_one(pool)
        .await?;

        tracing::info!(request_id, account_id, amount_fiat = %amount_fiat, "recharge submitted");
        Ok(request_id)
    }

    /// Resolve a pending request. The status flip is a conditional update
    /// (`... AND status = pending`), so a concurrent duplicate resolution
    /// loses the race and gets `AlreadyProcessed` — never a second credit.
    ///
    /// On approval the requester's credit, the supply decrement, and the
    /// status flip commit as one unit.
    pub async fn resolve(
        pool: &PgPool,
        request_id: i64,
        decision: Decision,
    ) -> Result<(), LedgerError> {
        let (new_status, credited) = match decision {
            Decision::Approve { credited_vtc } => {
                if credited_vtc <= Decimal::ZERO {
                    return Err(LedgerError::InvalidAmount);
                }
                (RechargeStatus::Approved, Some(credited_vtc))
            }
            Decision::Deny => (RechargeStatus::Denied, None),
        };

        let mut tx = pool.begin().await?;
        sqlx::query(crate::ledger::LOCK_TIMEOUT_SQL)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query(
            r#"UPDATE recharge_requests
               SET status = $1, credited_vtc = $2, resolved_at = NOW()
               WHERE request_id = $3 AND status = $4
               RETURNING account_id, amount_fiat, method"#,
        )
        .bind(new_status.id())
        .bind(credited)
        .bind(request_id)
        .bind(RechargeStatus::Pending.id())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            // Zero rows: the request is unknown, or someone else resolved it.
            let exists =
                sqlx::query_scalar::<_, i32>("SELECT 1 FROM recharge_requests WHERE request_id = $1")
                    .bind(request_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            return Err(if exists.is_some() {
                LedgerError::AlreadyProcessed
            } else {
                LedgerError::NotFound
            });
        };

        let account_id: i64 = row.get("account_id");
        let amount_fiat: Decimal = row.get("amount_fiat");
        let method: String = row.get("method");

        if let Some(credited) = credited {
            supply::decrease_uncirculated(&mut tx, credited).await?;
            ledger::mint(
                &mut tx,
                account_id,
                credited,
                &format!("Recharge approved: {} Bs via {}", amount_fiat, method),
            )
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            request_id,
            account_id,
            status = new_status.as_str(),
            credited_vtc = ?credited,
            "recharge resolved"
        );
        Ok(())
    }

    /// All pending requests, oldest first (admin review queue)
    pub async fn pending(pool: &PgPool) -> Result<Vec<RechargeRequest>, LedgerError> {
        let rows = sqlx::query(
            r#"SELECT request_id, account_id, amount_fiat, method, reference,
                      credited_vtc, status, created_at, resolved_at
               FROM recharge_requests
               WHERE status = $1
               ORDER BY created_at ASC"#,
        )
        .bind(RechargeStatus::Pending.id())
        .fetch_all(pool)
        .await?;

        rows.iter().map(Self::row_to_request).collect()
    }

    /// A requester's own submissions, newest first
    pub async fn history_for(
        pool: &PgPool,
        account_id: i64,
        limit: i64,
    ) -> Result<Vec<RechargeRequest>, LedgerError> {
        let rows = sqlx::query(
            r#"SELECT request_id, account_id, amount_fiat, method, reference,
                      credited_vtc, status, created_at, resolved_at
               FROM recharge_requests
               WHERE account_id = $1
               ORDER BY created_at DESC
               LIMIT $2"#,
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        rows.iter().map(Self::row_to_request).collect()
    }

    fn row_to_request(row: &sqlx::postgres::PgRow) -> Result<RechargeRequest, LedgerError> {
        let status_id: i16 = row.get("status");
        let status = RechargeStatus::from_id(status_id).ok_or_else(|| {
            LedgerError::Storage(sqlx::Error::Decode(
                format!("invalid recharge status: {}", status_id).into(),
            ))
        })?;

        Ok(RechargeRequest {
            request_id: row.get("request_id"),
            account_id: row.get("account_id"),
            amount_fiat: row.get("amount_fiat"),
            method: row.get("method"),
            reference: row.get("reference"),
            credited_vtc: row.get("credited_vtc"),
            status,
            created_at: row.get("created_at"),
            resolved_at: row.get("resolved_at"),
        })
    }
}
