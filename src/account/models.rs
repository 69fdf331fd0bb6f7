//! Data models for wallet accounts and the append-only transaction log

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum Role {
    User = 0,
    Admin = 1,
}

impl From<i16> for Role {
    fn from(v: i16) -> Self {
        match v {
            1 => Role::Admin,
            _ => Role::User,
        }
    }
}

impl Role {
    pub fn id(&self) -> i16 {
        *self as i16
    }
}

/// Wallet account. Balance is mutated only by ledger operations.
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Transaction record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum TxKind {
    TransferOut = 1,
    TransferIn = 2,
    Expense = 3,
    TopUp = 4,
}

impl TxKind {
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(TxKind::TransferOut),
            2 => Some(TxKind::TransferIn),
            3 => Some(TxKind::Expense),
            4 => Some(TxKind::TopUp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::TransferOut => "transfer-out",
            TxKind::TransferIn => "transfer-in",
            TxKind::Expense => "expense",
            TxKind::TopUp => "top-up",
        }
    }
}

/// Immutable ledger entry. Created in the same transaction as the balance
/// mutation it records; never updated or deleted afterwards.
///
/// Both sides of a transfer carry the same `transfer_group`, so the pairing
/// is structural rather than inferred from amount and timestamp.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub tx_id: i64,
    pub account_id: i64,
    pub kind: TxKind,
    pub amount: Decimal,
    pub description: String,
    pub transfer_group: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_i16() {
        assert_eq!(Role::from(0), Role::User);
        assert_eq!(Role::from(1), Role::Admin);
        assert_eq!(Role::from(99), Role::User); // unknown defaults to User
    }

    #[test]
    fn test_account_is_admin() {
        let account = Account {
            account_id: 1,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            role: Role::Admin,
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        };
        assert!(account.is_admin());

        let account = Account {
            role: Role::User,
            ..account
        };
        assert!(!account.is_admin());
    }

    #[test]
    fn test_tx_kind_round_trip() {
        for kind in [
            TxKind::TransferOut,
            TxKind::TransferIn,
            TxKind::Expense,
            TxKind::TopUp,
        ] {
            assert_eq!(TxKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(TxKind::from_id(0), None);
        assert_eq!(TxKind::from_id(5), None);
    }

    #[test]
    fn test_tx_kind_as_str() {
        assert_eq!(TxKind::TransferOut.as_str(), "transfer-out");
        assert_eq!(TxKind::TopUp.as_str(), "top-up");
    }
}
