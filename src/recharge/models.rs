use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Recharge request status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum RechargeStatus {
    Pending = 0,
    Approved = 1,
    Denied = 2,
}

impl RechargeStatus {
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(RechargeStatus::Pending),
            1 => Some(RechargeStatus::Approved),
            2 => Some(RechargeStatus::Denied),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RechargeStatus::Pending => "pending",
            RechargeStatus::Approved => "approved",
            RechargeStatus::Denied => "denied",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RechargeStatus::Pending)
    }
}

/// Admin decision on a pending request
#[derive(Debug, Clone, Copy)]
pub enum Decision {
    /// Approve, crediting the given VTC amount to the requester
    Approve { credited_vtc: Decimal },
    Deny,
}

/// A fiat top-up request. Mutated exactly once, by `RechargeService::resolve`.
#[derive(Debug, Clone)]
pub struct RechargeRequest {
    pub request_id: i64,
    pub account_id: i64,
    pub amount_fiat: Decimal,
    pub method: String,
    pub reference: String,
    pub credited_vtc: Option<Decimal>,
    pub status: RechargeStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            RechargeStatus::Pending,
            RechargeStatus::Approved,
            RechargeStatus::Denied,
        ] {
            assert_eq!(RechargeStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(RechargeStatus::from_id(3), None);
    }

    #[test]
    fn test_only_pending_is_non_terminal() {
        assert!(!RechargeStatus::Pending.is_terminal());
        assert!(RechargeStatus::Approved.is_terminal());
        assert!(RechargeStatus::Denied.is_terminal());
    }
}
