//! Recharge workflow: off-band fiat top-up requests awaiting admin review.
//!
//! State machine: pending -> approved | denied, both terminal. Approval
//! credits the requester through the ledger mint path and draws the same
//! amount from the uncirculated supply, all in one transaction.

pub mod models;
pub mod service;

pub use models::{Decision, RechargeRequest, RechargeStatus};
pub use service::RechargeService;
