//! Viltrum Wallet - custodial VTC wallet service
//!
//! Funds movement runs through a single PostgreSQL database; every logical
//! operation (transfer, redemption, recharge approval) is one ACID
//! transaction with canonical row-lock ordering.
//!
//! # Modules
//!
//! - [`account`] - Account store and append-only transaction log
//! - [`ledger`] - Atomic balance-changing operations
//! - [`recharge`] - Fiat top-up request workflow (pending -> approved/denied)
//! - [`supply`] - Total/uncirculated supply tracking
//! - [`store`] - Redeemable-points catalog
//! - [`user_auth`] - Argon2 + JWT session identity
//! - [`gateway`] - Axum HTTP API
//! - [`db`] - PostgreSQL connection pool
//! - [`config`] / [`logging`] - YAML config and tracing setup

pub mod account;
pub mod config;
pub mod db;
pub mod gateway;
pub mod ledger;
pub mod logging;
pub mod recharge;
pub mod store;
pub mod supply;
pub mod user_auth;

// Convenient re-exports at crate root
pub use account::{Account, Role, TransactionRecord, TxKind};
pub use db::Database;
pub use ledger::{LedgerError, RedeemReceipt, TransferReceipt};
pub use recharge::{Decision, RechargeRequest, RechargeService, RechargeStatus};
pub use store::StoreItem;
