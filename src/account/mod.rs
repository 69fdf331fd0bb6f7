//! Account store: durable per-user balance records and transaction history.

pub mod models;
pub mod repository;

pub use models::{Account, Role, TransactionRecord, TxKind};
pub use repository::{AccountRepository, TransactionRepository};
