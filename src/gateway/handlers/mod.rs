pub mod admin;
pub mod health;
pub mod helpers;
pub mod recharge;
pub mod store;
pub mod supply;
pub mod wallet;

pub use health::{HealthResponse, health_check};
