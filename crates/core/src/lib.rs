//! Core business logic for Splitpot.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `settlement` - Balance calculation, remainder allocation and debt resolution

pub mod settlement;

pub use settlement::{Contribution, Settlement, SettlementEngine, SettlementError, Transaction};
