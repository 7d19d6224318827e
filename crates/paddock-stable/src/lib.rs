//! The player's stable: food inventory, troughs, upgrades, and houses.
//!
//! This crate holds the game-economy models that sit on top of the
//! [`paddock_ledger::Ledger`]. Each model validates fully before it touches
//! the ledger or its own fields, so an `Err` always means nothing changed.
//!
//! # Modules
//!
//! - [`catalog`] -- The static food catalog ([`FoodCatalog`])
//! - [`error`] -- Error types ([`StableError`])
//! - [`house`] -- House pricing and ownership ([`HouseOwnership`])
//! - [`inventory`] -- Unplaced food stock ([`Inventory`])
//! - [`trough`] -- Food and water troughs ([`FoodTrough`], [`WaterTrough`])
//! - [`upgrade`] -- Trough levels and their cost curve ([`TroughUpgrades`])

pub mod catalog;
pub mod error;
pub mod house;
pub mod inventory;
pub mod trough;
pub mod upgrade;

// Re-export primary types at crate root for convenience.
pub use catalog::{FoodCatalog, FoodSpec};
pub use error::StableError;
pub use house::{HouseOwnership, HousePricing, house_name};
pub use inventory::Inventory;
pub use trough::{FoodTrough, TroughSpec, WaterFill, WaterTrough};
pub use upgrade::{TroughUpgrades, UpgradeSchedule};
