//! Shared type definitions for the Paddock horse-care game.
//!
//! This crate is the single source of truth for the types that cross crate
//! boundaries: the models, the dispatcher, and the browser presentation
//! layer all speak them. Types flow to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Session, ledger entry, and house style identifiers
//! - [`enums`] -- Currencies, food, troughs, animations, sounds, rejections
//! - [`structs`] -- Prices, stats, trough contents, ledger entries, snapshot
//! - [`actions`] -- Player actions and dispatch outcomes

pub mod actions;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::{ActionOutcome, ActionStatus, PlayerAction};
pub use enums::{
    AnimationTag, Currency, FoodKind, LedgerDirection, LedgerReason, RejectionReason, SoundCue,
    TroughKind, VitalStat,
};
pub use ids::{HouseStyleId, LedgerEntryId, SessionId};
pub use structs::{
    CreatureStats, LedgerEntry, Price, SessionSnapshot, TroughContents, UpgradeLevels,
};
