//! Core data structs shared between the models, the dispatcher, and the
//! presentation layer.
//!
//! Money is carried as [`Decimal`] (never floating point). Vital stats and
//! the water level are continuous gameplay values and use `f64`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    AnimationTag, Currency, FoodKind, LedgerDirection, LedgerReason, TroughKind, VitalStat,
};
use crate::ids::{HouseStyleId, LedgerEntryId, SessionId};

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// An amount of a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Price {
    /// The amount. Never negative for a valid price.
    #[ts(as = "String")]
    pub amount: Decimal,
    /// The currency the amount is denominated in.
    pub currency: Currency,
}

impl Price {
    /// A price in coins.
    pub const fn coins(amount: Decimal) -> Self {
        Self {
            amount,
            currency: Currency::Coins,
        }
    }

    /// A price in whole gems.
    pub fn gems(amount: u64) -> Self {
        Self {
            amount: Decimal::from(amount),
            currency: Currency::Gems,
        }
    }

    /// Whether the price is free.
    pub fn is_free(&self) -> bool {
        self.amount.is_zero()
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.amount.normalize(), self.currency)
    }
}

// ---------------------------------------------------------------------------
// Creature
// ---------------------------------------------------------------------------

/// The horse's vital stats. Each value is kept in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CreatureStats {
    /// Hunger level.
    pub hunger: f64,
    /// Sleepiness level.
    pub sleepy: f64,
    /// Dizziness level.
    pub dizzy: f64,
    /// Boredom level.
    pub bored: f64,
    /// Hurt level.
    pub hurt: f64,
}

impl CreatureStats {
    /// Read one stat.
    pub const fn get(&self, stat: VitalStat) -> f64 {
        match stat {
            VitalStat::Hunger => self.hunger,
            VitalStat::Sleepy => self.sleepy,
            VitalStat::Dizzy => self.dizzy,
            VitalStat::Bored => self.bored,
            VitalStat::Hurt => self.hurt,
        }
    }

    /// Mutable access to one stat.
    pub const fn get_mut(&mut self, stat: VitalStat) -> &mut f64 {
        match stat {
            VitalStat::Hunger => &mut self.hunger,
            VitalStat::Sleepy => &mut self.sleepy,
            VitalStat::Dizzy => &mut self.dizzy,
            VitalStat::Bored => &mut self.bored,
            VitalStat::Hurt => &mut self.hurt,
        }
    }
}

// ---------------------------------------------------------------------------
// Troughs and upgrades
// ---------------------------------------------------------------------------

/// What is currently sitting in the food trough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TroughContents {
    /// Corn units in the trough.
    pub corn: u32,
    /// Carrot units in the trough.
    pub carrot: u32,
    /// Current capacity (derived from the food trough level).
    pub capacity: u32,
}

impl TroughContents {
    /// Total food units in the trough.
    pub const fn total(&self) -> u32 {
        self.corn.saturating_add(self.carrot)
    }

    /// Units that still fit.
    pub const fn free_space(&self) -> u32 {
        self.capacity.saturating_sub(self.total())
    }

    /// Whether no more food fits.
    pub const fn is_full(&self) -> bool {
        self.total() >= self.capacity
    }

    /// Whether there is nothing to eat.
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Current upgrade level of each trough, each in `[1, max_level]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UpgradeLevels {
    /// Food trough level.
    pub food_trough: u8,
    /// Water trough level.
    pub water_trough: u8,
}

impl Default for UpgradeLevels {
    fn default() -> Self {
        Self {
            food_trough: 1,
            water_trough: 1,
        }
    }
}

impl UpgradeLevels {
    /// Level of the given trough.
    pub const fn get(&self, kind: TroughKind) -> u8 {
        match kind {
            TroughKind::FoodTrough => self.food_trough,
            TroughKind::WaterTrough => self.water_trough,
        }
    }

    /// Mutable access to the level of the given trough.
    pub const fn get_mut(&mut self, kind: TroughKind) -> &mut u8 {
        match kind {
            TroughKind::FoodTrough => &mut self.food_trough,
            TroughKind::WaterTrough => &mut self.water_trough,
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// A single journal entry in the session ledger.
///
/// Entries are append-only. Replaying every entry from zero reproduces the
/// wallet balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LedgerEntry {
    /// Unique entry id.
    pub id: LedgerEntryId,
    /// Position in the journal (0-based, gap-free).
    pub sequence: u64,
    /// Currency moved.
    pub currency: Currency,
    /// Credit (into the wallet) or debit (out of it).
    pub direction: LedgerDirection,
    /// Strictly positive amount moved.
    #[ts(as = "String")]
    pub amount: Decimal,
    /// Why the entry was recorded.
    pub reason: LedgerReason,
    /// Wall-clock time of recording.
    pub recorded_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Presentation snapshot
// ---------------------------------------------------------------------------

/// Immutable read view of the whole session, published after every
/// transaction and tick.
///
/// The presentation layer only ever reads this; there is no write path back
/// into the models through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SessionSnapshot {
    /// The session this view belongs to.
    pub session_id: SessionId,
    /// Virtual session time in milliseconds.
    pub now_ms: u64,
    /// Coin balance.
    #[ts(as = "String")]
    pub coins: Decimal,
    /// Gem balance.
    pub gems: u64,
    /// Unplaced food stock.
    pub inventory: BTreeMap<FoodKind, u32>,
    /// Food trough contents and capacity.
    pub trough: TroughContents,
    /// Water trough level in `[0, 1]`.
    pub water_level: f64,
    /// Trough upgrade levels.
    pub upgrades: UpgradeLevels,
    /// Owned house styles, ascending.
    pub owned_houses: Vec<HouseStyleId>,
    /// House style currently shown.
    pub active_house: HouseStyleId,
    /// Horse vital stats.
    pub stats: CreatureStats,
    /// Horse animation currently playing.
    pub animation: AnimationTag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trough_contents_derivations() {
        let t = TroughContents {
            corn: 3,
            carrot: 1,
            capacity: 5,
        };
        assert_eq!(t.total(), 4);
        assert_eq!(t.free_space(), 1);
        assert!(!t.is_full());
        assert!(!t.is_empty());
    }

    #[test]
    fn price_display_is_normalized() {
        let p = Price::coins(Decimal::new(600, 1));
        assert_eq!(p.to_string(), "60 coins");
        assert_eq!(Price::gems(3).to_string(), "3 gems");
    }

    #[test]
    fn stats_accessors_round_trip() {
        let mut stats = CreatureStats::default();
        *stats.get_mut(VitalStat::Bored) = 12.5;
        assert!((stats.get(VitalStat::Bored) - 12.5).abs() < f64::EPSILON);
        assert!(stats.get(VitalStat::Hunger).abs() < f64::EPSILON);
    }
}
