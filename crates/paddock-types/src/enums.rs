//! Enumeration types for the Paddock game core.
//!
//! Currencies, food and trough kinds, animation tags, sound cues, vital
//! stats, ledger bookkeeping labels, and the user-facing rejection reasons
//! returned by the action dispatcher.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Currencies
// ---------------------------------------------------------------------------

/// A currency held in the session wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Currency {
    /// Everyday currency. Fractional amounts are allowed.
    Coins,
    /// Premium currency. Always a whole number.
    Gems,
}

impl Currency {
    /// Every currency, in display order.
    pub const ALL: [Self; 2] = [Self::Coins, Self::Gems];
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Coins => write!(f, "coins"),
            Self::Gems => write!(f, "gems"),
        }
    }
}

// ---------------------------------------------------------------------------
// Food and troughs
// ---------------------------------------------------------------------------

/// A kind of food that can be placed in the food trough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum FoodKind {
    /// Free, unlimited filler food.
    Corn,
    /// Purchased treat. Eaten before corn.
    Carrot,
}

impl FoodKind {
    /// Every food kind, in catalog order.
    pub const ALL: [Self; 2] = [Self::Corn, Self::Carrot];
}

impl core::fmt::Display for FoodKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corn => write!(f, "corn"),
            Self::Carrot => write!(f, "carrot"),
        }
    }
}

/// An upgradable trough in the horse's house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TroughKind {
    /// Holds discrete food items.
    FoodTrough,
    /// Holds a continuous water level.
    WaterTrough,
}

impl TroughKind {
    /// Both troughs.
    pub const ALL: [Self; 2] = [Self::FoodTrough, Self::WaterTrough];
}

impl core::fmt::Display for TroughKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FoodTrough => write!(f, "food_trough"),
            Self::WaterTrough => write!(f, "water_trough"),
        }
    }
}

// ---------------------------------------------------------------------------
// Creature
// ---------------------------------------------------------------------------

/// One of the horse's vital stats. Every stat lives in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum VitalStat {
    /// How hungry the horse is.
    Hunger,
    /// How sleepy the horse is.
    Sleepy,
    /// How dizzy the horse is.
    Dizzy,
    /// How bored the horse is.
    Bored,
    /// How hurt the horse is.
    Hurt,
}

impl VitalStat {
    /// Every stat.
    pub const ALL: [Self; 5] = [Self::Hunger, Self::Sleepy, Self::Dizzy, Self::Bored, Self::Hurt];
}

/// The animation currently shown for the horse.
///
/// `Idle` is the baseline. Every other tag reverts to `Idle` after its
/// configured duration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AnimationTag {
    /// Resting baseline.
    #[default]
    Idle,
    /// Eating from the trough.
    Eat,
    /// A single blink.
    Blink,
    /// Curious head tilt.
    HeadTilt,
    /// Eyes closed, resting.
    CloseEyes,
    /// Asking for food.
    Hungry,
    /// Flinching.
    Hurt,
    /// Generic cute pose.
    Cute,
    /// Being brushed.
    Brushed,
    /// Cute aegyo routine.
    Aegyo,
}

impl AnimationTag {
    /// Every animation tag.
    pub const ALL: [Self; 10] = [
        Self::Idle,
        Self::Eat,
        Self::Blink,
        Self::HeadTilt,
        Self::CloseEyes,
        Self::Hungry,
        Self::Hurt,
        Self::Cute,
        Self::Brushed,
        Self::Aegyo,
    ];

    /// Whether this is the idle baseline.
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

// ---------------------------------------------------------------------------
// Presentation cues
// ---------------------------------------------------------------------------

/// A named sound the core asks the audio collaborator to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum SoundCue {
    /// The horse eats, or the food trough becomes full.
    Eating,
    /// Food was placed into the trough.
    Feed,
    /// Water was poured into the trough.
    WaterFill,
    /// The aegyo routine.
    Aegyo,
    /// The water trough became full.
    WaterSplash,
}

impl SoundCue {
    /// The manifest key for this sound.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eating => "eating",
            Self::Feed => "feed",
            Self::WaterFill => "water-fill",
            Self::Aegyo => "aegyo",
            Self::WaterSplash => "water-splash",
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger bookkeeping
// ---------------------------------------------------------------------------

/// Which side of the wallet a ledger entry touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LedgerDirection {
    /// Currency flowed into the wallet.
    Credit,
    /// Currency flowed out of the wallet.
    Debit,
}

/// Why a ledger entry was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LedgerReason {
    /// Opening balance granted at session start.
    StartingBalance,
    /// Food bought for the inventory.
    FoodPurchase,
    /// A trough upgrade.
    TroughUpgrade,
    /// A house style purchase.
    HousePurchase,
    /// One leg of a gem-to-coin exchange.
    GemExchange,
    /// Gems bought with real money (local stub only).
    GemPurchase,
    /// A reward granted by the host.
    Reward,
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why the dispatcher refused a player action.
///
/// A rejected action leaves every model exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RejectionReason {
    /// The wallet cannot cover the price.
    InsufficientFunds,
    /// The house style is already owned.
    AlreadyOwned,
    /// The house style is not owned.
    NotOwned,
    /// The trough is already at its maximum level.
    Maxed,
    /// No carrots left in the inventory.
    OutOfStock,
    /// The trough has no room left.
    Full,
    /// The food trough has nothing to eat.
    TroughEmpty,
    /// A quantity of zero (or one too large to represent) was requested.
    InvalidQuantity,
    /// House style 0 does not exist.
    InvalidHouseStyle,
    /// An internal arithmetic fault. State is unchanged.
    Internal,
}

impl core::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Self::InsufficientFunds => "insufficient funds",
            Self::AlreadyOwned => "already owned",
            Self::NotOwned => "not owned",
            Self::Maxed => "already at max level",
            Self::OutOfStock => "out of stock",
            Self::Full => "trough is full",
            Self::TroughEmpty => "trough is empty",
            Self::InvalidQuantity => "invalid quantity",
            Self::InvalidHouseStyle => "invalid house style",
            Self::Internal => "internal error",
        };
        write!(f, "{text}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sound_cue_names_match_serde() {
        for cue in [
            SoundCue::Eating,
            SoundCue::Feed,
            SoundCue::WaterFill,
            SoundCue::Aegyo,
            SoundCue::WaterSplash,
        ] {
            let json = serde_json::to_string(&cue).unwrap();
            assert_eq!(json, format!("\"{}\"", cue.name()));
        }
    }

    #[test]
    fn animation_tags_use_snake_case() {
        let json = serde_json::to_string(&AnimationTag::CloseEyes).unwrap();
        assert_eq!(json, "\"close_eyes\"");
        let back: AnimationTag = serde_json::from_str("\"head_tilt\"").unwrap();
        assert_eq!(back, AnimationTag::HeadTilt);
    }

    #[test]
    fn only_idle_is_idle() {
        let idle: Vec<_> = AnimationTag::ALL.iter().filter(|t| t.is_idle()).collect();
        assert_eq!(idle, vec![&AnimationTag::Idle]);
    }
}
