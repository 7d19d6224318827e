//! Player actions and their outcomes.
//!
//! A [`PlayerAction`] is one discrete input from the player. The dispatcher
//! applies it as a single transaction and reports an [`ActionOutcome`]:
//! either every affected model changed, or none did.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AnimationTag, FoodKind, RejectionReason, SoundCue, TroughKind};
use crate::ids::HouseStyleId;

/// A discrete player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "action", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PlayerAction {
    /// Let the horse eat one item from the food trough.
    Feed,
    /// Top up the food trough with free corn.
    FillTroughWithCorn,
    /// Place one carrot from the inventory into the food trough.
    FillTroughWithCarrot,
    /// Convert the trough back toward corn.
    ToggleTroughFoodType,
    /// Pour water into the water trough.
    FillWater,
    /// Buy food for the inventory.
    BuyFood {
        /// What to buy.
        food: FoodKind,
        /// How many units.
        quantity: u32,
    },
    /// Raise a trough by one level.
    UpgradeTrough {
        /// Which trough.
        trough: TroughKind,
    },
    /// Buy a house style.
    BuyHouse {
        /// The style to buy.
        style: HouseStyleId,
    },
    /// Show a different owned house style.
    SwitchHouse {
        /// The style to show.
        style: HouseStyleId,
    },
    /// Convert gems into coins at the fixed exchange rate.
    ExchangeGems {
        /// Gems to convert.
        gems: u64,
    },
    /// Buy gems with real money. Local stub: only credits the wallet.
    BuyGems {
        /// Gems to credit.
        gems: u64,
    },
    /// Cosmetic aegyo routine.
    Aegyo,
    /// Brush the horse.
    Brush,
    /// Let the horse close its eyes and rest.
    Rest,
    /// Play any non-idle animation with no other effect.
    Emote {
        /// The animation to play.
        animation: AnimationTag,
    },
}

/// Whether an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ActionStatus {
    /// Every mutation was committed.
    Applied,
    /// Nothing changed.
    Rejected {
        /// Why the action was refused.
        reason: RejectionReason,
    },
}

/// Result of dispatching one [`PlayerAction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActionOutcome {
    /// The action that was dispatched.
    pub action: PlayerAction,
    /// Applied or rejected.
    pub status: ActionStatus,
    /// Sounds to play, in order. Empty when rejected.
    pub sounds: Vec<SoundCue>,
}

impl ActionOutcome {
    /// An applied outcome with the given sounds.
    pub const fn applied(action: PlayerAction, sounds: Vec<SoundCue>) -> Self {
        Self {
            action,
            status: ActionStatus::Applied,
            sounds,
        }
    }

    /// A rejected outcome.
    pub const fn rejected(action: PlayerAction, reason: RejectionReason) -> Self {
        Self {
            action,
            status: ActionStatus::Rejected { reason },
            sounds: Vec::new(),
        }
    }

    /// Whether the action was applied.
    pub const fn is_applied(&self) -> bool {
        matches!(self.status, ActionStatus::Applied)
    }

    /// The rejection reason, if any.
    pub const fn rejection(&self) -> Option<RejectionReason> {
        match self.status {
            ActionStatus::Applied => None,
            ActionStatus::Rejected { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn actions_are_internally_tagged() {
        let action = PlayerAction::BuyFood {
            food: FoodKind::Carrot,
            quantity: 2,
        };
        let json = serde_json::to_value(action).unwrap();
        assert_eq!(json["action"], "buy_food");
        assert_eq!(json["food"], "carrot");
        assert_eq!(json["quantity"], 2);

        let back: PlayerAction =
            serde_json::from_str(r#"{"action":"upgrade_trough","trough":"food_trough"}"#).unwrap();
        assert_eq!(
            back,
            PlayerAction::UpgradeTrough {
                trough: TroughKind::FoodTrough
            }
        );
    }

    #[test]
    fn rejected_outcome_has_no_sounds() {
        let outcome = ActionOutcome::rejected(PlayerAction::Feed, RejectionReason::TroughEmpty);
        assert!(!outcome.is_applied());
        assert_eq!(outcome.rejection(), Some(RejectionReason::TroughEmpty));
        assert!(outcome.sounds.is_empty());
    }
}
