//! Type-safe identifier wrappers.
//!
//! Session and ledger identifiers wrap a [`Uuid`] (v7, time-ordered) so two
//! kinds of id can never be mixed at compile time. House styles are numbered
//! by the game's content, not generated, so [`HouseStyleId`] wraps a plain
//! `u32`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
        )]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier for one play session (created at startup, gone on reload).
    SessionId
);

define_id!(
    /// Identifier for a single ledger journal entry.
    LedgerEntryId
);

/// Identifier of a house style.
///
/// Style 1 is the starter cottage every session owns from the beginning.
/// Styles are 1-based; 0 is never a valid style.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct HouseStyleId(pub u32);

impl HouseStyleId {
    /// The free starter house.
    pub const STARTER: Self = Self(1);

    /// Return the raw style number.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for HouseStyleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for HouseStyleId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = LedgerEntryId::new();
        let b = LedgerEntryId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = SessionId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn starter_house_is_style_one() {
        assert_eq!(HouseStyleId::STARTER.get(), 1);
        assert_eq!(HouseStyleId::from(3).to_string(), "3");
    }
}
