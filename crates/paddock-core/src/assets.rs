//! Presentation asset lookup.
//!
//! The asset manifest maps a category to a map of key -> URL. Lookups try an
//! ordered list of candidate keys and take the first hit.

use std::collections::BTreeMap;

use serde::Serialize;

use paddock_types::{SessionSnapshot, TroughKind};

/// Read-only asset lookup.
pub trait AssetResolver {
    /// URL for `key` in `category`, if present.
    fn resolve(&self, category: &str, key: &str) -> Option<String>;

    /// URL for the first candidate key that resolves.
    fn resolve_first(&self, category: &str, candidates: &[String]) -> Option<String> {
        candidates
            .iter()
            .find_map(|key| self.resolve(category, key))
    }
}

/// Asset manifest loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestResolver {
    categories: BTreeMap<String, BTreeMap<String, String>>,
}

impl ManifestResolver {
    /// Parse a manifest of the form `{"category": {"key": "url"}}`.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the manifest is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let categories = serde_json::from_str(json)?;
        Ok(Self { categories })
    }
}

impl AssetResolver for ManifestResolver {
    fn resolve(&self, category: &str, key: &str) -> Option<String> {
        self.categories.get(category)?.get(key).cloned()
    }
}

/// Which horse sprite to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorseLook {
    /// Sprite type number.
    pub type_id: u32,
    /// Age label, e.g. `adult`.
    pub age: String,
}

/// Resolved URLs for the current scene. `None` means the renderer should
/// fall back to its built-in drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SceneAssets {
    /// Horse sprite.
    pub horse: Option<String>,
    /// Active house.
    pub house: Option<String>,
    /// Food trough at its current level.
    pub food_trough: Option<String>,
    /// Water trough at its current level.
    pub water_trough: Option<String>,
}

/// Candidate keys for a horse sprite, most specific first.
pub fn horse_keys(look: &HorseLook) -> Vec<String> {
    vec![
        format!("cute_horse ({})", look.type_id),
        format!("horse-{:02}-{}", look.type_id, look.age),
    ]
}

/// Manifest category for a trough image.
pub const fn trough_category(kind: TroughKind) -> &'static str {
    match kind {
        TroughKind::FoodTrough => "food-trough",
        TroughKind::WaterTrough => "water-trough",
    }
}

/// Resolve every asset the scene in `snapshot` needs.
pub fn scene_assets(
    snapshot: &SessionSnapshot,
    look: &HorseLook,
    resolver: &dyn AssetResolver,
) -> SceneAssets {
    let trough = |kind: TroughKind| {
        resolver.resolve(
            trough_category(kind),
            &format!("level-{}", snapshot.upgrades.get(kind)),
        )
    };
    SceneAssets {
        horse: resolver.resolve_first("horses", &horse_keys(look)),
        house: resolver.resolve("houses", &format!("house ({})", snapshot.active_house)),
        food_trough: trough(TroughKind::FoodTrough),
        water_trough: trough(TroughKind::WaterTrough),
    }
}
