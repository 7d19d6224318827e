//! Configuration loading and typed config structures for a Paddock session.
//!
//! The canonical configuration lives in `paddock-config.yaml`. Every field
//! has a default, so a partial or empty file is valid. The sections convert
//! into the plain model structs the stable and horse crates consume.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use paddock_horse::{AnimationDurations, DecayRates, HorseConfig};
use paddock_stable::{FoodCatalog, FoodSpec, HousePricing, TroughSpec, UpgradeSchedule};
use paddock_types::{AnimationTag, CreatureStats, Currency, HouseStyleId, Price};

use crate::assets::HorseLook;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

/// Top-level game configuration, mirroring `paddock-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Timer intervals.
    #[serde(default)]
    pub session: SessionConfig,

    /// Currencies, prices, and trough sizing.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Horse stats and animations.
    #[serde(default)]
    pub horse: HorseSection,

    /// Water trough behavior.
    #[serde(default)]
    pub water: WaterConfig,

    /// Presentation asset manifest.
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `PADDOCK_LOG` overrides `logging.level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Check every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session.validate()?;
        self.economy.validate()?;
        self.horse.validate()?;
        self.water.validate()
    }
}

/// Timer intervals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Milliseconds between decay ticks.
    #[serde(default = "default_decay_interval_ms")]
    pub decay_interval_ms: u64,

    /// Milliseconds between auto-feed ticks.
    #[serde(default = "default_autofeed_interval_ms")]
    pub autofeed_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            decay_interval_ms: default_decay_interval_ms(),
            autofeed_interval_ms: default_autofeed_interval_ms(),
        }
    }
}

impl SessionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.decay_interval_ms == 0 || self.autofeed_interval_ms == 0 {
            return Err(invalid("timer intervals must be at least 1 ms"));
        }
        Ok(())
    }
}

/// Economy parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EconomyConfig {
    /// Coins at session start.
    #[serde(default = "default_starting_coins")]
    pub starting_coins: Decimal,

    /// Gems at session start.
    #[serde(default = "default_starting_gems")]
    pub starting_gems: u64,

    /// Carrots in the inventory at session start.
    #[serde(default = "default_starting_carrots")]
    pub starting_carrots: u32,

    /// Price of one corn, in `corn_currency`.
    #[serde(default)]
    pub corn_price: Decimal,

    /// Currency corn is sold in.
    #[serde(default = "default_food_currency")]
    pub corn_currency: Currency,

    /// Price of one carrot, in `carrot_currency`.
    #[serde(default = "default_carrot_price")]
    pub carrot_price: Decimal,

    /// Currency carrots are sold in.
    #[serde(default = "default_food_currency")]
    pub carrot_currency: Currency,

    /// Hunger removed by one corn.
    #[serde(default = "default_corn_hunger_reduction")]
    pub corn_hunger_reduction: f64,

    /// Hunger removed by one carrot.
    #[serde(default = "default_carrot_hunger_reduction")]
    pub carrot_hunger_reduction: f64,

    /// Coins received per gem exchanged.
    #[serde(default = "default_gem_exchange_rate")]
    pub gem_exchange_rate: Decimal,

    /// Currency houses are sold in.
    #[serde(default = "default_house_currency")]
    pub house_currency: Currency,

    /// Explicit house prices by style id.
    #[serde(default = "default_house_prices")]
    pub house_prices: BTreeMap<u32, Decimal>,

    /// Price per style id for styles not in `house_prices`.
    #[serde(default = "default_house_fallback_price")]
    pub house_fallback_price: Decimal,

    /// Base upgrade cost of the food trough.
    #[serde(default = "default_upgrade_base_cost")]
    pub food_upgrade_base_cost: Decimal,

    /// Base upgrade cost of the water trough.
    #[serde(default = "default_upgrade_base_cost")]
    pub water_upgrade_base_cost: Decimal,

    /// Cost multiplier per level.
    #[serde(default = "default_upgrade_growth")]
    pub upgrade_growth: Decimal,

    /// Highest trough level.
    #[serde(default = "default_max_level")]
    pub max_level: u8,

    /// Food trough capacity at level 1.
    #[serde(default = "default_trough_base_capacity")]
    pub trough_base_capacity: u32,

    /// Capacity gained per level, in percent of the base.
    #[serde(default = "default_trough_growth_percent")]
    pub trough_growth_percent: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_coins: default_starting_coins(),
            starting_gems: default_starting_gems(),
            starting_carrots: default_starting_carrots(),
            corn_price: Decimal::ZERO,
            corn_currency: default_food_currency(),
            carrot_price: default_carrot_price(),
            carrot_currency: default_food_currency(),
            corn_hunger_reduction: default_corn_hunger_reduction(),
            carrot_hunger_reduction: default_carrot_hunger_reduction(),
            gem_exchange_rate: default_gem_exchange_rate(),
            house_currency: default_house_currency(),
            house_prices: default_house_prices(),
            house_fallback_price: default_house_fallback_price(),
            food_upgrade_base_cost: default_upgrade_base_cost(),
            water_upgrade_base_cost: default_upgrade_base_cost(),
            upgrade_growth: default_upgrade_growth(),
            max_level: default_max_level(),
            trough_base_capacity: default_trough_base_capacity(),
            trough_growth_percent: default_trough_growth_percent(),
        }
    }
}

impl EconomyConfig {
    /// The food catalog these prices describe.
    pub const fn food_catalog(&self) -> FoodCatalog {
        FoodCatalog {
            corn: FoodSpec {
                hunger_reduction: self.corn_hunger_reduction,
                unit_price: Price {
                    amount: self.corn_price,
                    currency: self.corn_currency,
                },
            },
            carrot: FoodSpec {
                hunger_reduction: self.carrot_hunger_reduction,
                unit_price: Price {
                    amount: self.carrot_price,
                    currency: self.carrot_currency,
                },
            },
        }
    }

    /// House pricing.
    pub fn house_pricing(&self) -> HousePricing {
        HousePricing {
            currency: self.house_currency,
            table: self
                .house_prices
                .iter()
                .map(|(id, price)| (HouseStyleId(*id), *price))
                .collect(),
            fallback_per_style: self.house_fallback_price,
        }
    }

    /// Upgrade cost curve.
    pub const fn upgrade_schedule(&self) -> UpgradeSchedule {
        UpgradeSchedule {
            food_base_cost: self.food_upgrade_base_cost,
            water_base_cost: self.water_upgrade_base_cost,
            growth: self.upgrade_growth,
            max_level: self.max_level,
        }
    }

    /// Trough capacity curve.
    pub const fn trough_spec(&self) -> TroughSpec {
        TroughSpec {
            base_capacity: self.trough_base_capacity,
            growth_percent: self.trough_growth_percent,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let amounts = [
            ("starting_coins", self.starting_coins),
            ("corn_price", self.corn_price),
            ("carrot_price", self.carrot_price),
            ("house_fallback_price", self.house_fallback_price),
            ("food_upgrade_base_cost", self.food_upgrade_base_cost),
            ("water_upgrade_base_cost", self.water_upgrade_base_cost),
        ];
        for (name, amount) in amounts {
            if amount.is_sign_negative() {
                return Err(invalid(format!("{name} must not be negative")));
            }
        }
        for (name, currency, price) in [
            ("corn_price", self.corn_currency, self.corn_price),
            ("carrot_price", self.carrot_currency, self.carrot_price),
        ] {
            if currency == Currency::Gems && !price.fract().is_zero() {
                return Err(invalid(format!("{name} in gems must be whole")));
            }
        }
        for (id, price) in &self.house_prices {
            if *id == 0 {
                return Err(invalid("house style 0 does not exist"));
            }
            if price.is_sign_negative() {
                return Err(invalid(format!("house {id} price must not be negative")));
            }
            if self.house_currency == Currency::Gems && !price.fract().is_zero() {
                return Err(invalid(format!("house {id} gem price must be whole")));
            }
        }
        if self.house_currency == Currency::Gems && !self.house_fallback_price.fract().is_zero() {
            return Err(invalid("house_fallback_price in gems must be whole"));
        }
        if self.gem_exchange_rate <= Decimal::ZERO {
            return Err(invalid("gem_exchange_rate must be positive"));
        }
        if self.upgrade_growth < Decimal::ONE {
            return Err(invalid("upgrade_growth must be at least 1"));
        }
        if self.max_level == 0 {
            return Err(invalid("max_level must be at least 1"));
        }
        if self.trough_base_capacity == 0 {
            return Err(invalid("trough_base_capacity must be at least 1"));
        }
        for (name, value) in [
            ("corn_hunger_reduction", self.corn_hunger_reduction),
            ("carrot_hunger_reduction", self.carrot_hunger_reduction),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be positive")));
            }
        }
        Ok(())
    }
}

/// Horse parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HorseSection {
    /// Horse sprite type, used for asset lookup.
    #[serde(default = "default_horse_type")]
    pub type_id: u32,

    /// Horse age label, used for asset lookup.
    #[serde(default = "default_horse_age")]
    pub age: String,

    /// Stats at session start.
    #[serde(default = "default_initial_stats")]
    pub initial: CreatureStats,

    /// Hunger added per decay tick.
    #[serde(default = "default_hunger_per_tick")]
    pub hunger_per_tick: f64,

    /// Sleepiness added per decay tick.
    #[serde(default = "default_sleepy_per_tick")]
    pub sleepy_per_tick: f64,

    /// Boredom added per decay tick.
    #[serde(default = "default_bored_per_tick")]
    pub bored_per_tick: f64,

    /// Hunger that triggers the hungry animation.
    #[serde(default = "default_hungry_threshold")]
    pub hungry_threshold: f64,

    /// Boredom removed by brushing.
    #[serde(default = "default_brush_relief")]
    pub brush_relief: f64,

    /// Sleepiness removed by resting.
    #[serde(default = "default_rest_relief")]
    pub rest_relief: f64,

    /// Per-animation duration overrides in milliseconds.
    #[serde(default)]
    pub animation_ms: BTreeMap<AnimationTag, u64>,
}

impl Default for HorseSection {
    fn default() -> Self {
        Self {
            type_id: default_horse_type(),
            age: default_horse_age(),
            initial: default_initial_stats(),
            hunger_per_tick: default_hunger_per_tick(),
            sleepy_per_tick: default_sleepy_per_tick(),
            bored_per_tick: default_bored_per_tick(),
            hungry_threshold: default_hungry_threshold(),
            brush_relief: default_brush_relief(),
            rest_relief: default_rest_relief(),
            animation_ms: BTreeMap::new(),
        }
    }
}

impl HorseSection {
    /// Which sprite to look up for this horse.
    pub fn look(&self) -> HorseLook {
        HorseLook {
            type_id: self.type_id,
            age: self.age.clone(),
        }
    }

    /// The horse model configuration, with duration overrides applied.
    pub fn horse_config(&self) -> HorseConfig {
        let mut durations = AnimationDurations::default();
        for (tag, ms) in &self.animation_ms {
            let slot = match tag {
                AnimationTag::Idle => &mut durations.idle,
                AnimationTag::Eat => &mut durations.eat,
                AnimationTag::Blink => &mut durations.blink,
                AnimationTag::HeadTilt => &mut durations.head_tilt,
                AnimationTag::CloseEyes => &mut durations.close_eyes,
                AnimationTag::Hungry => &mut durations.hungry,
                AnimationTag::Hurt => &mut durations.hurt,
                AnimationTag::Cute => &mut durations.cute,
                AnimationTag::Brushed => &mut durations.brushed,
                AnimationTag::Aegyo => &mut durations.aegyo,
            };
            *slot = *ms;
        }
        HorseConfig {
            initial: self.initial,
            decay: DecayRates {
                hunger: self.hunger_per_tick,
                sleepy: self.sleepy_per_tick,
                bored: self.bored_per_tick,
            },
            hungry_threshold: self.hungry_threshold,
            brush_relief: self.brush_relief,
            rest_relief: self.rest_relief,
            durations,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("hunger_per_tick", self.hunger_per_tick),
            ("sleepy_per_tick", self.sleepy_per_tick),
            ("bored_per_tick", self.bored_per_tick),
            ("hungry_threshold", self.hungry_threshold),
            ("brush_relief", self.brush_relief),
            ("rest_relief", self.rest_relief),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("horse.{name} must be a non-negative number")));
            }
        }
        if self.animation_ms.get(&AnimationTag::Idle).is_some_and(|ms| *ms == 0) {
            return Err(invalid("idle duration must be at least 1 ms"));
        }
        Ok(())
    }
}

/// Water trough parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WaterConfig {
    /// Level at session start, in `[0, 1]`.
    #[serde(default = "default_water_initial")]
    pub initial_level: f64,

    /// Level added per fill.
    #[serde(default = "default_water_fill_step")]
    pub fill_step: f64,

    /// Level drained per decay tick at water trough level 1.
    #[serde(default = "default_water_drain")]
    pub drain_per_tick: f64,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            initial_level: default_water_initial(),
            fill_step: default_water_fill_step(),
            drain_per_tick: default_water_drain(),
        }
    }
}

impl WaterConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.initial_level) {
            return Err(invalid("water.initial_level must be within [0, 1]"));
        }
        if !self.fill_step.is_finite() || self.fill_step <= 0.0 {
            return Err(invalid("water.fill_step must be positive"));
        }
        if !self.drain_per_tick.is_finite() || self.drain_per_tick < 0.0 {
            return Err(invalid("water.drain_per_tick must not be negative"));
        }
        Ok(())
    }
}

/// Where the asset manifest lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetsConfig {
    /// Path to a JSON manifest; no manifest means built-in drawings only.
    #[serde(default)]
    pub manifest: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Apply environment variable overrides.
    ///
    /// `PADDOCK_LOG` overrides `level`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PADDOCK_LOG") {
            self.level = val;
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_decay_interval_ms() -> u64 {
    60_000
}

const fn default_autofeed_interval_ms() -> u64 {
    30_000
}

const fn default_starting_coins() -> Decimal {
    Decimal::from_parts(40, 0, 0, false, 0)
}

const fn default_starting_gems() -> u64 {
    3
}

const fn default_starting_carrots() -> u32 {
    2
}

const fn default_carrot_price() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 0)
}

const fn default_corn_hunger_reduction() -> f64 {
    30.0
}

const fn default_carrot_hunger_reduction() -> f64 {
    40.0
}

const fn default_gem_exchange_rate() -> Decimal {
    Decimal::TEN
}

const fn default_food_currency() -> Currency {
    Currency::Coins
}

const fn default_house_currency() -> Currency {
    Currency::Coins
}

fn default_house_prices() -> BTreeMap<u32, Decimal> {
    BTreeMap::from([
        (1, Decimal::ZERO),
        (2, Decimal::from(50)),
        (3, Decimal::ONE_HUNDRED),
        (4, Decimal::from(200)),
    ])
}

const fn default_house_fallback_price() -> Decimal {
    Decimal::from_parts(20, 0, 0, false, 0)
}

const fn default_upgrade_base_cost() -> Decimal {
    Decimal::from_parts(40, 0, 0, false, 0)
}

const fn default_upgrade_growth() -> Decimal {
    Decimal::from_parts(15, 0, 0, false, 1)
}

const fn default_max_level() -> u8 {
    4
}

const fn default_trough_base_capacity() -> u32 {
    5
}

const fn default_trough_growth_percent() -> u32 {
    30
}

const fn default_horse_type() -> u32 {
    1
}

fn default_horse_age() -> String {
    "adult".to_owned()
}

fn default_initial_stats() -> CreatureStats {
    HorseConfig::default().initial
}

const fn default_hunger_per_tick() -> f64 {
    1.0
}

const fn default_sleepy_per_tick() -> f64 {
    0.4
}

const fn default_bored_per_tick() -> f64 {
    0.5
}

const fn default_hungry_threshold() -> f64 {
    80.0
}

const fn default_brush_relief() -> f64 {
    15.0
}

const fn default_rest_relief() -> f64 {
    20.0
}

const fn default_water_initial() -> f64 {
    0.4
}

const fn default_water_fill_step() -> f64 {
    0.3
}

const fn default_water_drain() -> f64 {
    0.05
}

fn default_log_level() -> String {
    "info".to_owned()
}
