//! The action dispatcher: one [`Session`] owns every model and is the only
//! write path into them.
//!
//! Every player action and every timer event runs as one transaction. The
//! dispatcher clones the small per-session models, applies the change to the
//! clone, and swaps it in only if every step succeeded. Currency movements
//! are made last among the fallible steps and are atomic in the ledger
//! itself, so a rejected action never leaves a partial mutation behind.
//!
//! Domain failures never escape as errors. [`Session::apply`] always
//! returns an [`ActionOutcome`]; internal faults surface as
//! [`RejectionReason::Internal`] and are logged.

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use paddock_horse::{AnimationState, HorseConfig, HorseError, Vitals};
use paddock_ledger::{Ledger, LedgerError, ReconcileResult};
use paddock_stable::{
    FoodCatalog, FoodTrough, HouseOwnership, HousePricing, Inventory, StableError, TroughSpec,
    TroughUpgrades, UpgradeSchedule, WaterTrough,
};
use paddock_types::{
    ActionOutcome, AnimationTag, Currency, HouseStyleId, LedgerReason, PlayerAction, Price,
    RejectionReason, SessionId, SessionSnapshot, SoundCue, TroughKind, VitalStat,
};

use crate::clock::{ClockError, SessionClock, TimerEvent};
use crate::config::{ConfigError, GameConfig, WaterConfig};

/// Errors raised inside a transaction.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A stable model refused the change.
    #[error(transparent)]
    Stable(#[from] StableError),

    /// The ledger refused a movement.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The horse model refused the change.
    #[error(transparent)]
    Horse(#[from] HorseError),

    /// The clock could not schedule.
    #[error(transparent)]
    Clock(#[from] ClockError),

    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request that is invalid before any model is consulted.
    #[error("rejected: {0}")]
    Rejected(RejectionReason),
}

impl DispatchError {
    /// The user-facing rejection this error corresponds to.
    pub const fn rejection(&self) -> RejectionReason {
        match self {
            Self::Stable(err) => err.rejection(),
            Self::Ledger(LedgerError::InsufficientFunds { .. }) => {
                RejectionReason::InsufficientFunds
            }
            Self::Ledger(LedgerError::ZeroAmount) => RejectionReason::InvalidQuantity,
            Self::Rejected(reason) => *reason,
            Self::Ledger(_) | Self::Horse(_) | Self::Clock(_) | Self::Config(_) => {
                RejectionReason::Internal
            }
        }
    }
}

/// Fixed rules for one session, derived from the configuration.
#[derive(Debug, Clone)]
struct Rules {
    catalog: FoodCatalog,
    pricing: HousePricing,
    schedule: UpgradeSchedule,
    trough: TroughSpec,
    horse: HorseConfig,
    water: WaterConfig,
    gem_exchange_rate: Decimal,
}

/// Everything a transaction may change apart from the ledger and clock.
#[derive(Debug, Clone)]
struct Models {
    inventory: Inventory,
    food: FoodTrough,
    water: WaterTrough,
    upgrades: TroughUpgrades,
    houses: HouseOwnership,
    vitals: Vitals,
    animation: AnimationState,
}

impl Models {
    fn food_capacity(&self, rules: &Rules) -> u32 {
        rules
            .trough
            .capacity(self.upgrades.level(TroughKind::FoodTrough))
    }
}

/// What a batch of timer events did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Events that fired, in order.
    pub fired: Vec<TimerEvent>,
    /// Sounds emitted by those events.
    pub sounds: Vec<SoundCue>,
}

/// One play session.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    rules: Rules,
    ledger: Ledger,
    models: Models,
    clock: SessionClock,
}

impl Session {
    /// Start a session from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Config`] if the configuration is invalid, or
    /// a ledger error if the opening balances cannot be recorded.
    pub fn new(config: &GameConfig) -> Result<Self, DispatchError> {
        config.validate()?;
        let economy = &config.economy;
        let horse = config.horse.horse_config();
        let ledger = Ledger::with_opening_balance(economy.starting_coins, economy.starting_gems)?;
        let clock = SessionClock::new(
            config.session.decay_interval_ms,
            config.session.autofeed_interval_ms,
        )?;
        let models = Models {
            inventory: Inventory::with_carrots(economy.starting_carrots),
            food: FoodTrough::default(),
            water: WaterTrough::new(config.water.initial_level),
            upgrades: TroughUpgrades::default(),
            houses: HouseOwnership::default(),
            vitals: Vitals::new(horse.initial),
            animation: AnimationState::default(),
        };
        let session = Self {
            id: SessionId::new(),
            rules: Rules {
                catalog: economy.food_catalog(),
                pricing: economy.house_pricing(),
                schedule: economy.upgrade_schedule(),
                trough: economy.trough_spec(),
                horse,
                water: config.water.clone(),
                gem_exchange_rate: economy.gem_exchange_rate,
            },
            ledger,
            models,
            clock,
        };
        info!(
            session_id = %session.id,
            coins = %session.ledger.coins(),
            gems = session.ledger.gems(),
            "Session started"
        );
        Ok(session)
    }

    /// Session id.
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// The wallet, read-only.
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Current session time in milliseconds.
    pub const fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// When the next timer event is due.
    pub fn next_due(&self) -> Option<u64> {
        self.clock.next_due()
    }

    /// Replay the ledger journal against the balances.
    pub fn reconcile(&self) -> ReconcileResult {
        self.ledger.reconcile()
    }

    // -----------------------------------------------------------------------
    // Read-only predicates for the presentation layer
    // -----------------------------------------------------------------------

    /// Whether the wallet covers `price`.
    pub fn can_afford(&self, price: &Price) -> bool {
        self.ledger.can_afford(price)
    }

    /// Price of the next level of `kind`, or `None` at the cap.
    pub fn upgrade_cost(&self, kind: TroughKind) -> Option<Price> {
        self.models.upgrades.next_cost(kind, &self.rules.schedule)
    }

    /// Whether `kind` can be upgraded right now.
    pub fn can_upgrade(&self, kind: TroughKind) -> bool {
        self.models
            .upgrades
            .can_upgrade(kind, &self.rules.schedule, &self.ledger)
    }

    /// Price of a house style.
    ///
    /// # Errors
    ///
    /// Returns [`StableError::InvalidHouseStyle`] for style 0.
    pub fn house_price(&self, style: HouseStyleId) -> Result<Price, StableError> {
        self.rules.pricing.price(style)
    }

    /// Whether `style` can be bought right now.
    pub fn can_buy_house(&self, style: HouseStyleId) -> bool {
        self.models
            .houses
            .can_buy(style, &self.rules.pricing, &self.ledger)
    }

    /// Immutable view of the whole session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let models = &self.models;
        SessionSnapshot {
            session_id: self.id,
            now_ms: self.clock.now_ms(),
            coins: self.ledger.coins(),
            gems: self.ledger.gems(),
            inventory: models.inventory.counts(),
            trough: models.food.contents(models.food_capacity(&self.rules)),
            water_level: models.water.level(),
            upgrades: models.upgrades.levels(),
            owned_houses: models.houses.owned(),
            active_house: models.houses.active(),
            stats: models.vitals.stats(),
            animation: models.animation.current(),
        }
    }

    // -----------------------------------------------------------------------
    // Write paths
    // -----------------------------------------------------------------------

    /// Apply one player action as a single transaction.
    pub fn apply(&mut self, action: PlayerAction) -> ActionOutcome {
        match self.transact(action) {
            Ok(sounds) => {
                info!(
                    session_id = %self.id,
                    action = ?action,
                    sounds = sounds.len(),
                    "Action applied"
                );
                ActionOutcome::applied(action, sounds)
            }
            Err(err) => {
                let reason = err.rejection();
                if reason == RejectionReason::Internal {
                    error!(
                        session_id = %self.id,
                        action = ?action,
                        error = %err,
                        "Action failed internally"
                    );
                } else {
                    warn!(session_id = %self.id, action = ?action, %reason, "Action rejected");
                }
                ActionOutcome::rejected(action, reason)
            }
        }
    }

    /// Credit currency outside the player action set (rewards, hosts).
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Ledger`] for a malformed amount.
    pub fn grant(&mut self, price: &Price, reason: LedgerReason) -> Result<(), DispatchError> {
        self.ledger.earn(price, reason)?;
        info!(session_id = %self.id, amount = %price, ?reason, "Currency granted");
        Ok(())
    }

    /// Fire every timer event due at or before `now_ms`, in order, then move
    /// session time to `now_ms`.
    ///
    /// A timer event that fails internally is logged and skipped; the
    /// models keep their state from before that event.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Clock`] if `now_ms` is in the past.
    pub fn advance_to(&mut self, now_ms: u64) -> Result<TickReport, DispatchError> {
        let mut report = TickReport::default();
        while let Some(fired) = self.clock.pop_due(now_ms)? {
            match self.on_timer(fired.event) {
                Ok(sounds) => report.sounds.extend(sounds),
                Err(err) => {
                    error!(
                        session_id = %self.id,
                        event = ?fired.event,
                        error = %err,
                        "Timer event failed"
                    );
                }
            }
            report.fired.push(fired.event);
        }
        self.clock.settle(now_ms)?;
        Ok(report)
    }

    /// Advance session time by `elapsed_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Clock`] on overflow.
    pub fn advance_by(&mut self, elapsed_ms: u64) -> Result<TickReport, DispatchError> {
        let target = self
            .clock
            .now_ms()
            .checked_add(elapsed_ms)
            .ok_or(ClockError::TimeOverflow)?;
        self.advance_to(target)
    }

    /// Cancel every pending timer. The session stays readable.
    pub fn shutdown(&mut self) {
        self.clock.cancel_all();
        info!(session_id = %self.id, now_ms = self.clock.now_ms(), "Session timers cancelled");
    }

    // -----------------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------------

    fn transact(&mut self, action: PlayerAction) -> Result<Vec<SoundCue>, DispatchError> {
        let rules = &self.rules;
        let mut next = self.models.clone();
        let mut sounds = Vec::new();

        match action {
            PlayerAction::Feed => {
                let kind = next
                    .food
                    .consume_one()
                    .ok_or(StableError::TroughEmpty)?;
                next.vitals.feed(rules.catalog.get(kind).hunger_reduction)?;
                animate(&mut next, &mut self.clock, rules, AnimationTag::Eat)?;
                sounds.push(SoundCue::Eating);
            }
            PlayerAction::FillTroughWithCorn => {
                let capacity = next.food_capacity(rules);
                next.food.fill_with_corn(capacity)?;
                sounds.push(SoundCue::Feed);
                sounds.push(SoundCue::Eating);
            }
            PlayerAction::FillTroughWithCarrot | PlayerAction::ToggleTroughFoodType => {
                let capacity = next.food_capacity(rules);
                let was_full = next.food.contents(capacity).is_full();
                if action == PlayerAction::FillTroughWithCarrot {
                    next.food.fill_with_carrot(capacity, &mut next.inventory)?;
                } else {
                    next.food.toggle_to_corn(capacity, &mut next.inventory)?;
                }
                sounds.push(SoundCue::Feed);
                if !was_full && next.food.contents(capacity).is_full() {
                    sounds.push(SoundCue::Eating);
                }
            }
            PlayerAction::FillWater => {
                let fill = next.water.fill(rules.water.fill_step)?;
                sounds.push(SoundCue::WaterFill);
                if fill.became_full {
                    sounds.push(SoundCue::WaterSplash);
                }
            }
            PlayerAction::BuyFood { food, quantity } => {
                next.inventory
                    .buy(&rules.catalog, food, quantity, &mut self.ledger)?;
            }
            PlayerAction::UpgradeTrough { trough } => {
                next.upgrades
                    .upgrade(trough, &rules.schedule, &mut self.ledger)?;
            }
            PlayerAction::BuyHouse { style } => {
                next.houses.buy(style, &rules.pricing, &mut self.ledger)?;
            }
            PlayerAction::SwitchHouse { style } => {
                next.houses.switch_active(style)?;
            }
            PlayerAction::ExchangeGems { gems } => {
                exchange_gems(&mut self.ledger, rules.gem_exchange_rate, gems)?;
            }
            PlayerAction::BuyGems { gems } => {
                if gems == 0 {
                    return Err(DispatchError::Rejected(RejectionReason::InvalidQuantity));
                }
                self.ledger
                    .earn(&Price::gems(gems), LedgerReason::GemPurchase)?;
            }
            PlayerAction::Aegyo => {
                animate(&mut next, &mut self.clock, rules, AnimationTag::Aegyo)?;
                sounds.push(SoundCue::Aegyo);
            }
            PlayerAction::Brush => {
                next.vitals
                    .adjust(VitalStat::Bored, -rules.horse.brush_relief)?;
                animate(&mut next, &mut self.clock, rules, AnimationTag::Brushed)?;
            }
            PlayerAction::Rest => {
                next.vitals
                    .adjust(VitalStat::Sleepy, -rules.horse.rest_relief)?;
                animate(&mut next, &mut self.clock, rules, AnimationTag::CloseEyes)?;
            }
            PlayerAction::Emote { animation } => {
                animate(&mut next, &mut self.clock, rules, animation)?;
            }
        }

        self.models = next;
        Ok(sounds)
    }

    fn on_timer(&mut self, event: TimerEvent) -> Result<Vec<SoundCue>, DispatchError> {
        let rules = &self.rules;
        let mut next = self.models.clone();
        let mut sounds = Vec::new();

        match event {
            TimerEvent::Decay => {
                next.vitals.apply_decay(&rules.horse.decay);
                let factor = rules
                    .trough
                    .capacity_factor(next.upgrades.level(TroughKind::WaterTrough));
                next.water.drain(rules.water.drain_per_tick / factor);
                let hunger = next.vitals.get(VitalStat::Hunger);
                if hunger >= rules.horse.hungry_threshold && next.animation.is_idle() {
                    animate(&mut next, &mut self.clock, rules, AnimationTag::Hungry)?;
                }
                debug!(hunger, water = next.water.level(), "Decay tick");
            }
            TimerEvent::AutoFeed => {
                if let Some(kind) = next.food.consume_one() {
                    let hunger = next.vitals.feed(rules.catalog.get(kind).hunger_reduction)?;
                    animate(&mut next, &mut self.clock, rules, AnimationTag::Eat)?;
                    sounds.push(SoundCue::Eating);
                    debug!(food = %kind, hunger, "Auto-feed tick");
                }
            }
            TimerEvent::AnimationRevert { generation } => {
                next.animation.revert(generation);
            }
        }

        self.models = next;
        Ok(sounds)
    }
}

/// Start `tag` on the staged models and schedule its revert.
///
/// The clock is touched last, so an error leaves nothing to undo.
fn animate(
    next: &mut Models,
    clock: &mut SessionClock,
    rules: &Rules,
    tag: AnimationTag,
) -> Result<(), DispatchError> {
    let mut animation = next.animation;
    if let Some(ticket) = animation.play(tag, rules.horse.durations.get(tag))? {
        clock.schedule_revert(ticket.generation, ticket.duration_ms)?;
    }
    next.animation = animation;
    Ok(())
}

/// Convert `gems` into coins at `rate` as one ledger transaction.
fn exchange_gems(ledger: &mut Ledger, rate: Decimal, gems: u64) -> Result<(), DispatchError> {
    if gems == 0 {
        return Err(DispatchError::Rejected(RejectionReason::InvalidQuantity));
    }
    let pay = Price::gems(gems);
    if !ledger.can_afford(&pay) {
        return Err(DispatchError::Rejected(RejectionReason::InsufficientFunds));
    }
    let coins = rate
        .checked_mul(Decimal::from(gems))
        .ok_or(LedgerError::Overflow {
            currency: Currency::Coins,
        })?;
    ledger.exchange(&pay, &Price::coins(coins), LedgerReason::GemExchange)?;
    Ok(())
}
