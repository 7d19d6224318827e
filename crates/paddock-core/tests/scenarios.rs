//! End-to-end economy scenarios driven through the dispatcher.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use paddock_core::{GameConfig, Session, TimerEvent};
use paddock_ledger::ReconcileResult;
use paddock_types::{
    AnimationTag, Currency, FoodKind, HouseStyleId, LedgerReason, PlayerAction, Price,
    RejectionReason, SoundCue, TroughKind,
};

fn session() -> Session {
    Session::new(&GameConfig::default()).unwrap()
}

#[test]
fn balances_never_go_negative() {
    let mut s = session();
    let actions = [
        PlayerAction::BuyFood {
            food: FoodKind::Carrot,
            quantity: 3,
        },
        PlayerAction::UpgradeTrough {
            trough: TroughKind::FoodTrough,
        },
        PlayerAction::BuyHouse {
            style: HouseStyleId(2),
        },
        PlayerAction::ExchangeGems { gems: 1 },
        PlayerAction::BuyFood {
            food: FoodKind::Carrot,
            quantity: 4,
        },
        PlayerAction::BuyHouse {
            style: HouseStyleId(9),
        },
        PlayerAction::ExchangeGems { gems: 5 },
    ];
    for _ in 0..3 {
        for action in actions {
            s.apply(action);
            let snap = s.snapshot();
            assert!(snap.coins >= Decimal::ZERO);
            assert_eq!(s.reconcile(), ReconcileResult::Balanced);
        }
    }
}

#[test]
fn trough_never_exceeds_capacity() {
    let mut s = session();
    s.grant(&Price::coins(dec!(1000)), LedgerReason::Reward).unwrap();
    s.apply(PlayerAction::BuyFood {
        food: FoodKind::Carrot,
        quantity: 20,
    });
    let cycle = [
        PlayerAction::FillTroughWithCorn,
        PlayerAction::FillTroughWithCarrot,
        PlayerAction::FillTroughWithCarrot,
        PlayerAction::ToggleTroughFoodType,
        PlayerAction::Feed,
        PlayerAction::UpgradeTrough {
            trough: TroughKind::FoodTrough,
        },
    ];
    for _ in 0..5 {
        for action in cycle {
            s.apply(action);
            let trough = s.snapshot().trough;
            assert!(trough.total() <= trough.capacity, "{trough:?} after {action:?}");
        }
    }
    assert_eq!(s.snapshot().trough.capacity, 9);
}

#[test]
fn trough_upgrade_keeps_existing_food() {
    let mut s = session();
    s.grant(&Price::coins(dec!(100)), LedgerReason::Reward).unwrap();
    assert!(s.apply(PlayerAction::FillTroughWithCorn).is_applied());
    assert!(s.apply(PlayerAction::FillTroughWithCarrot).is_applied());
    let trough = s.snapshot().trough;
    assert_eq!((trough.corn, trough.carrot, trough.capacity), (4, 1, 5));

    let upgrade = s.apply(PlayerAction::UpgradeTrough {
        trough: TroughKind::FoodTrough,
    });
    assert!(upgrade.is_applied());
    let trough = s.snapshot().trough;
    assert_eq!((trough.corn, trough.carrot, trough.capacity), (4, 1, 6));

    assert!(s.apply(PlayerAction::FillTroughWithCorn).is_applied());
    let trough = s.snapshot().trough;
    assert_eq!((trough.corn, trough.carrot, trough.capacity), (5, 1, 6));
}

#[test]
fn gem_priced_carrots_debit_gems() {
    let yaml = "economy:\n  carrot_price: 1\n  carrot_currency: gems\n";
    let mut s = Session::new(&GameConfig::parse(yaml).unwrap()).unwrap();
    let outcome = s.apply(PlayerAction::BuyFood {
        food: FoodKind::Carrot,
        quantity: 2,
    });
    assert!(outcome.is_applied());
    let snap = s.snapshot();
    assert_eq!(snap.gems, 1);
    assert_eq!(snap.coins, dec!(40));
    assert_eq!(snap.inventory.get(&FoodKind::Carrot), Some(&4));

    let outcome = s.apply(PlayerAction::BuyFood {
        food: FoodKind::Carrot,
        quantity: 2,
    });
    assert_eq!(outcome.rejection(), Some(RejectionReason::InsufficientFunds));
    assert_eq!(s.reconcile(), ReconcileResult::Balanced);
}

#[test]
fn upgrade_stops_at_max_level() {
    let mut s = session();
    s.grant(&Price::coins(dec!(10000)), LedgerReason::Reward).unwrap();
    let upgrade = PlayerAction::UpgradeTrough {
        trough: TroughKind::FoodTrough,
    };
    for _ in 0..3 {
        assert!(s.apply(upgrade).is_applied());
    }
    let coins = s.ledger().coins();
    assert_eq!(s.apply(upgrade).rejection(), Some(RejectionReason::Maxed));
    assert_eq!(s.snapshot().upgrades.food_trough, 4);
    assert_eq!(s.ledger().coins(), coins);
    assert!(!s.can_upgrade(TroughKind::FoodTrough));
    assert!(s.upgrade_cost(TroughKind::FoodTrough).is_none());
}

#[test]
fn buying_a_house_twice_charges_once() {
    let mut s = session();
    s.grant(&Price::coins(dec!(100)), LedgerReason::Reward).unwrap();
    let buy = PlayerAction::BuyHouse {
        style: HouseStyleId(2),
    };
    assert!(s.apply(buy).is_applied());
    assert_eq!(s.ledger().coins(), dec!(90));
    assert_eq!(s.apply(buy).rejection(), Some(RejectionReason::AlreadyOwned));
    assert_eq!(s.ledger().coins(), dec!(90));

    assert!(
        s.apply(PlayerAction::SwitchHouse {
            style: HouseStyleId(2)
        })
        .is_applied()
    );
    assert_eq!(s.snapshot().active_house, HouseStyleId(2));
    assert_eq!(
        s.apply(PlayerAction::SwitchHouse {
            style: HouseStyleId(4)
        })
        .rejection(),
        Some(RejectionReason::NotOwned)
    );
}

#[test]
fn starter_house_cannot_be_bought_again() {
    let mut s = session();
    let outcome = s.apply(PlayerAction::BuyHouse {
        style: HouseStyleId::STARTER,
    });
    assert_eq!(outcome.rejection(), Some(RejectionReason::AlreadyOwned));
    assert_eq!(
        s.apply(PlayerAction::BuyHouse {
            style: HouseStyleId(0)
        })
        .rejection(),
        Some(RejectionReason::InvalidHouseStyle)
    );
}

#[test]
fn gem_denominated_houses() {
    let mut config = GameConfig::default();
    config.economy.house_currency = Currency::Gems;
    config.economy.house_prices.insert(2, dec!(3));
    let mut s = Session::new(&config).unwrap();
    assert!(s.can_buy_house(HouseStyleId(2)));
    assert!(
        s.apply(PlayerAction::BuyHouse {
            style: HouseStyleId(2)
        })
        .is_applied()
    );
    assert_eq!(s.ledger().gems(), 0);
    assert_eq!(s.ledger().coins(), dec!(40));
}

#[test]
fn carrot_swaps_out_corn_in_full_trough() {
    let mut s = session();
    let snap = s.snapshot();
    assert_eq!(snap.trough.capacity, 5);
    assert!(snap.trough.is_empty());

    s.apply(PlayerAction::FillTroughWithCorn);
    assert_eq!(s.snapshot().trough.corn, 5);

    let outcome = s.apply(PlayerAction::FillTroughWithCarrot);
    assert_eq!(outcome.sounds, vec![SoundCue::Feed]);
    let snap = s.snapshot();
    assert_eq!(snap.trough.corn, 4);
    assert_eq!(snap.trough.carrot, 1);
    assert_eq!(snap.inventory.get(&FoodKind::Carrot), Some(&1));
}

#[test]
fn out_of_carrots_is_rejected() {
    let mut config = GameConfig::default();
    config.economy.starting_carrots = 0;
    let mut s = Session::new(&config).unwrap();
    let outcome = s.apply(PlayerAction::FillTroughWithCarrot);
    assert_eq!(outcome.rejection(), Some(RejectionReason::OutOfStock));
    assert!(outcome.sounds.is_empty());
}

#[test]
fn upgrade_becomes_affordable_after_earning() {
    let mut s = session();
    assert_eq!(
        s.upgrade_cost(TroughKind::FoodTrough),
        Some(Price::coins(dec!(60)))
    );
    assert!(!s.can_upgrade(TroughKind::FoodTrough));
    let upgrade = PlayerAction::UpgradeTrough {
        trough: TroughKind::FoodTrough,
    };
    assert_eq!(
        s.apply(upgrade).rejection(),
        Some(RejectionReason::InsufficientFunds)
    );

    s.grant(&Price::coins(dec!(20)), LedgerReason::Reward).unwrap();
    assert!(s.can_upgrade(TroughKind::FoodTrough));
    assert!(s.apply(upgrade).is_applied());
    let snap = s.snapshot();
    assert_eq!(snap.coins, Decimal::ZERO);
    assert_eq!(snap.upgrades.food_trough, 2);
    assert_eq!(snap.trough.capacity, 6);
}

#[test]
fn auto_feed_eats_carrot_first() {
    let mut config = GameConfig::default();
    config.economy.trough_base_capacity = 4;
    config.horse.initial.hunger = 90.0;
    let mut s = Session::new(&config).unwrap();
    s.apply(PlayerAction::FillTroughWithCarrot);
    s.apply(PlayerAction::FillTroughWithCorn);
    let trough = s.snapshot().trough;
    assert_eq!((trough.carrot, trough.corn), (1, 3));

    let report = s.advance_to(30_000).unwrap();
    assert_eq!(report.fired, vec![TimerEvent::AutoFeed]);
    assert_eq!(report.sounds, vec![SoundCue::Eating]);
    let snap = s.snapshot();
    assert_eq!((snap.trough.carrot, snap.trough.corn), (0, 3));
    assert!((snap.stats.hunger - 50.0).abs() < 1e-9);
    assert_eq!(snap.animation, AnimationTag::Eat);

    s.advance_to(30_800).unwrap();
    assert_eq!(s.snapshot().animation, AnimationTag::Idle);
}

#[test]
fn auto_feed_on_empty_trough_does_nothing() {
    let mut s = session();
    let before = s.snapshot();
    let report = s.advance_to(30_000).unwrap();
    assert!(report.sounds.is_empty());
    let after = s.snapshot();
    assert_eq!(after.stats, before.stats);
    assert_eq!(after.animation, AnimationTag::Idle);
}

#[test]
fn feeding_never_takes_hunger_below_zero() {
    let mut s = session();
    s.apply(PlayerAction::FillTroughWithCorn);
    assert!(s.apply(PlayerAction::Feed).is_applied());
    assert!((s.snapshot().stats.hunger - 10.0).abs() < 1e-9);
    assert!(s.apply(PlayerAction::Feed).is_applied());
    assert!(s.snapshot().stats.hunger.abs() < 1e-9);
    assert_eq!(s.snapshot().trough.corn, 3);
}

#[test]
fn decay_ticks_catch_up_after_a_long_gap() {
    let mut s = session();
    let report = s.advance_to(180_000).unwrap();
    let decays = report
        .fired
        .iter()
        .filter(|e| **e == TimerEvent::Decay)
        .count();
    assert_eq!(decays, 3);
    let stats = s.snapshot().stats;
    assert!((stats.hunger - 43.0).abs() < 1e-9);
    assert!((stats.sleepy - 11.2).abs() < 1e-9);
    assert!((stats.bored - 21.5).abs() < 1e-9);
}

#[test]
fn rejected_actions_leave_state_untouched() {
    let mut s = session();
    let before = s.snapshot();
    let entries = s.ledger().len();
    for action in [
        PlayerAction::Feed,
        PlayerAction::BuyFood {
            food: FoodKind::Carrot,
            quantity: 100,
        },
        PlayerAction::BuyFood {
            food: FoodKind::Carrot,
            quantity: 0,
        },
        PlayerAction::SwitchHouse {
            style: HouseStyleId(3),
        },
        PlayerAction::ExchangeGems { gems: 4 },
    ] {
        assert!(!s.apply(action).is_applied());
    }
    assert_eq!(s.snapshot(), before);
    assert_eq!(s.ledger().len(), entries);
}
