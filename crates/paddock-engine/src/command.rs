//! Line-based text commands.
//!
//! Each input line is either a short verb form (`buy carrot 3`,
//! `upgrade food`, `house switch 2`) or a JSON-encoded [`PlayerAction`].

use paddock_types::{AnimationTag, FoodKind, HouseStyleId, PlayerAction, TroughKind};

use crate::error::CommandError;

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  feed                      let the horse eat from the trough
  corn | carrot | toggle    fill the trough
  water                     fill the water trough
  buy <corn|carrot> [n]     buy food
  upgrade <food|water>      upgrade a trough
  house buy <n>             buy a house style
  house switch <n>          show an owned house style
  exchange <gems>           convert gems to coins
  gems <n>                  buy gems (local stub)
  aegyo | brush | rest      interact with the horse
  emote <animation>         play an animation
  status                    print the current snapshot
  scene                     print the resolved asset URLs
  quit                      stop the session
  {\"action\": ...}           any action as JSON";

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Dispatch a player action.
    Player(PlayerAction),
    /// Print the snapshot.
    Status,
    /// Print the resolved scene assets.
    Scene,
    /// Print usage.
    Help,
    /// Stop the session.
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.starts_with('{') {
        let action = serde_json::from_str(line).map_err(|_err| CommandError::InvalidArgument {
            value: line.to_owned(),
            expected: "action JSON",
        })?;
        return Ok(Some(Command::Player(action)));
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let command = match verb.as_str() {
        "feed" => Command::Player(PlayerAction::Feed),
        "corn" => Command::Player(PlayerAction::FillTroughWithCorn),
        "carrot" => Command::Player(PlayerAction::FillTroughWithCarrot),
        "toggle" => Command::Player(PlayerAction::ToggleTroughFoodType),
        "water" => Command::Player(PlayerAction::FillWater),
        "buy" => {
            let food = match words.next() {
                Some("corn") => FoodKind::Corn,
                Some("carrot") => FoodKind::Carrot,
                Some(other) => return Err(invalid(other, "food (corn or carrot)")),
                None => return Err(missing("buy", "a food kind")),
            };
            let quantity = words.next().map_or(Ok(1), |n| number(n, "quantity"))?;
            Command::Player(PlayerAction::BuyFood { food, quantity })
        }
        "upgrade" => {
            let trough = match words.next() {
                Some("food") => TroughKind::FoodTrough,
                Some("water") => TroughKind::WaterTrough,
                Some(other) => return Err(invalid(other, "trough (food or water)")),
                None => return Err(missing("upgrade", "a trough")),
            };
            Command::Player(PlayerAction::UpgradeTrough { trough })
        }
        "house" => {
            let sub = words.next().ok_or_else(|| missing("house", "buy or switch"))?;
            let style = HouseStyleId(number(
                words.next().ok_or_else(|| missing("house", "a style number"))?,
                "style number",
            )?);
            match sub {
                "buy" => Command::Player(PlayerAction::BuyHouse { style }),
                "switch" => Command::Player(PlayerAction::SwitchHouse { style }),
                other => return Err(invalid(other, "house subcommand")),
            }
        }
        "exchange" => {
            let count = words
                .next()
                .ok_or_else(|| missing("exchange", "a gem count"))?;
            let gems = number(count, "gem count")?;
            Command::Player(PlayerAction::ExchangeGems { gems })
        }
        "gems" => {
            let count = words
                .next()
                .ok_or_else(|| missing("gems", "a gem count"))?;
            let gems = number(count, "gem count")?;
            Command::Player(PlayerAction::BuyGems { gems })
        }
        "aegyo" => Command::Player(PlayerAction::Aegyo),
        "brush" => Command::Player(PlayerAction::Brush),
        "rest" => Command::Player(PlayerAction::Rest),
        "emote" => {
            let name = words.next().ok_or_else(|| missing("emote", "an animation"))?;
            let animation: AnimationTag =
                serde_json::from_value(serde_json::Value::String(name.to_owned()))
                    .map_err(|_err| invalid(name, "animation"))?;
            Command::Player(PlayerAction::Emote { animation })
        }
        "status" => Command::Status,
        "scene" => Command::Scene,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(verb)),
    };
    Ok(Some(command))
}

fn number<T: std::str::FromStr>(text: &str, expected: &'static str) -> Result<T, CommandError> {
    text.parse().map_err(|_err| invalid(text, expected))
}

fn invalid(value: &str, expected: &'static str) -> CommandError {
    CommandError::InvalidArgument {
        value: value.to_owned(),
        expected,
    }
}

const fn missing(command: &'static str, expected: &'static str) -> CommandError {
    CommandError::MissingArgument { command, expected }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn action(line: &str) -> PlayerAction {
        match parse(line).unwrap() {
            Some(Command::Player(action)) => action,
            other => panic!("expected an action, got {other:?}"),
        }
    }

    #[test]
    fn short_forms() {
        assert_eq!(action("feed"), PlayerAction::Feed);
        assert_eq!(
            action("buy carrot 3"),
            PlayerAction::BuyFood {
                food: FoodKind::Carrot,
                quantity: 3
            }
        );
        assert_eq!(
            action("buy corn"),
            PlayerAction::BuyFood {
                food: FoodKind::Corn,
                quantity: 1
            }
        );
        assert_eq!(
            action("upgrade water"),
            PlayerAction::UpgradeTrough {
                trough: TroughKind::WaterTrough
            }
        );
        assert_eq!(
            action("house switch 2"),
            PlayerAction::SwitchHouse {
                style: HouseStyleId(2)
            }
        );
        assert_eq!(
            action("emote head_tilt"),
            PlayerAction::Emote {
                animation: AnimationTag::HeadTilt
            }
        );
    }

    #[test]
    fn json_form() {
        assert_eq!(
            action(r#"{"action":"exchange_gems","gems":2}"#),
            PlayerAction::ExchangeGems { gems: 2 }
        );
    }

    #[test]
    fn blank_and_control_lines() {
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("status").unwrap(), Some(Command::Status));
        assert_eq!(parse("QUIT").unwrap(), Some(Command::Quit));
        assert_eq!(parse("scene").unwrap(), Some(Command::Scene));
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(matches!(parse("dance"), Err(CommandError::Unknown(_))));
        assert!(matches!(
            parse("buy"),
            Err(CommandError::MissingArgument { .. })
        ));
        assert!(matches!(
            parse("exchange lots"),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse("emote moonwalk"),
            Err(CommandError::InvalidArgument { .. })
        ));
    }
}
