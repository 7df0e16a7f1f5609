//! Player-facing commands.
//!
//! Each command resolves to a human-readable result string. Bad input
//! never raises out of the core: unknown strategy or direction names
//! come back as descriptive failure messages listing the valid set.

use crate::character::Character;
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for unrecognized direction names.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Cannot move '{0}'. Valid directions: north, south, east, west.")]
pub struct DirectionParseError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "east" => Ok(Direction::East),
            "west" => Ok(Direction::West),
            other => Err(DirectionParseError(other.to_string())),
        }
    }
}

/// What a look command inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookTarget {
    Yourself,
    Enemy,
}

/// One player intent per round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Look { target: LookTarget },
    Attack,
    Move { direction: String },
    ChangeStrategy { name: String },
    UseSpecialAbility,
    Quit,
}

impl Command {
    /// Whether this action gives the opponent its turn. Checking your
    /// own sheet or swapping strategy is passive; everything else,
    /// including sizing up the enemy, provokes. This asymmetry is
    /// deliberate reference behavior.
    pub fn provokes_enemy(&self) -> bool {
        !matches!(
            self,
            Command::Look {
                target: LookTarget::Yourself
            } | Command::ChangeStrategy { .. }
        )
    }

    /// Execute the command against the player and the current enemy.
    /// `Quit` is intercepted by the session before this runs.
    pub(crate) fn execute(&self, player: &mut Character, enemy: Option<&mut Character>) -> String {
        match self {
            Command::Look { target } => match (target, enemy) {
                (LookTarget::Enemy, Some(enemy)) if enemy.is_alive() => enemy.sheet().to_string(),
                _ => player.sheet().to_string(),
            },
            Command::Attack => {
                if !player.is_alive() {
                    return format!("{} cannot attack while defeated.", player.name());
                }
                match enemy {
                    Some(enemy) if enemy.is_alive() => {
                        let strategy = player.strategy();
                        let outcome = strategy.execute(player, enemy);
                        outcome.describe(player.name(), enemy.name())
                    }
                    Some(enemy) => format!(
                        "{} is already defeated. There is no sense in attacking.",
                        enemy.name()
                    ),
                    None => "There is no enemy here to attack.".to_string(),
                }
            }
            Command::Move { direction } => match direction.parse::<Direction>() {
                Ok(direction) => format!(
                    "{} moves {}. (Map exploration is not implemented.)",
                    player.name(),
                    direction
                ),
                Err(err) => err.to_string(),
            },
            Command::ChangeStrategy { name } => {
                if !player.is_alive() {
                    return format!("{} cannot change strategy while defeated.", player.name());
                }
                match name.parse::<Strategy>() {
                    Ok(strategy) => {
                        player.set_strategy(strategy);
                        format!(
                            "{} switches combat strategy to {}.",
                            player.name(),
                            strategy.name()
                        )
                    }
                    Err(err) => err.to_string(),
                }
            }
            Command::UseSpecialAbility => {
                if !player.is_alive() {
                    return format!("{} cannot use an ability while defeated.", player.name());
                }
                let target = enemy.filter(|enemy| enemy.is_alive());
                player.use_special_ability(target)
            }
            Command::Quit => "Farewell, adventurer.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Archetype;

    #[test]
    fn test_provocation_asymmetry() {
        assert!(!Command::Look {
            target: LookTarget::Yourself
        }
        .provokes_enemy());
        assert!(!Command::ChangeStrategy {
            name: "defensive".to_string()
        }
        .provokes_enemy());

        assert!(Command::Look {
            target: LookTarget::Enemy
        }
        .provokes_enemy());
        assert!(Command::Attack.provokes_enemy());
        assert!(Command::UseSpecialAbility.provokes_enemy());
        assert!(Command::Move {
            direction: "north".to_string()
        }
        .provokes_enemy());
    }

    #[test]
    fn test_look_falls_back_to_self_without_living_enemy() {
        let mut player = Character::create(Archetype::Warrior, "Bruto");
        let look_enemy = Command::Look {
            target: LookTarget::Enemy,
        };
        let text = look_enemy.execute(&mut player, None);
        assert!(text.contains("Bruto"));

        let mut fallen = Character::create(Archetype::Rogue, "Sombra");
        fallen.take_damage(10_000);
        let text = look_enemy.execute(&mut player, Some(&mut fallen));
        assert!(text.contains("Bruto"));
    }

    #[test]
    fn test_look_at_living_enemy_shows_its_sheet() {
        let mut player = Character::create(Archetype::Warrior, "Bruto");
        let mut enemy = Character::create(Archetype::Rogue, "Sombra");
        let text = Command::Look {
            target: LookTarget::Enemy,
        }
        .execute(&mut player, Some(&mut enemy));
        assert!(text.contains("Sombra"));
        assert!(text.contains("Armadura de Cuero"));
    }

    #[test]
    fn test_attack_without_enemy_reports_failure() {
        let mut player = Character::create(Archetype::Warrior, "Bruto");
        let text = Command::Attack.execute(&mut player, None);
        assert!(text.contains("no enemy"));
    }

    #[test]
    fn test_attack_on_defeated_enemy_reports_failure() {
        let mut player = Character::create(Archetype::Warrior, "Bruto");
        let mut enemy = Character::create(Archetype::Rogue, "Sombra");
        enemy.take_damage(10_000);
        let text = Command::Attack.execute(&mut player, Some(&mut enemy));
        assert!(text.contains("already defeated"));
        assert_eq!(enemy.health(), 0);
    }

    #[test]
    fn test_change_strategy_rebinds() {
        let mut player = Character::create(Archetype::Warrior, "Bruto");
        let text = Command::ChangeStrategy {
            name: "defensive".to_string(),
        }
        .execute(&mut player, None);
        assert!(text.contains("Defensive"));
        assert_eq!(player.strategy(), Strategy::Defensive);
    }

    #[test]
    fn test_change_strategy_unknown_lists_options() {
        let mut player = Character::create(Archetype::Warrior, "Bruto");
        let before = player.strategy();
        let text = Command::ChangeStrategy {
            name: "berserk".to_string(),
        }
        .execute(&mut player, None);
        assert!(text.contains("berserk"));
        assert!(text.contains("spellcasting"));
        assert_eq!(player.strategy(), before);
    }

    #[test]
    fn test_move_is_a_placeholder() {
        let mut player = Character::create(Archetype::Rogue, "Sombra");
        let text = Command::Move {
            direction: "north".to_string(),
        }
        .execute(&mut player, None);
        assert!(text.contains("not implemented"));

        let text = Command::Move {
            direction: "up".to_string(),
        }
        .execute(&mut player, None);
        assert!(text.contains("Valid directions"));
    }

    #[test]
    fn test_special_ability_dispatches_by_archetype() {
        let mut warrior = Character::create(Archetype::Warrior, "Bruto");
        let text = Command::UseSpecialAbility.execute(&mut warrior, None);
        assert!(text.contains("Furia Guerrera"));
        assert!(warrior.buff().is_some());
    }
}
