//! Swappable combat strategies.
//!
//! A strategy decides what a character does on its turn against a
//! target. Strategies are stateless policies; a character carries
//! exactly one at a time and may rebind it between turns.

use crate::character::{Character, DamageOutcome};
use crate::constants::{SPELL_COST, SPELL_DAMAGE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for unrecognized strategy names.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown strategy '{0}'. Available: {options}.", options = Strategy::options())]
pub struct StrategyParseError(pub String);

/// The closed set of combat strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Aggressive,
    Defensive,
    SpellCasting,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Aggressive => "Aggressive",
            Strategy::Defensive => "Defensive",
            Strategy::SpellCasting => "SpellCasting",
        }
    }

    pub fn all() -> [Strategy; 3] {
        [
            Strategy::Aggressive,
            Strategy::Defensive,
            Strategy::SpellCasting,
        ]
    }

    /// Lowercase token accepted by [`FromStr`].
    pub fn token(&self) -> &'static str {
        match self {
            Strategy::Aggressive => "aggressive",
            Strategy::Defensive => "defensive",
            Strategy::SpellCasting => "spellcasting",
        }
    }

    /// Comma-separated token list, embedded in parse-error text.
    fn options() -> String {
        Strategy::all()
            .iter()
            .map(|strategy| strategy.token())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolve one turn of the actor against the target.
    ///
    /// Swapping strategies between turns never touches the actor's
    /// health or resource state; all mutation happens here, through the
    /// characters' own operations.
    pub fn execute(self, actor: &mut Character, target: &mut Character) -> ActionOutcome {
        match self {
            Strategy::Aggressive => {
                let weapon = actor.weapon().name();
                match target.take_damage(actor.attack_power()) {
                    DamageOutcome::Applied {
                        damage,
                        absorbed,
                        defeated,
                    } => ActionOutcome::Struck {
                        weapon,
                        damage,
                        absorbed,
                        target_health: target.health(),
                        target_defeated: defeated,
                    },
                    DamageOutcome::AlreadyDefeated => ActionOutcome::TargetAlreadyDown,
                }
            }
            // Reserved extension point: no state effect beyond the report.
            Strategy::Defensive => ActionOutcome::Guarded,
            Strategy::SpellCasting => {
                let available = match actor.mana() {
                    Some(pool) => pool.current,
                    None => return ActionOutcome::NoSpellcasting,
                };
                if !actor.spend_mana(SPELL_COST) {
                    return ActionOutcome::OutOfMana {
                        mana_left: available,
                    };
                }
                let mana_left = actor.mana().map_or(0, |pool| pool.current);
                match target.take_damage(SPELL_DAMAGE) {
                    DamageOutcome::Applied {
                        damage, defeated, ..
                    } => ActionOutcome::SpellHit {
                        damage,
                        target_health: target.health(),
                        target_defeated: defeated,
                        mana_left,
                    },
                    // Casting on a stale target is not refunded.
                    DamageOutcome::AlreadyDefeated => ActionOutcome::SpellOnFallen { mana_left },
                }
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Strategy::all()
            .into_iter()
            .find(|strategy| strategy.token() == token)
            .ok_or(StrategyParseError(token))
    }
}

/// Result descriptor for one strategy invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A weapon attack landed.
    Struck {
        weapon: String,
        damage: i32,
        absorbed: i32,
        target_health: i32,
        target_defeated: bool,
    },
    /// The target was already defeated; nothing happened.
    TargetAlreadyDown,
    /// Defensive stance; no state effect.
    Guarded,
    /// A spell landed; cost already deducted.
    SpellHit {
        damage: i32,
        target_health: i32,
        target_defeated: bool,
        mana_left: i32,
    },
    /// Spell cast against an already-defeated target. Mana still spent.
    SpellOnFallen { mana_left: i32 },
    /// Not enough mana; nothing was mutated.
    OutOfMana { mana_left: i32 },
    /// The actor has no mana pool at all.
    NoSpellcasting,
}

impl ActionOutcome {
    /// Render the human-readable report for this outcome.
    pub fn describe(&self, actor: &str, target: &str) -> String {
        match self {
            ActionOutcome::Struck {
                weapon,
                damage,
                absorbed,
                target_health,
                target_defeated,
            } => {
                let mut text = format!(
                    "{} attacks {} aggressively with {}, dealing {} damage ({} absorbed by armor).",
                    actor, target, weapon, damage, absorbed
                );
                if *target_defeated {
                    text.push_str(&format!(" {} has been defeated!", target));
                } else {
                    text.push_str(&format!(" {} has {} health left!", target, target_health));
                }
                text
            }
            ActionOutcome::TargetAlreadyDown => {
                format!(
                    "{} tries to attack {}, but {} is already defeated.",
                    actor, target, target
                )
            }
            ActionOutcome::Guarded => {
                format!(
                    "{} adopts a defensive stance, bracing for the next attack.",
                    actor
                )
            }
            ActionOutcome::SpellHit {
                damage,
                target_health,
                target_defeated,
                mana_left,
            } => {
                let mut text = format!(
                    "{} hurls a spell at {}, dealing {} magic damage.",
                    actor, target, damage
                );
                if *target_defeated {
                    text.push_str(&format!(" {} has been defeated!", target));
                } else {
                    text.push_str(&format!(" {} has {} health left!", target, target_health));
                }
                text.push_str(&format!(" ({} has {} mana remaining.)", actor, mana_left));
                text
            }
            ActionOutcome::SpellOnFallen { mana_left } => {
                format!(
                    "{} casts a spell at {}, but {} is already defeated. ({} mana remaining.)",
                    actor, target, target, mana_left
                )
            }
            ActionOutcome::OutOfMana { mana_left } => {
                format!(
                    "{} tries to cast a spell, but lacks the mana ({} available)!",
                    actor, mana_left
                )
            }
            ActionOutcome::NoSpellcasting => {
                format!("{} tries to cast a spell, but is no spellcaster.", actor)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Archetype;
    use crate::items::{Armor, Weapon};

    #[test]
    fn test_parse_strategy_names() {
        assert_eq!("aggressive".parse::<Strategy>(), Ok(Strategy::Aggressive));
        assert_eq!("Defensive".parse::<Strategy>(), Ok(Strategy::Defensive));
        assert_eq!(
            " spellcasting ".parse::<Strategy>(),
            Ok(Strategy::SpellCasting)
        );
    }

    #[test]
    fn test_parse_unknown_strategy_lists_options() {
        let err = "berserk".parse::<Strategy>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("berserk"));
        assert!(message.contains("aggressive"));
        assert!(message.contains("defensive"));
        assert!(message.contains("spellcasting"));
    }

    #[test]
    fn test_every_strategy_token_round_trips() {
        let error_text = StrategyParseError("x".to_string()).to_string();
        for strategy in Strategy::all() {
            assert_eq!(strategy.token().parse::<Strategy>(), Ok(strategy));
            // The parse-error text advertises every accepted token.
            assert!(error_text.contains(strategy.token()));
        }
    }

    #[test]
    fn test_aggressive_applies_attack_power_through_armor() {
        let mut attacker = Character::create(Archetype::Warrior, "Bruto");
        let mut target = Character::create(Archetype::Mage, "Lirael");

        let outcome = Strategy::Aggressive.execute(&mut attacker, &mut target);
        // Sword 5 against Robe 3 leaves 2 damage.
        assert_eq!(
            outcome,
            ActionOutcome::Struck {
                weapon: "Espada".to_string(),
                damage: 2,
                absorbed: 3,
                target_health: 98,
                target_defeated: false,
            }
        );
    }

    #[test]
    fn test_aggressive_against_defeated_target_is_noop() {
        let mut attacker = Character::create(Archetype::Warrior, "Bruto");
        let mut target = Character::create(Archetype::Mage, "Lirael");
        target.take_damage(10_000);
        assert!(!target.is_alive());

        let outcome = Strategy::Aggressive.execute(&mut attacker, &mut target);
        assert_eq!(outcome, ActionOutcome::TargetAlreadyDown);
        assert_eq!(target.health(), 0);
    }

    #[test]
    fn test_defensive_has_no_state_effect() {
        let mut actor = Character::create(Archetype::Warrior, "Bruto");
        let mut target = Character::create(Archetype::Rogue, "Sombra");
        let target_health_before = target.health();

        let outcome = Strategy::Defensive.execute(&mut actor, &mut target);
        assert_eq!(outcome, ActionOutcome::Guarded);
        assert_eq!(target.health(), target_health_before);
    }

    #[test]
    fn test_spellcasting_deducts_cost_and_damages() {
        let mut mage = Character::create(Archetype::Mage, "Lirael");
        let mut target = Character::with_equipment(
            Archetype::Rogue,
            "Sombra",
            Weapon::dagger(),
            Armor::custom("Harapos", "Apenas tela.", 3),
            Strategy::Aggressive,
        );
        target.take_damage(93); // 90 through the armor; 10 health left
        assert_eq!(target.health(), 10);

        let outcome = Strategy::SpellCasting.execute(&mut mage, &mut target);
        // 15 spell damage against 3 armor: 12 applied, 10 health gone.
        assert_eq!(
            outcome,
            ActionOutcome::SpellHit {
                damage: 12,
                target_health: 0,
                target_defeated: true,
                mana_left: 90,
            }
        );
        assert!(!target.is_alive());
        assert_eq!(mage.mana().unwrap().current, 90);
    }

    #[test]
    fn test_spellcasting_with_insufficient_mana_mutates_nothing() {
        let mut mage = Character::create(Archetype::Mage, "Lirael");
        assert!(mage.spend_mana(95));
        assert_eq!(mage.mana().unwrap().current, 5);

        let mut target = Character::create(Archetype::Rogue, "Sombra");
        let target_health_before = target.health();

        let outcome = Strategy::SpellCasting.execute(&mut mage, &mut target);
        assert_eq!(outcome, ActionOutcome::OutOfMana { mana_left: 5 });
        assert_eq!(mage.mana().unwrap().current, 5);
        assert_eq!(target.health(), target_health_before);
    }

    #[test]
    fn test_spellcasting_without_pool_reports_incompatibility() {
        let mut warrior = Character::create(Archetype::Warrior, "Bruto");
        let mut target = Character::create(Archetype::Rogue, "Sombra");

        let outcome = Strategy::SpellCasting.execute(&mut warrior, &mut target);
        assert_eq!(outcome, ActionOutcome::NoSpellcasting);
        assert_eq!(target.health(), target.max_health());
    }

    #[test]
    fn test_spellcasting_on_fallen_target_still_spends_mana() {
        let mut mage = Character::create(Archetype::Mage, "Lirael");
        let mut target = Character::create(Archetype::Rogue, "Sombra");
        target.take_damage(10_000);
        assert!(!target.is_alive());

        let outcome = Strategy::SpellCasting.execute(&mut mage, &mut target);
        assert_eq!(outcome, ActionOutcome::SpellOnFallen { mana_left: 90 });
        assert_eq!(mage.mana().unwrap().current, 90);
    }
}
