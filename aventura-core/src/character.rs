//! Characters: archetypes, health, mana, timed buffs, and equipment.
//!
//! All combat-visible state is mutated only through the operations
//! defined here, so the floor/cap invariants (health never negative,
//! mana never above its max) hold everywhere.

use crate::constants::{
    BASE_PLAYER_HEALTH, FURY_BONUS_DAMAGE, FURY_TURNS, MAGE_BASE_MANA,
    MEDITATION_RECOVERY_DIVISOR, PRECISE_STRIKE_BONUS, ROGUE_STEALTH_POINTS,
    WARRIOR_HEALTH_BONUS,
};
use crate::items::{Armor, Enchantment, Weapon};
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The character kinds. Each has its own base health profile, preset
/// equipment, default strategy, and special ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Warrior,
    Mage,
    Rogue,
}

impl Archetype {
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Warrior => "Warrior",
            Archetype::Mage => "Mage",
            Archetype::Rogue => "Rogue",
        }
    }

    pub fn base_max_health(&self) -> i32 {
        match self {
            Archetype::Warrior => BASE_PLAYER_HEALTH + WARRIOR_HEALTH_BONUS,
            Archetype::Mage | Archetype::Rogue => BASE_PLAYER_HEALTH,
        }
    }

    pub fn default_strategy(&self) -> Strategy {
        match self {
            Archetype::Mage => Strategy::SpellCasting,
            Archetype::Warrior | Archetype::Rogue => Strategy::Aggressive,
        }
    }

    pub fn special_ability_name(&self) -> &'static str {
        match self {
            Archetype::Warrior => "Furia Guerrera",
            Archetype::Mage => "Meditación Arcana",
            Archetype::Rogue => "Ataque Preciso",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Current and maximum health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    fn new(max: i32) -> Self {
        Self { current: max, max }
    }
}

/// A spendable mana pool. Only archetypes that cast spells carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPool {
    pub current: i32,
    pub max: i32,
}

impl ManaPool {
    fn new(max: i32) -> Self {
        Self { current: max, max }
    }
}

/// Timed status modifiers. A character holds at most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Buff {
    Furious,
}

impl Buff {
    pub fn name(&self) -> &'static str {
        match self {
            Buff::Furious => "Furioso",
        }
    }

    /// Attack power contributed while the buff is active.
    pub fn attack_bonus(&self) -> i32 {
        match self {
            Buff::Furious => FURY_BONUS_DAMAGE,
        }
    }
}

/// A buff plus its remaining duration in whole turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBuff {
    pub buff: Buff,
    pub turns_left: u32,
}

/// Outcome of a damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The target was already at zero health; nothing happened.
    AlreadyDefeated,
    /// Damage went through. `damage` is what actually landed after
    /// armor; `defeated` is whether this call caused the defeat.
    Applied {
        damage: i32,
        absorbed: i32,
        defeated: bool,
    },
}

/// Outcome of a heal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealOutcome {
    AlreadyDefeated,
    /// `amount` is the actually-applied delta after the max-health cap.
    Healed { amount: i32 },
}

/// Outcome of a buff activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuffActivation {
    Activated,
    /// Re-activating while active is a no-op, reported distinctly.
    AlreadyActive,
}

/// A combat actor. Defeated characters (health 0) persist as inert
/// records; every operation on them is a reported no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    id: CharacterId,
    name: String,
    archetype: Archetype,
    health: Health,
    mana: Option<ManaPool>,
    stealth_points: Option<i32>,
    weapon: Weapon,
    armor: Armor,
    strategy: Strategy,
    buff: Option<ActiveBuff>,
}

impl Character {
    /// Create a fully equipped character of the given archetype, with
    /// its preset weapon, armor, and default strategy.
    pub fn create(archetype: Archetype, name: impl Into<String>) -> Self {
        let (weapon, armor) = match archetype {
            Archetype::Warrior => (Weapon::sword(), Armor::chainmail()),
            Archetype::Mage => (Weapon::staff(), Armor::robe()),
            Archetype::Rogue => (Weapon::dagger(), Armor::leather_armor()),
        };
        Self::with_equipment(archetype, name, weapon, armor, archetype.default_strategy())
    }

    /// Create a character with explicit equipment and strategy.
    pub fn with_equipment(
        archetype: Archetype,
        name: impl Into<String>,
        weapon: Weapon,
        armor: Armor,
        strategy: Strategy,
    ) -> Self {
        let mana = match archetype {
            Archetype::Mage => Some(ManaPool::new(MAGE_BASE_MANA)),
            _ => None,
        };
        // Present on the sheet but not yet mechanically spent.
        let stealth_points = match archetype {
            Archetype::Rogue => Some(ROGUE_STEALTH_POINTS),
            _ => None,
        };
        Self {
            id: CharacterId::new(),
            name: name.into(),
            archetype,
            health: Health::new(archetype.base_max_health()),
            mana,
            stealth_points,
            weapon,
            armor,
            strategy,
            buff: None,
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn health(&self) -> i32 {
        self.health.current
    }

    pub fn max_health(&self) -> i32 {
        self.health.max
    }

    pub fn is_alive(&self) -> bool {
        self.health.current > 0
    }

    /// The mana pool, if this archetype carries one.
    pub fn mana(&self) -> Option<&ManaPool> {
        self.mana.as_ref()
    }

    pub fn stealth_points(&self) -> Option<i32> {
        self.stealth_points
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn armor(&self) -> &Armor {
        &self.armor
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn buff(&self) -> Option<&ActiveBuff> {
        self.buff.as_ref()
    }

    /// Apply incoming damage, reduced by the equipped armor's effective
    /// bonus. Damage never heals and health never drops below zero.
    /// Negative input clamps to zero at the boundary.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::AlreadyDefeated;
        }
        let amount = amount.max(0);
        let absorbed = self.armor.defense_bonus();
        let damage = (amount - absorbed).max(0);
        self.health.current = (self.health.current - damage).max(0);
        debug_assert!(self.health.current >= 0 && self.health.current <= self.health.max);
        DamageOutcome::Applied {
            damage,
            absorbed,
            defeated: !self.is_alive(),
        }
    }

    /// Restore health, capped at the maximum. No-op on the defeated.
    pub fn heal(&mut self, amount: i32) -> HealOutcome {
        if !self.is_alive() {
            return HealOutcome::AlreadyDefeated;
        }
        let amount = amount.max(0);
        let healed = (self.health.current + amount).min(self.health.max) - self.health.current;
        self.health.current += healed;
        HealOutcome::Healed { amount: healed }
    }

    /// Total attack power: weapon bonus plus any active buff.
    pub fn attack_power(&self) -> i32 {
        let buff_bonus = match &self.buff {
            Some(active) if active.turns_left > 0 => active.buff.attack_bonus(),
            _ => 0,
        };
        self.weapon.attack_bonus() + buff_bonus
    }

    /// Deduct mana if a pool is present and holds enough. Archetypes
    /// without a pool always fail; a failed spend mutates nothing.
    pub fn spend_mana(&mut self, amount: i32) -> bool {
        match self.mana.as_mut() {
            Some(pool) if pool.current >= amount => {
                pool.current -= amount;
                debug_assert!(pool.current >= 0);
                true
            }
            _ => false,
        }
    }

    /// Activate a timed buff. Re-activation while one is already
    /// running does not refresh the counter.
    pub fn activate_buff(&mut self, buff: Buff, turns: u32) -> BuffActivation {
        match &self.buff {
            Some(active) if active.turns_left > 0 => BuffActivation::AlreadyActive,
            _ => {
                self.buff = Some(ActiveBuff {
                    buff,
                    turns_left: turns,
                });
                BuffActivation::Activated
            }
        }
    }

    /// End-of-turn upkeep: decay the active buff. Called exactly once
    /// per turn this character takes, regardless of the action's outcome.
    pub fn end_of_turn_tick(&mut self) {
        if let Some(active) = self.buff.as_mut() {
            active.turns_left = active.turns_left.saturating_sub(1);
            if active.turns_left == 0 {
                self.buff = None;
            }
        }
    }

    /// Rebind the combat strategy. Callers are trusted to pass only
    /// admissible strategies; spellcasting on a manaless character
    /// degrades to a reported no-op, never an error.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Equip a weapon, returning the previously equipped one intact.
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Weapon {
        std::mem::replace(&mut self.weapon, weapon)
    }

    /// Equip armor, returning the previously equipped piece intact.
    pub fn equip_armor(&mut self, armor: Armor) -> Armor {
        std::mem::replace(&mut self.armor, armor)
    }

    /// Wrap the equipped weapon in an enchantment, rebinding the slot
    /// to the new composed item.
    pub fn enchant_weapon(&mut self, enchantment: Enchantment) {
        self.weapon = self.weapon.clone().enchant(enchantment);
    }

    /// Use the archetype's special ability. Returns the human-readable
    /// report; expected-input failures are messages, never errors.
    pub fn use_special_ability(&mut self, target: Option<&mut Character>) -> String {
        let ability = self.archetype.special_ability_name();
        match self.archetype {
            Archetype::Warrior => match self.activate_buff(Buff::Furious, FURY_TURNS) {
                BuffActivation::Activated => format!(
                    "{} is overcome by {}! Attack damage rises by {} for {} turns.",
                    self.name, ability, FURY_BONUS_DAMAGE, FURY_TURNS
                ),
                BuffActivation::AlreadyActive => {
                    format!("{} is already furious.", self.name)
                }
            },
            Archetype::Mage => match self.mana.as_mut() {
                Some(pool) => {
                    let recovered =
                        (pool.max / MEDITATION_RECOVERY_DIVISOR).min(pool.max - pool.current);
                    pool.current += recovered;
                    format!(
                        "{} uses {} and recovers {} mana. Mana: {}/{}.",
                        self.name, ability, recovered, pool.current, pool.max
                    )
                }
                None => format!("{} tries to meditate, but has no mana pool.", self.name),
            },
            Archetype::Rogue => match target {
                Some(target) if target.is_alive() => {
                    let amount = self.attack_power() + PRECISE_STRIKE_BONUS;
                    match target.take_damage(amount) {
                        DamageOutcome::Applied {
                            damage, defeated, ..
                        } => {
                            let mut text = format!(
                                "{} strikes true with {} against {}, dealing {} damage.",
                                self.name,
                                ability,
                                target.name(),
                                damage
                            );
                            if defeated {
                                text.push_str(&format!(" {} has been defeated!", target.name()));
                            } else {
                                text.push_str(&format!(
                                    " {} has {} health left!",
                                    target.name(),
                                    target.health()
                                ));
                            }
                            text
                        }
                        DamageOutcome::AlreadyDefeated => format!(
                            "{} looks for a target for {}, but none is valid.",
                            self.name, ability
                        ),
                    }
                }
                _ => format!(
                    "{} looks for a target for {}, but none is valid.",
                    self.name, ability
                ),
            },
        }
    }

    /// Structured snapshot for the presentation layer.
    pub fn sheet(&self) -> CharacterSheet {
        CharacterSheet {
            name: self.name.clone(),
            archetype: self.archetype,
            health: self.health.current,
            max_health: self.health.max,
            defeated: !self.is_alive(),
            weapon_name: self.weapon.name(),
            weapon_bonus: self.weapon.attack_bonus(),
            armor_name: self.armor.name(),
            armor_bonus: self.armor.defense_bonus(),
            mana: self.mana,
            stealth_points: self.stealth_points,
            buff: self.buff,
            strategy: self.strategy,
            special_ability: self.archetype.special_ability_name().to_string(),
        }
    }
}

/// Read-only snapshot of a character, consumed by the presentation
/// layer. `Display` renders the in-game status block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub name: String,
    pub archetype: Archetype,
    pub health: i32,
    pub max_health: i32,
    pub defeated: bool,
    pub weapon_name: String,
    pub weapon_bonus: i32,
    pub armor_name: String,
    pub armor_bonus: i32,
    pub mana: Option<ManaPool>,
    pub stealth_points: Option<i32>,
    pub buff: Option<ActiveBuff>,
    pub strategy: Strategy,
    pub special_ability: String,
}

impl fmt::Display for CharacterSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ({}) ---", self.name, self.archetype.name())?;
        writeln!(
            f,
            "Health: {}/{}{}",
            self.health,
            self.max_health,
            if self.defeated { " (defeated)" } else { "" }
        )?;
        writeln!(f, "Weapon: {} (attack {})", self.weapon_name, self.weapon_bonus)?;
        writeln!(f, "Armor: {} (defense {})", self.armor_name, self.armor_bonus)?;
        if let Some(pool) = &self.mana {
            writeln!(f, "Mana: {}/{}", pool.current, pool.max)?;
        }
        if let Some(points) = self.stealth_points {
            writeln!(f, "Stealth points: {}", points)?;
        }
        if let Some(active) = &self.buff {
            writeln!(
                f,
                "Status: ¡{}! (+{} damage, {} turn(s) left)",
                active.buff.name(),
                active.buff.attack_bonus(),
                active.turns_left
            )?;
        }
        writeln!(f, "Special ability: {}", self.special_ability)?;
        writeln!(f, "Combat strategy: {}", self.strategy.name())?;
        write!(f, "--------------------")
    }
}
