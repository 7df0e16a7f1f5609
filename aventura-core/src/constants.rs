//! Tunable game constants.
//!
//! Numeric balance values are configuration, collected here rather than
//! scattered through the mechanics.

pub const BASE_PLAYER_HEALTH: i32 = 100;
pub const WARRIOR_HEALTH_BONUS: i32 = 20;
pub const MAGE_BASE_MANA: i32 = 100;
pub const ROGUE_STEALTH_POINTS: i32 = 50;

/// How many turns the Furious buff lasts once activated.
pub const FURY_TURNS: u32 = 2;
/// Extra attack power granted while Furious.
pub const FURY_BONUS_DAMAGE: i32 = 5;

pub const SPELL_COST: i32 = 10;
pub const SPELL_DAMAGE: i32 = 15;

/// Extra damage on the Rogue's Ataque Preciso, on top of attack power.
pub const PRECISE_STRIKE_BONUS: i32 = 5;

/// Fraction of max health restored after defeating an opponent (divisor).
pub const VICTORY_HEAL_DIVISOR: i32 = 4;
/// Fraction of max mana restored by Meditación Arcana (divisor).
pub const MEDITATION_RECOVERY_DIVISOR: i32 = 4;
