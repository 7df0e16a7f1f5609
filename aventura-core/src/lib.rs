//! Turn-based combat engine for a small text adventure.
//!
//! This crate provides:
//! - Character archetypes with health, mana, and timed buffs
//! - Stackable equipment enchantments with strictly additive bonuses
//! - Swappable combat strategies
//! - A turn controller that alternates player and opponent actions
//!
//! Input parsing and terminal rendering live outside the core; the
//! engine speaks in [`Command`] values and human-readable narratives.
//!
//! # Quick Start
//!
//! ```
//! use aventura_core::{Archetype, Character, Command, GameSession, SessionStatus};
//!
//! let player = Character::create(Archetype::Warrior, "Thorin");
//! let mut session = GameSession::with_seed(player, 7);
//!
//! let response = session.submit(Command::Attack);
//! println!("{}", response.narrative);
//! assert_eq!(response.status, SessionStatus::Ongoing);
//! ```

pub mod character;
pub mod command;
pub mod constants;
pub mod items;
pub mod session;
pub mod strategy;

// Primary public API
pub use character::{
    ActiveBuff, Archetype, Buff, BuffActivation, Character, CharacterId, CharacterSheet,
    DamageOutcome, HealOutcome,
};
pub use command::{Command, Direction, DirectionParseError, LookTarget};
pub use items::{Armor, Enchantment, Item, Weapon};
pub use session::{EventKind, GameSession, LogEntry, Response, SessionStatus};
pub use strategy::{ActionOutcome, Strategy, StrategyParseError};
