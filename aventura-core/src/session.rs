//! The turn controller.
//!
//! One submitted command drives one full round: the player acts, timed
//! effects decay, terminal conditions are checked, and the opponent
//! takes its turn when the player's action provoked one. Every event
//! lands in the session's structured log.

use crate::character::{Archetype, Character, HealOutcome};
use crate::command::Command;
use crate::constants::VICTORY_HEAL_DIVISOR;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Archetypes an opponent may spawn as.
const ENEMY_ARCHETYPES: [Archetype; 2] = [Archetype::Rogue, Archetype::Warrior];

/// Name roster for spawned opponents.
const ENEMY_NAMES: [&str; 5] = [
    "Ladrón Sombrío",
    "Orco Bruto",
    "Esqueleto Guardián",
    "Lobo Feroz",
    "Bandido Despiadado",
];

/// Where the session stands after the last round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Ongoing,
    PlayerDefeated,
    Quit,
}

/// Typed event categories for the session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    PlayerAction,
    EnemyAction,
    EnemyDefeated,
    EnemySpawned,
    PlayerDefeated,
    Quit,
}

/// One logged event, tagged with the round it happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub round: u32,
    pub kind: EventKind,
    pub description: String,
}

/// Result of one submitted command.
#[derive(Debug, Clone)]
pub struct Response {
    pub narrative: String,
    pub status: SessionStatus,
    pub player_health: i32,
    pub player_max_health: i32,
    pub enemies_defeated: u32,
}

/// A running game: the player, the current opponent, and the round
/// state machine.
pub struct GameSession {
    player: Character,
    enemy: Option<Character>,
    round: u32,
    enemies_defeated: u32,
    player_level: u32,
    status: SessionStatus,
    log: Vec<LogEntry>,
    rng: StdRng,
}

impl GameSession {
    /// Start a session with the given player and a freshly spawned
    /// opponent.
    pub fn new(player: Character) -> Self {
        Self::with_rng(player, None, StdRng::from_entropy())
    }

    /// Deterministic session for tests and replays.
    pub fn with_seed(player: Character, seed: u64) -> Self {
        Self::with_rng(player, None, StdRng::seed_from_u64(seed))
    }

    /// Start against a staged opponent instead of a random spawn.
    /// Replacements after a victory are still spawned randomly.
    pub fn with_enemy(player: Character, enemy: Character) -> Self {
        Self::with_rng(player, Some(enemy), StdRng::from_entropy())
    }

    fn with_rng(player: Character, enemy: Option<Character>, rng: StdRng) -> Self {
        let mut session = Self {
            player,
            enemy: None,
            round: 0,
            enemies_defeated: 0,
            player_level: 1,
            status: SessionStatus::Ongoing,
            log: Vec::new(),
            rng,
        };
        match enemy {
            Some(enemy) => {
                let announcement = format!(
                    "{} ({}) stands in your way!",
                    enemy.name(),
                    enemy.archetype().name()
                );
                session.push_log(EventKind::EnemySpawned, announcement);
                session.enemy = Some(enemy);
            }
            None => {
                session.spawn_enemy();
            }
        }
        session
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn enemy(&self) -> Option<&Character> {
        self.enemy.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn enemies_defeated(&self) -> u32 {
        self.enemies_defeated
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Run one full round for the submitted command.
    pub fn submit(&mut self, command: Command) -> Response {
        if self.status != SessionStatus::Ongoing {
            return self.response("The adventure is already over.".to_string());
        }
        self.round += 1;

        // Quit is checked at the top of the round and bypasses
        // everything else.
        if command == Command::Quit {
            self.status = SessionStatus::Quit;
            let farewell = format!(
                "Thanks for playing! Enemies defeated: {}.",
                self.enemies_defeated
            );
            self.push_log(EventKind::Quit, farewell.clone());
            return self.response(farewell);
        }

        let mut narrative = Vec::new();

        let action_text = command.execute(&mut self.player, self.enemy.as_mut());
        self.push_log(EventKind::PlayerAction, action_text.clone());
        narrative.push(action_text);
        self.player.end_of_turn_tick();

        let enemy_down = self.enemy.as_ref().map_or(false, |enemy| !enemy.is_alive());
        if enemy_down {
            // Victory short-circuit: no enemy turn this round, and the
            // replacement does not act either.
            if let Some(fallen) = self.enemy.take() {
                self.enemies_defeated += 1;
                self.player_level += 1;
                let note = format!("You have defeated {}!", fallen.name());
                self.push_log(EventKind::EnemyDefeated, note.clone());
                narrative.push(note);

                let reward = self.player.max_health() / VICTORY_HEAL_DIVISOR;
                if let HealOutcome::Healed { amount } = self.player.heal(reward) {
                    narrative.push(format!(
                        "You feel revitalized and recover {} health.",
                        amount
                    ));
                }
                narrative.push(self.spawn_enemy());
            }
        } else if command.provokes_enemy() && self.player.is_alive() {
            let enemy_text = match self.enemy.as_mut() {
                Some(enemy) if enemy.is_alive() => {
                    let strategy = enemy.strategy();
                    let outcome = strategy.execute(enemy, &mut self.player);
                    let text = outcome.describe(enemy.name(), self.player.name());
                    enemy.end_of_turn_tick();
                    Some(text)
                }
                _ => None,
            };
            if let Some(text) = enemy_text {
                self.push_log(EventKind::EnemyAction, text.clone());
                narrative.push(text);
                if !self.player.is_alive() {
                    self.status = SessionStatus::PlayerDefeated;
                    let note = format!(
                        "GAME OVER: {} has been defeated! Enemies defeated: {}.",
                        self.player.name(),
                        self.enemies_defeated
                    );
                    self.push_log(EventKind::PlayerDefeated, note.clone());
                    narrative.push(note);
                }
            }
        }

        self.response(narrative.join("\n"))
    }

    fn spawn_enemy(&mut self) -> String {
        let archetype = ENEMY_ARCHETYPES[self.rng.gen_range(0..ENEMY_ARCHETYPES.len())];
        let name = ENEMY_NAMES[self.rng.gen_range(0..ENEMY_NAMES.len())];
        let enemy = Character::create(archetype, format!("{} (Nivel {})", name, self.player_level));
        let announcement = format!(
            "A {} ({}) appears, roaring!",
            enemy.name(),
            enemy.archetype().name()
        );
        self.push_log(EventKind::EnemySpawned, announcement.clone());
        self.enemy = Some(enemy);
        announcement
    }

    fn push_log(&mut self, kind: EventKind, description: String) {
        self.log.push(LogEntry {
            round: self.round,
            kind,
            description,
        });
    }

    fn response(&self, narrative: String) -> Response {
        Response {
            narrative,
            status: self.status,
            player_health: self.player.health(),
            player_max_health: self.player.max_health(),
            enemies_defeated: self.enemies_defeated,
        }
    }
}
