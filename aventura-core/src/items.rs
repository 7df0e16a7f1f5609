//! Weapons, armor, and the enchantment chain.
//!
//! An item is either a base item or an enchantment wrapped around
//! another item. Enchantments stack without bound: each wrapper adds a
//! fixed bonus increment and composes the display text. Bonuses are
//! strictly additive, so stacking order changes the composed name but
//! never the effective bonus.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A piece of equipment: a base item, or an enchanted wrapper around
/// another item of the same kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    Base {
        name: String,
        description: String,
        bonus: i32,
    },
    Enchanted {
        inner: Box<Item>,
        suffix: String,
        clause: String,
        increment: i32,
    },
}

impl Item {
    pub fn base(name: impl Into<String>, description: impl Into<String>, bonus: i32) -> Self {
        Item::Base {
            name: name.into(),
            description: description.into(),
            bonus,
        }
    }

    /// Total bonus: own increment plus everything beneath, down to the base.
    pub fn effective_bonus(&self) -> i32 {
        match self {
            Item::Base { bonus, .. } => *bonus,
            Item::Enchanted {
                inner, increment, ..
            } => inner.effective_bonus() + increment,
        }
    }

    /// Composed name, suffixes appended in wrap order.
    pub fn display_name(&self) -> String {
        match self {
            Item::Base { name, .. } => name.clone(),
            Item::Enchanted { inner, suffix, .. } => {
                format!("{}{}", inner.display_name(), suffix)
            }
        }
    }

    /// Composed description, clauses appended in wrap order.
    pub fn display_description(&self) -> String {
        match self {
            Item::Base { description, .. } => description.clone(),
            Item::Enchanted { inner, clause, .. } => {
                format!("{}{}", inner.display_description(), clause)
            }
        }
    }

    /// Wrap this item, producing a new composed item. The wrapped item
    /// is never mutated in place.
    pub fn enchanted(
        self,
        suffix: impl Into<String>,
        clause: impl Into<String>,
        increment: i32,
    ) -> Self {
        Item::Enchanted {
            inner: Box::new(self),
            suffix: suffix.into(),
            clause: clause.into(),
            increment,
        }
    }
}

/// Weapon enchantments. Each wraps the currently equipped weapon and
/// adds a fixed attack increment plus composed display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Enchantment {
    Fire,
    Poison,
    Vorpal,
}

impl Enchantment {
    pub fn suffix(&self) -> &'static str {
        match self {
            Enchantment::Fire => " de Fuego",
            Enchantment::Poison => " Venenosa",
            Enchantment::Vorpal => " Aniquiladora (Vorpal)",
        }
    }

    pub fn clause(&self) -> &'static str {
        match self {
            Enchantment::Fire => " Ahora emite un calor abrasador y añade daño de fuego.",
            Enchantment::Poison => " Está cubierta de una sustancia tóxica.",
            Enchantment::Vorpal => {
                " Susurros de poder emanan de esta hoja, ¡capaz de decapitar con un golpe de suerte!"
            }
        }
    }

    pub fn increment(&self) -> i32 {
        match self {
            Enchantment::Fire => 3,
            Enchantment::Poison => 1,
            Enchantment::Vorpal => 10,
        }
    }
}

/// An equippable weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon(Item);

impl Weapon {
    pub fn sword() -> Self {
        Weapon(Item::base("Espada", "Una espada afilada y confiable.", 5))
    }

    pub fn staff() -> Self {
        Weapon(Item::base(
            "Vara",
            "Una vara de madera nudosa, ideal para canalizar energías.",
            3,
        ))
    }

    pub fn dagger() -> Self {
        Weapon(Item::base(
            "Daga",
            "Una daga corta y sigilosa, perfecta para ataques rápidos.",
            2,
        ))
    }

    pub fn custom(name: impl Into<String>, description: impl Into<String>, bonus: i32) -> Self {
        Weapon(Item::base(name, description, bonus))
    }

    pub fn attack_bonus(&self) -> i32 {
        self.0.effective_bonus()
    }

    pub fn name(&self) -> String {
        self.0.display_name()
    }

    pub fn description(&self) -> String {
        self.0.display_description()
    }

    /// Wrap this weapon in an enchantment, producing a new weapon.
    pub fn enchant(self, enchantment: Enchantment) -> Weapon {
        Weapon(self.0.enchanted(
            enchantment.suffix(),
            enchantment.clause(),
            enchantment.increment(),
        ))
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An equippable piece of armor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor(Item);

impl Armor {
    pub fn chainmail() -> Self {
        Armor(Item::base(
            "Cota de Mallas",
            "Una cota de mallas resistente que ofrece buena protección.",
            10,
        ))
    }

    pub fn robe() -> Self {
        Armor(Item::base(
            "Túnica",
            "Una túnica ligera, ofrece poca protección física pero no estorba.",
            3,
        ))
    }

    pub fn leather_armor() -> Self {
        Armor(Item::base(
            "Armadura de Cuero",
            "Una armadura de cuero curtido, balance entre movilidad y protección.",
            6,
        ))
    }

    pub fn custom(name: impl Into<String>, description: impl Into<String>, bonus: i32) -> Self {
        Armor(Item::base(name, description, bonus))
    }

    pub fn defense_bonus(&self) -> i32 {
        self.0.effective_bonus()
    }

    pub fn name(&self) -> String {
        self.0.display_name()
    }

    pub fn description(&self) -> String {
        self.0.display_description()
    }
}

impl fmt::Display for Armor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
