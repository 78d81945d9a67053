use crate::models::types::ItemId;
use serde::{Deserialize, Serialize};

/// Anything that can lie in a room or be carried by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Instance ID, unique per world
    pub id: ItemId,
    /// Lookup key typed by the player (e.g. "wooden sword"), always lowercase
    pub short_id: String,
    /// Display name (e.g. "Wooden Sword")
    pub name: String,
    /// Full description
    pub description: String,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Keys and other inert things
    Plain,
    Weapon(Weapon),
    Food(Consumable),
    Potion(Potion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Melee,
    Ranged { ammo: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: i32,
    pub kind: WeaponKind,
}

impl Weapon {
    pub fn melee(damage: i32) -> Self {
        Self { damage, kind: WeaponKind::Melee }
    }

    pub fn ranged(damage: i32, ammo: u32) -> Self {
        Self {
            damage,
            kind: WeaponKind::Ranged { ammo },
        }
    }

    /// Melee weapons always work, ranged ones need ammo.
    pub fn can_use(&self) -> bool {
        match self.kind {
            WeaponKind::Melee => true,
            WeaponKind::Ranged { ammo } => ammo > 0,
        }
    }

    /// Fires/swings the weapon once. Returns the damage dealt, or `None` when it cannot be used.
    pub fn use_weapon(&mut self) -> Option<i32> {
        match &mut self.kind {
            WeaponKind::Melee => Some(self.damage),
            WeaponKind::Ranged { ammo } if *ammo > 0 => {
                *ammo -= 1;
                Some(self.damage)
            }
            WeaponKind::Ranged { .. } => None,
        }
    }

    /// Adds ammo to a ranged weapon. Returns the new ammo count, or `None` for melee weapons.
    pub fn reload(&mut self, amount: u32) -> Option<u32> {
        match &mut self.kind {
            WeaponKind::Ranged { ammo } => {
                *ammo = ammo.saturating_add(amount);
                Some(*ammo)
            }
            WeaponKind::Melee => None,
        }
    }

    pub fn ammo(&self) -> Option<u32> {
        match self.kind {
            WeaponKind::Ranged { ammo } => Some(ammo),
            WeaponKind::Melee => None,
        }
    }
}

/// Heal-or-harm payload shared by food and potions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumable {
    pub restore_amount: i32,
    pub poisonous: bool,
}

impl Consumable {
    /// Signed health change: poison turns the restore amount into damage.
    pub fn health_delta(&self) -> i32 {
        let amount = i32::try_from(self.restore_amount.unsigned_abs()).unwrap_or(i32::MAX);
        if self.poisonous { -amount } else { amount }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potion {
    pub effect: Consumable,
    /// Carried from the world data, not applied in combat
    pub attack_boost: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumableKind {
    Food,
    Potion,
}

impl ConsumableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumableKind::Food => "food",
            ConsumableKind::Potion => "potion",
        }
    }
}

impl Item {
    pub fn new(short_id: &str, name: &str, description: &str, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            short_id: short_id.trim().to_ascii_lowercase(),
            name: name.to_string(),
            description: description.to_string(),
            kind,
        }
    }

    pub fn plain(short_id: &str, name: &str, description: &str) -> Self {
        Self::new(short_id, name, description, ItemKind::Plain)
    }

    pub fn melee(short_id: &str, name: &str, description: &str, damage: i32) -> Self {
        Self::new(short_id, name, description, ItemKind::Weapon(Weapon::melee(damage)))
    }

    pub fn ranged(short_id: &str, name: &str, description: &str, damage: i32, ammo: u32) -> Self {
        Self::new(short_id, name, description, ItemKind::Weapon(Weapon::ranged(damage, ammo)))
    }

    pub fn food(short_id: &str, name: &str, description: &str, restore_amount: i32, poisonous: bool) -> Self {
        Self::new(
            short_id,
            name,
            description,
            ItemKind::Food(Consumable {
                restore_amount,
                poisonous,
            }),
        )
    }

    pub fn potion(
        short_id: &str,
        name: &str,
        description: &str,
        restore_amount: i32,
        attack_boost: i32,
        poisonous: bool,
    ) -> Self {
        Self::new(
            short_id,
            name,
            description,
            ItemKind::Potion(Potion {
                effect: Consumable {
                    restore_amount,
                    poisonous,
                },
                attack_boost,
            }),
        )
    }

    /// Case-insensitive short id comparison
    pub fn matches(&self, short_id: &str) -> bool {
        self.short_id.eq_ignore_ascii_case(short_id.trim())
    }

    pub fn as_weapon(&self) -> Option<&Weapon> {
        match &self.kind {
            ItemKind::Weapon(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_weapon_mut(&mut self) -> Option<&mut Weapon> {
        match &mut self.kind {
            ItemKind::Weapon(w) => Some(w),
            _ => None,
        }
    }

    /// Returns the consumable payload if this item is of the requested kind.
    pub fn consumable(&self, kind: ConsumableKind) -> Option<Consumable> {
        match (&self.kind, kind) {
            (ItemKind::Food(c), ConsumableKind::Food) => Some(*c),
            (ItemKind::Potion(p), ConsumableKind::Potion) => Some(p.effect),
            _ => None,
        }
    }

    /// One-line stat summary used by inventory listings and `examine`.
    pub fn display_text(&self) -> String {
        match &self.kind {
            ItemKind::Plain => self.name.clone(),
            ItemKind::Weapon(w) => match w.kind {
                WeaponKind::Melee => format!("{} (damage {})", self.name, w.damage),
                WeaponKind::Ranged { ammo } => format!("{} (damage {}, ammo {})", self.name, w.damage, ammo),
            },
            ItemKind::Food(c) => format!("{} (restores {} health)", self.name, c.restore_amount),
            ItemKind::Potion(p) => {
                let mut s = self.name.clone();
                if p.effect.restore_amount > 0 {
                    s.push_str(&format!(" (restores {} health)", p.effect.restore_amount));
                }
                if p.attack_boost > 0 {
                    s.push_str(&format!(" (boosts attack by {})", p.attack_boost));
                }
                if p.effect.poisonous {
                    s.push_str(" (WARNING: This potion is poisonous!)");
                }
                s
            }
        }
    }
}
