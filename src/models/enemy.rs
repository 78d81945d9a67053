use crate::models::item::Item;
use crate::models::player::Player;
use serde::{Deserialize, Serialize};

/// Enemy species. Each one carries its own special ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Orc,
    Goblin,
    Troll,
    Vampire,
    Werewolf,
    Skeleton,
    Angel,
    Dragon,
    Demon,
}

impl EnemyKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orc" => Some(EnemyKind::Orc),
            "goblin" => Some(EnemyKind::Goblin),
            "troll" => Some(EnemyKind::Troll),
            "vampire" => Some(EnemyKind::Vampire),
            "werewolf" => Some(EnemyKind::Werewolf),
            "skeleton" => Some(EnemyKind::Skeleton),
            "angel" => Some(EnemyKind::Angel),
            "dragon" => Some(EnemyKind::Dragon),
            "demon" | "demon boss" => Some(EnemyKind::Demon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Orc => "orc",
            EnemyKind::Goblin => "goblin",
            EnemyKind::Troll => "troll",
            EnemyKind::Vampire => "vampire",
            EnemyKind::Werewolf => "werewolf",
            EnemyKind::Skeleton => "skeleton",
            EnemyKind::Angel => "angel",
            EnemyKind::Dragon => "dragon",
            EnemyKind::Demon => "demon",
        }
    }
}

/// Result of applying damage to an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Still standing with this much health left
    Wounded { remaining: i32 },
    /// This hit took the enemy from alive to dead
    Slain,
    /// The enemy was already dead; nothing happened
    AlreadyDead,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub description: String,
    pub kind: EnemyKind,
    health: i32,
    max_health: i32,
    /// Must hold a weapon item when set
    weapon: Option<Item>,
}

impl Enemy {
    /// Creates an enemy at full health. `weapon` is ignored unless it is a weapon item.
    pub fn new(kind: EnemyKind, name: &str, description: &str, health: i32, weapon: Option<Item>) -> Self {
        let max_health = health.max(0);
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            health: max_health,
            max_health,
            weapon: weapon.filter(|w| w.as_weapon().is_some()),
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.weapon.as_ref()
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Applies damage, never letting health drop below zero. Only the hit that
    /// crosses into zero reports `Slain`.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::AlreadyDead;
        }

        let amount = amount.max(0).min(self.health);
        self.health -= amount;

        if self.health == 0 {
            DamageOutcome::Slain
        } else {
            DamageOutcome::Wounded { remaining: self.health }
        }
    }

    /// Gives up the weapon, clearing the enemy's reference to it.
    pub fn take_weapon(&mut self) -> Option<Item> {
        self.weapon.take()
    }

    /// Uses the weapon once (ranged weapons spend one ammo). Zero when unarmed or out of ammo.
    pub fn strike(&mut self) -> i32 {
        if self.is_dead() {
            return 0;
        }
        self.weapon
            .as_mut()
            .and_then(|w| w.as_weapon_mut())
            .and_then(|w| w.use_weapon())
            .unwrap_or(0)
    }

    /// Attacks the player and returns the damage dealt.
    pub fn attack(&mut self, target: &mut Player) -> i32 {
        let damage = self.strike();
        if damage > 0 {
            target.take_damage(damage);
        }
        damage
    }

    /// Triggers the species ability and returns its flavour text.
    pub fn special_ability(&mut self) -> String {
        match self.kind {
            EnemyKind::Troll => {
                self.heal(5);
                format!("{} regenerates health! Current health: {}", self.name, self.health)
            }
            EnemyKind::Vampire => {
                self.heal(3);
                format!("{} drains your life force!", self.name)
            }
            EnemyKind::Orc => format!("{} lets out a battle roar, intimidating you!", self.name),
            EnemyKind::Goblin => format!("{} sneaks up and attempts to steal an item!", self.name),
            EnemyKind::Werewolf => format!("{} howls, increasing its attack damage!", self.name),
            EnemyKind::Skeleton => format!("{} casts a curse, reducing your defense!", self.name),
            EnemyKind::Angel => format!("{} blesses its allies, increasing their strength!", self.name),
            EnemyKind::Dragon => format!("{} breathes fire, scorching the room!", self.name),
            EnemyKind::Demon => format!("{} summons lesser demons to fight for it!", self.name),
        }
    }

    fn heal(&mut self, amount: i32) {
        if !self.is_dead() {
            self.health = (self.health + amount.max(0)).min(self.max_health);
        }
    }
}
