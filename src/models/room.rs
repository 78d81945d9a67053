use crate::models::enemy::{DamageOutcome, Enemy};
use crate::models::item::Item;
use crate::models::types::{Direction, RoomId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single room in the world arena. Exits are only written through `World::link`
/// so both ends always agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Slug from the world file
    pub key: String,
    pub name: String,
    pub description: String,
    pub visited: bool,
    exits: BTreeMap<Direction, RoomId>,
    /// Gates on top of `exits`. Locking never removes the link itself.
    locked: BTreeSet<Direction>,
    pub items: Vec<Item>,
    pub enemies: Vec<Enemy>,
}

impl Room {
    pub fn new(id: RoomId, key: &str, name: &str, description: &str) -> Self {
        Self {
            id,
            key: key.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            visited: false,
            exits: BTreeMap::new(),
            locked: BTreeSet::new(),
            items: Vec::new(),
            enemies: Vec::new(),
        }
    }

    pub(crate) fn set_exit(&mut self, dir: Direction, to: RoomId) {
        self.exits.insert(dir, to);
    }

    pub(crate) fn clear_exit(&mut self, dir: Direction) {
        self.exits.remove(&dir);
    }

    /// Traversable neighbour. `None` when unlinked or locked.
    pub fn neighbor(&self, dir: Direction) -> Option<RoomId> {
        if self.locked.contains(&dir) {
            return None;
        }
        self.exits.get(&dir).copied()
    }

    /// Underlying link, ignoring locks
    pub fn linked(&self, dir: Direction) -> Option<RoomId> {
        self.exits.get(&dir).copied()
    }

    pub fn exits(&self) -> impl Iterator<Item = (Direction, RoomId)> + '_ {
        self.exits.iter().map(|(d, r)| (*d, *r))
    }

    pub fn is_locked(&self, dir: Direction) -> bool {
        self.locked.contains(&dir)
    }

    /// Returns false when the gate was already closed.
    pub fn lock(&mut self, dir: Direction) -> bool {
        self.locked.insert(dir)
    }

    /// Returns false when there was nothing to unlock.
    pub fn unlock(&mut self, dir: Direction) -> bool {
        self.locked.remove(&dir)
    }

    pub fn locked_exits(&self) -> impl Iterator<Item = Direction> + '_ {
        self.locked.iter().copied()
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn find_item(&self, short_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.matches(short_id))
    }

    pub fn remove_item(&mut self, short_id: &str) -> Option<Item> {
        let idx = self.items.iter().position(|i| i.matches(short_id))?;
        Some(self.items.remove(idx))
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn find_enemy(&self, name: &str) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.matches(name))
    }

    pub fn find_enemy_mut(&mut self, name: &str) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.matches(name))
    }

    pub fn remove_enemy(&mut self, name: &str) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|e| e.matches(name))?;
        Some(self.enemies.remove(idx))
    }

    pub fn has_living_enemies(&self) -> bool {
        self.enemies.iter().any(|e| !e.is_dead())
    }

    /// Damages the named enemy. On the killing blow the enemy leaves the room and its
    /// weapon is dropped here, in the same step. `None` if no such enemy is present.
    pub fn strike_enemy(&mut self, name: &str, damage: i32) -> Option<DamageOutcome> {
        let idx = self.enemies.iter().position(|e| e.matches(name))?;
        let outcome = self.enemies[idx].take_damage(damage);

        if outcome == DamageOutcome::Slain
            && let Some(mut dead) = self.remove_enemy(name)
            && let Some(weapon) = dead.take_weapon()
        {
            self.items.push(weapon);
        }

        Some(outcome)
    }

    /// Full room text as shown on entering or `look`.
    pub fn describe(&self) -> Vec<String> {
        let mut out = vec![self.name.clone(), self.description.clone()];

        if self.items.is_empty() {
            out.push("There are no items here.".to_string());
        } else {
            let names: Vec<&str> = self.items.iter().map(|i| i.short_id.as_str()).collect();
            out.push(format!("Items here: {}", names.join(", ")));
        }

        for enemy in &self.enemies {
            out.push(format!("{} is here! ({}, health {})", enemy.name, enemy.description, enemy.health()));
        }

        let exits: Vec<&str> = self.exits.keys().map(|d| d.canonical()).collect();
        if !exits.is_empty() {
            out.push(format!("Exits: {}", exits.join(", ")));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enemy::EnemyKind;

    fn mk_room() -> Room {
        Room::new(RoomId(0), "hall", "Hall", "A long hall.")
    }

    #[test]
    fn lock_keeps_the_link() {
        let mut r = mk_room();
        r.set_exit(Direction::East, RoomId(1));
        assert!(r.lock(Direction::East));
        assert_eq!(r.neighbor(Direction::East), None);
        assert_eq!(r.linked(Direction::East), Some(RoomId(1)));
        assert!(r.unlock(Direction::East));
        assert_eq!(r.neighbor(Direction::East), Some(RoomId(1)));
        assert!(!r.unlock(Direction::East));
    }

    #[test]
    fn item_lookup_is_case_insensitive() {
        let mut r = mk_room();
        r.add_item(Item::food("apple", "Fresh Apple", "A juicy red apple.", 10, false));
        assert!(r.find_item("APPLE").is_some());
        assert!(r.remove_item("Apple").is_some());
        assert!(r.remove_item("apple").is_none());
    }

    #[test]
    fn killing_blow_drops_weapon_and_removes_enemy() {
        let mut r = mk_room();
        let sword = Item::melee("sword", "Iron Sword", "A strong iron sword.", 15);
        r.add_enemy(Enemy::new(EnemyKind::Orc, "Grug", "An orc warrior.", 15, Some(sword)));

        assert_eq!(r.strike_enemy("grug", 5), Some(DamageOutcome::Wounded { remaining: 10 }));
        assert!(r.items.is_empty());

        assert_eq!(r.strike_enemy("GRUG", 10), Some(DamageOutcome::Slain));
        assert!(r.enemies.is_empty());
        assert!(r.find_item("sword").is_some());
        assert!(!r.has_living_enemies());

        assert_eq!(r.strike_enemy("grug", 10), None);
        assert_eq!(r.items.len(), 1);
    }

    #[test]
    fn remove_enemy_by_name() {
        let mut r = mk_room();
        r.add_enemy(Enemy::new(EnemyKind::Goblin, "Snik", "A goblin.", 8, None));
        r.add_enemy(Enemy::new(EnemyKind::Troll, "Mossback", "A hulking troll.", 30, None));

        assert!(r.remove_enemy("nobody").is_none());
        assert_eq!(r.enemies.len(), 2);

        let gone = r.remove_enemy("SNIK").unwrap();
        assert_eq!(gone.name, "Snik");
        assert!(r.find_enemy("snik").is_none());
        assert!(r.remove_enemy("snik").is_none());
        assert!(r.find_enemy("mossback").is_some());
    }

    #[test]
    fn describe_lists_items_and_enemies() {
        let mut r = mk_room();
        r.add_item(Item::plain("key", "Rusty Key", "A small rusty key."));
        r.add_enemy(Enemy::new(EnemyKind::Goblin, "Snik", "A goblin.", 8, None));
        let text = r.describe();
        assert!(text.iter().any(|l| l == "Items here: key"));
        assert!(text.iter().any(|l| l.starts_with("Snik is here!")));
    }
}
