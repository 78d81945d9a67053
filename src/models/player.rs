use crate::error::{AppResult, DomainError};
use crate::models::item::{ConsumableKind, Item};
use crate::models::types::{Direction, ItemId, RoomId};
use crate::models::world::World;
use tracing::info;

/// Result of eating or drinking something
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumed {
    pub name: String,
    pub poisonous: bool,
    /// Health change actually applied after clamping
    pub applied: i32,
}

#[derive(Debug, Clone)]
pub struct Player {
    current_room: RoomId,
    inventory: Vec<Item>,
    capacity: usize,
    /// Always refers to an item in `inventory`
    equipped: Option<ItemId>,
    health: i32,
    max_health: i32,
}

impl Player {
    pub fn new(start: RoomId, capacity: usize, max_health: i32) -> Self {
        let max_health = max_health.max(0);
        Self {
            current_room: start,
            inventory: Vec::new(),
            capacity,
            equipped: None,
            health: max_health,
            max_health,
        }
    }

    pub fn current_room(&self) -> RoomId {
        self.current_room
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Applies a signed health change, clamped to `[0, max_health]`. Returns the change
    /// that actually happened.
    pub fn increase_health(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).clamp(0, self.max_health);
        self.health - before
    }

    /// Negative amounts are treated as zero. Returns the health lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        -self.increase_health(amount.max(0).saturating_neg())
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.inventory.len() >= self.capacity
    }

    pub fn find_item(&self, short_id: &str) -> Option<&Item> {
        self.inventory.iter().find(|i| i.matches(short_id))
    }

    pub fn has_item(&self, short_id: &str) -> bool {
        self.find_item(short_id).is_some()
    }

    /// Appends to the inventory unless it is at capacity, in which case nothing changes.
    pub fn add_item(&mut self, item: Item) -> AppResult<()> {
        if self.is_full() {
            return Err(DomainError::InventoryFull { capacity: self.capacity });
        }
        self.inventory.push(item);
        Ok(())
    }

    /// Removes an item by short id, unequipping it if it was the active weapon.
    pub fn remove_item(&mut self, short_id: &str) -> Option<Item> {
        let idx = self.inventory.iter().position(|i| i.matches(short_id))?;
        let item = self.inventory.remove(idx);
        if self.equipped == Some(item.id) {
            self.equipped = None;
        }
        Some(item)
    }

    /// Makes a carried weapon the active one. The weapon stays in the inventory and any
    /// previously equipped weapon stays there too.
    pub fn equip(&mut self, short_id: &str) -> AppResult<&Item> {
        let idx = self
            .inventory
            .iter()
            .position(|i| i.matches(short_id))
            .ok_or_else(|| DomainError::ItemNotFound(short_id.to_string()))?;

        let item = &self.inventory[idx];
        let weapon = item.as_weapon().ok_or_else(|| DomainError::NotAWeapon(short_id.to_string()))?;
        if !weapon.can_use() {
            return Err(DomainError::WeaponNotEquippable(item.name.clone()));
        }

        self.equipped = Some(item.id);
        Ok(&self.inventory[idx])
    }

    pub fn equipped_weapon(&self) -> Option<&Item> {
        let id = self.equipped?;
        self.inventory.iter().find(|i| i.id == id)
    }

    pub fn equipped_weapon_mut(&mut self) -> Option<&mut Item> {
        let id = self.equipped?;
        self.inventory.iter_mut().find(|i| i.id == id)
    }

    /// Moves an item from the current room into the inventory. Capacity is checked
    /// before the room is touched.
    pub fn take_item(&mut self, world: &mut World, short_id: &str) -> AppResult<String> {
        let room = world
            .room_mut(self.current_room)
            .ok_or_else(|| DomainError::RoomNotFound(self.current_room.to_string()))?;

        if room.find_item(short_id).is_none() {
            return Err(DomainError::ItemNotFound(short_id.to_string()));
        }
        if self.is_full() {
            return Err(DomainError::InventoryFull { capacity: self.capacity });
        }

        let item = room
            .remove_item(short_id)
            .ok_or_else(|| DomainError::ItemNotFound(short_id.to_string()))?;
        let name = item.name.clone();
        self.add_item(item)?;
        Ok(name)
    }

    /// Moves an item from the inventory into the current room.
    pub fn drop_item(&mut self, world: &mut World, short_id: &str) -> AppResult<String> {
        if world.room(self.current_room).is_none() {
            return Err(DomainError::RoomNotFound(self.current_room.to_string()));
        }

        let item = self
            .remove_item(short_id)
            .ok_or_else(|| DomainError::ItemNotFound(short_id.to_string()))?;
        let name = item.name.clone();

        if let Some(room) = world.room_mut(self.current_room) {
            room.add_item(item);
        }
        Ok(name)
    }

    /// Walks through an exit. Nothing changes unless the move succeeds; on success the
    /// room left behind is marked visited.
    pub fn move_to(&mut self, world: &mut World, dir: Direction, enemies_block: bool) -> AppResult<RoomId> {
        let room = world
            .room(self.current_room)
            .ok_or_else(|| DomainError::RoomNotFound(self.current_room.to_string()))?;

        if enemies_block {
            if let Some(enemy) = room.enemies.iter().find(|e| !e.is_dead()) {
                return Err(DomainError::BlockedByEnemyPresence(enemy.name.clone()));
            }
        }

        let next = match room.neighbor(dir) {
            Some(next) => next,
            None if room.is_locked(dir) && room.linked(dir).is_some() => {
                return Err(DomainError::BlockedByLock(dir));
            }
            None => return Err(DomainError::InvalidDirection(dir.to_string())),
        };

        if let Some(prev) = world.room_mut(self.current_room) {
            prev.visited = true;
        }
        info!(from = %self.current_room, to = %next, %dir, "player moved");
        self.current_room = next;
        Ok(next)
    }

    /// Eats or drinks a carried item. The item is used up whatever the outcome.
    pub fn consume(&mut self, short_id: &str, kind: ConsumableKind) -> AppResult<Consumed> {
        let item = self
            .find_item(short_id)
            .ok_or_else(|| DomainError::ItemNotFound(short_id.to_string()))?;
        let effect = item
            .consumable(kind)
            .ok_or_else(|| DomainError::NotConsumable(format!("{} is not {}", short_id, kind.as_str())))?;
        let name = item.name.clone();

        self.remove_item(short_id);
        let applied = self.increase_health(effect.health_delta());

        Ok(Consumed {
            name,
            poisonous: effect.poisonous,
            applied,
        })
    }
}
