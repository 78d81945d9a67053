use crate::error::{AppResult, DomainError, InfraError};
use crate::models::enemy::{Enemy, EnemyKind};
use crate::models::item::Item;
use crate::models::types::{Direction, RoomId};
use crate::models::world::World;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::{fs, path::Path};
use tracing::{debug, warn};

pub const WORLD_SCHEMA_VERSION: u8 = 1;

static DEFAULT_WORLD: &str = include_str!("../content/world.yaml");

static KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_\-:]+$").expect("valid regex"));

// ====== YAML models ======

#[derive(Debug, Deserialize)]
pub struct WorldFile {
    pub version: u8,
    pub start: String,
    pub rooms: Vec<RoomYaml>,
    #[serde(default)]
    pub links: Vec<LinkYaml>,
    #[serde(default)]
    pub locks: Vec<LockYaml>,
}

#[derive(Debug, Deserialize)]
pub struct RoomYaml {
    pub key: String, // "room1"
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub items: Vec<ItemYaml>,
    #[serde(default)]
    pub enemies: Vec<EnemyYaml>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemYaml {
    Item {
        id: String,
        name: String,
        description: String,
    },
    Melee {
        id: String,
        name: String,
        description: String,
        damage: i32,
    },
    Ranged {
        id: String,
        name: String,
        description: String,
        damage: i32,
        ammo: u32,
    },
    Food {
        id: String,
        name: String,
        description: String,
        restore: i32,
        #[serde(default)]
        poisonous: bool,
    },
    Potion {
        id: String,
        name: String,
        description: String,
        #[serde(default)]
        restore: i32,
        #[serde(default)]
        attack_boost: i32,
        #[serde(default)]
        poisonous: bool,
    },
}

#[derive(Debug, Deserialize)]
pub struct EnemyYaml {
    pub kind: String, // "orc", "troll", ...
    pub name: String,
    pub description: String,
    pub health: i32,
    #[serde(default)]
    pub weapon: Option<ItemYaml>,
}

#[derive(Debug, Deserialize)]
pub struct LinkYaml {
    pub from: String,
    pub to: String,
    pub dir: String, // kept raw: unknown tokens are skipped, not rejected
}

#[derive(Debug, Deserialize)]
pub struct LockYaml {
    pub room: String,
    pub dir: String,
}

// ====== Entry points ======

pub fn parse_world(text: &str) -> AppResult<WorldFile> {
    Ok(serde_yaml::from_str(text)?)
}

pub fn load_world_file(path: &Path) -> AppResult<WorldFile> {
    let text = fs::read_to_string(path).map_err(InfraError::from)?;
    parse_world(&text)
}

/// The built-in nine-room maze.
pub fn default_world() -> AppResult<(World, RoomId)> {
    build_world(&parse_world(DEFAULT_WORLD)?)
}

/// Validates the file and builds the room arena. Returns the world and the start room.
pub fn build_world(file: &WorldFile) -> AppResult<(World, RoomId)> {
    validate_world(file)?;

    let mut world = World::new();
    let mut ids: HashMap<&str, RoomId> = HashMap::new();

    for r in &file.rooms {
        let id = world.add_room(&r.key, &r.name, &r.description);
        ids.insert(r.key.as_str(), id);

        let room = world
            .room_mut(id)
            .ok_or_else(|| DomainError::RoomNotFound(r.key.clone()))?;
        for it in &r.items {
            room.add_item(build_item(it)?);
        }
        for e in &r.enemies {
            room.add_enemy(build_enemy(e)?);
        }
        debug!(room = %r.key, items = r.items.len(), enemies = r.enemies.len(), "room built");
    }

    for l in &file.links {
        let (Some(from), Some(to)) = (ids.get(l.from.as_str()), ids.get(l.to.as_str())) else {
            warn!(from = %l.from, to = %l.to, "ignoring link to unknown room");
            continue;
        };
        world.connect(*from, *to, &l.dir);
    }

    for lock in &file.locks {
        let Some(room) = ids.get(lock.room.as_str()) else {
            warn!(room = %lock.room, "ignoring lock in unknown room");
            continue;
        };
        let Some(dir) = Direction::parse(lock.dir.trim()) else {
            warn!(room = %lock.room, dir = %lock.dir, "ignoring lock with unknown direction");
            continue;
        };
        if world.room(*room).and_then(|r| r.linked(dir)).is_none() {
            warn!(room = %lock.room, %dir, "lock on an exit that leads nowhere");
        }
        world.lock(*room, dir)?;
    }

    let start = ids
        .get(file.start.as_str())
        .copied()
        .ok_or_else(|| DomainError::RoomNotFound(file.start.clone()))?;

    Ok((world, start))
}

fn build_item(it: &ItemYaml) -> AppResult<Item> {
    validate_item(it)?;

    Ok(match it {
        ItemYaml::Item { id, name, description } => Item::plain(id, name, description),
        ItemYaml::Melee {
            id,
            name,
            description,
            damage,
        } => Item::melee(id, name, description, *damage),
        ItemYaml::Ranged {
            id,
            name,
            description,
            damage,
            ammo,
        } => Item::ranged(id, name, description, *damage, *ammo),
        ItemYaml::Food {
            id,
            name,
            description,
            restore,
            poisonous,
        } => Item::food(id, name, description, *restore, *poisonous),
        ItemYaml::Potion {
            id,
            name,
            description,
            restore,
            attack_boost,
            poisonous,
        } => Item::potion(id, name, description, *restore, *attack_boost, *poisonous),
    })
}

fn build_enemy(e: &EnemyYaml) -> AppResult<Enemy> {
    let kind = EnemyKind::parse(&e.kind).ok_or_else(|| DomainError::Validation {
        field: "enemies.kind",
        message: format!("unknown enemy kind '{}'", e.kind),
    })?;
    let weapon = e.weapon.as_ref().map(build_item).transpose()?;
    if weapon.as_ref().is_some_and(|w| w.as_weapon().is_none()) {
        return Err(DomainError::Validation {
            field: "enemies.weapon",
            message: format!("enemy '{}' carries something that is not a weapon", e.name),
        });
    }

    Ok(Enemy::new(kind, &e.name, &e.description, e.health, weapon))
}

// ====== Validation ======

fn validate_world(file: &WorldFile) -> AppResult<()> {
    if file.version != WORLD_SCHEMA_VERSION {
        return Err(DomainError::Validation {
            field: "version",
            message: format!("unsupported world schema version; expected {}", WORLD_SCHEMA_VERSION),
        });
    }
    if file.rooms.is_empty() {
        return Err(DomainError::Validation {
            field: "rooms",
            message: "world has no rooms".into(),
        });
    }

    let mut keys = HashSet::new();
    for r in &file.rooms {
        validate_room(r)?;
        if !keys.insert(r.key.as_str()) {
            return Err(DomainError::Validation {
                field: "rooms.key",
                message: format!("duplicate room key: {}", r.key),
            });
        }
    }

    if !keys.contains(file.start.as_str()) {
        return Err(DomainError::Validation {
            field: "start",
            message: format!("start room '{}' does not exist", file.start),
        });
    }

    Ok(())
}

fn validate_room(r: &RoomYaml) -> AppResult<()> {
    if r.key.trim().is_empty() {
        return Err(DomainError::Validation {
            field: "rooms.key",
            message: "room key empty".into(),
        });
    }
    if !KEY_RE.is_match(&r.key) {
        return Err(DomainError::Validation {
            field: "rooms.key",
            message: format!("invalid room key '{}'; only letters, digits, '_', '-' and ':' allowed", r.key),
        });
    }
    if r.name.trim().is_empty() {
        return Err(DomainError::Validation {
            field: "rooms.name",
            message: format!("room '{}' has empty name", r.key),
        });
    }

    let mut item_ids = HashSet::new();
    for it in &r.items {
        validate_item(it)?;
        if !item_ids.insert(item_id(it).trim().to_ascii_lowercase()) {
            return Err(DomainError::Validation {
                field: "items.id",
                message: format!("duplicate item id '{}' in room '{}'", item_id(it), r.key),
            });
        }
    }

    for e in &r.enemies {
        if e.name.trim().is_empty() {
            return Err(DomainError::Validation {
                field: "enemies.name",
                message: format!("enemy with empty name in room '{}'", r.key),
            });
        }
        if e.health <= 0 {
            return Err(DomainError::Validation {
                field: "enemies.health",
                message: format!("enemy '{}' must start with positive health", e.name),
            });
        }
    }

    Ok(())
}

fn item_id(it: &ItemYaml) -> &str {
    match it {
        ItemYaml::Item { id, .. }
        | ItemYaml::Melee { id, .. }
        | ItemYaml::Ranged { id, .. }
        | ItemYaml::Food { id, .. }
        | ItemYaml::Potion { id, .. } => id,
    }
}

fn validate_item(it: &ItemYaml) -> AppResult<()> {
    let id = item_id(it);
    if id.trim().is_empty() {
        return Err(DomainError::Validation {
            field: "items.id",
            message: "item with empty id".into(),
        });
    }

    let negative = match it {
        ItemYaml::Item { .. } => false,
        ItemYaml::Melee { damage, .. } | ItemYaml::Ranged { damage, .. } => *damage < 0,
        ItemYaml::Food { restore, .. } => *restore < 0,
        ItemYaml::Potion {
            restore, attack_boost, ..
        } => *restore < 0 || *attack_boost < 0,
    };
    if negative {
        return Err(DomainError::Validation {
            field: "items",
            message: format!("item '{}' has a negative stat", id),
        });
    }

    Ok(())
}
