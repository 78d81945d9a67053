use crate::error::{ConfigErrorKind, InfraError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Rules that change how a session plays. Everything has a default so a config file only
/// needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub inventory_capacity: usize,
    pub max_health: i32,
    /// Short id of the item that opens locked exits
    pub key_item: String,
    /// Living enemies keep the player from leaving a room
    pub enemies_block_movement: bool,
    /// Enemies use their special ability after striking back
    pub enemy_abilities: bool,
}

impl GameRules {
    /// A session needs a living player and room to carry at least one item.
    pub fn validate(&self) -> Result<(), ConfigErrorKind> {
        if self.max_health <= 0 {
            return Err(ConfigErrorKind::InvalidRule {
                field: "max_health",
                message: format!("must be positive, got {}", self.max_health),
            });
        }
        if self.inventory_capacity == 0 {
            return Err(ConfigErrorKind::InvalidRule {
                field: "inventory_capacity",
                message: "must be at least 1".to_string(),
            });
        }
        if self.key_item.trim().is_empty() {
            return Err(ConfigErrorKind::InvalidRule {
                field: "key_item",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            inventory_capacity: 10,
            max_health: 100,
            key_item: "key".to_string(),
            enemies_block_movement: true,
            enemy_abilities: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub world_path: Option<PathBuf>, // None = built-in maze
    pub log_filter: String,          // e.g. "info,amaze=debug"
    pub rules: GameRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_path: None,
            log_filter: "warn".to_string(),
            rules: GameRules::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InfraError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| InfraError::Config {
            path: path.to_path_buf(),
            source: ConfigErrorKind::Read(e),
        })?;
        let cfg: Self = toml::from_str(&data).map_err(|e| InfraError::Config {
            path: path.to_path_buf(),
            source: ConfigErrorKind::Parse(e),
        })?;
        cfg.rules.validate().map_err(|source| InfraError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self, InfraError> {
        let _ = dotenvy::from_filename(".env");
        let mut cfg = Self::default();
        cfg.apply_env(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    /// Overlays `AMAZE_*` variables read through `get` on top of the current values.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<(), InfraError> {
        if let Some(v) = get("AMAZE_WORLD").filter(|v| !v.trim().is_empty()) {
            self.world_path = Some(PathBuf::from(v));
        }
        if let Some(v) = get("AMAZE_LOG") {
            self.log_filter = v;
        }
        if let Some(v) = get("AMAZE_ENEMIES_BLOCK") {
            self.rules.enemies_block_movement = parse_flag("AMAZE_ENEMIES_BLOCK", &v)?;
        }
        if let Some(v) = get("AMAZE_ENEMY_ABILITIES") {
            self.rules.enemy_abilities = parse_flag("AMAZE_ENEMY_ABILITIES", &v)?;
        }
        if let Some(v) = get("AMAZE_KEY_ITEM").filter(|v| !v.trim().is_empty()) {
            self.rules.key_item = v.trim().to_ascii_lowercase();
        }
        if let Some(v) = get("AMAZE_MAX_HEALTH") {
            self.rules.max_health = parse_number("AMAZE_MAX_HEALTH", &v)?;
        }
        if let Some(v) = get("AMAZE_INVENTORY_CAPACITY") {
            self.rules.inventory_capacity = parse_number("AMAZE_INVENTORY_CAPACITY", &v)?;
        }
        self.rules.validate().map_err(InfraError::Env)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, InfraError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(InfraError::Env(ConfigErrorKind::InvalidEnv(
            name.to_string(),
            value.to_string(),
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, InfraError> {
    value
        .trim()
        .parse()
        .map_err(|_| InfraError::Env(ConfigErrorKind::InvalidEnv(name.to_string(), value.to_string())))
}
