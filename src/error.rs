use crate::models::types::Direction;
use thiserror::Error;

pub type AppResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Direction token is unknown or leads nowhere
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// Exit is locked
    #[error("locked exit: {0}")]
    BlockedByLock(Direction),

    /// A living enemy keeps the player in the room
    #[error("blocked by enemy: {0}")]
    BlockedByEnemyPresence(String),

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("inventory full (capacity {capacity})")]
    InventoryFull { capacity: usize },

    /// Ranged weapon without ammo
    #[error("weapon not equippable: {0}")]
    WeaponNotEquippable(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("not a weapon: {0}")]
    NotAWeapon(String),

    #[error("not consumable: {0}")]
    NotConsumable(String),

    #[error("enemy not found: {0}")]
    EnemyNotFound(String),

    #[error("no usable weapon equipped")]
    NoUsableWeapon,

    #[error("no locked door here")]
    NoLockedDoor,

    #[error("missing key item: {0}")]
    MissingKey(String),

    #[error("the game is over")]
    GameOver,

    #[error("room not found: {0}")]
    RoomNotFound(String),

    #[error("validation failed: {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ConfigErrorKind {
    #[error("failed to read file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse file: {0}")]
    Parse(toml::de::Error),

    #[error("invalid environment variable {0}: {1}")]
    InvalidEnv(String, String),

    #[error("invalid rule {field}: {message}")]
    InvalidRule { field: &'static str, message: String },
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: std::path::PathBuf,
        #[source]
        source: ConfigErrorKind,
    },

    #[error("invalid environment: {0}")]
    Env(#[source] ConfigErrorKind),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
