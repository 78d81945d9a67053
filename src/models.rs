pub mod enemy;
pub mod item;
pub mod player;
pub mod room;
pub mod types;
pub mod world;
