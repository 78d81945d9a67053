pub mod commands;
pub mod config;
pub mod error;
pub mod import_world;
pub mod input;
pub mod models;
pub mod net;
pub mod state;

// Convenient re-exports (so call sites can do `amaze::Session`, etc.)
pub use commands::CommandResult;
pub use state::session::Session;
