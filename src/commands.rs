use crate::config::GameRules;
use crate::error::{AppResult, DomainError};
use crate::input::parser::{Verb, parse_command};
use crate::models::player::Player;
use crate::models::room::Room;
use crate::models::types::RoomId;
use crate::models::world::World;
use thiserror::Error;
use tracing::{debug, error, info};

mod attack;
mod consume;
mod drop;
mod equip;
mod examine;
mod go;
mod inventory;
mod look;
mod status;
mod take;
mod unlock;

pub type CmdResult = Result<(), CommandError>;

/// What a single command did, for the host to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub messages: Vec<String>,
    pub room_changed: bool,
    pub health_changed: bool,
    pub game_over: bool,
    /// The player asked to leave
    pub quit: bool,
}

impl CommandResult {
    /// First message, handy for single-line answers
    pub fn message(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }
}

/// Errors that escape a command handler. Game-rule failures never end up here; handlers
/// turn those into player messages themselves.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Command context passed to command handlers
pub struct CmdCtx<'a> {
    pub world: &'a mut World,
    pub player: &'a mut Player,
    pub rules: &'a GameRules,
    /// Set when the player was already dead before this command
    pub game_over: bool,
    out: Vec<String>,
    quit: bool,
    start_room: RoomId,
    start_health: i32,
}

impl<'a> CmdCtx<'a> {
    pub fn new(world: &'a mut World, player: &'a mut Player, rules: &'a GameRules, game_over: bool) -> Self {
        let start_room = player.current_room();
        let start_health = player.health();
        Self {
            world,
            player,
            rules,
            game_over,
            out: Vec::new(),
            quit: false,
            start_room,
            start_health,
        }
    }

    pub fn line(&mut self, msg: impl Into<String>) {
        self.out.push(msg.into());
    }

    pub fn lines(&mut self, msgs: impl IntoIterator<Item = String>) {
        self.out.extend(msgs);
    }

    pub fn room(&self) -> AppResult<&Room> {
        let id = self.player.current_room();
        self.world
            .room(id)
            .ok_or_else(|| DomainError::RoomNotFound(id.to_string()))
    }

    pub fn room_mut(&mut self) -> AppResult<&mut Room> {
        let id = self.player.current_room();
        self.world
            .room_mut(id)
            .ok_or_else(|| DomainError::RoomNotFound(id.to_string()))
    }

    /// Consumes the context and reports what changed.
    pub fn finish(self) -> CommandResult {
        CommandResult {
            messages: self.out,
            room_changed: self.player.current_room() != self.start_room,
            health_changed: self.player.health() != self.start_health,
            game_over: self.player.is_dead(),
            quit: self.quit,
        }
    }
}

/// Runs one command to completion against the context's world and player.
pub fn process_command(raw: &str, ctx: &mut CmdCtx<'_>) {
    let intent = parse_command(raw);
    debug!(verb = intent.verb.as_str(), input = %intent.original, "dispatching command");

    if ctx.game_over && intent.verb != Verb::Quit {
        debug!(error = %DomainError::GameOver, "rejected input");
        ctx.line("You have been defeated. Type 'exit' to leave.");
        return;
    }

    let res = match intent.verb {
        Verb::Go => go::go(ctx, &intent),
        Verb::Look => look::look(ctx, &intent),
        Verb::Examine => examine::examine(ctx, &intent),
        Verb::Take => take::take(ctx, &intent),
        Verb::Drop => drop::drop(ctx, &intent),
        Verb::Equip => equip::equip(ctx, &intent),
        Verb::Eat => consume::eat(ctx, &intent),
        Verb::Drink => consume::drink(ctx, &intent),
        Verb::Attack => attack::attack(ctx, &intent),
        Verb::Unlock => unlock::unlock(ctx, &intent),
        Verb::Inventory => inventory::inventory(ctx),
        Verb::Health => status::health(ctx),
        Verb::ShowMap => status::show_map(ctx),
        Verb::Help => {
            ctx.lines(help_text().lines().map(str::to_string));
            Ok(())
        }
        Verb::Quit => {
            info!("player quit");
            ctx.quit = true;
            ctx.line("Goodbye!");
            Ok(())
        }
        Verb::Custom(_) => {
            debug!(error = %DomainError::UnknownCommand(intent.original.clone()), "rejected input");
            ctx.line("Invalid command.");
            Ok(())
        }
    };

    if let Err(e) = res {
        // log for ops, don't leak internals to the player
        error!(error = %e, verb = intent.verb.as_str(), "command failed");
        ctx.line("Something went wrong. Nothing happened.");
    }
}

pub fn help_text() -> &'static str {
    r#"Available commands
------------------
  go <dir>               Move north, south, east or west (or just n/s/e/w)
  look [at <thing>]      Describe the room, or something in it
  examine <thing>        Take a closer look at an item or enemy
  take <item>            Pick up an item
  drop <item>            Drop an item
  equip <weapon>         Wield a weapon from your inventory
  eat <food>             Eat some food
  drink <potion>         Drink a potion
  attack <enemy>         Attack an enemy with your equipped weapon
  unlock [dir]           Unlock a door (you need a key)
  inventory              List what you carry
  health                 Show your health
  show map               Show the rooms around you
  help                   Show this help
  exit                   Leave the game"#
}
