use crate::commands::{CmdCtx, CommandResult, process_command};
use crate::config::GameRules;
use crate::models::item::Item;
use crate::models::player::Player;
use crate::models::room::Room;
use crate::models::types::RoomId;
use crate::models::world::World;
use crate::net::output::MessageSink;
use tracing::info;

/// One game in progress: the world, the player in it and the rules they play by.
/// Commands run one at a time, each to completion.
#[derive(Debug)]
pub struct Session {
    world: World,
    player: Player,
    rules: GameRules,
    game_over: bool,
}

impl Session {
    pub fn new(world: World, start: RoomId, rules: GameRules) -> Self {
        let player = Player::new(start, rules.inventory_capacity, rules.max_health);
        Self {
            world,
            player,
            rules,
            game_over: false,
        }
    }

    /// Text shown when the session starts.
    pub fn intro(&self) -> Vec<String> {
        let mut lines = vec!["Welcome to the maze! Type 'help' for a list of commands.".to_string()];
        if let Some(room) = self.current_room() {
            lines.extend(room.describe());
        }
        lines
    }

    pub fn process_command(&mut self, raw: &str) -> CommandResult {
        let mut ctx = CmdCtx::new(&mut self.world, &mut self.player, &self.rules, self.game_over);
        process_command(raw, &mut ctx);
        let result = ctx.finish();

        if result.game_over && !self.game_over {
            info!("game over");
            self.game_over = true;
        }
        result
    }

    /// Runs a command and forwards its messages to `sink` once it has completed.
    pub fn handle(&mut self, raw: &str, sink: &mut impl MessageSink) -> CommandResult {
        let result = self.process_command(raw);
        for msg in &result.messages {
            sink.display(msg);
        }
        result
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.world.room(self.player.current_room())
    }

    pub fn inventory(&self) -> &[Item] {
        self.player.inventory()
    }

    pub fn equipped_weapon(&self) -> Option<&Item> {
        self.player.equipped_weapon()
    }

    pub fn health(&self) -> i32 {
        self.player.health()
    }

    pub fn max_health(&self) -> i32 {
        self.player.max_health()
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}
