use crate::commands::{CmdCtx, CmdResult};
use crate::error::DomainError;
use crate::input::parser::Intent;

pub fn go(ctx: &mut CmdCtx<'_>, intent: &Intent) -> CmdResult {
    let Some(dir) = intent.direction else {
        ctx.line("You cannot go that way.");
        return Ok(());
    };

    let blocks = ctx.rules.enemies_block_movement;
    match ctx.player.move_to(ctx.world, dir, blocks) {
        Ok(_) => {
            ctx.line(format!("You go {}.", dir));
            let text = ctx.room()?.describe();
            ctx.lines(text);
        }
        Err(DomainError::InvalidDirection(_)) => {
            ctx.line("You cannot go that way.");
        }
        Err(DomainError::BlockedByLock(d)) => {
            ctx.line(format!("The door to the {} is locked.", d));
        }
        Err(DomainError::BlockedByEnemyPresence(name)) => {
            ctx.line(format!("{} blocks your way! Deal with it before moving on.", name));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
