use crate::commands::{CmdCtx, CmdResult};
use crate::error::{AppResult, DomainError};
use crate::input::parser::Intent;
use crate::models::types::Direction;
use tracing::info;

/// Unlocks an exit of the current room. The key is kept.
pub fn unlock(ctx: &mut CmdCtx<'_>, intent: &Intent) -> CmdResult {
    match try_unlock(ctx, intent.direction) {
        Ok(dir) => ctx.line(format!("You unlocked the door to the {}.", dir)),
        Err(DomainError::MissingKey(_)) => ctx.line("You need a key."),
        Err(DomainError::NoLockedDoor) => ctx.line("There is no locked door here."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn try_unlock(ctx: &mut CmdCtx<'_>, wanted: Option<Direction>) -> AppResult<Direction> {
    if !ctx.player.has_item(&ctx.rules.key_item) {
        return Err(DomainError::MissingKey(ctx.rules.key_item.clone()));
    }

    let room = ctx.room()?;
    let dir = match wanted {
        Some(d) if room.is_locked(d) => d,
        Some(_) => return Err(DomainError::NoLockedDoor),
        None => room.locked_exits().next().ok_or(DomainError::NoLockedDoor)?,
    };

    let room_id = ctx.player.current_room();
    ctx.world.unlock(room_id, dir)?;
    info!(room = %room_id, %dir, "exit unlocked");
    Ok(dir)
}
