use crate::commands::{CmdCtx, CmdResult};
use crate::error::DomainError;
use crate::input::parser::Intent;

pub fn take(ctx: &mut CmdCtx<'_>, intent: &Intent) -> CmdResult {
    let room = ctx.room()?;
    let Some(what) = intent.resolve_object(|c| room.find_item(c).is_some()) else {
        ctx.line("Item not found or can't be picked up.");
        return Ok(());
    };

    match ctx.player.take_item(ctx.world, what) {
        Ok(name) => ctx.line(format!("You picked up {}.", name)),
        Err(DomainError::ItemNotFound(_)) => ctx.line("Item not found or can't be picked up."),
        Err(DomainError::InventoryFull { capacity }) => {
            ctx.line("Item not found or can't be picked up.");
            ctx.line(format!("Your inventory is full ({} items).", capacity));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
