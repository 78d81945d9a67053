use crate::commands::{CmdCtx, CmdResult};
use crate::error::DomainError;
use crate::input::parser::Intent;

pub fn drop(ctx: &mut CmdCtx<'_>, intent: &Intent) -> CmdResult {
    let player = &*ctx.player;
    let Some(what) = intent.resolve_object(|c| player.has_item(c)) else {
        ctx.line("You don't have that item.");
        return Ok(());
    };

    match ctx.player.drop_item(ctx.world, what) {
        Ok(name) => ctx.line(format!("You dropped {}.", name)),
        Err(DomainError::ItemNotFound(_)) => ctx.line("You don't have that item."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
