use crate::commands::{CmdCtx, CmdResult};
use crate::error::DomainError;
use crate::input::parser::Intent;
use crate::models::item::ConsumableKind;

pub fn eat(ctx: &mut CmdCtx<'_>, intent: &Intent) -> CmdResult {
    consume(ctx, intent, ConsumableKind::Food)
}

pub fn drink(ctx: &mut CmdCtx<'_>, intent: &Intent) -> CmdResult {
    consume(ctx, intent, ConsumableKind::Potion)
}

fn consume(ctx: &mut CmdCtx<'_>, intent: &Intent, kind: ConsumableKind) -> CmdResult {
    let (missing, verb) = match kind {
        ConsumableKind::Food => ("You don't have that food item.", "ate"),
        ConsumableKind::Potion => ("You don't have that potion item.", "drank"),
    };

    let player = &*ctx.player;
    let Some(what) = intent.resolve_object(|c| player.has_item(c)) else {
        ctx.line(missing);
        return Ok(());
    };

    match ctx.player.consume(what, kind) {
        Ok(c) if c.poisonous => {
            ctx.line(format!("You {} {}. It was poisonous! You lost {} health.", verb, c.name, -c.applied));
        }
        Ok(c) => {
            ctx.line(format!("You {} {} and restored {} health.", verb, c.name, c.applied));
        }
        Err(DomainError::ItemNotFound(_) | DomainError::NotConsumable(_)) => {
            ctx.line(missing);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let health = format!("Health: {}/{}", ctx.player.health(), ctx.player.max_health());
    ctx.line(health);
    if ctx.player.is_dead() {
        ctx.line("You have died. Game over.");
    }
    Ok(())
}
