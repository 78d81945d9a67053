use crate::commands::{CmdCtx, CmdResult};
use crate::error::DomainError;
use crate::input::parser::Intent;

pub fn equip(ctx: &mut CmdCtx<'_>, intent: &Intent) -> CmdResult {
    let player = &*ctx.player;
    let Some(what) = intent.resolve_object(|c| player.has_item(c)) else {
        ctx.line("You don't have that weapon.");
        return Ok(());
    };

    match ctx.player.equip(what) {
        Ok(item) => {
            let msg = format!("You equipped {}.", item.display_text());
            ctx.line(msg);
        }
        Err(DomainError::ItemNotFound(_) | DomainError::NotAWeapon(_)) => {
            ctx.line("You don't have that weapon.");
        }
        Err(DomainError::WeaponNotEquippable(name)) => {
            ctx.line(format!("{} is out of ammo and can't be equipped.", name));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
