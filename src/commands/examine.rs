use crate::commands::{CmdCtx, CmdResult};
use crate::input::parser::Intent;

pub fn examine(ctx: &mut CmdCtx<'_>, intent: &Intent) -> CmdResult {
    if intent.direct.is_none() {
        ctx.line("You must specify what you want to examine.");
        return Ok(());
    }
    describe_thing(ctx, intent)
}

/// Looks in the room first, then the inventory, then at enemies.
pub(super) fn describe_thing(ctx: &mut CmdCtx<'_>, intent: &Intent) -> CmdResult {
    let room = ctx.room()?;
    let player = &*ctx.player;
    let what = intent
        .resolve_object(|c| room.find_item(c).is_some() || player.has_item(c) || room.find_enemy(c).is_some())
        .unwrap_or_default();

    let text = if let Some(item) = room.find_item(what).or_else(|| player.find_item(what)) {
        vec![item.display_text(), item.description.clone()]
    } else if let Some(enemy) = room.find_enemy(what) {
        vec![
            format!("{} the {}", enemy.name, enemy.kind.as_str()),
            enemy.description.clone(),
            format!("Health: {}/{}", enemy.health(), enemy.max_health()),
        ]
    } else {
        vec![format!("You see no {} here to examine.", what)]
    };

    ctx.lines(text);
    Ok(())
}
