use crate::commands::{CmdCtx, CmdResult};

pub fn inventory(ctx: &mut CmdCtx<'_>) -> CmdResult {
    let items = ctx.player.inventory();
    if items.is_empty() {
        ctx.line("Your inventory is empty.");
        return Ok(());
    }

    let equipped = ctx.player.equipped_weapon().map(|w| w.id);
    let mut lines = vec![format!("Inventory ({}/{}):", items.len(), ctx.player.capacity())];
    for item in items {
        let marker = if Some(item.id) == equipped { " [equipped]" } else { "" };
        lines.push(format!("  {}: {}{}", item.short_id, item.display_text(), marker));
    }

    ctx.lines(lines);
    Ok(())
}
