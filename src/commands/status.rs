use crate::commands::{CmdCtx, CmdResult};
use crate::models::types::Direction;

pub fn health(ctx: &mut CmdCtx<'_>) -> CmdResult {
    let msg = format!("Health: {}/{}", ctx.player.health(), ctx.player.max_health());
    ctx.line(msg);
    Ok(())
}

/// Neighbouring rooms plus every room visited so far.
pub fn show_map(ctx: &mut CmdCtx<'_>) -> CmdResult {
    let room = ctx.room()?;
    let mut lines = vec![format!("You are in: {}", room.name)];

    for dir in Direction::ALL {
        let Some(to) = room.linked(dir) else {
            continue;
        };
        let label = if room.is_locked(dir) {
            "Locked".to_string()
        } else {
            ctx.world.room(to).map(|r| r.name.clone()).unwrap_or_else(|| "?".to_string())
        };
        lines.push(format!("  {:<5} : {}", dir.canonical(), label));
    }

    let visited: Vec<&str> = ctx
        .world
        .rooms()
        .filter(|r| r.visited)
        .map(|r| r.name.as_str())
        .collect();
    if visited.is_empty() {
        lines.push("Visited rooms: none yet".to_string());
    } else {
        lines.push(format!("Visited rooms: {}", visited.join(", ")));
    }

    ctx.lines(lines);
    Ok(())
}
