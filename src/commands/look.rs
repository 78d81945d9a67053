use crate::commands::examine::describe_thing;
use crate::commands::{CmdCtx, CmdResult};
use crate::input::parser::Intent;

pub fn look(ctx: &mut CmdCtx<'_>, intent: &Intent) -> CmdResult {
    if intent.direct.is_some() {
        return describe_thing(ctx, intent);
    }

    let text = ctx.room()?.describe();
    ctx.lines(text);
    Ok(())
}
