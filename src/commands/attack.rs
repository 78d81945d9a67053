use crate::commands::{CmdCtx, CmdResult};
use crate::error::{AppResult, DomainError};
use crate::input::parser::Intent;
use crate::models::enemy::DamageOutcome;
use tracing::info;

/// One combat round: the player strikes, a surviving enemy strikes back.
pub fn attack(ctx: &mut CmdCtx<'_>, intent: &Intent) -> CmdResult {
    let room = ctx.room()?;
    let target = intent
        .resolve_object(|c| room.find_enemy(c).is_some())
        .unwrap_or_default();

    let mut lines = Vec::new();

    // "attack grug with bow" switches to the bow before swinging
    if let Some(weapon) = &intent.instrument
        && room.find_enemy(target).is_some()
        && !ctx.player.equipped_weapon().is_some_and(|w| w.matches(&weapon.raw))
    {
        match ctx.player.equip(&weapon.raw) {
            Ok(item) => lines.push(format!("You equipped {}.", item.display_text())),
            Err(DomainError::ItemNotFound(_) | DomainError::NotAWeapon(_)) => {
                ctx.line("You don't have that weapon.");
                return Ok(());
            }
            Err(DomainError::WeaponNotEquippable(name)) => {
                ctx.line(format!("{} is out of ammo and can't be equipped.", name));
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }

    let hit = match player_strike(ctx, target) {
        Ok(hit) => hit,
        Err(DomainError::EnemyNotFound(_)) => {
            ctx.line("No enemy by that name here.");
            return Ok(());
        }
        Err(DomainError::NoUsableWeapon) => {
            lines.push("You have no usable weapon equipped.".to_string());
            ctx.lines(lines);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    lines.push(format!("You attack {} for {} damage.", hit.enemy, hit.damage));
    match hit.outcome {
        DamageOutcome::Wounded { remaining } => {
            lines.push(format!("{} has {} health left.", hit.enemy, remaining));
        }
        DamageOutcome::Slain => {
            info!(enemy = %hit.enemy, "enemy defeated");
            lines.push(format!("{} has been defeated!", hit.enemy));
            if let Some(weapon) = hit.dropped {
                lines.push(format!("{} dropped {}.", hit.enemy, weapon));
            }
            ctx.lines(lines);
            return Ok(());
        }
        DamageOutcome::AlreadyDead => {
            ctx.lines(lines);
            return Ok(());
        }
    }

    // Counter-attack
    let abilities = ctx.rules.enemy_abilities;
    let room_id = ctx.player.current_room();
    if let Some(enemy) = ctx.world.room_mut(room_id).and_then(|r| r.find_enemy_mut(target)) {
        let dealt = enemy.attack(ctx.player);
        if dealt > 0 {
            lines.push(format!("{} attacks you for {} damage.", hit.enemy, dealt));
        } else {
            lines.push(format!("{} has no weapon to strike back with.", hit.enemy));
        }
        if abilities {
            lines.push(enemy.special_ability());
        }
    }
    lines.push(format!("Health: {}/{}", ctx.player.health(), ctx.player.max_health()));

    if ctx.player.is_dead() {
        info!(enemy = %hit.enemy, "player died");
        lines.push("You have been defeated. Game over.".to_string());
    }

    ctx.lines(lines);
    Ok(())
}

struct Hit {
    enemy: String,
    damage: i32,
    outcome: DamageOutcome,
    /// Name of the weapon the enemy would drop on death
    dropped: Option<String>,
}

/// Nothing changes unless the enemy is here and the player's weapon fires.
fn player_strike(ctx: &mut CmdCtx<'_>, target: &str) -> AppResult<Hit> {
    let enemy = ctx
        .room()?
        .find_enemy(target)
        .ok_or_else(|| DomainError::EnemyNotFound(target.to_string()))?;
    let name = enemy.name.clone();
    let dropped = enemy.weapon().map(|w| w.name.clone());

    let damage = ctx
        .player
        .equipped_weapon_mut()
        .and_then(|w| w.as_weapon_mut())
        .and_then(|w| w.use_weapon())
        .ok_or(DomainError::NoUsableWeapon)?;

    let outcome = ctx
        .room_mut()?
        .strike_enemy(target, damage)
        .ok_or_else(|| DomainError::EnemyNotFound(target.to_string()))?;

    Ok(Hit {
        enemy: name,
        damage,
        outcome,
        dropped,
    })
}
