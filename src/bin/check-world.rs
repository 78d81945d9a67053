use amaze::import_world::{build_world, load_world_file};
use amaze::models::types::Direction;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

// cargo run --bin check-world -- --file content/world.yaml

#[derive(Debug, Parser)]
#[command(name = "check-world", version, about = "Validate a world file and print a summary")]
struct Args {
    /// World YAML file to check
    #[arg(long)]
    file: PathBuf,

    /// Also list every item and enemy per room
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let file = load_world_file(&args.file).with_context(|| format!("reading {}", args.file.display()))?;
    let (world, start) = build_world(&file).map_err(|e| anyhow::anyhow!("invalid world: {e}"))?;

    let start_name = world.room(start).map(|r| r.name.as_str()).unwrap_or("?");
    let links: usize = world.rooms().map(|r| r.exits().count()).sum::<usize>() / 2;
    let locks: usize = world.rooms().map(|r| r.locked_exits().count()).sum();
    let items: usize = world.rooms().map(|r| r.items.len()).sum();
    let enemies: usize = world.rooms().map(|r| r.enemies.len()).sum();

    println!("✓ {} is valid", args.file.display());
    println!("  rooms:   {}", world.len());
    println!("  start:   {}", start_name);
    println!("  links:   {}", links);
    println!("  locks:   {}", locks);
    println!("  items:   {}", items);
    println!("  enemies: {}", enemies);

    if args.verbose {
        for room in world.rooms() {
            println!("\n[{}] {}", room.key, room.name);
            for dir in Direction::ALL {
                if let Some(to) = room.linked(dir) {
                    let to_key = world.room(to).map(|r| r.key.as_str()).unwrap_or("?");
                    let lock = if room.is_locked(dir) { " (locked)" } else { "" };
                    println!("    {} -> {}{}", dir, to_key, lock);
                }
            }
            for item in &room.items {
                println!("    item:  {}", item.display_text());
            }
            for enemy in &room.enemies {
                println!("    enemy: {} ({}, health {})", enemy.name, enemy.kind.as_str(), enemy.health());
            }
        }
    }

    Ok(())
}
