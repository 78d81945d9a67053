use amaze::config::Config;
use amaze::import_world::{build_world, default_world, load_world_file};
use amaze::net::output::{MessageSink, OutputHandle};
use amaze::Session;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "amaze", version, about = "Find your way through the maze")]
struct Args {
    /// World file to play (defaults to the built-in maze)
    #[arg(long)]
    world: Option<PathBuf>,

    /// TOML config file; AMAZE_* environment variables still apply on top
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let the player walk away from living enemies
    #[arg(long)]
    allow_flee: bool,

    /// Enemies use their special abilities in combat
    #[arg(long)]
    enemy_abilities: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut cfg = match args.config.as_deref() {
        Some(path) => {
            let mut cfg = Config::load(path)?;
            let _ = dotenvy::from_filename(".env");
            cfg.apply_env(|k| std::env::var(k).ok())?;
            cfg
        }
        None => Config::from_env()?,
    };

    if let Some(world) = args.world {
        cfg.world_path = Some(world);
    }
    if args.allow_flee {
        cfg.rules.enemies_block_movement = false;
    }
    if args.enemy_abilities {
        cfg.rules.enemy_abilities = true;
    }

    init_tracing(&cfg.log_filter)?;

    let (world, start) = match cfg.world_path.as_deref() {
        Some(path) => {
            let file = load_world_file(path).with_context(|| format!("loading {}", path.display()))?;
            build_world(&file)?
        }
        None => default_world()?,
    };
    tracing::info!(rooms = world.len(), "world loaded");

    let mut session = Session::new(world, start, cfg.rules.clone());

    let (mut out, writer) = OutputHandle::channel();
    let writer_jh = tokio::spawn(writer.run(tokio::io::stdout()));

    for line in session.intro() {
        out.display(&line);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        out.prompt("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let result = session.handle(&line, &mut out);
        if result.quit {
            break;
        }
    }

    drop(out);
    match writer_jh.await {
        Ok(res) => res?,
        Err(e) => tracing::error!(error = %e, "output task failed"),
    }

    Ok(())
}

fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, prelude::*};

    color_eyre::install().map_err(|e| anyhow::anyhow!("color-eyre: {e}"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();

    Ok(())
}
