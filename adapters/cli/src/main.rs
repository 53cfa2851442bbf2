#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Furrow farm.

mod script;
mod session;

use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use furrow_core::SimulationConfig;
use furrow_system_bootstrap::{Bootstrap, FieldLayout};
use furrow_world::query;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::session::Session;

/// Turn-based farming on a tile grid, played from the terminal.
#[derive(Parser, Debug)]
#[command(name = "furrow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file overriding the simulation defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ASCII farm layout (`.` grass, `=` dirt, `#` fence).
    #[arg(short, long)]
    field: Option<PathBuf>,

    /// Seed for species selection and weather; overrides the config file.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Script of tokens to play instead of reading standard input.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log level for the furrow crates, used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Entry point for the Furrow command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = load_config(cli.config.as_deref(), cli.seed)?;
    let layout = load_field(cli.field.as_deref(), config.tile_length)?;
    let world = Bootstrap
        .build_world(config, layout.clone())
        .context("invalid simulation config")?;
    info!(seed = query::config(&world).seed, "farm ready");

    let mut session = Session::new(world, layout);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.greet(&mut out)?;

    match cli.script {
        Some(path) => {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            for (number, line) in contents.lines().enumerate() {
                play_line(&mut session, line, &mut out)
                    .with_context(|| format!("{}:{}", path.display(), number + 1))?;
            }
        }
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("failed to read standard input")?;
                if let Err(error) = play_line(&mut session, &line, &mut out) {
                    writeln!(out, "{error}")?;
                }
            }
        }
    }

    writeln!(
        out,
        "Harvested {} plants over {} turns.",
        query::harvested_count(session.world()),
        query::turn_state(session.world()).current_turn
    )?;
    Ok(())
}

fn play_line(session: &mut Session, line: &str, out: &mut impl Write) -> Result<()> {
    for token in script::parse_line(line)? {
        session.run(token, out)?;
    }
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("")
            .add_directive(format!("furrow={level}").parse().context("invalid log level")?),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<SimulationConfig> {
    let mut config = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            SimulationConfig::from_toml_str(&contents)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}

fn load_field(path: Option<&Path>, tile_length: u32) -> Result<FieldLayout> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read field {}", path.display()))?;
            FieldLayout::parse(&contents, tile_length)
                .with_context(|| format!("invalid field {}", path.display()))
        }
        None => FieldLayout::default_farm(tile_length).context("stock field is malformed"),
    }
}
