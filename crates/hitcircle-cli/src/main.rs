mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};
use commands::autoplay::AutoplayOptions;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("hitcircle=info".parse()?))
        .init();

    let args = Args::parse();

    match args.command {
        Command::Beatmap { file, json } => commands::beatmap::run(&file, json),
        Command::Replay { file, json } => commands::replay::run(&file, json),
        Command::Autoplay {
            file,
            tick_ms,
            format,
            output,
            config,
        } => commands::autoplay::run(
            &file,
            AutoplayOptions {
                tick_ms,
                format,
                output,
                config,
            },
        ),
    }
}
