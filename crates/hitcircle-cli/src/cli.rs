//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "hitcircle")]
#[command(version, about = "Beatmap and replay decoder with an autoplay judge")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a beatmap and print its contents
    Beatmap {
        file: PathBuf,

        /// Print the full document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a replay header and print its contents
    Replay {
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a beatmap with a scripted cursor and export the judgment timeline
    Autoplay {
        file: PathBuf,

        /// Simulation step in ms (overrides the config file)
        #[arg(long)]
        tick_ms: Option<f64>,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Tsv)]
        format: ExportFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML config file
        #[arg(short, long, env = "HITCIRCLE_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Tsv,
    Json,
}
