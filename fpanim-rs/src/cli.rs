//! Root CLI structure for fpanim-rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fpanim-rs")]
#[command(about = "Command-line tools for first-person animation documents", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display information about an animation document
    Info {
        /// Path to the animation JSON file
        file: PathBuf,

        /// List every keyframe and sound
        #[arg(short, long)]
        detailed: bool,
    },

    /// Load an animation document and report authoring problems
    Validate {
        /// Path to the animation JSON file
        file: PathBuf,

        /// Fail when any problem is reported
        #[arg(long)]
        strict: bool,
    },

    /// Print the pose at one or more times, starting from the neutral pose
    Sample {
        /// Path to the animation JSON file
        file: PathBuf,

        /// Elapsed time in milliseconds (repeat or separate with commas)
        #[arg(long, value_name = "MS", required = true, value_delimiter = ',')]
        at: Vec<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play the clip at a fixed tick and list the sounds each tick fires
    Sounds {
        /// Path to the animation JSON file
        file: PathBuf,

        /// Tick length in milliseconds
        #[arg(long, value_name = "MS", default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
        step: u64,
    },

    /// Re-emit an animation document as canonical pretty-printed JSON
    Format {
        /// Path to the input JSON file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
