use clap::{Parser, Subcommand};
use miette::{miette, Result};
use std::path::PathBuf;

use define_rs::cli;

#[derive(Parser)]
#[command(name = "define-rs")]
#[command(about = "Replace define keys in JavaScript and TypeScript sources")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite source files, replacing configured expressions
    Transform {
        /// Input source files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// JSON config file: { "replace": { "<pattern>": <value> } }
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Additional KEY=VALUE replacement (repeatable, overrides the config file)
        #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
        defines: Vec<String>,

        /// Output file (defaults to stdout, single input only)
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Output directory, one file per input
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Minify output
        #[arg(long)]
        minify: bool,

        /// Print replacement counts to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Show how each configured key resolves in the current environment
    Inspect {
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Additional KEY=VALUE replacement (repeatable)
        #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
        defines: Vec<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Transform {
            inputs,
            config,
            defines,
            output,
            out_dir,
            minify,
            stats,
        } => {
            let args = cli::transform::TransformArgs {
                inputs,
                config,
                defines,
                output,
                out_dir,
                minify,
                stats,
            };
            cli::transform::transform(&args)
                .map(|_| ())
                .map_err(|e| miette!("{}", e))
        }
        Commands::Inspect {
            config,
            defines,
            format,
        } => {
            let args = cli::inspect::InspectArgs {
                config,
                defines,
                format,
            };
            cli::inspect::inspect(&args).map_err(|e| miette!("{}", e))
        }
    }
}
