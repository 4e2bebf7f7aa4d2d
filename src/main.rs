//! Snippets CLI - chapter-annotated source reconstruction

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use snippets::commands;
use snippets::interface::Context;
use snippets::model::Chapter;

#[derive(Parser)]
#[command(name = "snippets")]
#[command(author, version, about = "Rebuild chapter-annotated source", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every annotated file and report totals
    Check {
        /// List every file with its line count
        #[arg(short, long)]
        list: bool,
    },

    /// Print a file as of a section of a chapter
    Split {
        /// Chapter name
        #[arg(value_name = "CHAPTER")]
        chapter: String,

        /// Section number
        #[arg(value_name = "NUMBER")]
        number: u32,

        /// File to reconstruct, by relative or display path
        #[arg(value_name = "FILE", required_unless_present = "output")]
        file: Option<PathBuf>,

        /// Write every file under this directory instead
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the sections of a chapter
    Sections {
        /// Chapter name
        #[arg(value_name = "CHAPTER")]
        chapter: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Dump the tagged lines of a file
    Lines {
        /// File to dump, by relative or display path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Determine working directory
    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = match cli.config {
        Some(ref path) => snippets::config::read_config_file(path),
        None => snippets::config::read_config(&base_dir),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let ctx = Context::new(config, base_dir);

    // Execute command
    let result = match cli.command {
        Commands::Check { list } => {
            let options = commands::CheckOptions { list_files: list };
            commands::check(&ctx, options)
        }

        Commands::Split {
            file,
            chapter,
            number,
            output,
        } => {
            let options = commands::SplitOptions {
                file,
                chapter: Chapter::new(chapter),
                number,
                output,
            };
            commands::split(&ctx, options)
        }

        Commands::Sections { chapter, json } => {
            let options = commands::SectionsOptions {
                chapter: Chapter::new(chapter),
                json,
            };
            commands::sections(&ctx, options)
        }

        Commands::Lines { file } => {
            let options = commands::LinesOptions { file };
            commands::lines(&ctx, options)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
