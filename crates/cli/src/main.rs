mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tripkit")]
#[command(version, about = "SEO artifact generator for the Next Trip Anywhere site", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize a new site directory with a starter site.toml
    Init {
        /// Path to create the site directory
        path: PathBuf,
    },

    /// Validate site content
    Validate {
        /// Path to the site directory
        path: PathBuf,
    },

    /// Build SEO artifacts: per-page head data, sitemaps, robots.txt
    Build {
        /// Path to the site directory
        path: PathBuf,

        /// Output directory for generated artifacts
        #[arg(short, long)]
        output: PathBuf,

        /// Freeze the build timestamp (YYYY-MM-DD) for reproducible output
        #[arg(long)]
        build_date: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init { path } => commands::init::run(path).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Build {
            path,
            output,
            build_date,
        } => commands::build::run(path, output, build_date).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "tripkit", &mut io::stdout());
            Ok(())
        }
    }
}
