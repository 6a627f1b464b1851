mod commands;

use clap::{Parser, Subcommand};
use anyhow::Result;

#[derive(Parser)]
#[command(name = "runbox-cli")]
#[command(about = "Runbox CLI - Validate and execute source files locally", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a source file and print the captured output
    Run {
        /// Path to the source file
        file: String,

        /// Language (inferred from the file extension when omitted)
        #[arg(short, long)]
        language: Option<String>,

        /// File whose contents are piped to the program's stdin
        #[arg(short, long)]
        stdin_file: Option<String>,

        /// Wall-clock timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Run only the static screen and print any issues
    Validate {
        /// Path to the source file
        file: String,

        /// Language (inferred from the file extension when omitted)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List the languages configured on this host
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            language,
            stdin_file,
            timeout,
        } => {
            commands::run(&file, language.as_deref(), stdin_file.as_deref(), timeout).await?;
        }
        Commands::Validate { file, language } => {
            commands::validate(&file, language.as_deref())?;
        }
        Commands::Languages => {
            commands::languages()?;
        }
    }

    Ok(())
}
