//! URL signer CLI.
//!
//! This tool provides commands for:
//! - Minting signed, expiring URLs from a private key
//! - Checking signed URLs against a public key
//! - Validating configuration files

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::LevelFilter;

mod config;
mod error;
mod logging;
mod signing;

use error::CliError;

#[derive(Parser)]
#[command(name = "urlsigner")]
#[command(about = "Mint and check expiring RSA-signed URLs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a URL and print the signed URL
    Sign {
        /// Path to the TOML configuration file
        #[arg(long, short, env = "URL_SIGNER_CONFIG")]
        config: PathBuf,

        /// Absolute URL to sign
        url: String,

        /// Minutes from now until the URL expires
        #[arg(long, conflicts_with = "at")]
        minutes: Option<u32>,

        /// Absolute expiration time (RFC 3339)
        #[arg(long, value_parser = signing::parse_rfc3339)]
        at: Option<DateTime<Utc>>,
    },

    /// Check a signed URL; exits with status 1 when it is not valid
    Validate {
        /// Path to the TOML configuration file
        #[arg(long, short, env = "URL_SIGNER_CONFIG")]
        config: PathBuf,

        /// Signed URL to check
        url: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file and the keys it contains
    Validate {
        /// Path to the TOML configuration file
        #[arg(long, short, env = "URL_SIGNER_CONFIG")]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = logging::init_logging(level) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    match cli.command {
        Commands::Sign {
            config,
            url,
            minutes,
            at,
        } => {
            let signed = signing::sign(&config, &url, signing::expiration(minutes, at))?;
            println!("{}", signed);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { config, url } => {
            if signing::validate(&config, &url)? {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { config: file } => {
                config::validate(&file)?;
                Ok(ExitCode::SUCCESS)
            }
        },
    }
}
