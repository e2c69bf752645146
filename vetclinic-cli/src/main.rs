#![cfg_attr(not(test), forbid(unsafe_code))]

//! Main entry point for the vetclinic command-line client.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::config::ClientConfig;
use std::path::PathBuf;

mod commands;
mod tracer;

use commands::{
    AppContext, appointments::AppointmentCommand, owners::OwnerCommand, pets::PetCommand,
    session::RegisterArgs,
};

/// vetclinic CLI
#[derive(Parser, Debug)]
#[command(name = "vetclinic")]
#[command(about = "Command-line client for the veterinary clinic API", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file (optional)
    #[arg(
        long,
        short,
        global = true,
        help = "Path to the configuration file (vetclinic.yaml, .json or .toml). If not provided, defaults will be used."
    )]
    config: Option<PathBuf>,

    /// Backend base URL, overriding configuration and environment
    #[arg(
        long,
        global = true,
        help = "Backend base URL (e.g., http://localhost:8081/api). Overrides the configuration file and VETCLINIC_API_BASE_URL."
    )]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the vetclinic CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Account name; prompted for when omitted
        #[arg(long, short)]
        username: Option<String>,
    },
    /// Create an account and sign in with it
    Register(RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Ask the backend whether the stored token is still valid
        #[arg(long)]
        verify: bool,
    },
    /// Manage owners
    Owners {
        #[command(subcommand)]
        command: OwnerCommand,
    },
    /// Manage pets
    Pets {
        #[command(subcommand)]
        command: PetCommand,
    },
    /// Manage appointments
    Appointments {
        #[command(subcommand)]
        command: AppointmentCommand,
    },
    /// Navigate to a path and render its view
    Open {
        /// Path from the navigation table, e.g. `/pets`
        path: String,
    },
    /// List the navigation table
    Routes,

    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)
        #[arg(
            long,
            short,
            help = "The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)"
        )]
        shell: clap_complete::Shell,
    },

    /// Generate a configuration file
    Config {
        /// Format of the configuration file to generate (yaml, json or toml). Defaults to yaml.
        #[arg(
            long,
            short,
            help = "Format of the configuration file to generate (yaml, json or toml). Defaults to yaml."
        )]
        format: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Completion { shell } => {
            commands::completion::generate_completion(*shell);
            return Ok(());
        }
        Commands::Config { format } => {
            return commands::config::generate_config(format.as_deref().unwrap_or("yaml"));
        }
        Commands::Routes => {
            commands::navigate::print_routes();
            return Ok(());
        }
        _ => {}
    }

    let config = ClientConfig::load_config(cli.config, cli.base_url)
        .context("failed to load configuration")?;
    tracer::initialize_tracing(&config);
    let ctx = AppContext::connect(&config)?;

    match cli.command {
        Commands::Login { username } => commands::session::login(&ctx, username).await,
        Commands::Register(args) => commands::session::register(&ctx, args).await,
        Commands::Logout => commands::session::logout(&ctx).await,
        Commands::Whoami { verify } => commands::session::whoami(&ctx, verify).await,
        Commands::Owners { command } => commands::owners::run(&ctx, command).await,
        Commands::Pets { command } => commands::pets::run(&ctx, command).await,
        Commands::Appointments { command } => commands::appointments::run(&ctx, command).await,
        Commands::Open { path } => commands::navigate::open(&ctx, &path).await,
        Commands::Routes | Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
    }
}
