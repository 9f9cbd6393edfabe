pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "devlink")]
#[command(about = "DevLink CLI - developer network client for the DevLink API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Account registration and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Profiles, experience, and education")]
    Profile {
        #[command(subcommand)]
        cmd: commands::profile::ProfileCommands,
    },

    #[command(about = "Posts, likes, and comments")]
    Post {
        #[command(subcommand)]
        cmd: commands::post::PostCommands,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Profile { cmd } => commands::profile::handle(cmd, output_format).await,
        Commands::Post { cmd } => commands::post::handle(cmd, output_format).await,
    }
}
