use clap::Subcommand;

use crate::cli::commands::api_client;
use crate::cli::utils::{output_success, print_json, render_alerts};
use crate::cli::{config, OutputFormat};
use crate::client::Store;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Register a new account and save the session token")]
    Register {
        #[arg(help = "Display name")]
        name: String,
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (at least 6 characters)")]
        password: String,
    },

    #[command(about = "Log in and save the session token")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password")]
        password: String,
    },

    #[command(about = "Show the account behind the saved token")]
    Whoami,

    #[command(about = "Drop the saved session token")]
    Logout,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Register { name, email, password } => {
            let (client, mut session) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.register(&name, &email, &password).await?);
            render_alerts(&output_format, &store.state().alerts);

            let Some(token) = store.state().auth.token.clone() else {
                return Err(anyhow::anyhow!("registration failed"));
            };

            session.token = Some(token);
            session.email = Some(email);
            config::save_session(&session)?;

            output_success(&output_format, "Registered and logged in", None)
        }
        AuthCommands::Login { email, password } => {
            let (client, mut session) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.login(&email, &password).await?);
            render_alerts(&output_format, &store.state().alerts);

            let Some(token) = store.state().auth.token.clone() else {
                return Err(anyhow::anyhow!("login failed"));
            };

            session.token = Some(token);
            session.email = Some(email);
            config::save_session(&session)?;

            output_success(&output_format, "Logged in", None)
        }
        AuthCommands::Whoami => {
            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.load_user().await?);

            match &store.state().auth.user {
                Some(user) => match output_format {
                    OutputFormat::Json => print_json(user),
                    OutputFormat::Text => {
                        println!("{} <{}>", user.name, user.email);
                        println!("id: {}", user.id);
                        Ok(())
                    }
                },
                None => Err(anyhow::anyhow!("not logged in (token missing or rejected)")),
            }
        }
        AuthCommands::Logout => {
            let mut session = config::load_session()?;
            session.token = None;
            config::save_session(&session)?;

            output_success(&output_format, "Logged out", None)
        }
    }
}
