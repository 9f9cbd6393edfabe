use std::io::Write;

use clap::Subcommand;

use crate::api::dto::{EducationRequest, ExperienceRequest, ProfileRequest, ProfileResponse, UserRef};
use crate::cli::commands::api_client;
use crate::cli::utils::{
    fail_on_error, format_date_range, output_success, print_json, render_alerts,
};
use crate::cli::{config, OutputFormat};
use crate::client::Store;

#[derive(Subcommand)]
pub enum ProfileCommands {
    #[command(about = "Show your own profile")]
    Me,

    #[command(about = "List all profiles")]
    List,

    #[command(about = "Show a profile by user id")]
    Show {
        #[arg(help = "User id (hex)")]
        user_id: String,
    },

    #[command(about = "Create or update your profile")]
    Set {
        #[arg(long, help = "Professional status, e.g. 'Developer'")]
        status: String,
        #[arg(long, help = "Comma-separated skills list")]
        skills: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long, help = "GitHub username for the repository panel")]
        githubusername: Option<String>,
        #[arg(long)]
        youtube: Option<String>,
        #[arg(long)]
        twitter: Option<String>,
        #[arg(long)]
        facebook: Option<String>,
        #[arg(long)]
        linkedin: Option<String>,
        #[arg(long)]
        instagram: Option<String>,
        #[arg(long, help = "Treat this as an edit of an existing profile")]
        edit: bool,
    },

    #[command(about = "Add an experience entry")]
    AddExperience {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, help = "Start date (YYYY-MM-DD)")]
        from: String,
        #[arg(long, help = "End date (YYYY-MM-DD)")]
        to: Option<String>,
        #[arg(long, help = "Mark as your current position")]
        current: bool,
        #[arg(long)]
        description: Option<String>,
    },

    #[command(about = "Remove an experience entry")]
    RmExperience {
        #[arg(help = "Entry id (hex)")]
        id: String,
    },

    #[command(about = "Add an education entry")]
    AddEducation {
        #[arg(long)]
        school: String,
        #[arg(long)]
        degree: String,
        #[arg(long)]
        fieldofstudy: String,
        #[arg(long, help = "Start date (YYYY-MM-DD)")]
        from: String,
        #[arg(long, help = "End date (YYYY-MM-DD)")]
        to: Option<String>,
        #[arg(long, help = "Mark as in progress")]
        current: bool,
        #[arg(long)]
        description: Option<String>,
    },

    #[command(about = "Remove an education entry")]
    RmEducation {
        #[arg(help = "Entry id (hex)")]
        id: String,
    },

    #[command(about = "List a GitHub user's recent repositories")]
    Github {
        #[arg(help = "GitHub username")]
        username: String,
    },

    #[command(about = "Delete your account, profile, and posts")]
    DeleteAccount {
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(cmd: ProfileCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ProfileCommands::Me => {
            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.current_profile().await?);
            fail_on_error(&store.state().profile.error)?;

            render_focused_profile(&output_format, store)
        }
        ProfileCommands::List => {
            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.profiles().await?);
            fail_on_error(&store.state().profile.error)?;

            let profiles = &store.state().profile.profiles;
            match output_format {
                OutputFormat::Json => print_json(profiles),
                OutputFormat::Text => {
                    if profiles.is_empty() {
                        println!("No profiles yet");
                        return Ok(());
                    }
                    for profile in profiles {
                        println!(
                            "{:<24} {:<20} {}",
                            owner_name(profile),
                            profile.status,
                            profile.skills.join(", ")
                        );
                    }
                    Ok(())
                }
            }
        }
        ProfileCommands::Show { user_id } => {
            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.profile_by_user(&user_id).await?);
            fail_on_error(&store.state().profile.error)?;

            render_focused_profile(&output_format, store)
        }
        ProfileCommands::Set {
            status,
            skills,
            company,
            website,
            location,
            bio,
            githubusername,
            youtube,
            twitter,
            facebook,
            linkedin,
            instagram,
            edit,
        } => {
            let body = ProfileRequest {
                status: Some(status),
                skills: Some(skills),
                company,
                website,
                location,
                bio,
                githubusername,
                youtube,
                twitter,
                facebook,
                linkedin,
                instagram,
            };

            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.create_profile(&body, edit).await?);
            render_alerts(&output_format, &store.state().alerts);
            fail_on_error(&store.state().profile.error)?;

            render_focused_profile(&output_format, store)
        }
        ProfileCommands::AddExperience {
            title,
            company,
            location,
            from,
            to,
            current,
            description,
        } => {
            let body = ExperienceRequest {
                title: Some(title),
                company: Some(company),
                location,
                from: Some(from),
                to,
                current,
                description,
            };

            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.add_experience(&body).await?);
            render_alerts(&output_format, &store.state().alerts);
            fail_on_error(&store.state().profile.error)?;

            render_focused_profile(&output_format, store)
        }
        ProfileCommands::RmExperience { id } => {
            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.delete_experience(&id).await?);
            render_alerts(&output_format, &store.state().alerts);
            fail_on_error(&store.state().profile.error)?;

            render_focused_profile(&output_format, store)
        }
        ProfileCommands::AddEducation {
            school,
            degree,
            fieldofstudy,
            from,
            to,
            current,
            description,
        } => {
            let body = EducationRequest {
                school: Some(school),
                degree: Some(degree),
                fieldofstudy: Some(fieldofstudy),
                from: Some(from),
                to,
                current,
                description,
            };

            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.add_education(&body).await?);
            render_alerts(&output_format, &store.state().alerts);
            fail_on_error(&store.state().profile.error)?;

            render_focused_profile(&output_format, store)
        }
        ProfileCommands::RmEducation { id } => {
            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.delete_education(&id).await?);
            render_alerts(&output_format, &store.state().alerts);
            fail_on_error(&store.state().profile.error)?;

            render_focused_profile(&output_format, store)
        }
        ProfileCommands::Github { username } => {
            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.github_repos(&username).await?);
            fail_on_error(&store.state().profile.error)?;

            let repos = &store.state().profile.repos;
            match output_format {
                OutputFormat::Json => print_json(repos),
                OutputFormat::Text => {
                    for repo in repos {
                        println!(
                            "{:<30} ★ {:<5} ⑂ {:<5} {}",
                            repo.name,
                            repo.stargazers_count,
                            repo.forks_count,
                            repo.html_url
                        );
                    }
                    Ok(())
                }
            }
        }
        ProfileCommands::DeleteAccount { yes } => {
            if !yes && !confirm_deletion()? {
                println!("Aborted");
                return Ok(());
            }

            let (client, mut session) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.delete_account().await?);
            render_alerts(&output_format, &store.state().alerts);
            fail_on_error(&store.state().profile.error)?;

            session.token = None;
            config::save_session(&session)?;

            output_success(&output_format, "Account deleted", None)
        }
    }
}

fn confirm_deletion() -> anyhow::Result<bool> {
    print!("Are you sure? This can NOT be undone [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn owner_name(profile: &ProfileResponse) -> &str {
    match &profile.user {
        UserRef::Populated(user) => user.name.as_str(),
        UserRef::Id(id) => id.as_str(),
    }
}

fn render_focused_profile(output_format: &OutputFormat, store: Store) -> anyhow::Result<()> {
    let Some(profile) = &store.state().profile.profile else {
        return Err(anyhow::anyhow!("no profile in response"));
    };

    match output_format {
        OutputFormat::Json => print_json(profile),
        OutputFormat::Text => {
            println!("{} - {}", owner_name(profile), profile.status);
            println!("skills: {}", profile.skills.join(", "));
            if let Some(company) = &profile.company {
                println!("company: {}", company);
            }
            if let Some(website) = &profile.website {
                println!("website: {}", website);
            }
            if let Some(location) = &profile.location {
                println!("location: {}", location);
            }
            if let Some(bio) = &profile.bio {
                println!("bio: {}", bio);
            }
            for entry in &profile.experience {
                println!(
                    "  [exp {}] {} at {} ({})",
                    entry.id,
                    entry.title,
                    entry.company,
                    format_date_range(entry.from, entry.to, entry.current)
                );
            }
            for entry in &profile.education {
                println!(
                    "  [edu {}] {} in {} at {} ({})",
                    entry.id,
                    entry.degree,
                    entry.fieldofstudy,
                    entry.school,
                    format_date_range(entry.from, entry.to, entry.current)
                );
            }
            Ok(())
        }
    }
}
