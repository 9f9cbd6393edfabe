use clap::Subcommand;

use crate::api::dto::PostResponse;
use crate::cli::commands::api_client;
use crate::cli::utils::{fail_on_error, output_success, print_json, render_alerts};
use crate::cli::OutputFormat;
use crate::client::{ApiClient, Store};

#[derive(Subcommand)]
pub enum PostCommands {
    #[command(about = "List all posts, newest first")]
    List,

    #[command(about = "Show one post with its comments")]
    Show {
        #[arg(help = "Post id (hex)")]
        id: String,
    },

    #[command(about = "Publish a post")]
    Create {
        #[arg(help = "Post text")]
        text: String,
    },

    #[command(about = "Delete your post")]
    Delete {
        #[arg(help = "Post id (hex)")]
        id: String,
    },

    #[command(about = "Like a post")]
    Like {
        #[arg(help = "Post id (hex)")]
        id: String,
    },

    #[command(about = "Remove your like from a post")]
    Unlike {
        #[arg(help = "Post id (hex)")]
        id: String,
    },

    #[command(about = "Comment on a post")]
    Comment {
        #[arg(help = "Post id (hex)")]
        id: String,
        #[arg(help = "Comment text")]
        text: String,
    },

    #[command(about = "Delete your comment from a post")]
    RmComment {
        #[arg(help = "Post id (hex)")]
        id: String,
        #[arg(help = "Comment id (hex)")]
        comment_id: String,
    },
}

pub async fn handle(cmd: PostCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        PostCommands::List => {
            let (client, _) = api_client()?;
            let store = load_posts(&client).await?;

            match output_format {
                OutputFormat::Json => print_json(&store.state().posts.posts),
                OutputFormat::Text => {
                    if store.state().posts.posts.is_empty() {
                        println!("No posts yet");
                        return Ok(());
                    }
                    for post in &store.state().posts.posts {
                        render_post_line(post);
                    }
                    Ok(())
                }
            }
        }
        PostCommands::Show { id } => {
            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.post(&id).await?);
            fail_on_error(&store.state().posts.error)?;

            let Some(post) = &store.state().posts.post else {
                return Err(anyhow::anyhow!("no post in response"));
            };

            match output_format {
                OutputFormat::Json => print_json(post),
                OutputFormat::Text => {
                    render_post_line(post);
                    for comment in &post.comments {
                        println!("  [{}] {}: {}", comment.id, comment.name, comment.text);
                    }
                    Ok(())
                }
            }
        }
        PostCommands::Create { text } => {
            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.create_post(&text).await?);
            render_alerts(&output_format, &store.state().alerts);
            fail_on_error(&store.state().posts.error)?;

            match store.state().posts.posts.first() {
                Some(post) => match output_format {
                    OutputFormat::Json => print_json(post),
                    OutputFormat::Text => {
                        render_post_line(post);
                        Ok(())
                    }
                },
                None => Err(anyhow::anyhow!("no post in response")),
            }
        }
        PostCommands::Delete { id } => {
            let (client, _) = api_client()?;
            let mut store = Store::new();

            store.dispatch_all(client.delete_post(&id).await?);
            render_alerts(&output_format, &store.state().alerts);
            fail_on_error(&store.state().posts.error)?;

            match output_format {
                // Text mode already showed the success alert
                OutputFormat::Json => output_success(&output_format, "post removed", None),
                OutputFormat::Text => Ok(()),
            }
        }
        PostCommands::Like { id } => {
            let (client, _) = api_client()?;
            // Load the list first so the likes update lands on a real entry.
            let mut store = load_posts(&client).await?;

            store.dispatch_all(client.like(&id).await?);
            fail_on_error(&store.state().posts.error)?;

            render_like_count(&output_format, &store, &id)
        }
        PostCommands::Unlike { id } => {
            let (client, _) = api_client()?;
            let mut store = load_posts(&client).await?;

            store.dispatch_all(client.unlike(&id).await?);
            fail_on_error(&store.state().posts.error)?;

            render_like_count(&output_format, &store, &id)
        }
        PostCommands::Comment { id, text } => {
            let (client, _) = api_client()?;
            // Focus the post so the comment update has somewhere to land.
            let mut store = Store::new();
            store.dispatch_all(client.post(&id).await?);
            fail_on_error(&store.state().posts.error)?;

            store.dispatch_all(client.add_comment(&id, &text).await?);
            render_alerts(&output_format, &store.state().alerts);
            fail_on_error(&store.state().posts.error)?;

            render_comments(&output_format, &store)
        }
        PostCommands::RmComment { id, comment_id } => {
            let (client, _) = api_client()?;
            let mut store = Store::new();
            store.dispatch_all(client.post(&id).await?);
            fail_on_error(&store.state().posts.error)?;

            store.dispatch_all(client.remove_comment(&id, &comment_id).await?);
            render_alerts(&output_format, &store.state().alerts);
            fail_on_error(&store.state().posts.error)?;

            render_comments(&output_format, &store)
        }
    }
}

async fn load_posts(client: &ApiClient) -> anyhow::Result<Store> {
    let mut store = Store::new();
    store.dispatch_all(client.posts().await?);
    fail_on_error(&store.state().posts.error)?;
    Ok(store)
}

fn render_post_line(post: &PostResponse) {
    println!(
        "[{}] {} - {} ({} likes, {} comments)",
        post.id,
        post.name,
        post.text,
        post.likes.len(),
        post.comments.len()
    );
}

fn render_like_count(
    output_format: &OutputFormat,
    store: &Store,
    id: &str,
) -> anyhow::Result<()> {
    let Some(post) = store.state().posts.posts.iter().find(|p| p.id == id) else {
        return Err(anyhow::anyhow!("post not in list"));
    };

    match output_format {
        OutputFormat::Json => print_json(&post.likes),
        OutputFormat::Text => {
            println!("{} likes", post.likes.len());
            Ok(())
        }
    }
}

fn render_comments(output_format: &OutputFormat, store: &Store) -> anyhow::Result<()> {
    let Some(post) = &store.state().posts.post else {
        return Err(anyhow::anyhow!("no post in response"));
    };

    match output_format {
        OutputFormat::Json => print_json(&post.comments),
        OutputFormat::Text => {
            for comment in &post.comments {
                println!("  [{}] {}: {}", comment.id, comment.name, comment.text);
            }
            Ok(())
        }
    }
}
