//! # Inkwell CLI
//!
//! Posts to an Inkwell server as the guest bound to this machine's device id.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use inkwell_client::{ApiError, AuthSession, FileStore, HttpApi, Post, PostStore};

#[derive(Parser)]
#[command(name = "inkwell", version, about)]
struct Cli {
    /// Base URL of the API server.
    #[arg(long, env = "INKWELL_API_URL", default_value = "http://127.0.0.1:8080")]
    api_url: String,

    /// Where the token and device id are kept between runs.
    #[arg(long, env = "INKWELL_STATE_FILE", default_value = ".inkwell/state.json")]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List your posts, newest first.
    List,
    /// Publish a post.
    Post { title: String, body: String },
    /// Delete one of your posts.
    Delete { id: i64 },
    /// Show the guest account and device id.
    Whoami,
    /// Forget the stored token. The device id is kept.
    Logout,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,inkwell_client=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let storage = FileStore::open(&cli.state_file)
        .with_context(|| format!("opening {}", cli.state_file.display()))?;
    let api = Arc::new(HttpApi::new(&cli.api_url));
    let session = AuthSession::new(api.clone(), Arc::new(storage));
    let store = PostStore::new(api);

    if !matches!(cli.command, Command::Whoami | Command::Logout) {
        session.init().await?;
    }

    match cli.command {
        Command::List => {
            fetch(&store, &session).await?;
            let posts = store.posts();
            if posts.is_empty() {
                println!("No posts yet");
            }
            for post in &posts {
                print_post(post);
            }
        }
        Command::Post { title, body } => {
            fetch(&store, &session).await?;
            let post = store.create(title, body).await?;
            print_post(&post);
        }
        Command::Delete { id } => {
            store.delete(id).await.map_err(|e| match e {
                ApiError::NotFound => anyhow::anyhow!("post {id} not found"),
                other => other.into(),
            })?;
            println!("Deleted post {id}");
        }
        Command::Whoami => {
            let user = session.request_token().await?;
            println!("{} (id {})", user.name, user.id);
            println!("device: {}", session.device_id()?);
        }
        Command::Logout => {
            session.clear()?;
            println!("Logged out");
        }
    }

    Ok(())
}

/// Fetch, requesting a fresh token once if the stored one is rejected.
async fn fetch(store: &PostStore, session: &AuthSession) -> anyhow::Result<()> {
    match store.fetch().await {
        Err(ApiError::Unauthorized) => {
            tracing::info!("Stored token rejected, requesting a new one");
            session.clear()?;
            session.request_token().await?;
            store.fetch().await?;
        }
        other => other?,
    }
    Ok(())
}

fn print_post(post: &Post) {
    println!(
        "#{:<6} {}  {}",
        post.id,
        post.created_at.format("%Y-%m-%d %H:%M"),
        post.title
    );
    if !post.content.is_empty() {
        println!("        {}", post.content);
    }
}
