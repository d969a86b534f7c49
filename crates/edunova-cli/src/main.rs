//! `edunova` command-line client

mod cli;
mod display;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use edunova_client::{BackendClient, CookieSessionStore};
use edunova_core::{ClientConfig, NodeId, Roadmap, SessionReader, SessionStore};
use edunova_quiz::{PrefetchCoordinator, QuizAttempt, QuizCache, QuizViewController};
use edunova_render::render;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => {
            let config = ClientConfig::default().with_env_overrides();
            config.validate()?;
            config
        }
    };

    run(cli.command, config).await
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(command: Command, config: ClientConfig) -> Result<()> {
    match command {
        Command::Render { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut text = String::new();
                    std::io::stdin().read_to_string(&mut text)?;
                    text
                }
            };
            print!("{}", display::blocks(&render(&text)));
        }
        Command::Roadmap { save } => {
            let backend = BackendClient::new(&config)?;
            let roadmap = backend.fetch_roadmap().await.context("fetching roadmap")?;

            let session = CookieSessionStore::new(config.session_max_age());
            session.write(&roadmap).await?;

            if let Some(path) = save {
                let json = serde_json::to_string_pretty(&roadmap)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?;
                tracing::info!(path = %path.display(), "roadmap saved");
            }
            print!("{}", display::roadmap(&roadmap));
        }
        Command::Prefetch(arg) => {
            let roadmap = read_roadmap(&arg.roadmap)?;
            let backend = Arc::new(BackendClient::new(&config)?);
            let session = CookieSessionStore::new(config.session_max_age());
            session.write(&roadmap).await?;

            let report = PrefetchCoordinator::new(QuizCache::new(), backend)
                .with_concurrency(config.prefetch_concurrency)
                .prefetch_all(&roadmap)
                .await;
            print!("{}", display::report(&report));
        }
        Command::Quiz {
            roadmap,
            node,
            answers,
        } => {
            let roadmap = read_roadmap(&roadmap.roadmap)?;
            let backend = Arc::new(BackendClient::new(&config)?);
            let session = Arc::new(CookieSessionStore::new(config.session_max_age()));
            session.write(&roadmap).await?;

            let controller = QuizViewController::new(QuizCache::new(), backend, session);
            let payload = controller.load_quiz(NodeId(node)).await?;
            print!("{}", display::quiz(&payload));

            if !answers.is_empty() {
                let mut attempt = QuizAttempt::new(payload);
                for (question, option) in answers.into_iter().enumerate() {
                    if !attempt.select(question, option) {
                        bail!("answer {option} is not valid for question {}", question + 1);
                    }
                }
                attempt.submit()?;
                println!();
                print!("{}", display::results(&attempt));
            }
        }
        Command::Chat {
            query,
            roadmap,
            node,
        } => {
            let backend = BackendClient::new(&config)?;
            let answer = match (roadmap, node) {
                (Some(path), Some(node_id)) => {
                    let session = CookieSessionStore::new(config.session_max_age());
                    session.write(&read_roadmap(&path)?).await?;
                    let roadmap = session
                        .read_persisted_roadmap()
                        .await
                        .context("roadmap data not found")?;
                    let node = roadmap
                        .find(NodeId(node_id))
                        .with_context(|| format!("node data not found: {node_id}"))?;
                    backend.chat_with_node(&query, node).await?
                }
                _ => backend.chat(&query).await?,
            };
            print!("{}", display::blocks(&render(&answer)));
        }
    }
    Ok(())
}

fn read_roadmap(path: &Path) -> Result<Roadmap> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading roadmap {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing roadmap {}", path.display()))
}
