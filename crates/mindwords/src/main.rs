//! Mindwords - terminal word-guessing game.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use mindwords::{
    AppConfig, DatamuseTipClient, DreamloClient, FileStore, GameDriver, Leaderboard, LocalStore,
    RandomWordClient, Session, format_board, http_client, run_play, sanitize_name,
};
use tokio::io::BufReader;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "mindwords.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { name } => {
            initialize_file_tracing()?;
            let config = AppConfig::load(&cli.config)?;
            run_game(config, name).await
        }
        Command::Board { limit } => {
            initialize_tracing();
            let config = AppConfig::load(&cli.config)?;
            show_board(config, limit).await
        }
        Command::Name { name } => {
            initialize_tracing();
            let config = AppConfig::load(&cli.config)?;
            save_name(&config, &name)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,mindwords=debug"))
}

/// Logs to stderr.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Logs to a file so the game output stays readable.
fn initialize_file_tracing() -> Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn leaderboard(config: &AppConfig, http: reqwest::Client) -> DreamloClient {
    DreamloClient::new(
        http,
        config.dreamlo_url().clone(),
        config.dreamlo_private_code().clone(),
        config.dreamlo_public_code().clone(),
    )
}

/// Run the interactive game
#[instrument(skip(config))]
async fn run_game(config: AppConfig, name: Option<String>) -> Result<()> {
    info!("Starting mindwords");

    let http = http_client(&config)?;
    let store = FileStore::new(config.prefs_path());
    let mut session = Session::new(store, config.round_rules());
    if let Some(name) = name {
        session.set_player(&name);
    }

    let words = RandomWordClient::new(http.clone(), config.word_api_url().clone());
    let tips = DatamuseTipClient::new(http.clone(), config.datamuse_url().clone())
        .with_ninjas(config.ninjas_url().clone(), config.ninjas_key().clone());
    let board = leaderboard(&config, http);

    let (driver, results) = GameDriver::new(
        session,
        Arc::new(words),
        Arc::new(tips),
        Arc::new(board),
        *config.word_attempts(),
    );

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    run_play(driver, results, input, &mut out, *config.leaderboard_limit()).await
}

/// Print the leaderboard
#[instrument(skip(config))]
async fn show_board(config: AppConfig, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(*config.leaderboard_limit());
    let http = http_client(&config)?;
    let rows = leaderboard(&config, http).top_scores(limit).await?;
    println!("{}", format_board(&rows));
    Ok(())
}

/// Save the player name
#[instrument(skip(config))]
fn save_name(config: &AppConfig, name: &str) -> Result<()> {
    let mut store = FileStore::new(config.prefs_path());
    let name = sanitize_name(name);
    store.save_name(&name)?;
    info!(path = %store.path().display(), "Player name saved");
    println!("Saved player name: {}", name);
    Ok(())
}
