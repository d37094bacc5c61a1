use std::{net::SocketAddr, time::Duration};

use artpair::{
    clients::errors::Result,
    config::{Config, ConfigBuilder},
    pairing::Outcome,
    picker::FailurePolicy,
    surface::PanelBoard,
};
use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser)]
#[command(name = "artpair")]
#[command(version, about = "Pair a random artwork with a music track", long_about = None)]
struct Cli {
    /// Base URL of the music search API
    #[arg(long, global = true)]
    music_url: Option<String>,

    /// Base URL of the artwork listing API
    #[arg(long, global = true)]
    artworks_url: Option<String>,

    /// Number of random pages to try before giving up on an artwork (at most 6)
    #[arg(long, global = true)]
    attempts: Option<u32>,

    /// Per-request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Report an error when every artwork page request fails
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a track by the artist, then pair it with a random artwork
    Search {
        #[arg(required = true, num_args = 1..)]
        artist: Vec<String>,
    },
    /// Pick a random artwork, then a track matching a word of its title
    Surprise {},
    /// Serve the pairing page over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

/// Parses the command line and runs the chosen subcommand.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    match &cli.command {
        Commands::Search { artist } => {
            let pairing = config.into_pairing(PanelBoard::new());
            let outcome = pairing.search_by_artist(&artist.join(" ")).await;
            print_board(pairing.surface(), outcome);
        }
        Commands::Surprise {} => {
            let pairing = config.into_pairing(PanelBoard::new());
            let outcome = pairing.surprise().await;
            print_board(pairing.surface(), outcome);
        }
        Commands::Serve { addr } => {
            artpair::server::serve(config.into_pairing(PanelBoard::new()), *addr).await?;
        }
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<Config> {
    info!("Building config ...");
    let mut builder = ConfigBuilder::new();
    if let Some(url) = &cli.music_url {
        builder = builder.music_url(url.as_str());
    }
    if let Some(url) = &cli.artworks_url {
        builder = builder.artworks_url(url.as_str());
    }
    if let Some(attempts) = cli.attempts {
        builder = builder.attempts(attempts);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if cli.strict {
        builder = builder.failure_policy(FailurePolicy::Surface);
    }
    builder.build()
}

fn print_board(board: &PanelBoard, outcome: Outcome) {
    info!("Pairing finished: {outcome:?}");
    let board = board.snapshot();
    println!("== Music ==\n{}\n", board.music.to_text());
    println!("== Art ==\n{}\n", board.art.to_text());
    if !board.caption.is_empty() {
        println!("{}", board.caption);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_reach_the_config() {
        let cli = Cli::try_parse_from([
            "artpair",
            "surprise",
            "--timeout",
            "5",
            "--attempts",
            "3",
            "--strict",
        ])
        .unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.picker.attempts(), 3);
        assert_eq!(config.picker.policy(), FailurePolicy::Surface);
    }

    #[test]
    fn search_joins_artist_words() {
        let cli = Cli::try_parse_from(["artpair", "search", "Miles", "Davis"]).unwrap();
        match cli.command {
            Commands::Search { artist } => assert_eq!(artist.join(" "), "Miles Davis"),
            _ => panic!("expected search subcommand"),
        }
    }
}
