//! A command-line cribbage client.
//!
//! The client resolves a player, picks one of their active games (or
//! creates one), and then drives the game through a small command loop.

use anyhow::{Context, Result};
use pico_args::Arguments;
use std::io::{self, Write};
use std::time::Duration;

use cb_client::{
    api_client::HttpTransport,
    commands::{Command, parse_command},
    config::ClientConfig,
    facade::{ClientError, GameFacade},
    notify::LogNotifier,
    transport::Transport,
};
use cribbage::{GameId, PlayerId};

const HELP: &str = "\
Connect to a cribbage server

USAGE:
  cb_client [OPTIONS]

OPTIONS:
  --server URL          Server URL  [default: http://localhost:8080]
  --player ID           Player id to act as
  --game ID             Game id to load directly
  --new IDS             Create a game against comma-separated player ids

FLAGS:
  -h, --help            Print help information

COMMANDS (once in a game):
  deal [N]              Shuffle N times (default 1) and deal
  crib CARD [CARD]      Throw the named cards to the crib, e.g. 'crib 5H AS'
  cut FRACTION          Cut the deck, e.g. 'cut 0.4'
  peg CARD              Play a card, e.g. 'peg 9D'
  go                    Pass during pegging
  count POINTS          Claim points for the hand or crib
  hand                  Show your hand
  refresh               Re-fetch the game state
  quit                  Leave the game
";

struct Args {
    server_url: Option<String>,
    player: Option<String>,
    game: Option<GameId>,
    new_opponents: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut pargs = Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }
    let args = Args {
        server_url: pargs.opt_value_from_str("--server")?,
        player: pargs.opt_value_from_str("--player")?,
        game: pargs.opt_value_from_str("--game")?,
        new_opponents: pargs.opt_value_from_str("--new")?,
    };

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let config = ClientConfig::from_env(args.server_url, args.player)?;
    let transport = HttpTransport::with_timeout(
        config.server_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;

    // Resolve the player: a known id, or register a new one by name.
    let player = match &config.player_id {
        Some(id) => transport
            .fetch_player(&PlayerId::new(id))
            .await
            .with_context(|| format!("no player '{id}' on {}", config.server_url))?,
        None => {
            let name = prompt("Player name: ")?.context("no player name given")?;
            transport
                .create_player(&name)
                .await
                .context("failed to create player")?
        }
    };
    println!("Playing as {player}");

    let mut facade = GameFacade::new(transport, LogNotifier, player.id.clone());

    if let Some(opponents) = args.new_opponents {
        let mut player_ids = vec![player.id.clone()];
        player_ids.extend(opponents.split(',').map(|id| PlayerId::new(id.trim())));
        let game_id = facade.create_game(&player_ids).await?;
        println!("Created game {game_id}");
    } else {
        let game_id = match args.game {
            Some(id) => id,
            None => select_game(facade.transport(), &player.id).await?,
        };
        facade.load_game(game_id).await?;
    }

    command_loop(&mut facade).await
}

/// List the player's active games and let them pick one.
async fn select_game<T: Transport>(transport: &T, player_id: &PlayerId) -> Result<GameId> {
    let games = transport
        .active_games(player_id)
        .await
        .context("failed to list active games")?;

    if games.active_games.is_empty() {
        anyhow::bail!("no active games for {player_id}; start one with --game after creating it");
    }

    println!("\nActive games:");
    for (i, game) in games.active_games.iter().enumerate() {
        println!("  {}. {game}", i + 1);
    }

    let input = prompt(&format!("\nSelect game (1-{}): ", games.active_games.len()))?
        .context("no game selected")?;
    let index: usize = input.parse().context("invalid game number")?;
    if index == 0 || index > games.active_games.len() {
        anyhow::bail!("invalid game selection");
    }
    Ok(games.active_games[index - 1].id)
}

async fn command_loop(facade: &mut GameFacade<HttpTransport, LogNotifier>) -> Result<()> {
    loop {
        print_game(facade);
        let Some(input) = prompt("> ")? else {
            break;
        };
        if input.is_empty() {
            continue;
        }
        if input == "help" {
            print!("{HELP}");
            continue;
        }
        match parse_command(&input) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(error) = dispatch(facade, command).await {
                    println!("error: {error}");
                }
            }
            Err(error) => println!("{error}"),
        }
    }
    println!("Goodbye.");
    Ok(())
}

async fn dispatch(
    facade: &mut GameFacade<HttpTransport, LogNotifier>,
    command: Command,
) -> Result<(), ClientError> {
    match command {
        Command::Deal(count) => {
            facade.set_shuffle_count(count);
            facade.submit_deal().await
        }
        Command::Crib(cards) => {
            facade.clear_selection();
            for card in cards {
                facade.toggle_card(card);
            }
            facade.submit_crib().await
        }
        Command::Cut(fraction) => {
            facade.set_cut_fraction(fraction);
            facade.submit_cut().await
        }
        Command::Peg(card) => {
            facade.clear_selection();
            facade.toggle_card(card);
            facade.submit_peg().await
        }
        Command::Go => {
            facade.clear_selection();
            facade.submit_peg().await
        }
        Command::Count(points) => {
            facade.set_points(points);
            facade.submit_count().await
        }
        Command::Refresh => facade.refresh().await,
        Command::Hand => {
            print_hand(facade);
            Ok(())
        }
        Command::Quit => Ok(()),
    }
}

fn print_game(facade: &GameFacade<HttpTransport, LogNotifier>) {
    let Some(snapshot) = facade.state().snapshot() else {
        println!("(no game loaded)");
        return;
    };
    println!("\n{snapshot}");
    print_hand(facade);
    if facade.state().is_blocking(facade.player_id()) {
        println!("It's your turn.");
    } else {
        println!("Waiting on other players; 'refresh' to check again.");
    }
}

fn print_hand(facade: &GameFacade<HttpTransport, LogNotifier>) {
    let Some(snapshot) = facade.state().snapshot() else {
        return;
    };
    match snapshot.hands.get(facade.player_id()) {
        Some(hand) if !hand.is_empty() => {
            let names: Vec<String> = hand.iter().map(|card| card.name()).collect();
            println!("Your hand: {}", names.join(" "));
        }
        _ => println!("Your hand is empty."),
    }
}

/// Prompt for a line of input. `None` means stdin was closed.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}
