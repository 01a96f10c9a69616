use std::cell::Cell;
use std::env;
use std::process;
use std::rc::Rc;
use std::time::Instant;

use colored::Colorize;
use rand::{rngs::ThreadRng, seq::SliceRandom, thread_rng};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use scorekeeper_rs::games::mormon_bridge::{MormonBridgeAction, MormonBridgeGame};
use scorekeeper_rs::games::rook::{RookAction, RookGame, Team};
use scorekeeper_rs::scoreboard::Scoreboard;
use scorekeeper_rs::{
    GameError, GameKind, Player, ScoreKeeper, Session, SessionConfig, StateContainer,
};

// Rook has no natural end, stop the demo after this many rounds
const ROOK_ROUNDS: usize = 10;
// Upper bound on random actions before giving up
const MAX_STEPS: usize = 1_000_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        error!(%err, "demo failed");
        process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let config = match env::args().nth(1) {
        Some(path) => SessionConfig::load(path)?,
        None => default_config(),
    };
    let start = Instant::now();
    match config.start()? {
        Session::MormonBridge(game) => play_mormon_bridge(game)?,
        Session::Rook(game) => play_rook(game)?,
    }
    info!(game = %config.game, elapsed = ?start.elapsed(), "demo finished");
    Ok(())
}

fn default_config() -> SessionConfig {
    SessionConfig::new(
        GameKind::MormonBridge,
        vec![
            Player::new("1", "Alice"),
            Player::new("2", "Bob"),
            Player::new("3", "Carol"),
            Player::new("4", "Dave"),
        ],
    )
}

/// Dispatches random available actions until the game is over or
/// `max_rounds` rounds are complete.
fn autoplay<G: ScoreKeeper>(
    store: &mut StateContainer<G>,
    rng: &mut ThreadRng,
    max_rounds: Option<usize>,
) -> Result<usize, GameError> {
    let mut steps = 0;
    while !store.game().is_finished()
        && max_rounds.map_or(true, |rounds| store.game().completed_rounds() < rounds)
        && steps < MAX_STEPS
    {
        let actions = store.game().available_actions();
        let Some(action) = actions.choose(rng) else {
            break;
        };
        debug!(?action, "dispatching");
        store.dispatch(action)?;
        steps += 1;
    }
    Ok(steps)
}

fn watch<G: ScoreKeeper>(store: &mut StateContainer<G>) -> Rc<Cell<usize>> {
    let updates = Rc::new(Cell::new(0));
    let sink = updates.clone();
    store.subscribe(move |_| sink.set(sink.get() + 1));
    updates
}

fn play_mormon_bridge(game: MormonBridgeGame) -> Result<(), GameError> {
    let mut rng = thread_rng();
    let mut store = StateContainer::new(game);
    let updates = watch(&mut store);
    let steps = autoplay(&mut store, &mut rng, None)?;
    info!(steps, updates = updates.get(), "game over");

    store.dispatch(&MormonBridgeAction::SetScoreboardVisible(true))?;
    if let Some(scoreboard) = store.get_state().scoreboard {
        print_scoreboard(&scoreboard);
    }
    let game = store.game();
    println!();
    for player in game.players.iter() {
        println!(
            "{:>10}: {}",
            player.name,
            colored_total(game.cumulative_score(&player.id)?)
        );
    }
    Ok(())
}

fn play_rook(game: RookGame) -> Result<(), GameError> {
    let mut rng = thread_rng();
    let mut store = StateContainer::new(game);
    let updates = watch(&mut store);
    let steps = autoplay(&mut store, &mut rng, Some(ROOK_ROUNDS))?;
    info!(steps, updates = updates.get(), "stopping");

    store.dispatch(&RookAction::SetScoreboardVisible(true))?;
    if let Some(scoreboard) = store.get_state().scoreboard {
        print_scoreboard(&scoreboard);
    }
    let game = store.game();
    println!();
    for team in [Team::Team1, Team::Team2] {
        let names: Vec<&str> = game
            .team_players(team)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        println!(
            "{:>20}: {}",
            names.join(" & "),
            colored_total(game.team_score(team))
        );
    }
    Ok(())
}

fn colored_total(total: i32) -> String {
    if total < 0 {
        total.to_string().red().to_string()
    } else {
        total.to_string().green().to_string()
    }
}

fn print_scoreboard<T>(scoreboard: &Scoreboard<T>) {
    let width = scoreboard
        .header_cells
        .iter()
        .map(|h| h.len())
        .max()
        .unwrap_or(0)
        .max(10);
    let header: Vec<String> = scoreboard
        .header_cells
        .iter()
        .map(|h| format!("{:>width$}", h, width = width))
        .collect();
    println!("{}", header.join(" ").bold());
    for row in 0..scoreboard.row_count() {
        let cells: Vec<String> = scoreboard
            .columns
            .iter()
            .map(|column| {
                let text = column.get(row).map(|c| c.text.as_str()).unwrap_or("");
                format!("{:>width$}", text, width = width)
            })
            .collect();
        println!("{}", cells.join(" "));
    }
}
