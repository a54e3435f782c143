//! Connect Four between two search policies
//!
//! Plays a single game and prints the board after every move.
//!
//! ```text
//! cargo run --example connect_four -- uct2 alphabeta 200 4
//! ```
//!
//! Policies: `mcts`, `uct0`, `uct1`, `uct2`, `alphabeta`. Set `RUST_LOG=debug`
//! to see per-decision iteration counts.

use std::env;
use std::process;
use std::time::Duration;

use connect4_search::{
    policy, Connect4, DecisionFn, GameState, Player, PolicyKind, SearchConfig, SearchError,
};
use log::info;

const USAGE: &str = "usage: connect_four <p1> <p2> <millis> <depth>";

struct Options {
    players: [PolicyKind; 2],
    budget: Duration,
    depth: usize,
}

fn parse_options() -> Result<Options, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let arg = |i: usize, default: &str| args.get(i).cloned().unwrap_or_else(|| default.to_string());

    let p1: PolicyKind = arg(0, "uct0").parse().map_err(|e: SearchError| e.to_string())?;
    let p2: PolicyKind = arg(1, "alphabeta").parse().map_err(|e: SearchError| e.to_string())?;
    let millis: u64 = arg(2, "100")
        .parse()
        .map_err(|_| format!("invalid budget in milliseconds\n{}", USAGE))?;
    let depth: usize = arg(3, "4")
        .parse()
        .map_err(|_| format!("invalid depth\n{}", USAGE))?;

    Ok(Options {
        players: [p1, p2],
        budget: Duration::from_millis(millis),
        depth,
    })
}

fn decision_for(kind: PolicyKind, player: Player, options: &Options) -> Result<DecisionFn<Connect4>, SearchError> {
    let config = SearchConfig::default()
        .with_time_budget(options.budget)
        .with_perspective(player)
        .with_depth(options.depth);
    policy::<Connect4>(kind, config)
}

fn play(options: &Options) -> Result<(), SearchError> {
    let mut first = decision_for(options.players[0], Player::One, options)?;
    let mut second = decision_for(options.players[1], Player::Two, options)?;

    let mut game = Connect4::new();
    let mut ply = 0;

    while !game.is_terminal() {
        let mover = game.current_player();
        let (kind, decide) = match mover {
            Player::One => (options.players[0], &mut first),
            Player::Two => (options.players[1], &mut second),
        };

        let column = decide(&game)?;
        ply += 1;
        info!("ply {}: {:?} ({}) plays column {}", ply, mover, kind, column);

        game = game.successor(&column)?;
        println!("{}", game);
    }

    match game.payoff() {
        p if p > 0.0 => println!("Player One ({}) wins!", options.players[0]),
        p if p < 0.0 => println!("Player Two ({}) wins!", options.players[1]),
        _ => println!("The game is a draw!"),
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let options = match parse_options() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        }
    };

    println!(
        "Connect Four: {} vs {} ({} ms per move, alpha-beta depth {})",
        options.players[0],
        options.players[1],
        options.budget.as_millis(),
        options.depth
    );
    println!();

    if let Err(e) = play(&options) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
