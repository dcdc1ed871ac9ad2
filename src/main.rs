use clap::Parser;
use dashmap::DashMap;
use rand::Rng;
use rayon::prelude::*;
use shxl_engine::game::observer::LogObserver;
use shxl_engine::{Game, GameOptions, StrategyMode, Winner};

/// Simulates games of Secret Hitler XL.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of players, 6 to 16
    #[arg(short, long, default_value_t = 8)]
    players: usize,
    /// Play without the communist team
    #[arg(long)]
    no_communists: bool,
    /// Add the anti-policy and social democratic cards
    #[arg(long)]
    anti_policies: bool,
    /// Add the Article 48 and Enabling Act cards
    #[arg(long)]
    emergency_powers: bool,
    /// How the bots play: random, role or smart
    #[arg(short, long, default_value_t = StrategyMode::Role)]
    strategy: StrategyMode,
    /// Seats played from the terminal, e.g. `--human 0,3`
    #[arg(long, value_delimiter = ',')]
    human: Vec<usize>,
    /// Seed of the first game; later games count up from it
    #[arg(long, env = "SHXL_SEED")]
    seed: Option<u64>,
    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    games: usize,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    let args = Args::parse();
    let opts = GameOptions {
        communists: !args.no_communists,
        anti_policies: args.anti_policies,
        emergency_powers: args.emergency_powers,
        ai_strategy: args.strategy,
        human_players: args.human.clone(),
    };
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("Playing {} game(s) with {} players from seed {}", args.games, args.players, seed);

    let tally = DashMap::<Winner, usize>::new();
    if opts.human_players.is_empty() && args.games > 1 {
        (0..args.games)
            .into_par_iter()
            .try_for_each(|i| simulate(&args, &opts, seed.wrapping_add(i as u64), &tally))?;
    } else {
        for i in 0..args.games {
            simulate(&args, &opts, seed.wrapping_add(i as u64), &tally)?;
        }
    }

    let mut results = tally.into_iter().collect::<Vec<_>>();
    results.sort_by(|a, b| b.1.cmp(&a.1));
    for (winner, wins) in results {
        let share = 100.0 * wins as f64 / args.games.max(1) as f64;
        println!("{:>22}: {:>6} ({:.1}%)", winner, wins, share);
    }
    Ok(())
}

fn simulate(args: &Args, opts: &GameOptions, seed: u64, tally: &DashMap<Winner, usize>) -> anyhow::Result<()> {
    let mut game = Game::setup(args.players, opts.clone(), seed)?;
    game.set_observer(Box::new(LogObserver::new(format!("seed {}", seed))));
    let winner = game.start_game()?;
    log::info!("[seed {}] {} win", seed, winner);
    *tally.entry(winner).or_insert(0) += 1;
    Ok(())
}
