use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use merge_grid::{
    play_many, Direction, EngineConfig, EngineError, GameState, GameStatus, GreedyPolicy,
    MoveOutcome, MovePolicy, OrderedPolicy, RandomPolicy,
};

#[derive(Debug, Parser)]
#[command(name = "merge-grid")]
#[command(version, about = "Sliding-tile merging puzzle (2048)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play in the terminal: w/a/s/d (or k/h/j/l) then Enter, q to quit
    Play(GameArgs),
    /// Run headless games with a built-in policy and print JSON stats
    Autoplay {
        #[command(flatten)]
        game: GameArgs,

        /// Number of games to play
        #[arg(long, default_value = "10")]
        games: usize,

        /// Move policy
        #[arg(long, value_enum, default_value = "greedy")]
        policy: PolicyKind,

        /// Stop a game after this many moves (0 = play to the end)
        #[arg(long, default_value = "0")]
        max_moves: u32,
    },
}

#[derive(Debug, Args)]
struct GameArgs {
    /// Grid side length
    #[arg(long, default_value = "4")]
    size: usize,

    /// Tile value that wins the game
    #[arg(long, default_value = "2048")]
    win_threshold: u64,

    /// Probability that a spawned tile is a 4
    #[arg(long, default_value = "0.5")]
    four_probability: f64,

    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

impl GameArgs {
    fn config(&self) -> EngineConfig {
        let config = EngineConfig::default()
            .with_size(self.size)
            .with_win_threshold(self.win_threshold)
            .with_four_probability(self.four_probability);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyKind {
    Random,
    Greedy,
    Ordered,
}

impl PolicyKind {
    fn build(self) -> Box<dyn MovePolicy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy),
            PolicyKind::Greedy => Box::new(GreedyPolicy::default()),
            PolicyKind::Ordered => Box::new(OrderedPolicy::default()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match cli.command {
        Command::Play(args) => play(&args),
        Command::Autoplay {
            game,
            games,
            policy,
            max_moves,
        } => autoplay(&game, games, policy, max_moves),
    }
}

fn play(args: &GameArgs) -> Result<()> {
    let mut state = GameState::new(args.config()).context("starting game")?;
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    print_board(&mut out, &state)?;
    for line in stdin.lock().lines() {
        let line = line?;
        for key in line.chars().filter(|c| !c.is_whitespace()) {
            if key.eq_ignore_ascii_case(&'q') {
                writeln!(out, "Quit after {} moves.", state.moves_made())?;
                return Ok(());
            }
            let dir = match Direction::from_key(key) {
                Ok(dir) => dir,
                Err(err @ EngineError::InvalidDirection(_)) => {
                    writeln!(out, "{} (use w/a/s/d, q to quit)", err)?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if state.apply_move(dir)? == MoveOutcome::Rejected {
                writeln!(out, "Nothing moves {}.", dir)?;
            }
        }

        print_board(&mut out, &state)?;
        match state.status() {
            GameStatus::Won => {
                writeln!(
                    out,
                    "{} achieved! You win! Moves made: {}",
                    state.config().win_threshold,
                    state.moves_made()
                )?;
                return Ok(());
            }
            GameStatus::Lost => {
                writeln!(out, "Out of moves. You lose. Moves made: {}", state.moves_made())?;
                return Ok(());
            }
            GameStatus::Playing => {}
        }
    }
    warn!("input closed before the game ended");
    Ok(())
}

fn print_board(out: &mut impl Write, state: &GameState) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "{}", state.grid())?;
    writeln!(out, "moves: {}", state.moves_made())?;
    out.flush()
}

fn autoplay(args: &GameArgs, games: usize, kind: PolicyKind, max_moves: u32) -> Result<()> {
    let config = args.config();
    config.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    let policy = kind.build();

    info!("playing {} {} games from seed {}", games, policy.name(), seed);
    let results = play_many(&config, policy.as_ref(), games, seed, max_moves)?;

    let mut out = io::stdout().lock();
    for stats in &results {
        writeln!(out, "{}", serde_json::to_string(stats)?)?;
    }

    let won = results.iter().filter(|s| s.status == GameStatus::Won).count();
    let best = results.iter().map(|s| s.max_tile).max().unwrap_or(0);
    info!("{}/{} games won, best tile {}", won, results.len(), best);
    Ok(())
}
