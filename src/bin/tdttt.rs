//! Command-line interface for training and playing
//!
//! `train` runs a self-play (or versus-opponent) training session and
//! prints the outcome tallies; `play` starts an interactive game against
//! either the search opponent or a freshly trained learner.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use td_tictactoe::{
    Agent, Game, HumanAgent, NegamaxAgent, Player, RandomAgent, TdAgent, Trainer, TrainerConfig,
    TrainingReport, DEFAULT_LEARNING_RATE, DEFAULT_WIN_WEIGHT, FULL_DEPTH, GameResult,
};

#[derive(Parser)]
#[command(name = "tdttt")]
#[command(version, about = "Self-play TD trainer for Tic-Tac-Toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a TD learner through repeated games
    Train(TrainArgs),

    /// Play an interactive game against an opponent
    Play(PlayArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TrainOpponent {
    /// A second, independently learning TD agent
    Learner,
    /// Depth-limited negamax search
    Negamax,
    /// Uniform-random moves
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayOpponent {
    /// Negamax search at the configured depth
    Negamax,
    /// A TD learner pre-trained by self-play for this session
    Learner,
}

#[derive(Parser, Debug)]
struct TrainArgs {
    /// Opponent for the learning agent
    #[arg(long, short = 'o', value_enum, default_value_t = TrainOpponent::Learner)]
    opponent: TrainOpponent,

    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 5000)]
    games: usize,

    /// Search depth for the negamax opponent
    #[arg(long, short = 'd', default_value_t = FULL_DEPTH)]
    depth: u32,

    /// TD step-size parameter
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    learning_rate: f64,

    /// How much more a win is worth than a draw when ranking moves
    #[arg(long, default_value_t = DEFAULT_WIN_WEIGHT)]
    win_weight: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long, default_value_t = false)]
    no_progress: bool,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Who to play against
    #[arg(long, short = 'o', value_enum, default_value_t = PlayOpponent::Negamax)]
    opponent: PlayOpponent,

    /// Search depth for the negamax opponent
    #[arg(long, short = 'd', default_value_t = FULL_DEPTH)]
    depth: u32,

    /// Self-play games used to prepare the learner opponent
    #[arg(long, default_value_t = 20_000)]
    pretrain_games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Let the opponent open the game instead of you
    #[arg(long, default_value_t = false)]
    opponent_first: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => train(args),
        Commands::Play(args) => play(args),
    }
}

fn train(args: TrainArgs) -> Result<()> {
    let mut learner = TdAgent::with_parameters(Player::One, args.learning_rate, args.win_weight)
        .context("invalid learner parameters")?;
    if let Some(seed) = args.seed {
        learner = learner.with_seed(seed);
    }

    let mut opponent: Box<dyn Agent> = match args.opponent {
        TrainOpponent::Learner => {
            let mut twin =
                TdAgent::with_parameters(Player::Two, args.learning_rate, args.win_weight)
                    .context("invalid opponent parameters")?;
            if let Some(seed) = args.seed {
                twin = twin.with_seed(seed.wrapping_add(1));
            }
            Box::new(twin)
        }
        TrainOpponent::Negamax => {
            Box::new(NegamaxAgent::new(args.depth).context("invalid search depth")?)
        }
        TrainOpponent::Random => match args.seed {
            Some(seed) => Box::new(RandomAgent::with_seed(seed.wrapping_add(1))),
            None => Box::new(RandomAgent::new()),
        },
    };

    let config = TrainerConfig {
        games: args.games,
        progress: !args.no_progress,
    };
    let report = Trainer::new(config)
        .run(&mut learner, opponent.as_mut())
        .context("training failed")?;

    print_section("Training complete");
    print_kv("Opponent", opponent.name());
    print_kv("Games", &report.total_games.to_string());
    print_kv("Wins", &format!("{} ({:.1}%)", report.wins, report.win_rate * 100.0));
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", report.draws, report.draw_rate * 100.0),
    );
    print_kv(
        "Losses",
        &format!("{} ({:.1}%)", report.losses, report.loss_rate * 100.0),
    );
    print_kv("Positions valued", &learner.values().len().to_string());

    if let Some(path) = &args.summary {
        report.save(path).context("failed to write summary")?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}

fn play(args: PlayArgs) -> Result<()> {
    let human_player = if args.opponent_first {
        Player::Two
    } else {
        Player::One
    };
    let opponent_player = human_player.opponent();

    let mut opponent: Box<dyn Agent> = match args.opponent {
        PlayOpponent::Negamax => {
            Box::new(NegamaxAgent::new(args.depth).context("invalid search depth")?)
        }
        PlayOpponent::Learner => Box::new(pretrain(args.pretrain_games, opponent_player, args.seed)?),
    };

    let mut human = HumanAgent::new();
    let mut game = Game::new();

    println!("Playing against {}. You are {}.", opponent.name(), human_player.to_char());

    let result = match human_player {
        Player::One => game.play(&mut human, opponent.as_mut()),
        Player::Two => game.play(opponent.as_mut(), &mut human),
    }
    .context("game aborted")?;

    println!("\nFinal board:\n{}", game.board());
    match result {
        GameResult::Won(winner) if winner == human_player => println!("You win!"),
        GameResult::Won(_) => println!("{} wins.", opponent.name()),
        GameResult::Draw => println!("It's a draw."),
        GameResult::InProgress => unreachable!("driver only returns finished games"),
    }

    Ok(())
}

/// Train two TD agents against each other and hand back the one that will
/// sit in `seat` against the human. Learned values never leave the
/// process, so the opponent is prepared fresh each session.
fn pretrain(games: usize, seat: Player, seed: Option<u64>) -> Result<TdAgent> {
    let mut first = TdAgent::new(Player::One);
    let mut second = TdAgent::new(Player::Two);
    if let Some(seed) = seed {
        first = first.with_seed(seed);
        second = second.with_seed(seed.wrapping_add(1));
    }

    println!("Preparing the learner over {games} self-play games...");
    let config = TrainerConfig {
        games,
        progress: true,
    };
    let report: TrainingReport = Trainer::new(config)
        .run(&mut first, &mut second)
        .context("pretraining failed")?;
    println!(
        "Self-play record for the first player: {} W / {} D / {} L",
        report.wins, report.draws, report.losses
    );

    Ok(match seat {
        Player::One => first,
        Player::Two => second,
    })
}

fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{key}:"), value);
}
