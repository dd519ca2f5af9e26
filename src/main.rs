use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use tabletop_chess::core::EngineSettings;
use tabletop_chess::game::ai::{GreedyPolicy, RandomPolicy};
use tabletop_chess::game::resources::player::Player;
use tabletop_chess::game::session::{self, GameLoopConfig, LoopEvent};
use tabletop_chess::game::{Cell, ChessGame, Color, PieceKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Chess rules engine driver")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a list of moves (`e2e4`, `e2-e4`, `e7e8q`) and print the result
    Replay { moves: Vec<String> },
    /// Let two AI policies play each other
    SelfPlay {
        #[arg(long, value_enum, default_value_t = PolicyKind::Greedy)]
        white: PolicyKind,
        #[arg(long, value_enum, default_value_t = PolicyKind::Random)]
        black: PolicyKind,
        /// Stop after this many plies; defaults to the configured limit
        #[arg(long)]
        max_plies: Option<usize>,
        /// Seed for random policies
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyKind {
    Greedy,
    Random,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = EngineSettings::load();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Replay { moves } => replay(&settings, &moves),
        Command::SelfPlay {
            white,
            black,
            max_plies,
            seed,
        } => self_play(
            &settings,
            white,
            black,
            max_plies.unwrap_or(settings.max_self_play_plies),
            seed,
        ),
    }
}

fn replay(settings: &EngineSettings, moves: &[String]) -> Result<()> {
    let mut game = ChessGame::two_humans();
    game.set_default_promotion(settings.default_promotion)?;

    for text in moves {
        let (from, to, promotion) = parse_move(text)?;
        let side = game.current_turn();
        let result = match promotion {
            Some(kind) => game.try_move_with_promotion(from, to, side, kind),
            None => game.try_move(from, to, side),
        };
        result.with_context(|| format!("move {text:?} rejected"))?;
    }

    print_game(&game);
    Ok(())
}

fn self_play(
    settings: &EngineSettings,
    white: PolicyKind,
    black: PolicyKind,
    max_plies: usize,
    seed: Option<u64>,
) -> Result<()> {
    let mut game = ChessGame::new([
        make_player(Color::White, white, seed),
        make_player(Color::Black, black, seed.map(|seed| seed.wrapping_add(1))),
    ])?;
    game.set_default_promotion(settings.default_promotion)?;

    let game = session::shared(game);
    let config = GameLoopConfig {
        poll_interval: settings.ai_poll_interval(),
        max_plies: Some(max_plies),
    };
    let handle = session::spawn_game_loop(Arc::clone(&game), config)?;

    for event in handle.events().iter() {
        match event {
            LoopEvent::Finished(outcome) => info!("[SESSION] {}", outcome.message()),
            LoopEvent::PlyLimitReached { plies } => info!("[SESSION] Ply limit {plies} reached"),
            LoopEvent::Passed { color } => bail!("{color} policy passed"),
            LoopEvent::Rejected { color, rejection } => bail!("{color} move rejected: {rejection}"),
            LoopEvent::Moved { .. } => {}
        }
    }
    if handle.join().is_err() {
        bail!("game loop thread panicked");
    }

    print_game(&game.lock());
    Ok(())
}

fn make_player(color: Color, kind: PolicyKind, seed: Option<u64>) -> Player {
    let name = format!("{color} ({kind:?})");
    match kind {
        PolicyKind::Greedy => Player::ai(name, color, GreedyPolicy),
        PolicyKind::Random => match seed {
            Some(seed) => Player::ai(name, color, RandomPolicy::seeded(seed)),
            None => Player::ai(name, color, RandomPolicy::new()),
        },
    }
}

/// Split `e2e4`, `e2-e4` or `e7e8q` into cells and an optional promotion
fn parse_move(text: &str) -> Result<(Cell, Cell, Option<PieceKind>)> {
    let cleaned: String = text.chars().filter(|c| *c != '-').collect();
    let second_letter = |s: &str| {
        s.char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_alphabetic())
            .map(|(index, _)| index)
    };

    let split = second_letter(&cleaned).with_context(|| format!("cannot parse move {text:?}"))?;
    let (from, rest) = cleaned.split_at(split);
    let (to, promotion) = match second_letter(rest) {
        Some(index) => {
            let suffix = &rest[index..];
            let mut letters = suffix.chars();
            let kind = letters
                .next()
                .and_then(PieceKind::from_letter)
                .filter(|_| letters.next().is_none())
                .with_context(|| format!("bad promotion suffix {suffix:?} in {text:?}"))?;
            (&rest[..index], Some(kind))
        }
        None => (rest, None),
    };

    Ok((from.parse()?, to.parse()?, promotion))
}

fn print_game(game: &ChessGame) {
    print!("{}", game.board().snapshot());
    println!();
    for line in game.formatted_history() {
        println!("{line}");
    }
    println!();
    println!("{}", game.last_move_summary());
    println!("{}", game.status());
    for color in Color::ALL {
        let player = game.player(color);
        println!(
            "{}: captured {} (material {:+})",
            player.name,
            player.captured().len(),
            player.captured().material_advantage(game.player(color.opponent()).captured())
        );
    }
}
