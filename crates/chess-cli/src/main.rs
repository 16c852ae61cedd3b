//! chess-coach - pick moves at a chosen strength and review finished games.

mod config;
mod movetext;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Context};
use chess_analysis::{AnalysisConfig, GameAnalyzer};
use chess_core::Position;
use chess_engine::{MoveSource, SkillLevel, SkillModulator};
use clap::{Parser, Subcommand, ValueEnum};
use config::CoachConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-coach")]
#[command(about = "Skill-scaled chess opponent and game reviewer")]
struct Cli {
    /// Configuration file (defaults to ./coach.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a move for the side to move
    Bestmove {
        /// Position to move from (FEN or "startpos")
        #[arg(long, default_value = "startpos")]
        fen: String,
        /// Playing strength, 1 (weakest) to 10
        #[arg(short, long, allow_negative_numbers = true)]
        skill: Option<i64>,
        /// Maximum search depth in plies
        #[arg(short, long)]
        depth: Option<u8>,
        /// Seed for the move randomizer
        #[arg(long)]
        seed: Option<u64>,
        /// Plain full-strength search at --depth, no skill scaling
        #[arg(long)]
        exact: bool,
    },
    /// Review a game move by move
    Analyze {
        /// Position the game starts from (FEN or "startpos")
        #[arg(long, default_value = "startpos")]
        fen: String,
        /// Search depth per position in plies
        #[arg(short, long)]
        depth: Option<u8>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// File with the game's movetext
        #[arg(long, conflicts_with = "moves")]
        pgn_moves: Option<PathBuf>,
        /// Moves in SAN or coordinate notation
        moves: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CoachConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Bestmove {
            fen,
            skill,
            depth,
            seed,
            exact,
        } => {
            let mut position: Position = fen.parse().context("invalid --fen")?;
            let max_depth = depth.unwrap_or(config.engine.max_depth);
            if max_depth == 0 {
                bail!("--depth must be at least 1");
            }

            if exact {
                match chess_engine::search(&mut position, max_depth) {
                    Some(result) => {
                        println!(
                            "info depth {} score cp {} nodes {}",
                            result.depth, result.score, result.nodes
                        );
                        println!("bestmove {}", position.to_uci(result.best_move));
                    }
                    None => println!("bestmove 0000"),
                }
                return Ok(());
            }

            let skill = SkillLevel::new(skill.unwrap_or(config.engine.default_skill));
            let mut modulator = match seed.or(config.engine.seed) {
                Some(seed) => SkillModulator::seeded(seed, max_depth),
                None => SkillModulator::from_entropy(max_depth),
            };
            tracing::info!(skill = skill.get(), max_depth, "choosing move");

            match modulator.choose_move(&mut position, skill) {
                Some(chosen) => {
                    match chosen.source {
                        MoveSource::Random => println!("info string random move"),
                        MoveSource::Search { depth, score } => {
                            println!("info depth {} score cp {}", depth, score)
                        }
                    }
                    println!("bestmove {}", position.to_uci(chosen.mv));
                }
                None => println!("bestmove 0000"),
            }
        }
        Commands::Analyze {
            fen,
            depth,
            format,
            pgn_moves,
            moves,
        } => {
            let start: Position = fen.parse().context("invalid --fen")?;
            let moves = match pgn_moves {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    movetext::extract_moves(&text)
                }
                None => moves,
            };

            let analysis = AnalysisConfig::with_depth(depth.unwrap_or(config.analysis.depth));
            if analysis.depth == 0 {
                bail!("--depth must be at least 1");
            }
            let mut analyzer = GameAnalyzer::new(analysis);
            let report = analyzer.analyze(&start, &moves)?;

            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                Format::Text => print!("{}", report::render_text(&report)),
            }
        }
    }

    Ok(())
}
