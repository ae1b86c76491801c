use boardsight::core::render_grid;
use boardsight::detect::{self, DetectError};
use boardsight::moves::shakmaty::{fen::Fen, CastlingMode, Chess};
use boardsight::moves::{replay_pgn, resolve_move, ReplayError, RulesError};
use boardsight::vision::{BoardReader, CornerSet};
use boardsight::{BoardSightConfig, ConfigError, OccupancyGrid};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "boardsight",
    version,
    about = "Read a physical chessboard from camera frames and infer moves"
)]
struct Cli {
    /// Log pipeline stages at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the occupancy grid read from one image.
    Grid(GridArgs),
    /// Infer the move played between two images.
    Infer(InferArgs),
    /// Check move inference against every ply of a PGN game.
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct GridArgs {
    image: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print corners and grid as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct InferArgs {
    before: PathBuf,
    after: PathBuf,
    /// Position before the move; defaults to the standard start.
    #[arg(long)]
    fen: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    pgn: PathBuf,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid FEN: {0}")]
    Fen(String),
}

#[derive(Serialize)]
struct GridReport<'a> {
    corners: &'a CornerSet,
    grid: &'a OccupancyGrid,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter) {
    let _ = tracing_log::LogTracer::init_with_filter(level);
    boardsight::core::init_tracing(false);
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter) {
    let _ = boardsight::core::init_with_level(level);
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Grid(args) => run_grid(args),
        Command::Infer(args) => run_infer(args),
        Command::Replay(args) => run_replay(args),
    }
}

fn load_config(path: Option<&Path>) -> Result<BoardSightConfig, CliError> {
    match path {
        Some(path) => Ok(BoardSightConfig::load_json(path)?),
        None => Ok(BoardSightConfig::default()),
    }
}

fn run_grid(args: GridArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let reader = BoardReader::new(config.vision);
    let img = detect::load_rgb(&args.image)?;
    let reading = detect::read_board(&reader, &img)?;

    if args.json {
        let report = GridReport {
            corners: &reading.corners,
            grid: &reading.grid,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_grid(&reading.grid));
    }
    Ok(())
}

fn run_infer(args: InferArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let position = match args.fen.as_deref() {
        Some(fen) => parse_fen(fen)?,
        None => Chess::default(),
    };
    let reader = BoardReader::new(config.vision);
    let before = detect::load_rgb(&args.before)?;
    let after = detect::load_rgb(&args.after)?;

    let candidate = detect::infer_from_images(&reader, &before, &after)?;
    let m = resolve_move(&position, candidate)?;
    println!("{}", m.to_uci(CastlingMode::Standard));
    Ok(())
}

fn run_replay(args: ReplayArgs) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&args.pgn).map_err(|source| CliError::Io {
        path: args.pgn.display().to_string(),
        source,
    })?;
    let report = replay_pgn(&text)?;
    println!(
        "ok: {} plies checked, {} promotions skipped",
        report.checked, report.skipped_promotions
    );
    Ok(())
}

fn parse_fen(text: &str) -> Result<Chess, CliError> {
    let fen: Fen = text.parse().map_err(|e| CliError::Fen(format!("{e}")))?;
    fen.into_position(CastlingMode::Standard)
        .map_err(|e| CliError::Fen(format!("{e}")))
}
