//! dartboard CLI: score detector output for dartboard images.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dartboard::io::{load_geometry, DetectionFile, ScoreConfig, ScoreReport};
use dartboard::scoring::{sector::SECTOR_WIDTH_DEG, SECTOR_VALUES};
use dartboard::{BoardGeometry, DartScorer, FrameScore, ScoringParams};

#[cfg(not(feature = "tracing"))]
use log::{error, info, LevelFilter};
#[cfg(feature = "tracing")]
use tracing::{error, info};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "dartboard")]
#[command(about = "Score darts from dartboard / bull / dart detection boxes")]
#[command(version)]
struct Cli {
    /// Log per-dart scoring diagnostics.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Emit logs as JSON (only with the `tracing` feature).
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one detection file.
    Score(ScoreArgs),

    /// Score using a JSON config (detections path, output path, params).
    Run {
        /// Path to the config file.
        config: PathBuf,
    },

    /// Print the sector table and ring radii.
    BoardInfo {
        /// Board geometry override (JSON).
        #[arg(long)]
        geometry: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct ScoreArgs {
    /// Detector output: a JSON array of detections or {"source", "detections"}.
    #[arg(long)]
    detections: PathBuf,

    /// Path to write the score report (JSON).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Board geometry override (JSON); missing fields use the standard board.
    #[arg(long)]
    geometry: Option<PathBuf>,

    /// Drop dart detections below this confidence.
    #[arg(long, default_value_t = 0.0)]
    min_confidence: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match init_logging(cli.verbose, cli.json_log).and_then(|()| run(cli.command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::Score(args) => run_score(&args),
        Commands::Run { config } => run_config(&config),
        Commands::BoardInfo { geometry } => run_board_info(geometry.as_deref()),
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: bool, _json: bool) -> CliResult<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    dartboard::core::init_with_level(level)?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(verbose: bool, json: bool) -> CliResult<()> {
    dartboard::core::init_tracing(json, verbose);
    Ok(())
}

fn run_score(args: &ScoreArgs) -> CliResult<()> {
    let geometry = match &args.geometry {
        Some(path) => load_geometry(path)?,
        None => BoardGeometry::STANDARD,
    };
    let params = ScoringParams {
        geometry,
        min_dart_confidence: args.min_confidence,
        ..ScoringParams::default()
    };
    let scorer = DartScorer::new(params)?;
    score_file(&scorer, &args.detections, args.out.as_deref())
}

fn run_config(config_path: &Path) -> CliResult<()> {
    let cfg = ScoreConfig::load_json(config_path)?;
    info!("loaded config {}", config_path.display());
    let scorer = cfg.build_scorer()?;
    let out = cfg.output_path();
    score_file(&scorer, Path::new(&cfg.detections_path), Some(out.as_path()))
}

fn score_file(scorer: &DartScorer, detections: &Path, out: Option<&Path>) -> CliResult<()> {
    let file = DetectionFile::load_json(detections)?;
    let source = file
        .source
        .clone()
        .unwrap_or_else(|| detections.display().to_string());
    info!("{}: {} detection(s)", source, file.detections.len());

    let mut report = ScoreReport::new(source);
    let result = scorer.score_frame(&file.detections);
    match &result {
        Ok(frame) => {
            report.set_frame(frame);
            print_frame(frame);
        }
        Err(err) => {
            error!("scoring failed: {err}");
            report.set_error(err);
        }
    }

    if let Some(out) = out {
        report.write_json(out)?;
        println!("wrote report JSON to {}", out.display());
    }

    result.map(|_| ()).map_err(Into::into)
}

fn print_frame(frame: &FrameScore) {
    for (i, d) in frame.darts.iter().enumerate() {
        println!(
            "dart {}: {:>4} = {:>2}  (r = {:.2} mm, angle = {:.2} deg, conf = {:.2})",
            i + 1,
            d.ring.notation(d.sector_base_value),
            d.score,
            d.distance_mm,
            d.angle_degrees,
            d.dart.confidence
        );
    }
    if frame.skipped_darts > 0 {
        println!("skipped: {} low-confidence dart(s)", frame.skipped_darts);
    }
    println!("total: {}", frame.total);
}

fn run_board_info(geometry: Option<&Path>) -> CliResult<()> {
    let geometry = match geometry {
        Some(path) => load_geometry(path)?,
        None => BoardGeometry::STANDARD,
    };
    geometry.validate()?;

    println!("board diameter: {} mm", geometry.board_diameter_mm);
    println!("sectors (clockwise from top, {SECTOR_WIDTH_DEG} deg each):");
    let table: Vec<String> = SECTOR_VALUES.iter().map(u8::to_string).collect();
    println!("  {}", table.join(" "));
    println!("rings (mm from center):");
    println!("  inner bull  0 - {}", geometry.inner_bull_radius_mm);
    println!(
        "  outer bull  {} - {}",
        geometry.inner_bull_radius_mm, geometry.outer_bull_radius_mm
    );
    println!(
        "  triple      {} - {}",
        geometry.triple_inner_mm, geometry.triple_outer_mm
    );
    println!(
        "  double      {} - {}",
        geometry.double_inner_mm, geometry.double_outer_mm
    );
    println!("  miss        > {}", geometry.double_outer_mm);
    Ok(())
}
