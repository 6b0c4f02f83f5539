use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;
use inkdown_core::{
    CoreError, DefaultInkSampler, EngineConfig, OcrObservation, ReconcileEngine,
};
use uuid::Uuid;

use crate::common::{board_path, load_board, parse_region, save_board};
use crate::settings::Settings;

#[derive(Subcommand)]
pub enum BoardAction {
    /// Print the board's timers
    Show {
        /// Board file to use instead of the configured one
        #[arg(long)]
        board: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reconcile an OCR pass against the board and apply the delta
    Reconcile {
        /// Scanned content-space region as x,y,width,height
        #[arg(long)]
        region: String,
        /// JSON file with OCR observations (candidates + normalized boxes)
        #[arg(long)]
        observations: PathBuf,
        /// Board file to use instead of the configured one
        #[arg(long)]
        board: Option<PathBuf>,
        /// Compute and print the delta without applying it
        #[arg(long)]
        dry_run: bool,
        /// Print the delta as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a timer by id (user action)
    Remove {
        id: Uuid,
        /// Board file to use instead of the configured one
        #[arg(long)]
        board: Option<PathBuf>,
    },
    /// Mark timers whose target has passed and report them
    Sweep {
        /// Board file to use instead of the configured one
        #[arg(long)]
        board: Option<PathBuf>,
        /// Print newly expired timers as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all timers
    Clear {
        /// Board file to use instead of the configured one
        #[arg(long)]
        board: Option<PathBuf>,
    },
}

pub fn run(action: BoardAction) -> i32 {
    match execute(action) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn execute(action: BoardAction) -> Result<(), CoreError> {
    match action {
        BoardAction::Show { board, json } => {
            let board = load_board(&board_path(board))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&board)?);
                return Ok(());
            }
            if board.is_empty() {
                println!("No timers.");
                return Ok(());
            }
            let now = Local::now();
            println!("{} timer(s), generation {}:", board.len(), board.generation);
            for timer in &board.timers {
                let remaining = timer.remaining(now);
                let state = if timer.is_dismissed {
                    "dismissed"
                } else if timer.is_expired || remaining.num_seconds() <= 0 {
                    "expired"
                } else {
                    "running"
                };
                println!(
                    "  {}  {:28}  {}  [{}]  ({:.0}, {:.0})",
                    timer.id,
                    timer.original_text,
                    timer.target_time.format("%Y-%m-%d %H:%M"),
                    state,
                    timer.anchor.x,
                    timer.anchor.y,
                );
            }
            Ok(())
        }
        BoardAction::Reconcile {
            region,
            observations,
            board: board_override,
            dry_run,
            json,
        } => {
            let scan_region = parse_region(&region)?;
            let content = std::fs::read_to_string(&observations)?;
            let observations: Vec<OcrObservation> = serde_json::from_str(&content)?;

            let settings = Settings::load().unwrap_or_default();
            let engine = ReconcileEngine::with_config(
                EngineConfig::new().with_match_distance(settings.match_distance),
            );

            let path = board_path(board_override);
            let mut board = load_board(&path)?;
            let delta = engine.reconcile(
                scan_region,
                &observations,
                &board.timers,
                &DefaultInkSampler,
                Local::now(),
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&delta)?);
            } else {
                println!("{}", delta.summary());
            }
            if !dry_run {
                board.apply(delta);
                save_board(&path, &board)?;
            }
            Ok(())
        }
        BoardAction::Remove { id, board } => {
            let path = board_path(board);
            let mut board = load_board(&path)?;
            match board.remove(id) {
                Some(timer) => {
                    save_board(&path, &board)?;
                    println!("Removed {:?}.", timer.original_text);
                    Ok(())
                }
                None => Err(CoreError::Custom(format!("no timer with id {id}"))),
            }
        }
        BoardAction::Sweep { board, json } => {
            let path = board_path(board);
            let mut board = load_board(&path)?;
            let expired = board.sweep_expired(Local::now());
            save_board(&path, &board)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&expired)?);
            } else if expired.is_empty() {
                println!("Nothing newly expired.");
            } else {
                for id in &expired {
                    if let Some(timer) = board.get(*id) {
                        println!("Expired: {}  {:?}", id, timer.original_text);
                    }
                }
            }
            Ok(())
        }
        BoardAction::Clear { board } => {
            let path = board_path(board);
            let mut board = load_board(&path)?;
            board.timers.clear();
            // The generation stays monotonic across a wipe.
            board.generation += 1;
            save_board(&path, &board)?;
            println!("Board cleared.");
            Ok(())
        }
    }
}
