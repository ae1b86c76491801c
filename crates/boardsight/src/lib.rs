//! High-level facade crate for the `boardsight-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core, vision and move-inference crates
//! - [`BoardSightConfig`], the JSON-loadable configuration for the whole pipeline
//! - [`Session`], which turns a stream of camera frames into moves
//! - (feature `image`) helpers that read boards straight from `image::RgbImage`
//!
//! ## Quickstart
//!
//! ```no_run
//! use boardsight::{detect, BoardSightConfig};
//! use boardsight::vision::BoardReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BoardSightConfig::default();
//! let reader = BoardReader::new(config.vision);
//! let frame = detect::load_rgb("frame.png")?;
//! let reading = detect::read_board(&reader, &frame)?;
//! print!("{}", boardsight::core::render_grid(&reading.grid));
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `boardsight::core`: pixel buffers, color masks, homography, occupancy grid.
//! - `boardsight::vision`: corner-marker localization and cell classification.
//! - `boardsight::moves`: move inference, rules bridge, game tracker, PGN replay.
//! - `boardsight::detect` (feature `image`): end-to-end helpers from `image::RgbImage`.

pub use boardsight_core as core;
pub use boardsight_moves as moves;
pub use boardsight_vision as vision;

pub use boardsight_core::{Occupancy, OccupancyGrid, SquarePosition};
pub use boardsight_moves::{infer_move, GameTracker, MoveCandidate, Observation};
pub use boardsight_vision::{BoardReader, VisionParams};

mod config;
mod session;

pub use config::{BoardSightConfig, ConfigError};
pub use session::{FrameOutcome, Session, SessionError};

#[cfg(feature = "image")]
pub mod detect;
