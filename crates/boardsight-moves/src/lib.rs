//! Move inference from successive board occupancy grids.
//!
//! Occupancy only says whether a square is empty, light or dark, so a move is
//! recovered from *which* squares changed:
//!
//! - [`infer_move`] maps a two-grid diff to a geometric [`MoveCandidate`].
//! - [`resolve_move`] turns it into a legal `shakmaty` move.
//! - [`GameTracker`] debounces a stream of observed grids into moves.
//! - [`replay_pgn`] checks inference against every ply of a recorded game.
//!
//! ```
//! use boardsight_moves::{grid_from_position, infer_move};
//! use shakmaty::{uci::UciMove, Chess, Position};
//!
//! let start = Chess::default();
//! let m = "g1f3".parse::<UciMove>().unwrap().to_move(&start).unwrap();
//! let after = start.clone().play(m).unwrap();
//!
//! let candidate = infer_move(&grid_from_position(&start), &grid_from_position(&after)).unwrap();
//! assert_eq!(candidate.to_string(), "g1f3");
//! ```

mod candidate;
mod diff;
mod infer;
mod replay;
mod rules;
mod tracker;

pub use candidate::MoveCandidate;
pub use diff::DiffSet;
pub use infer::{
    infer_move, DiffRejection, DiffShape, InferError, KINGSIDE_ROOK_COLUMN, KING_COLUMN,
    QUEENSIDE_ROOK_COLUMN,
};
pub use replay::{replay_pgn, replay_pgn_from, ReplayError, ReplayReport};
pub use rules::{
    grid_from_board, grid_from_position, position_of, resolve_move, square_of, RulesError,
};
pub use tracker::{GameTracker, Observation, TrackError, TrackerParams};

pub use shakmaty;
