//! Frame-by-frame game tracking with settle debounce.
//!
//! A hand moving a piece produces a burst of transient grids. The tracker only
//! commits a move after the same changed grid has been observed on
//! `stable_frames + 1` consecutive frames, and backs off for `retry_frames`
//! after a failed inference or an unlocatable board.

use crate::{grid_from_position, infer_move, resolve_move, InferError, RulesError};
use boardsight_core::OccupancyGrid;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use shakmaty::{CastlingMode, Chess, Move, Position};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerParams {
    /// Extra identical frames required before a change is committed.
    pub stable_frames: u32,
    /// Countdown installed after a failure.
    pub retry_frames: u32,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            stable_frames: 5,
            retry_frames: 15,
        }
    }
}

/// Result of feeding one grid to [`GameTracker::observe`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Observation {
    /// Grid matches the game or is still changing.
    Waiting,
    /// Grid is stable and differs from the game; `remaining` more frames to go.
    Settling { remaining: u32 },
    /// A move was inferred, validated and played.
    Moved(Move),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    #[error(transparent)]
    Infer(#[from] InferError),
    #[error(transparent)]
    Rules(#[from] RulesError),
}

#[derive(Clone, Debug)]
pub struct GameTracker {
    params: TrackerParams,
    position: Chess,
    current: OccupancyGrid,
    cached: OccupancyGrid,
    countdown: u32,
}

impl GameTracker {
    /// Tracker for a game from the standard starting position.
    pub fn new(params: TrackerParams) -> Self {
        Self::from_position(params, Chess::default())
    }

    pub fn from_position(params: TrackerParams, position: Chess) -> Self {
        let current = grid_from_position(&position);
        Self {
            params,
            position,
            current,
            cached: current,
            countdown: params.stable_frames,
        }
    }

    pub fn params(&self) -> &TrackerParams {
        &self.params
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Occupancy implied by the rules position.
    pub fn current_grid(&self) -> &OccupancyGrid {
        &self.current
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn is_game_over(&self) -> bool {
        self.position.is_game_over()
    }

    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, grid), fields(countdown = self.countdown)))]
    pub fn observe(&mut self, grid: OccupancyGrid) -> Result<Observation, TrackError> {
        if grid != self.cached || grid == self.current {
            self.cached = grid;
            self.countdown = self.params.stable_frames;
            return Ok(Observation::Waiting);
        }

        if self.countdown > 0 {
            self.countdown -= 1;
            return Ok(Observation::Settling {
                remaining: self.countdown,
            });
        }

        match self.commit(&grid) {
            Ok(m) => {
                self.countdown = self.params.stable_frames;
                Ok(Observation::Moved(m))
            }
            Err(err) => {
                warn!("no move committed: {err}");
                self.countdown = self.params.retry_frames;
                Err(err)
            }
        }
    }

    /// Frame in which the board could not be located.
    pub fn board_not_found(&mut self) {
        debug!("board not found, backing off {} frames", self.params.retry_frames);
        self.countdown = self.params.retry_frames;
    }

    /// Play a move made outside the camera's view, e.g. an engine reply
    /// announced to the player.
    pub fn apply_reply(&mut self, m: Move) -> Result<(), RulesError> {
        if !self.position.is_legal(m) {
            return Err(RulesError::IllegalReply {
                uci: m.to_uci(CastlingMode::Standard).to_string(),
            });
        }
        self.play(m);
        Ok(())
    }

    fn commit(&mut self, grid: &OccupancyGrid) -> Result<Move, TrackError> {
        let candidate = infer_move(&self.current, grid)?;
        let m = resolve_move(&self.position, candidate)?;
        info!("move {}", m.to_uci(CastlingMode::Standard));
        self.play(m);
        Ok(m)
    }

    fn play(&mut self, m: Move) {
        self.position.play_unchecked(m);
        self.current = grid_from_position(&self.position);
    }
}
