//! Per-frame driver: read the board, feed the grid to the game tracker.

use crate::config::BoardSightConfig;
use crate::core::RgbImageView;
use crate::moves::shakmaty::{Chess, Move};
use crate::moves::{GameTracker, Observation, RulesError, TrackError};
use crate::vision::{BoardReader, CornerSet, ReadError};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Track(#[from] TrackError),
}

/// What one camera frame did to the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No board in view; the tracker backs off.
    BoardNotFound,
    Observed {
        corners: CornerSet,
        observation: Observation,
    },
}

pub struct Session {
    reader: BoardReader,
    tracker: GameTracker,
}

impl Session {
    pub fn new(config: &BoardSightConfig) -> Self {
        Self::with_position(config, Chess::default())
    }

    pub fn with_position(config: &BoardSightConfig, position: Chess) -> Self {
        Self {
            reader: BoardReader::new(config.vision.clone()),
            tracker: GameTracker::from_position(config.tracker, position),
        }
    }

    pub fn reader(&self) -> &BoardReader {
        &self.reader
    }

    pub fn tracker(&self) -> &GameTracker {
        &self.tracker
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(width = frame.width, height = frame.height))
    )]
    pub fn process_frame(&mut self, frame: &RgbImageView<'_>) -> Result<FrameOutcome, SessionError> {
        let reading = match self.reader.read(frame) {
            Ok(reading) => reading,
            Err(err) => {
                self.tracker.board_not_found();
                if err.is_board_not_found() {
                    debug!("{err}");
                    return Ok(FrameOutcome::BoardNotFound);
                }
                return Err(err.into());
            }
        };
        let observation = self.tracker.observe(reading.grid)?;
        Ok(FrameOutcome::Observed {
            corners: reading.corners,
            observation,
        })
    }

    /// Play the opponent's reply so the next observed grid is compared
    /// against the position after it.
    pub fn apply_reply(&mut self, m: Move) -> Result<(), RulesError> {
        self.tracker.apply_reply(m)
    }

    pub fn is_game_over(&self) -> bool {
        self.tracker.is_game_over()
    }
}
