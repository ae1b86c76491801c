use boardsight_core::SquarePosition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geometric move: where the moving piece started and where it landed.
///
/// Never carries a promotion piece; occupancy cannot tell piece types apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCandidate {
    pub start: SquarePosition,
    pub end: SquarePosition,
}

impl MoveCandidate {
    pub fn new(start: SquarePosition, end: SquarePosition) -> Self {
        Self { start, end }
    }
}

/// Four-character coordinate notation, e.g. `e2e4`.
impl fmt::Display for MoveCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)
    }
}
