//! Move inference from the difference between two occupancy grids.
//!
//! The number of changed squares selects the move shape:
//! - 2: ordinary move or capture (one square vacated, one gained or recolored)
//! - 3: en-passant capture (capturing pawn, landing square, captured pawn)
//! - 4: castling (king and rook both relocate)
//!
//! Every other size is rejected. Each shape then checks its own occupancy
//! predicates and rejects anything that is not unique.

use crate::{DiffSet, MoveCandidate};
use boardsight_core::{OccupancyGrid, SquarePosition};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Column the king starts on for castling.
pub const KING_COLUMN: usize = 4;
pub const QUEENSIDE_ROOK_COLUMN: usize = 0;
pub const KINGSIDE_ROOK_COLUMN: usize = 7;

/// Move shapes distinguishable from a diff, keyed on its size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffShape {
    Simple,
    EnPassant,
    Castle,
}

impl DiffShape {
    pub fn from_len(changed: usize) -> Option<Self> {
        match changed {
            2 => Some(DiffShape::Simple),
            3 => Some(DiffShape::EnPassant),
            4 => Some(DiffShape::Castle),
            _ => None,
        }
    }
}

/// Why a diff could not be mapped to a move.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffRejection {
    #[error("no single move changes this many squares")]
    UnsupportedSize,
    #[error("expected exactly one vacated square, found {vacated}")]
    VacatedCount { vacated: usize },
    #[error("expected exactly one occupied landing square, found {occupied}")]
    LandingCount { occupied: usize },
    #[error("expected exactly one origin holding the mover's color, found {origins}")]
    OriginCount { origins: usize },
    #[error("expected one king-file and one rook-file square, found {king} and {rook}")]
    CastlingSquares { king: usize, rook: usize },
}

/// Errors returned by move inference.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferError {
    /// The observed change is noise or not a supported move. Expected and
    /// frequent; callers wait for a further stable frame.
    #[error("ambiguous or illegal diff of {squares} squares: {reason}")]
    AmbiguousOrIllegalDiff {
        squares: usize,
        reason: DiffRejection,
    },
}

/// Infer the single move that turns `old` into `new`.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(old, new)))]
pub fn infer_move(old: &OccupancyGrid, new: &OccupancyGrid) -> Result<MoveCandidate, InferError> {
    let diff = DiffSet::between(old, new);
    let shape = DiffShape::from_len(diff.len());
    debug!("diff {:?} -> {:?}", diff.squares(), shape);

    let result = match shape {
        Some(DiffShape::Simple) => simple_move(&diff, new),
        Some(DiffShape::EnPassant) => en_passant(&diff, old, new),
        Some(DiffShape::Castle) => castle(&diff),
        None => Err(DiffRejection::UnsupportedSize),
    };
    result.map_err(|reason| InferError::AmbiguousOrIllegalDiff {
        squares: diff.len(),
        reason,
    })
}

fn simple_move(diff: &DiffSet, new: &OccupancyGrid) -> Result<MoveCandidate, DiffRejection> {
    let vacated = diff.filter(|p| new[p].is_empty());
    let [start] = vacated[..] else {
        return Err(DiffRejection::VacatedCount {
            vacated: vacated.len(),
        });
    };
    let [end] = diff.filter(|p| p != start)[..] else {
        unreachable!("two-square diff with one vacated square has one other square");
    };
    Ok(MoveCandidate::new(start, end))
}

fn en_passant(
    diff: &DiffSet,
    old: &OccupancyGrid,
    new: &OccupancyGrid,
) -> Result<MoveCandidate, DiffRejection> {
    let landed = diff.filter(|p| !new[p].is_empty());
    let [end] = landed[..] else {
        return Err(DiffRejection::LandingCount {
            occupied: landed.len(),
        });
    };

    // the captured pawn's square held the other color, so only the
    // capturing pawn's origin matches the landing square's new color
    let mover = new[end];
    let origins = diff.filter(|q| q != end && old[q] == mover);
    let [start] = origins[..] else {
        return Err(DiffRejection::OriginCount {
            origins: origins.len(),
        });
    };
    Ok(MoveCandidate::new(start, end))
}

fn castle(diff: &DiffSet) -> Result<MoveCandidate, DiffRejection> {
    let king = diff.filter(|p| p.col == KING_COLUMN);
    let rook = diff.filter(|p| p.col == QUEENSIDE_ROOK_COLUMN || p.col == KINGSIDE_ROOK_COLUMN);
    let ([p], [q]) = (&king[..], &rook[..]) else {
        return Err(DiffRejection::CastlingSquares {
            king: king.len(),
            rook: rook.len(),
        });
    };

    let target_col = match q.col {
        QUEENSIDE_ROOK_COLUMN => 2,
        KINGSIDE_ROOK_COLUMN => 6,
        other => unreachable!("rook square on column {other} is on neither home column"),
    };
    Ok(MoveCandidate::new(*p, SquarePosition::new(p.row, target_col)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardsight_core::Occupancy;

    fn grid(text: &str) -> OccupancyGrid {
        OccupancyGrid::parse(text).expect("grid")
    }

    fn sq(row: usize, col: usize) -> SquarePosition {
        SquarePosition::new(row, col)
    }

    fn rejection(old: &OccupancyGrid, new: &OccupancyGrid) -> DiffRejection {
        match infer_move(old, new) {
            Err(InferError::AmbiguousOrIllegalDiff { reason, .. }) => reason,
            Ok(m) => panic!("expected rejection, got {m}"),
        }
    }

    const START: &str = "
        xxxxxxxx
        xxxxxxxx
        ........
        ........
        ........
        ........
        oooooooo
        oooooooo";

    #[test]
    fn unchanged_grid_is_rejected() {
        let g = grid(START);
        assert_eq!(
            infer_move(&g, &g),
            Err(InferError::AmbiguousOrIllegalDiff {
                squares: 0,
                reason: DiffRejection::UnsupportedSize
            })
        );
    }

    #[test]
    fn single_square_change_is_rejected() {
        let old = OccupancyGrid::default();
        let new = OccupancyGrid::from_fn(|p| {
            if p == sq(4, 4) {
                Occupancy::Light
            } else {
                Occupancy::Empty
            }
        });
        assert_eq!(
            infer_move(&old, &new),
            Err(InferError::AmbiguousOrIllegalDiff {
                squares: 1,
                reason: DiffRejection::UnsupportedSize
            })
        );
    }

    #[test]
    fn two_square_advance_of_a_dark_piece() {
        let old = OccupancyGrid::from_fn(|p| {
            if p == sq(6, 4) {
                Occupancy::Dark
            } else {
                Occupancy::Empty
            }
        });
        let new = OccupancyGrid::from_fn(|p| {
            if p == sq(4, 4) {
                Occupancy::Dark
            } else {
                Occupancy::Empty
            }
        });
        assert_eq!(
            infer_move(&old, &new),
            Ok(MoveCandidate::new(sq(6, 4), sq(4, 4)))
        );
    }

    #[test]
    fn capture_recolors_the_destination() {
        let old = grid(
            "........
             ........
             ........
             ...x....
             ....o...
             ........
             ........
             ........",
        );
        let new = grid(
            "........
             ........
             ........
             ...o....
             ........
             ........
             ........
             ........",
        );
        let m = infer_move(&old, &new).expect("move");
        assert_eq!(m.to_string(), "e4d5");
    }

    #[test]
    fn two_squares_both_gaining_pieces_is_rejected() {
        let old = OccupancyGrid::default();
        let new = OccupancyGrid::from_fn(|p| {
            if p == sq(3, 3) || p == sq(4, 4) {
                Occupancy::Light
            } else {
                Occupancy::Empty
            }
        });
        assert_eq!(
            rejection(&old, &new),
            DiffRejection::VacatedCount { vacated: 0 }
        );
    }

    #[test]
    fn two_squares_both_vacated_is_rejected() {
        let old = OccupancyGrid::from_fn(|p| {
            if p == sq(3, 3) || p == sq(4, 4) {
                Occupancy::Light
            } else {
                Occupancy::Empty
            }
        });
        let new = OccupancyGrid::default();
        assert_eq!(
            rejection(&old, &new),
            DiffRejection::VacatedCount { vacated: 2 }
        );
    }

    #[test]
    fn en_passant_returns_the_capturing_pawn_only() {
        // light pawn e5 takes d6 en passant, dark pawn on d5 disappears
        let old = grid(
            "........
             ........
             ........
             ...xo...
             ........
             ........
             ........
             ........",
        );
        let new = grid(
            "........
             ........
             ...o....
             ........
             ........
             ........
             ........
             ........",
        );
        assert_eq!(
            infer_move(&old, &new),
            Ok(MoveCandidate::new(sq(3, 4), sq(2, 3)))
        );
    }

    #[test]
    fn three_square_diff_with_two_landings_is_rejected() {
        let old = grid(
            "........
             ........
             ........
             ....o...
             ........
             ........
             ........
             ........",
        );
        let new = grid(
            "........
             ........
             ...o.o..
             ........
             ........
             ........
             ........
             ........",
        );
        assert_eq!(
            rejection(&old, &new),
            DiffRejection::LandingCount { occupied: 2 }
        );
    }

    #[test]
    fn three_square_diff_without_a_unique_origin_is_rejected() {
        // two light squares vacate, one light square lands
        let old = grid(
            "........
             ........
             ........
             ...oo...
             ........
             ........
             ........
             ........",
        );
        let new = grid(
            "........
             ........
             ...o....
             ........
             ........
             ........
             ........
             ........",
        );
        assert_eq!(
            rejection(&old, &new),
            DiffRejection::OriginCount { origins: 2 }
        );
    }

    #[test]
    fn kingside_castle_reports_the_king_move() {
        let old = grid(
            "........
             ........
             ........
             ........
             ........
             ........
             ........
             ....o..o",
        );
        let new = grid(
            "........
             ........
             ........
             ........
             ........
             ........
             ........
             .....oo.",
        );
        assert_eq!(
            infer_move(&old, &new),
            Ok(MoveCandidate::new(sq(7, 4), sq(7, 6)))
        );
    }

    #[test]
    fn queenside_castle_reports_the_king_move() {
        let old = grid(
            "x...x...
             ........
             ........
             ........
             ........
             ........
             ........
             ........",
        );
        let new = grid(
            "..xx....
             ........
             ........
             ........
             ........
             ........
             ........
             ........",
        );
        assert_eq!(
            infer_move(&old, &new).map(|m| m.to_string()),
            Ok("e8c8".to_string())
        );
    }

    #[test]
    fn four_square_diff_without_a_king_file_square_is_rejected() {
        let old = grid(
            "........
             ........
             ........
             ........
             ........
             ........
             ........
             oo....oo",
        );
        let new = OccupancyGrid::default();
        assert_eq!(
            rejection(&old, &new),
            DiffRejection::CastlingSquares { king: 0, rook: 2 }
        );
    }

    #[test]
    fn five_or_more_changes_are_rejected() {
        let old = grid(START);
        let new = OccupancyGrid::default();
        assert_eq!(rejection(&old, &new), DiffRejection::UnsupportedSize);
    }
}
