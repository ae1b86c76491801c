//! Bridge between occupancy grids and the `shakmaty` rules engine.
//!
//! Inference only sees geometry; legality, castling rights and game end are
//! the rules engine's business.

use crate::MoveCandidate;
use boardsight_core::{Occupancy, OccupancyGrid, SquarePosition, BOARD_SIZE};
use shakmaty::{uci::UciMove, Board, Chess, Color, File, Move, Position, Rank, Square};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// The geometric move is not legal here. Also covers promotions, whose
    /// piece cannot be told apart from occupancy alone.
    #[error("move {candidate} is not legal in the current position")]
    IllegalMove { candidate: MoveCandidate },
    #[error("reply {uci} is not legal in the current position")]
    IllegalReply { uci: String },
}

/// Square for a grid position; row 0 is rank 8, column 0 is file a.
pub fn square_of(p: SquarePosition) -> Square {
    Square::from_coords(
        File::new(p.col as u32),
        Rank::new((BOARD_SIZE - 1 - p.row) as u32),
    )
}

pub fn position_of(sq: Square) -> SquarePosition {
    SquarePosition::new(
        BOARD_SIZE - 1 - sq.rank().to_u32() as usize,
        sq.file().to_u32() as usize,
    )
}

/// Occupancy a camera would see for `board`: white pieces light, black dark.
pub fn grid_from_board(board: &Board) -> OccupancyGrid {
    OccupancyGrid::from_fn(|p| match board.color_at(square_of(p)) {
        Some(Color::White) => Occupancy::Light,
        Some(Color::Black) => Occupancy::Dark,
        None => Occupancy::Empty,
    })
}

pub fn grid_from_position<P: Position>(pos: &P) -> OccupancyGrid {
    grid_from_board(pos.board())
}

impl MoveCandidate {
    /// UCI form without promotion. Castling is the king's two-square move.
    pub fn to_uci(self) -> UciMove {
        UciMove::Normal {
            from: square_of(self.start),
            to: square_of(self.end),
            promotion: None,
        }
    }
}

/// Legal move in `pos` matching `candidate`.
pub fn resolve_move(pos: &Chess, candidate: MoveCandidate) -> Result<Move, RulesError> {
    candidate
        .to_uci()
        .to_move(pos)
        .map_err(|_| RulesError::IllegalMove { candidate })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{fen::Fen, CastlingMode};

    fn sq(row: usize, col: usize) -> SquarePosition {
        SquarePosition::new(row, col)
    }

    fn from_fen(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .expect("fen")
            .into_position(CastlingMode::Standard)
            .expect("position")
    }

    #[test]
    fn square_mapping_matches_board_orientation() {
        assert_eq!(square_of(sq(0, 0)), Square::A8);
        assert_eq!(square_of(sq(7, 7)), Square::H1);
        assert_eq!(square_of(sq(6, 4)), Square::E2);
        for p in SquarePosition::all() {
            assert_eq!(position_of(square_of(p)), p);
        }
    }

    #[test]
    fn start_position_grid() {
        let grid = grid_from_position(&Chess::default());
        let expected = OccupancyGrid::parse(
            "xxxxxxxx
             xxxxxxxx
             ........
             ........
             ........
             ........
             oooooooo
             oooooooo",
        )
        .expect("grid");
        assert_eq!(grid, expected);
    }

    #[test]
    fn resolves_a_pawn_push() {
        let m = resolve_move(&Chess::default(), MoveCandidate::new(sq(6, 4), sq(4, 4)))
            .expect("legal");
        assert_eq!(m.from(), Some(Square::E2));
        assert_eq!(m.to(), Square::E4);
    }

    #[test]
    fn resolves_king_two_step_as_castling() {
        let pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let m = resolve_move(&pos, MoveCandidate::new(sq(7, 4), sq(7, 6))).expect("legal");
        assert!(m.is_castle());
    }

    #[test]
    fn resolves_en_passant() {
        let pos = from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let m = resolve_move(&pos, MoveCandidate::new(sq(3, 4), sq(2, 3))).expect("legal");
        assert!(m.is_en_passant());
    }

    #[test]
    fn rejects_illegal_geometry() {
        let candidate = MoveCandidate::new(sq(6, 4), sq(3, 4));
        assert_eq!(
            resolve_move(&Chess::default(), candidate),
            Err(RulesError::IllegalMove { candidate })
        );
    }

    #[test]
    fn promotion_without_a_piece_is_rejected() {
        let pos = from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        let candidate = MoveCandidate::new(sq(1, 4), sq(0, 4));
        assert!(resolve_move(&pos, candidate).is_err());
    }
}
