// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! King safety.
//!
//! Attack tests use [`is_pseudo_legal_move`] rather than the full move
//! rules. An attacking king is therefore never itself safety-checked,
//! which keeps the evaluation from recursing.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::geometry::neighbors;
use super::material::{Color, Material, Piece};
use super::moves::{has_legal_move, is_pseudo_legal_move, MoveError};
use super::position::Board;
use super::square::{Mask, Square};

/// Outcome of testing one proposed move against its own king.
///
/// `checkmate` is only ever set for a king move that walks into an
/// attack with nowhere safe to go from the destination. It describes
/// that single move and says nothing about the game.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct KingSafety {
    pub safe: bool,
    pub checkmate: bool,
}

/// Check state of one side in a position.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct KingStatus {
    pub in_check: bool,
    pub checkmate: bool,
}

/// True if any piece of color `by` attacks `square`.
pub fn is_attacked(board: &Board, square: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, material)| is_pseudo_legal_move(board, material, from, square))
}

/// Plays `material` from `from` to `to` on a scratch copy and reports
/// whether the mover's king is attacked afterwards.
///
/// # Errors
///
/// `MoveError::NoKingFound` if the mover is not a king and its side has
/// no king on the board.
pub fn evaluate_king_safety(
    board: &Board,
    material: Material,
    from: Square,
    to: Square,
) -> Result<KingSafety> {
    let color = material.color();
    let simulated = board.simulate(from, to, material);
    let is_king = material.piece().is_king();
    let king = if is_king {
        to
    } else {
        simulated.king(color).ok_or(MoveError::NoKingFound(color))?
    };
    let safe = !is_attacked(&simulated, king, !color);
    let checkmate = is_king && !safe && escape_squares(&simulated, king, color).is_empty();
    trace!(%material, %from, %to, %king, safe, checkmate, "king safety");
    Ok(KingSafety { safe, checkmate })
}

/// Squares next to `king` that a `color` king could step to without
/// being attacked there.
pub fn escape_squares(board: &Board, king: Square, color: Color) -> Mask {
    let material = Material::new(color, Piece::King);
    let mut escapes = Mask::empty();
    for square in neighbors(king).iter() {
        if board.is_occupied_by(square, color) {
            continue;
        }
        let moved = board.simulate(king, square, material);
        if !is_attacked(&moved, square, !color) {
            escapes.insert(square);
        }
    }
    escapes
}

/// Whether `color` is in check, and whether it is mated: in check with
/// no legal move for any of its pieces.
///
/// # Errors
///
/// `MoveError::NoKingFound` if `color` has no king.
pub fn king_status(board: &Board, color: Color) -> Result<KingStatus> {
    let king = board.king(color).ok_or(MoveError::NoKingFound(color))?;
    let in_check = is_attacked(board, king, !color);
    let checkmate = in_check && !has_legal_move(board, color)?;
    Ok(KingStatus {
        in_check,
        checkmate,
    })
}

#[cfg(test)]
mod tests {
    use crate::*;
    use Square::*;

    fn back_rank_mate() -> Board {
        Board::empty()
            .with(G1, Some(Material::WK))
            .with(F2, Some(Material::WP))
            .with(G2, Some(Material::WP))
            .with(H2, Some(Material::WP))
            .with(A1, Some(Material::BR))
            .with(H8, Some(Material::BK))
    }

    #[test]
    fn test_king_walks_into_two_rooks() {
        let board = Board::empty()
            .with(E2, Some(Material::WK))
            .with(A1, Some(Material::BR))
            .with(A2, Some(Material::BR))
            .with(H8, Some(Material::BK));
        let safety = evaluate_king_safety(&board, Material::WK, E2, E1).unwrap();
        assert_eq!(E1.to_index(), 60);
        assert_eq!(
            safety,
            KingSafety {
                safe: false,
                checkmate: true
            }
        );
        assert!(!is_legal_move(&board, Material::WK, E2, E1));
    }
    #[test]
    fn test_king_into_attack_with_escape() {
        let board = Board::empty()
            .with(E2, Some(Material::WK))
            .with(A1, Some(Material::BR))
            .with(H8, Some(Material::BK));
        let safety = evaluate_king_safety(&board, Material::WK, E2, E1).unwrap();
        assert!(!safety.safe);
        assert!(!safety.checkmate);
    }
    #[test]
    fn test_safe_move() {
        let board = Board::standard();
        let safety = evaluate_king_safety(&board, Material::WP, E2, E4).unwrap();
        assert_eq!(
            safety,
            KingSafety {
                safe: true,
                checkmate: false
            }
        );
    }
    #[test]
    fn test_pinned_piece_exposes_king() {
        let board = Board::empty()
            .with(E1, Some(Material::WK))
            .with(E2, Some(Material::WB))
            .with(E8, Some(Material::BR))
            .with(A8, Some(Material::BK));
        let safety = evaluate_king_safety(&board, Material::WB, E2, D3).unwrap();
        assert!(!safety.safe);
        assert!(!safety.checkmate);
    }
    #[test]
    fn test_capturing_the_attacker_is_safe() {
        let board = Board::empty()
            .with(E1, Some(Material::WK))
            .with(A5, Some(Material::WQ))
            .with(E5, Some(Material::BR))
            .with(A8, Some(Material::BK));
        let safety = evaluate_king_safety(&board, Material::WQ, A5, E5).unwrap();
        assert!(safety.safe);
    }
    #[test]
    fn test_no_king_found() {
        let board = Board::empty()
            .with(A1, Some(Material::WR))
            .with(H8, Some(Material::BK));
        let err = evaluate_king_safety(&board, Material::WR, A1, A4).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MoveError>(),
            Some(&MoveError::NoKingFound(Color::White))
        );
    }
    #[test]
    fn test_attackers() {
        let board = Board::standard()
            .with(F3, Some(Material::BN))
            .with(A4, Some(Material::BN))
            .with(F6, Some(Material::WN))
            .with(H5, Some(Material::WN));
        assert!(is_attacked(&board, F3, Color::White));
        assert!(!is_attacked(&board, A4, Color::White));
        assert!(is_attacked(&board, F6, Color::Black));
        assert!(!is_attacked(&board, H5, Color::Black));
    }
    #[test]
    fn test_knights_attack_the_back_rank() {
        let board = Board::standard()
            .with(F3, Some(Material::BN))
            .with(F6, Some(Material::WN));
        assert!(is_attacked(&board, E8, Color::White));
        assert!(is_attacked(&board, E1, Color::Black));
        assert!(!is_attacked(&board, E8, Color::Black));
        assert!(!is_attacked(&board, E1, Color::White));
    }
    #[test]
    fn test_pawn_attacks_only_diagonally() {
        let board = Board::empty()
            .with(E4, Some(Material::BP))
            .with(D3, Some(Material::WK))
            .with(E3, Some(Material::WN));
        assert!(is_attacked(&board, D3, Color::Black));
        assert!(!is_attacked(&board, E3, Color::Black));
    }
    #[test]
    fn test_attacking_king_is_not_safety_checked() {
        // the black king defends D5 even though stepping there would expose it
        let board = Board::empty()
            .with(E6, Some(Material::BK))
            .with(D5, Some(Material::WQ))
            .with(D1, Some(Material::WR))
            .with(A1, Some(Material::WK));
        assert!(is_attacked(&board, D5, Color::Black));
    }
    #[test]
    fn test_escape_squares() {
        let board = back_rank_mate();
        assert!(escape_squares(&board, G1, Color::White).is_empty());
        let board = board.with(H2, None);
        let escapes = escape_squares(&board, G1, Color::White);
        assert_eq!(escapes.len(), 1);
        assert!(escapes.contains(H2));
    }
    #[test]
    fn test_back_rank_mate() {
        let status = king_status(&back_rank_mate(), Color::White).unwrap();
        assert_eq!(
            status,
            KingStatus {
                in_check: true,
                checkmate: true
            }
        );
        let status = king_status(&back_rank_mate(), Color::Black).unwrap();
        assert_eq!(status, KingStatus::default());
    }
    #[test]
    fn test_check_that_can_be_answered() {
        let board = back_rank_mate().with(A7, Some(Material::WR));
        let status = king_status(&board, Color::White).unwrap();
        assert!(status.in_check);
        assert!(!status.checkmate);
    }
    #[test]
    fn test_king_status_without_king() {
        let board = Board::empty().with(H8, Some(Material::BK));
        assert!(king_status(&board, Color::White).is_err());
    }
}
