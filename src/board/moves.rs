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

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::debug;

use super::geometry::{
    delta_matches, file_distance, is_king_step, is_knight_jump, same_column, same_diagonal,
    same_row,
};
use super::material::{Color, Material, Piece};
use super::path::reaches;
use super::position::Board;
use super::safety::{evaluate_king_safety, KingSafety};
use super::square::{Mask, Square};

use Piece::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Not a legal move")]
    IllegalMove,
    #[error("No {0} king on the board")]
    NoKingFound(Color),
    #[error("The game is over")]
    GameOver,
}
use MoveError::*;

/// A proposed move: which piece, from where, to where. The piece is
/// named by value and must match what stands on `from`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub material: Material,
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(material: Material, from: Square, to: Square) -> Self {
        Self { material, from, to }
    }

    /// Builds a move for whatever stands on `from`.
    pub fn on(board: &Board, from: Square, to: Square) -> Result<Self> {
        let material = board.get(from).ok_or(IllegalMove)?;
        Ok(Self::new(material, from, to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.material, self.from, self.to)
    }
}

/// Whether `material` standing on `from` may move to `to` on `board`.
///
/// Rooks, bishops, queens, knights and pawns are judged on geometry,
/// blocking and capture color alone. A king move must in addition not
/// leave the king attacked. Whether a non-king move exposes its own
/// king is the controller's concern (see [`validate`]).
pub fn is_legal_move(board: &Board, material: Material, from: Square, to: Square) -> bool {
    if !is_pseudo_legal_move(board, material, from, to) {
        return false;
    }
    if !material.piece().is_king() {
        return true;
    }
    // Safety of a king move never needs to locate the king: it is on `to`
    match evaluate_king_safety(board, material, from, to) {
        Ok(safety) => {
            if safety.checkmate {
                debug!(%from, %to, "king move leaves no safe square");
            }
            safety.safe
        }
        Err(_) => false,
    }
}

/// Geometry, blocking and capture-color rules without any king-safety
/// test. This is what "`material` on `from` attacks `to`" means.
pub fn is_pseudo_legal_move(board: &Board, material: Material, from: Square, to: Square) -> bool {
    let color = material.color();
    if from == to || board.is_occupied_by(to, color) {
        return false;
    }
    match material.piece() {
        Pawn => is_pawn_move(board, color, from, to),
        Knight => is_knight_jump(from, to),
        Bishop => is_bishop_move(board, color, from, to),
        Rook => is_rook_move(board, color, from, to),
        Queen => is_rook_move(board, color, from, to) || is_bishop_move(board, color, from, to),
        King => is_king_step(from, to),
    }
}

fn is_pawn_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let forward = color.forward();
    if board.is_occupied(to) {
        // only the two forward diagonals capture
        return file_distance(from, to) == 1
            && (delta_matches(from, to, forward - 1) || delta_matches(from, to, forward + 1));
    }
    if delta_matches(from, to, forward) {
        return true;
    }
    delta_matches(from, to, 2 * forward)
        && from.rank_index() == color.pawn_row()
        && Square::try_from_signed(from.to_index() as isize + forward)
            .is_some_and(|square| board.is_vacant(square))
}

fn is_rook_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    reaches(board, color, from, to) && (same_row(from, to) || same_column(from, to))
}

fn is_bishop_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    reaches(board, color, from, to) && same_diagonal(from, to)
}

/// Full check of a proposed move: the piece really stands on `from`,
/// the move is legal for its kind, and afterwards the mover's king is
/// not attacked.
///
/// # Errors
///
/// - `MoveError::IllegalMove` for any rules violation.
/// - `MoveError::NoKingFound` if the mover has no king to protect.
pub fn validate(board: &Board, mv: Move) -> Result<KingSafety> {
    if board.get(mv.from) != Some(mv.material) {
        return Err(IllegalMove.into());
    }
    // one safety evaluation covers the king-move rule as well
    if !is_pseudo_legal_move(board, mv.material, mv.from, mv.to) {
        return Err(IllegalMove.into());
    }
    let safety = evaluate_king_safety(board, mv.material, mv.from, mv.to)?;
    if !safety.safe {
        return Err(IllegalMove.into());
    }
    Ok(safety)
}

/// Every square the piece on `from` may legally move to, including
/// the own-king safety test. Empty if `from` is vacant.
pub fn legal_destinations(board: &Board, from: Square) -> Result<Mask> {
    let mut destinations = Mask::empty();
    let Some(material) = board.get(from) else {
        return Ok(destinations);
    };
    for to in Square::iter() {
        if is_pseudo_legal_move(board, material, from, to)
            && evaluate_king_safety(board, material, from, to)?.safe
        {
            destinations.insert(to);
        }
    }
    Ok(destinations)
}

/// Whether `color` has at least one legal move anywhere on the board.
pub fn has_legal_move(board: &Board, color: Color) -> Result<bool> {
    for (from, _) in board.pieces_of(color) {
        if !legal_destinations(board, from)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}
