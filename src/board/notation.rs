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

//! Text forms of positions and moves understood by analysis engines.
//!
//! Positions are written as FEN. This crate tracks neither castling
//! rights nor en passant, so those fields are always `-`, and the move
//! counters are always `0 1`.

use anyhow::Result;
use thiserror::Error;

use super::material::{Color, Material, Piece};
use super::position::Board;
use super::square::Square;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Invalid piece placement: {0}")]
    InvalidPlacement(String),
    #[error("Invalid side to move: {0:?}")]
    InvalidTurn(String),
    #[error("Invalid FEN: expected at most 6 fields, got {0}")]
    TooManyFields(usize),
    #[error("Invalid coordinate move: {0:?}")]
    InvalidMove(String),
}

/// Trailing FEN fields: no castling, no en passant, fresh counters.
const FEN_SUFFIX: &str = "- - 0 1";

impl Board {
    /// The piece placement field of FEN, rank 8 first.
    pub fn to_fen_placement(&self) -> String {
        let mut fen = String::with_capacity(64);
        for row in 0..8 {
            if row > 0 {
                fen.push('/');
            }
            let mut empty = 0;
            for col in 0..8 {
                match self.get(Square::from_index(row * 8 + col)) {
                    Some(material) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(material.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
        }
        fen
    }

    /// Full FEN for this board with `turn` to move.
    pub fn to_fen(&self, turn: Color) -> String {
        format!(
            "{} {} {}",
            self.to_fen_placement(),
            turn.to_fen_char(),
            FEN_SUFFIX
        )
    }

    pub fn from_fen_placement(placement: &str) -> Result<Self, NotationError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(NotationError::InvalidPlacement(format!(
                "expected 8 ranks, got {}",
                rows.len()
            )));
        }
        let mut board = Board::empty();
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0;
            for c in text.chars() {
                if let Some(run) = c.to_digit(10).filter(|run| (1..=8).contains(run)) {
                    col += run as usize;
                } else if let Some(material) = Material::from_fen_char(c) {
                    if col < 8 {
                        board.set(Square::from_index(row * 8 + col), Some(material));
                    }
                    col += 1;
                } else {
                    return Err(NotationError::InvalidPlacement(format!(
                        "invalid character {c:?} in rank {}",
                        8 - row
                    )));
                }
            }
            if col != 8 {
                return Err(NotationError::InvalidPlacement(format!(
                    "rank {} has {col} squares, expected 8",
                    8 - row
                )));
            }
        }
        Ok(board)
    }

    /// Reads a FEN string. Only placement and side to move are used;
    /// the side to move defaults to White when absent.
    pub fn from_fen(fen: &str) -> Result<(Self, Color)> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() > 6 {
            return Err(NotationError::TooManyFields(fields.len()).into());
        }
        let placement = fields
            .first()
            .ok_or_else(|| NotationError::InvalidPlacement(fen.to_string()))?;
        let board = Self::from_fen_placement(placement)?;
        let turn = match fields.get(1) {
            None | Some(&"w") => Color::White,
            Some(&"b") => Color::Black,
            Some(other) => return Err(NotationError::InvalidTurn(other.to_string()).into()),
        };
        Ok((board, turn))
    }
}

impl TryFrom<String> for Board {
    type Error = NotationError;

    fn try_from(placement: String) -> Result<Self, Self::Error> {
        Self::from_fen_placement(&placement)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_fen_placement()
    }
}

/// Parses an engine move such as `"e2e4"` or `"e7e8q"`. A promotion
/// letter is checked but otherwise ignored: pawns always become queens.
pub fn parse_coordinate_move(text: &str) -> Result<(Square, Square)> {
    let invalid = || NotationError::InvalidMove(text.to_string());
    let chars: Vec<char> = text.chars().collect();
    if !(4..=5).contains(&chars.len()) {
        return Err(invalid().into());
    }
    let from = Square::from_chars(chars[0], chars[1]).ok_or_else(invalid)?;
    let to = Square::from_chars(chars[2], chars[3]).ok_or_else(invalid)?;
    if let Some(&promotion) = chars.get(4) {
        match Piece::from_char(promotion) {
            Some(piece) if !piece.is_king() && !piece.is_pawn() => {}
            _ => return Err(invalid().into()),
        }
    }
    Ok((from, to))
}

pub fn format_coordinate_move(from: Square, to: Square) -> String {
    format!("{from}{to}")
}
