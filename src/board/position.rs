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

use serde::{Deserialize, Serialize};
use std::ops::Index;
use strum::IntoEnumIterator;

use super::material::{Color, Material, Piece};
use super::square::{File, Mask, Rank, Square, SquareError};

use Piece::*;

/// The contents of all 64 squares. Serialized as a FEN piece placement
/// string (`"rnbqkbnr/pppppppp/8/..."`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    squares: [Option<Material>; 64],
}

/// Fingerprint of a position: placement plus side to move. Two equal
/// keys describe the same position as far as an analysis engine is
/// concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    turn: Color,
    squares: [Option<Material>; 64],
}

impl PositionKey {
    pub fn turn(&self) -> Color {
        self.turn
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// The usual starting layout: Black on the top two rows, White on
    /// the bottom two.
    pub fn standard() -> Self {
        const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Self::empty();
        for file in File::iter() {
            let piece = BACK_RANK[file.to_index()];
            board.set(Square::new(file, Rank::Rank8), Some(Material::black(piece)));
            board.set(Square::new(file, Rank::Rank7), Some(Material::BP));
            board.set(Square::new(file, Rank::Rank2), Some(Material::WP));
            board.set(Square::new(file, Rank::Rank1), Some(Material::white(piece)));
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Material> {
        self.squares[square.to_index()]
    }

    /// Writes `value` to `square` and returns whatever was there.
    #[inline]
    pub fn set(&mut self, square: Square, value: Option<Material>) -> Option<Material> {
        std::mem::replace(&mut self.squares[square.to_index()], value)
    }

    /// Raw-index variant of `get` for callers holding unchecked indices.
    pub fn get_index(&self, index: usize) -> Result<Option<Material>, SquareError> {
        let square = Square::try_from_index(index)?;
        Ok(self.get(square))
    }

    /// Raw-index variant of `set` for callers holding unchecked indices.
    pub fn set_index(
        &mut self,
        index: usize,
        value: Option<Material>,
    ) -> Result<Option<Material>, SquareError> {
        let square = Square::try_from_index(index)?;
        Ok(self.set(square, value))
    }

    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    /// True if `square` holds a piece of `color`.
    #[inline]
    pub fn is_occupied_by(&self, square: Square, color: Color) -> bool {
        matches!(self.get(square), Some(material) if material.color() == color)
    }

    pub fn occupied(&self) -> Mask {
        Mask::from_squares(self.pieces().map(|(square, _)| square))
    }

    pub fn occupied_by(&self, color: Color) -> Mask {
        Mask::from_squares(self.pieces_of(color).map(|(square, _)| square))
    }

    /// Every occupied square with its piece, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Material)> + '_ {
        Square::iter().filter_map(|square| self.get(square).map(|material| (square, material)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Material)> + '_ {
        self.pieces()
            .filter(move |(_, material)| material.color() == color)
    }

    /// Location of `color`'s king, if it has one. With more than one
    /// king on the board the first in index order wins.
    pub fn king(&self, color: Color) -> Option<Square> {
        let king = Material::new(color, King);
        self.pieces()
            .find(|(_, material)| *material == king)
            .map(|(square, _)| square)
    }

    /// A disposable copy of this board with `material` moved from
    /// `from` to `to`. Whatever stood on `to` is gone.
    pub fn simulate(&self, from: Square, to: Square, material: Material) -> Board {
        let mut board = self.clone();
        board.set(from, None);
        board.set(to, Some(material));
        board
    }

    pub fn key(&self, turn: Color) -> PositionKey {
        PositionKey {
            turn,
            squares: self.squares,
        }
    }
}

impl Index<Square> for Board {
    type Output = Option<Material>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index.to_index()]
    }
}

#[cfg(test)]
impl Board {
    pub fn with(mut self, square: Square, value: Option<Material>) -> Self {
        self.set(square, value);
        self
    }
}
