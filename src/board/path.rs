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

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use super::geometry::step;
use super::material::Color;
use super::position::Board;
use super::square::{Mask, Square};

/// Squares strictly between `from` and `to` when they share a row,
/// column or diagonal. Empty otherwise.
#[inline]
pub fn between(from: Square, to: Square) -> Mask {
    SQUARES_BETWEEN[from.to_index() * 64 + to.to_index()]
}

/// True if any square strictly between `from` and `to` is occupied,
/// whatever its color. Squares that are not on a common line are
/// never blocked.
#[inline]
pub fn is_blocked(board: &Board, from: Square, to: Square) -> bool {
    !(between(from, to) & board.occupied()).is_empty()
}

/// True if a `color` slider on `from` can land on `to`: nothing in the
/// way, and `to` is either empty or holds an opposing piece.
pub fn reaches(board: &Board, color: Color, from: Square, to: Square) -> bool {
    !is_blocked(board, from, to) && !board.is_occupied_by(to, color)
}

static SQUARES_BETWEEN: Lazy<Vec<Mask>> = Lazy::new(|| {
    fn squares_between(start: Square, end: Square) -> Mask {
        let mut mask = Mask::empty();
        if let Some(step) = step(start, end) {
            let end = end.to_index() as isize;
            let mut index = start.to_index() as isize + step;
            while index != end {
                // `step` lines up with `end`, so the walk stays on the board
                if let Some(square) = Square::try_from_signed(index) {
                    mask.insert(square);
                }
                index += step;
            }
        }
        mask
    }

    let mut table = vec![Mask::empty(); 64 * 64];
    for start in Square::iter() {
        for end in Square::iter() {
            table[start.to_index() * 64 + end.to_index()] = squares_between(start, end);
        }
    }
    table
});
