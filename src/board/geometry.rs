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

//! Arithmetic on square indices. Nothing in here knows about pieces.
//!
//! Fixed-offset moves are expressed as index deltas (`-8` is one row
//! up, `-7` one row up and one column right, and so on). Index deltas
//! alone would let a king on the h-file "step" onto the a-file of the
//! next row, so every offset predicate also bounds the file distance.

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use super::square::{Direction, Mask, Square};

/// Index deltas of a king step (either sign).
pub const KING_OFFSETS: [isize; 4] = [1, 7, 8, 9];

/// Index deltas of a knight jump (either sign).
pub const KNIGHT_OFFSETS: [isize; 4] = [6, 10, 15, 17];

#[inline]
pub fn same_row(from: Square, to: Square) -> bool {
    from.rank_index() == to.rank_index()
}

#[inline]
pub fn same_column(from: Square, to: Square) -> bool {
    from.file_index() == to.file_index()
}

#[inline]
pub fn same_diagonal(from: Square, to: Square) -> bool {
    row_distance(from, to) == file_distance(from, to)
}

#[inline]
pub fn row_distance(from: Square, to: Square) -> usize {
    from.rank_index().abs_diff(to.rank_index())
}

#[inline]
pub fn file_distance(from: Square, to: Square) -> usize {
    from.file_index().abs_diff(to.file_index())
}

/// `to - from` as a signed index delta.
#[inline]
pub fn delta(from: Square, to: Square) -> isize {
    to.to_index() as isize - from.to_index() as isize
}

/// Index increment that walks from `from` towards `to`: `±1` along a
/// row, `±8` along a column, `±7`/`±9` along a diagonal. `None` when
/// the squares are equal or not on a common line.
pub fn step(from: Square, to: Square) -> Option<isize> {
    if from == to {
        return None;
    }
    let rows = to.rank_index() as isize - from.rank_index() as isize;
    let cols = to.file_index() as isize - from.file_index() as isize;
    if rows == 0 || cols == 0 || rows.abs() == cols.abs() {
        Some(rows.signum() * 8 + cols.signum())
    } else {
        None
    }
}

#[inline]
pub fn delta_matches(from: Square, to: Square, offset: isize) -> bool {
    delta(from, to) == offset
}

#[inline]
pub fn delta_matches_either(from: Square, to: Square, offset: isize) -> bool {
    delta_matches(from, to, offset) || delta_matches(from, to, -offset)
}

/// One square in any of the eight directions.
pub fn is_king_step(from: Square, to: Square) -> bool {
    file_distance(from, to) <= 1
        && KING_OFFSETS
            .iter()
            .any(|&offset| delta_matches_either(from, to, offset))
}

/// One of the eight L-shaped jumps.
pub fn is_knight_jump(from: Square, to: Square) -> bool {
    file_distance(from, to) <= 2
        && KNIGHT_OFFSETS
            .iter()
            .any(|&offset| delta_matches_either(from, to, offset))
}

/// The on-board squares adjacent to `square`.
#[inline]
pub fn neighbors(square: Square) -> Mask {
    NEIGHBORS[square]
}

static NEIGHBORS: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] = Mask::from_squares(Direction::iter().filter_map(|dir| square + dir));
    }
    array
});
