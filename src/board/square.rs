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
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitOrAssign, Index, IndexMut, Not, Sub};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("Square index {0} is out of range (expecting 0..64)")]
    OutOfRange(usize),
    #[error("Invalid square name: {0:?}")]
    InvalidName(String),
}

/// One of the 64 squares. The discriminant is the board index: row 0
/// is the eighth rank, column 0 is the a-file, so `A8 == 0` and
/// `H1 == 63`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}

use Square::{
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
};

const SQUARES: [Square; 64] = [
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
];

impl Square {
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::from_index(rank.to_index() * 8 + file.to_index())
    }

    /// The square at a board index, A8 = 0 through H1 = 63.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 64 or more. Use [`Square::try_from_index`]
    /// for indices that are not known to be on the board.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < 64);
        SQUARES[index]
    }

    /// Range-checked conversion from a raw board index. Off-board
    /// arithmetic must come through here before it is used.
    #[inline]
    pub fn try_from_index(index: usize) -> Result<Self, SquareError> {
        SQUARES.get(index).copied().ok_or(SquareError::OutOfRange(index))
    }

    /// Like `try_from_index` but for signed index arithmetic.
    #[inline]
    pub fn try_from_signed(index: isize) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| SQUARES.get(i).copied())
    }

    #[inline]
    pub fn from_chars(f: char, r: char) -> Option<Self> {
        let file = File::try_from_char(f)?;
        let rank = Rank::try_from_char(r)?;
        Some(Self::new(file, rank))
    }

    /// Parses a two character name such as `"e4"`.
    pub fn from_algebraic(name: &str) -> Result<Self, SquareError> {
        let mut chars = name.chars();
        let square = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => Self::from_chars(f, r),
            _ => None,
        };
        square.ok_or_else(|| SquareError::InvalidName(name.to_string()))
    }

    pub fn to_algebraic(&self) -> String {
        let mut s = String::with_capacity(2);
        s.push(self.file().to_char());
        s.push(self.rank().to_char());
        s
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_mask(&self) -> Mask {
        Mask::new(0x1 << (63 - self.to_index()))
    }
    /// Column, 0 for the a-file.
    #[inline]
    pub const fn file_index(&self) -> usize {
        self.to_index() % 8
    }
    /// Row, 0 for the eighth rank.
    #[inline]
    pub const fn rank_index(&self) -> usize {
        self.to_index() / 8
    }
    #[inline]
    pub const fn file(&self) -> File {
        File::from_index(self.file_index())
    }
    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::from_index(self.rank_index())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().to_char(), self.rank().to_char())
    }
}

impl FromStr for Square {
    type Err = SquareError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.to_index()
    }
}

impl TryFrom<usize> for Square {
    type Error = SquareError;
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::try_from_index(value)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

use File::{FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH};

impl File {
    /// The square at a board index, A8 = 0 through H1 = 63.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 64 or more. Use [`Square::try_from_index`]
    /// for indices that are not known to be on the board.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [File; 8] = [FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            'a' | 'A' => Some(FileA),
            'b' | 'B' => Some(FileB),
            'c' | 'C' => Some(FileC),
            'd' | 'D' => Some(FileD),
            'e' | 'E' => Some(FileE),
            'f' | 'F' => Some(FileF),
            'g' | 'G' => Some(FileG),
            'h' | 'H' => Some(FileH),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_char(&self) -> char {
        (b'a' + self.to_index() as u8) as char
    }
}

impl Add<isize> for File {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

impl Sub for File {
    type Output = isize;
    fn sub(self, rhs: Self) -> Self::Output {
        self.to_index() as isize - rhs.to_index() as isize
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1,
}

use Rank::{Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8};

impl Rank {
    /// The square at a board index, A8 = 0 through H1 = 63.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 64 or more. Use [`Square::try_from_index`]
    /// for indices that are not known to be on the board.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Rank; 8] = [Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank1),
            '2' => Some(Rank2),
            '3' => Some(Rank3),
            '4' => Some(Rank4),
            '5' => Some(Rank5),
            '6' => Some(Rank6),
            '7' => Some(Rank7),
            '8' => Some(Rank8),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_char(&self) -> char {
        (b'8' - self.to_index() as u8) as char
    }
}

impl Add<isize> for Rank {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

impl Sub for Rank {
    type Output = isize;
    fn sub(self, rhs: Self) -> Self::Output {
        self.to_index() as isize - rhs.to_index() as isize
    }
}

/// File and row displacement between two squares. `y` grows towards
/// the first rank, matching the index layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: isize,
    pub y: isize,
}

impl Offset {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        let file = (self.file() + rhs.x)?;
        let rank = (self.rank() + rhs.y)?;
        Some(Square::new(file, rank))
    }
}

impl Sub for Square {
    type Output = Offset;
    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(self.file() - rhs.file(), self.rank() - rhs.rank())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        use Direction::*;
        match value {
            UpLeft => Self::new(-1, -1),
            Up => Self::new(0, -1),
            UpRight => Self::new(1, -1),
            Left => Self::new(-1, 0),
            Right => Self::new(1, 0),
            DownLeft => Self::new(-1, 1),
            Down => Self::new(0, 1),
            DownRight => Self::new(1, 1),
        }
    }
}

impl Add<Direction> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

/// A set of squares, one bit per square with `A8` in the high bit.
#[derive(Clone, Serialize, Deserialize, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u64);

impl Mask {
    #[inline]
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn from_squares<I>(squares: I) -> Self
    where
        I: IntoIterator<Item = Square>,
    {
        squares
            .into_iter()
            .fold(Self::empty(), |mask, square| mask | square.to_mask())
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & square.to_mask().0) != 0
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= square.to_mask().0;
    }

    pub fn iter(&self) -> MaskIter {
        MaskIter(self.0)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for square in Square::iter() {
            write!(f, "{}", if self.contains(square) { "#" } else { "." })?;
            if square.file_index() == 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Not for Mask {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl BitOr for Mask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Mask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Index<Square> for [Mask; 64] {
    type Output = Mask;
    fn index(&self, square: Square) -> &Self::Output {
        &self[square.to_index()]
    }
}

impl IndexMut<Square> for [Mask; 64] {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self[square.to_index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskIter(u64);

impl Iterator for MaskIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let square = Square::from_index(self.0.leading_zeros() as usize);
            self.0 &= !square.to_mask().0;
            return Some(square);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use Square::*;

    #[test]
    fn test_index_layout() {
        assert_eq!(A8.to_index(), 0);
        assert_eq!(H8.to_index(), 7);
        assert_eq!(A1.to_index(), 56);
        assert_eq!(E1.to_index(), 60);
        assert_eq!(H1.to_index(), 63);
        assert_eq!(E2.rank_index(), 6);
        assert_eq!(E2.file_index(), 4);
    }
    #[test]
    fn test_out_of_range() {
        assert_eq!(Square::try_from_index(63), Ok(H1));
        assert_eq!(Square::try_from_index(64), Err(SquareError::OutOfRange(64)));
        assert_eq!(Square::try_from_signed(-1), None);
        assert_eq!(Square::try_from_signed(64), None);
    }
    #[test]
    #[should_panic]
    fn test_from_index_off_the_board() {
        Square::from_index(std::hint::black_box(64));
    }
    #[test]
    fn test_algebraic_names() {
        assert_eq!(A1.to_algebraic(), "a1");
        assert_eq!(H8.to_algebraic(), "h8");
        assert_eq!(E4.to_string(), "e4");
        assert_eq!(Square::from_algebraic("e2"), Ok(E2));
        assert_eq!("d7".parse::<Square>(), Ok(D7));
    }
    #[test]
    fn test_bad_algebraic_names() {
        for name in ["", "e", "e9", "i1", "e22", "22"] {
            assert!(Square::from_algebraic(name).is_err(), "{name}");
        }
    }
    #[test]
    fn test_offset_stays_on_board() {
        assert_eq!(H4 + Offset::new(1, 0), None);
        assert_eq!(A8 + Direction::Up, None);
        assert_eq!(E4 + Direction::UpRight, Some(F5));
        assert_eq!(F5 - E4, Offset::new(1, -1));
    }
    #[test]
    fn test_mask_iter_in_index_order() {
        let mask = Mask::from_squares([H1, A8, E4]);
        assert_eq!(mask.len(), 3);
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![A8, E4, H1]);
        assert!(mask.contains(E4));
        assert!(!mask.contains(E5));
    }

    proptest! {
        #[test]
        fn prop_algebraic_round_trip(index in 0usize..64) {
            let square = Square::from_index(index);
            prop_assert_eq!(Square::from_algebraic(&square.to_algebraic()), Ok(square));
        }
    }
}
