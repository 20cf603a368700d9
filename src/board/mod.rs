// Copyright 2023 Tobin Edwards
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

//! Chess board and move rules
//!
//! A _board_ is the contents of the 64 squares and nothing else: no
//! side to move, no castling rights, no clocks. Everything in this
//! module is a pure function over a board (or over a disposable clone
//! of one) so the rules can be asked "what if" without touching the
//! authoritative game state. The following features are supported:
//!
//! [x] Piece movement for all six piece kinds
//! [x] Pawn double advance from the starting row
//! [x] Path blocking for rooks, bishops and queens
//! [x] King safety for every move, with a checkmate flag for king moves
//! [x] Checkmate detection for a side to move
//! [x] FEN export and import, coordinate move notation
//! [ ] Castling
//! [ ] En passant
//! [ ] Under-promotion (pawns always become queens)
//! [ ] Draw rules (stalemate, repetition, fifty moves)
//!
//! Some of the key abstractions include:
//!
//! * A `Square` is one of the 64 board coordinates. Its discriminant
//!   is the board index: index 0 is `A8` (top-left from White's
//!   side), index 63 is `H1`. The row of an index is `index / 8`
//!   (row 0 is the eighth rank) and its column is `index % 8`.
//!   `File` and `Rank` name the columns and rows.
//!
//! * A `Mask` is a 64-bit (u64) value in which each bit maps to a
//!   square. Masks hold sets of squares such as the legal
//!   destinations of a piece or the squares between two others.
//!
//! * `Material` represents a piece of a specific color. A `Piece` has
//!   six variants: `King`, `Queen`, `Rook`, `Bishop`, `Knight` and
//!   `Pawn`. `Color` is either `White` or `Black`; White's pawns move
//!   towards lower indices.
//!
//! * The `geometry` and `path` functions answer shape questions on
//!   indices alone: are two squares on a common line, which squares
//!   lie between them, is a delta a knight jump. Fixed-offset moves
//!   never wrap from one edge of the board to the other.
//!
//! * `is_legal_move` applies the per-piece rules and, for kings only,
//!   the safety test. `validate` adds the own-king safety test for
//!   every piece and is what the game controller uses.
//!
//! * `evaluate_king_safety` plays a move on a clone and reports
//!   whether the mover's king is attacked afterwards. Attacks are
//!   judged with `is_pseudo_legal_move`, so an attacking king is never
//!   safety-checked in turn.
//!

mod geometry;
mod material;
mod moves;
mod notation;
mod path;
mod position;
mod safety;
mod square;

pub use geometry::*;
pub use material::*;
pub use moves::*;
pub use notation::*;
pub use path::*;
pub use position::*;
pub use safety::*;
pub use square::*;

pub trait Turn {
    fn turn(&self) -> Color;
}
