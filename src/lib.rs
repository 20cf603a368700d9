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

//! Move validation and game-state transitions for a human-vs-engine
//! chess board.
//!
//! The crate has three layers:
//!
//! * [`board`] holds the position, the per-piece legality rules and the
//!   king-safety evaluator. Everything in it is a pure function over a
//!   `Board` or a disposable clone of one.
//! * [`game`] owns the single authoritative `Board` and turns a proposed
//!   move into a committed one (validate, apply, promote, detect mate).
//! * [`engine`] describes the conversation with an external analysis
//!   engine. It formats commands and parses replies but never talks to a
//!   process itself; the caller owns the transport.

pub mod board;
pub mod engine;
pub mod game;

pub use board::*;
pub use engine::*;
pub use game::*;
