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

//! Talking to an external analysis engine
//!
//! The engine speaks a line-oriented text protocol. This module only
//! formats the lines to send and interprets the lines received; the
//! caller owns the process or worker and moves the text across.
//!
//! * `EngineCommand` renders `uci`, `isready`, `setoption`,
//!   `position fen`, `go depth`, `stop` and `quit`.
//! * `EngineEvent::parse` recognises `uciok`, `readyok`, scored `info`
//!   lines and `bestmove`.
//! * `AnalysisSettings` holds the search depth and engine options and
//!   loads from TOML.
//! * `AnalysisTracker` ties replies to the position they were asked
//!   about. The game may move on while a search runs; replies about an
//!   older position are dropped.
//!

mod protocol;
mod settings;
mod tracker;

pub use protocol::*;
pub use settings::*;
pub use tracker::*;
