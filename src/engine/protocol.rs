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

use crate::Color;

/// A line sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Uci,
    IsReady,
    SetOption { name: String, value: String },
    Position { fen: String },
    Go { depth: u32 },
    Stop,
    Quit,
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use EngineCommand::*;
        match self {
            Uci => write!(f, "uci"),
            IsReady => write!(f, "isready"),
            SetOption { name, value } => write!(f, "setoption name {name} value {value}"),
            Position { fen } => write!(f, "position fen {fen}"),
            Go { depth } => write!(f, "go depth {depth}"),
            Stop => write!(f, "stop"),
            Quit => write!(f, "quit"),
        }
    }
}

/// Engine score, from the point of view of the side to move in the
/// analysed position.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Hundredths of a pawn.
    Centipawns(i32),
    /// Moves until mate. Negative when the side to move is being mated.
    Mate(i32),
}

impl Evaluation {
    /// The score in pawns. `None` for a mate score.
    pub fn pawns(&self) -> Option<f64> {
        match self {
            Evaluation::Centipawns(cp) => Some(f64::from(*cp) / 100.0),
            Evaluation::Mate(_) => None,
        }
    }

    /// The same score seen from White's side, given who was to move.
    /// A score at `i32::MIN` flips to `i32::MAX`.
    pub fn for_white(self, turn: Color) -> Self {
        match (self, turn) {
            (_, Color::White) => self,
            (Evaluation::Centipawns(cp), Color::Black) => {
                Evaluation::Centipawns(cp.saturating_neg())
            }
            (Evaluation::Mate(n), Color::Black) => Evaluation::Mate(n.saturating_neg()),
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Centipawns(cp) => write!(f, "{:.2}", f64::from(*cp) / 100.0),
            Evaluation::Mate(n) => write!(f, "Mate in {}", n.unsigned_abs()),
        }
    }
}

/// A line received from the engine. Anything not needed for analysis
/// is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UciOk,
    ReadyOk,
    Info {
        depth: Option<u32>,
        evaluation: Evaluation,
    },
    BestMove {
        mv: String,
        ponder: Option<String>,
    },
    Other(String),
}

impl EngineEvent {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.first().copied() {
            Some("uciok") => EngineEvent::UciOk,
            Some("readyok") => EngineEvent::ReadyOk,
            Some("bestmove") if parts.len() > 1 => {
                let ponder = match parts.get(2..4) {
                    Some(["ponder", mv]) => Some(mv.to_string()),
                    _ => None,
                };
                EngineEvent::BestMove {
                    mv: parts[1].to_string(),
                    ponder,
                }
            }
            Some("info") => Self::parse_info(&parts[1..])
                .unwrap_or_else(|| EngineEvent::Other(line.to_string())),
            _ => EngineEvent::Other(line.to_string()),
        }
    }

    /// Only info lines carrying a score are of interest.
    fn parse_info(parts: &[&str]) -> Option<Self> {
        let mut depth = None;
        let mut evaluation = None;
        let mut i = 0;
        while i < parts.len() {
            match parts[i] {
                "depth" => {
                    i += 1;
                    if i < parts.len() {
                        depth = parts[i].parse().ok();
                    }
                }
                "score" => {
                    i += 1;
                    if i + 1 < parts.len() {
                        evaluation = match parts[i] {
                            "cp" => parts[i + 1].parse().ok().map(Evaluation::Centipawns),
                            "mate" => parts[i + 1].parse().ok().map(Evaluation::Mate),
                            _ => None,
                        };
                        i += 1;
                    }
                }
                // the principal variation runs to the end of the line
                "pv" | "string" => break,
                _ => {}
            }
            i += 1;
        }
        evaluation.map(|evaluation| EngineEvent::Info { depth, evaluation })
    }
}
