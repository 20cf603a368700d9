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

//! Bookkeeping for asynchronous analysis.
//!
//! The engine answers a search with any number of `info` lines and
//! exactly one `bestmove`, also when the search is stopped early. Lines
//! carry no request tag, so the tracker counts stopped searches and
//! swallows everything up to and including their `bestmove`. Whatever
//! survives that is also compared against the game's current position
//! before it is handed out.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::protocol::{EngineCommand, EngineEvent, Evaluation};
use super::settings::AnalysisSettings;
use crate::{parse_coordinate_move, Color, Game, PositionKey, Square, Turn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("The engine has not reported readyok")]
    NotReady,
    #[error("The game is over")]
    GameOver,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

/// An outstanding search.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    id: RequestId,
    key: PositionKey,
    turn: Color,
    evaluation: Option<Evaluation>,
}

impl AnalysisRequest {
    pub fn id(&self) -> RequestId {
        self.id
    }
    pub fn turn(&self) -> Color {
        self.turn
    }
}

/// What the engine has to say about the current position. Advisory
/// only: a suggested move still goes through `Game::apply_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advice {
    pub request: RequestId,
    pub evaluation: Option<Evaluation>,
    /// Set once the search has finished. `None` in a finished search
    /// means the engine had no move to suggest.
    pub best_move: Option<(Square, Square)>,
    pub finished: bool,
}

#[derive(Debug, Default)]
pub struct AnalysisTracker {
    ready: bool,
    next_id: u64,
    outstanding: Option<AnalysisRequest>,
    stopped: usize,
}

impl AnalysisTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// True while a search is running for the position last submitted.
    pub fn is_thinking(&self) -> bool {
        self.outstanding.is_some()
    }

    pub fn outstanding(&self) -> Option<&AnalysisRequest> {
        self.outstanding.as_ref()
    }

    /// Starts analysing the game's current position. A search already
    /// running is stopped first.
    pub fn submit(
        &mut self,
        game: &Game,
        settings: &AnalysisSettings,
    ) -> Result<(RequestId, Vec<EngineCommand>), AnalysisError> {
        if !self.ready {
            return Err(AnalysisError::NotReady);
        }
        if game.is_over() {
            return Err(AnalysisError::GameOver);
        }
        let mut commands = Vec::with_capacity(3);
        commands.extend(self.cancel());

        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.outstanding = Some(AnalysisRequest {
            id,
            key: game.key(),
            turn: game.turn(),
            evaluation: None,
        });
        commands.push(EngineCommand::Position { fen: game.to_fen() });
        commands.push(EngineCommand::Go {
            depth: settings.depth,
        });
        Ok((id, commands))
    }

    /// Abandons the running search, if any. The returned `stop` must be
    /// sent to the engine.
    pub fn cancel(&mut self) -> Option<EngineCommand> {
        let request = self.outstanding.take()?;
        debug!(request = ?request.id, "analysis cancelled");
        self.stopped += 1;
        Some(EngineCommand::Stop)
    }

    /// Feeds one engine line to the tracker. Returns advice only when
    /// the line belongs to the outstanding search and that search is
    /// still about the game's current position.
    pub fn accept(&mut self, event: EngineEvent, game: &Game) -> Option<Advice> {
        match event {
            EngineEvent::ReadyOk => {
                self.ready = true;
                None
            }
            EngineEvent::UciOk | EngineEvent::Other(_) => None,
            EngineEvent::Info { evaluation, .. } => {
                if self.stopped > 0 {
                    debug!(%evaluation, "discarding info from a stopped search");
                    return None;
                }
                let request = self.outstanding.as_mut()?;
                if request.key != game.key() {
                    debug!(request = ?request.id, "discarding info for a stale position");
                    return None;
                }
                request.evaluation = Some(evaluation);
                Some(Advice {
                    request: request.id,
                    evaluation: Some(evaluation),
                    best_move: None,
                    finished: false,
                })
            }
            EngineEvent::BestMove { mv, .. } => {
                if self.stopped > 0 {
                    self.stopped -= 1;
                    debug!(%mv, "discarding bestmove from a stopped search");
                    return None;
                }
                let request = self.outstanding.take()?;
                if request.key != game.key() {
                    debug!(request = ?request.id, %mv, "discarding bestmove for a stale position");
                    return None;
                }
                let best_move = match parse_coordinate_move(&mv) {
                    Ok(squares) => Some(squares),
                    Err(err) => {
                        debug!(%mv, %err, "no usable best move");
                        None
                    }
                };
                Some(Advice {
                    request: request.id,
                    evaluation: request.evaluation,
                    best_move,
                    finished: true,
                })
            }
        }
    }
}
