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

use crate::{Color, Material, Square};

/// One applied move as the caller sees it afterwards.
///
/// `material` is what stands on `to` after the move, so a promoted
/// pawn is recorded as a queen. `fen` is the full position after the
/// move, ready to hand to an analysis engine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub from: Square,
    pub to: Square,
    pub material: Material,
    pub fen: String,
    pub mover: Color,
}

/// Somewhere to append applied moves. The game never reads it back.
pub trait MoveLog {
    fn record(&mut self, entry: HistoryEntry);
}

impl MoveLog for Vec<HistoryEntry> {
    fn record(&mut self, entry: HistoryEntry) {
        self.push(entry);
    }
}

/// Append-only list of applied moves.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }
    /// FEN of the position after the most recent move, if any.
    pub fn last_fen(&self) -> Option<&str> {
        self.last().map(|entry| entry.fen.as_str())
    }
}

impl MoveLog for History {
    fn record(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }
}

impl Index<usize> for History {
    type Output = HistoryEntry;
    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
