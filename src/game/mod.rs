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

//! The game controller.
//!
//! A `Game` owns the one authoritative `Board` and the side to move.
//! `apply_move` is the only way to change either: the move is
//! validated, the next position is built on a copy, and only when
//! everything has succeeded is the copy committed. A rejected move
//! leaves the game exactly as it was.

#[cfg(feature = "random")]
use rand::{thread_rng, Rng};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    king_status, legal_destinations, validate, Board, Color, Mask, Material, Move, MoveError,
    Piece, PositionKey, Square, Turn,
};

mod history;

pub use history::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl GameId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
    #[cfg(feature = "random")]
    pub fn random() -> Self {
        Self(thread_rng().gen())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win(Color, WinReason),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    CheckMate,
}

/// Where the game stands after a move.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    ToMove(Color),
    Terminal(GameResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: Option<GameId>,
    board: Board,
    turn: Color,
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game from the standard starting position, White to move.
    pub fn new() -> Self {
        Self {
            id: None,
            board: Board::standard(),
            turn: Color::White,
            result: None,
        }
    }

    /// A game continuing from an arbitrary position. If `turn` is
    /// already mated the game starts out over.
    ///
    /// # Errors
    ///
    /// `MoveError::NoKingFound` if `turn` has no king.
    pub fn from_board(board: Board, turn: Color) -> Result<Self> {
        let status = king_status(&board, turn)?;
        let result = status
            .checkmate
            .then_some(GameResult::Win(!turn, WinReason::CheckMate));
        Ok(Self {
            id: None,
            board,
            turn,
            result,
        })
    }

    /// A game continuing from a FEN position.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let (board, turn) = Board::from_fen(fen)?;
        Self::from_board(board, turn)
    }

    pub fn with_id(mut self, id: GameId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<GameId> {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn state(&self) -> GameState {
        match self.result {
            Some(result) => GameState::Terminal(result),
            None => GameState::ToMove(self.turn),
        }
    }

    /// Fingerprint of the current position and side to move.
    pub fn key(&self) -> PositionKey {
        self.board.key(self.turn)
    }

    pub fn to_fen(&self) -> String {
        self.board.to_fen(self.turn)
    }

    /// Legal targets for the piece on `from`. Empty when that piece
    /// does not belong to the side to move, or once the game is over.
    pub fn legal_destinations(&self, from: Square) -> Result<Mask> {
        match self.board.get(from) {
            Some(material) if material.color() == self.turn && !self.is_over() => {
                legal_destinations(&self.board, from)
            }
            _ => Ok(Mask::empty()),
        }
    }

    /// Validates `mv`, commits it, and reports the new state. The
    /// applied move is appended to `log`.
    ///
    /// # Errors
    ///
    /// - `MoveError::GameOver` once the game has a result.
    /// - `MoveError::IllegalMove` if the piece is not the side to
    ///   move's, does not stand on `mv.from`, breaks the movement rules
    ///   or leaves its own king attacked.
    /// - `MoveError::NoKingFound` if either side is missing its king.
    pub fn apply_move(&mut self, mv: Move, log: &mut impl MoveLog) -> Result<GameState> {
        if self.is_over() {
            debug!(%mv, "move after game over");
            return Err(MoveError::GameOver.into());
        }
        if mv.material.color() != self.turn {
            debug!(%mv, turn = %self.turn, "move out of turn");
            return Err(MoveError::IllegalMove.into());
        }
        if let Err(err) = validate(&self.board, mv) {
            debug!(%mv, %err, "move rejected");
            return Err(err);
        }

        let placed = promote(mv.material, mv.to);
        let mut board = self.board.clone();
        board.set(mv.from, None);
        board.set(mv.to, Some(placed));

        let mover = self.turn;
        let status = king_status(&board, !mover)?;
        let result = status
            .checkmate
            .then_some(GameResult::Win(mover, WinReason::CheckMate));

        log.record(HistoryEntry {
            from: mv.from,
            to: mv.to,
            material: placed,
            fen: board.to_fen(!mover),
            mover,
        });
        self.board = board;
        self.turn = !mover;
        self.result = result;

        if let Some(result) = result {
            info!(?result, fen = %self.to_fen(), "game over");
        }
        Ok(self.state())
    }

    /// `apply_move` for whatever piece stands on `from`. This is the
    /// shape of a move decoded from an engine suggestion.
    pub fn play(&mut self, from: Square, to: Square, log: &mut impl MoveLog) -> Result<GameState> {
        let mv = Move::on(&self.board, from, to)?;
        self.apply_move(mv, log)
    }
}

impl Turn for Game {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

/// A pawn arriving on its far row becomes a queen of the same color.
fn promote(material: Material, to: Square) -> Material {
    if material.piece().is_pawn() && to.rank_index() == material.color().promotion_row() {
        material.with_piece(Piece::Queen)
    } else {
        material
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use Square::*;

    fn play_all(game: &mut Game, moves: &[(Square, Square)], log: &mut History) {
        for &(from, to) in moves {
            game.play(from, to, log).unwrap();
        }
    }

    fn assert_illegal(result: anyhow::Result<GameState>) {
        let err = result.unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&MoveError::IllegalMove));
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.state(), GameState::ToMove(Color::White));
        assert_eq!(game.board(), &Board::standard());
        assert_eq!(game.result(), None);
    }
    #[test]
    fn test_move_flips_turn_and_logs() {
        let mut game = Game::new();
        let mut log = History::new();
        let state = game
            .apply_move(Move::new(Material::WP, E2, E4), &mut log)
            .unwrap();
        assert_eq!(state, GameState::ToMove(Color::Black));
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.board()[E2], None);
        assert_eq!(game.board()[E4], Some(Material::WP));
        assert_eq!(log.len(), 1);
        assert_eq!(
            log[0],
            HistoryEntry {
                from: E2,
                to: E4,
                material: Material::WP,
                fen: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - - 0 1".to_string(),
                mover: Color::White,
            }
        );
        assert_eq!(log.last_fen(), Some(game.to_fen().as_str()));
    }
    #[test]
    fn test_vec_as_log() {
        let mut game = Game::new();
        let mut log: Vec<HistoryEntry> = Vec::new();
        game.play(G1, F3, &mut log).unwrap();
        game.play(G8, F6, &mut log).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].mover, Color::Black);
        assert_eq!(log[1].material, Material::BN);
    }
    #[test]
    fn test_white_pawn_promotes_to_queen() {
        let board = Board::empty()
            .with(E7, Some(Material::WP))
            .with(A1, Some(Material::WK))
            .with(H6, Some(Material::BK));
        let mut game = Game::from_board(board, Color::White).unwrap();
        let mut log = History::new();
        game.apply_move(Move::new(Material::WP, E7, E8), &mut log)
            .unwrap();
        assert_eq!(E8.to_index(), 4);
        assert_eq!(game.board().get_index(4), Ok(Some(Material::WQ)));
        assert_eq!(game.board()[E7], None);
        assert_eq!(log[0].material, Material::WQ);
        assert!(log[0].fen.starts_with("4Q3/"));
    }
    #[test]
    fn test_black_pawn_promotes_to_queen() {
        let board = Board::empty()
            .with(D2, Some(Material::BP))
            .with(A8, Some(Material::BK))
            .with(H3, Some(Material::WK));
        let mut game = Game::from_board(board, Color::Black).unwrap();
        game.play(D2, D1, &mut History::new()).unwrap();
        assert_eq!(game.board()[D1], Some(Material::BQ));
        assert_eq!(game.turn(), Color::White);
    }
    #[test]
    fn test_out_of_turn() {
        let mut game = Game::new();
        let mut log = History::new();
        assert_illegal(game.apply_move(Move::new(Material::BP, E7, E5), &mut log));
        assert_eq!(game, Game::new());
        assert!(log.is_empty());
    }
    #[test]
    fn test_piece_must_match_board() {
        let mut game = Game::new();
        let mut log = History::new();
        assert_illegal(game.apply_move(Move::new(Material::WQ, E2, E4), &mut log));
        assert_illegal(game.apply_move(Move::new(Material::WP, E3, E4), &mut log));
        assert_eq!(game, Game::new());
    }
    #[test]
    fn test_illegal_move_leaves_game_unchanged() {
        let mut game = Game::new();
        let mut log = History::new();
        assert_illegal(game.play(E2, E5, &mut log));
        assert_illegal(game.play(A1, A3, &mut log));
        assert_illegal(game.play(E4, E5, &mut log));
        assert_eq!(game, Game::new());
        assert!(log.is_empty());
    }
    #[test]
    fn test_pinned_piece_cannot_move() {
        let board = Board::empty()
            .with(E1, Some(Material::WK))
            .with(E2, Some(Material::WN))
            .with(E8, Some(Material::BR))
            .with(A8, Some(Material::BK));
        let mut game = Game::from_board(board.clone(), Color::White).unwrap();
        assert_illegal(game.play(E2, C3, &mut History::new()));
        assert_eq!(game.board(), &board);
        assert!(game.legal_destinations(E2).unwrap().is_empty());
    }
    #[test]
    fn test_fools_mate() {
        let mut game = Game::new();
        let mut log = History::new();
        play_all(&mut game, &[(F2, F3), (E7, E5), (G2, G4)], &mut log);
        let state = game.play(D8, H4, &mut log).unwrap();
        let result = GameResult::Win(Color::Black, WinReason::CheckMate);
        assert_eq!(state, GameState::Terminal(result));
        assert_eq!(game.result(), Some(result));
        assert!(game.is_over());
        assert_eq!(log.len(), 4);

        let err = game.play(E1, F2, &mut log).unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&MoveError::GameOver));
        assert_eq!(log.len(), 4);
        assert!(game.legal_destinations(E1).unwrap().is_empty());
    }
    #[test]
    fn test_check_is_not_terminal() {
        let mut game = Game::new();
        let mut log = History::new();
        play_all(&mut game, &[(E2, E4), (F7, F6), (D2, D4), (G7, G5)], &mut log);
        assert_eq!(game.state(), GameState::ToMove(Color::White));
        // Qh5 is mate; Qe2 is not
        let mut other = game.clone();
        other.play(D1, E2, &mut log).unwrap();
        assert_eq!(other.state(), GameState::ToMove(Color::Black));
        let state = game.play(D1, H5, &mut log).unwrap();
        assert_eq!(
            state,
            GameState::Terminal(GameResult::Win(Color::White, WinReason::CheckMate))
        );
    }
    #[test]
    fn test_legal_destinations_for_side_to_move_only() {
        let game = Game::new();
        assert_eq!(game.legal_destinations(E2).unwrap().len(), 2);
        assert_eq!(game.legal_destinations(B1).unwrap().len(), 2);
        assert!(game.legal_destinations(E7).unwrap().is_empty());
        assert!(game.legal_destinations(E4).unwrap().is_empty());
    }
    #[test]
    fn test_from_fen() {
        let game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        assert_eq!(game.turn(), Color::White);
        let mut game = game.with_id(GameId::new(7));
        assert_eq!(game.id(), Some(GameId::new(7)));
        let state = game.play(A1, A8, &mut History::new()).unwrap();
        assert_eq!(
            state,
            GameState::Terminal(GameResult::Win(Color::White, WinReason::CheckMate))
        );
    }
    #[test]
    fn test_loading_a_mated_position() {
        let mut game =
            Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let result = GameResult::Win(Color::Black, WinReason::CheckMate);
        assert_eq!(game.state(), GameState::Terminal(result));
        assert!(game.legal_destinations(E1).unwrap().is_empty());
        let err = game.play(E1, F2, &mut History::new()).unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&MoveError::GameOver));
    }
    #[test]
    fn test_loading_a_back_rank_check() {
        let game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/r5K1 w - - 0 1").unwrap();
        assert!(game.is_over());
        let game = Game::from_fen("6k1/5ppp/8/8/8/8/5P1P/r5K1 w - - 0 1").unwrap();
        assert_eq!(game.state(), GameState::ToMove(Color::White));
    }
    #[test]
    fn test_loading_without_king() {
        let board = Board::empty().with(A8, Some(Material::BK));
        let err = Game::from_board(board, Color::White).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MoveError>(),
            Some(&MoveError::NoKingFound(Color::White))
        );
    }
    #[test]
    fn test_key_tracks_position_and_turn() {
        let mut game = Game::new();
        let before = game.key();
        game.play(E2, E4, &mut History::new()).unwrap();
        assert_ne!(game.key(), before);
        assert_eq!(game.key().turn(), Color::Black);
    }
    #[cfg(feature = "random")]
    #[test]
    fn test_random_id() {
        let game = Game::new().with_id(GameId::random());
        assert!(game.id().is_some());
    }
}
