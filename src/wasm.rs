//! Browser-facing API.
//!
//! The page holds at most one session at a time. It lives behind a single
//! process-wide mutex, so every exported call is serialized.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::SessionConfig;
use crate::error::ReversiError;
use crate::session::{GameSession, TurnOutcome};
use crate::types::{GameResult, GameState, Position};

static SESSION: Lazy<Mutex<Option<ActiveSession>>> = Lazy::new(|| Mutex::new(None));

/// Reply to a placement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayReport {
    pub accepted: bool,
    /// Player code whose turn was skipped after the move, if any.
    pub skipped: Option<u8>,
    pub state: GameState,
}

/// Final or current standings for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    /// 1=black, 2=white, 0=draw.
    pub winner: u8,
    pub black_count: usize,
    pub white_count: usize,
    pub black_score: u32,
    pub white_score: u32,
    pub message: String,
}

/// Session plus what the UI needs to animate the last action.
#[derive(Debug)]
struct ActiveSession {
    session: GameSession,
    is_pass: bool,
    flipped: Vec<Position>,
}

impl ActiveSession {
    fn new(session: GameSession) -> Self {
        Self {
            session,
            is_pass: false,
            flipped: Vec::new(),
        }
    }

    fn start_game(&mut self, size: usize) -> Result<GameState, ReversiError> {
        self.session.start_game(size)?;
        self.is_pass = false;
        self.flipped.clear();
        Ok(self.to_game_state())
    }

    fn play(&mut self, row: i32, col: i32) -> PlayReport {
        let (accepted, skipped) = match self.session.play(row, col) {
            TurnOutcome::Rejected => (false, None),
            TurnOutcome::Moved { flipped } | TurnOutcome::GameOver { flipped, .. } => {
                self.is_pass = false;
                self.flipped = flipped;
                (true, None)
            }
            TurnOutcome::Passed { flipped, skipped } => {
                self.is_pass = true;
                self.flipped = flipped;
                (true, Some(skipped.code()))
            }
        };

        PlayReport {
            accepted,
            skipped,
            state: self.to_game_state(),
        }
    }

    fn skip_turn(&mut self) -> GameState {
        self.session.game_mut().skip_turn();
        self.is_pass = true;
        self.flipped.clear();
        self.to_game_state()
    }

    fn to_game_state(&self) -> GameState {
        let game = self.session.game();
        let board = game.board();
        let (black_count, white_count) = board.count();
        GameState {
            size: board.size(),
            board: board.to_array(),
            current_player: game.current_player().code(),
            turn_number: game.turn_number(),
            black_count,
            white_count,
            is_game_over: game.is_game_over(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    fn to_result_view(&self) -> ResultView {
        let result: GameResult = self.session.game().winner();
        ResultView {
            winner: result.winner_code(),
            black_count: result.black_count,
            white_count: result.white_count,
            black_score: self.session.black_score(),
            white_score: self.session.white_score(),
            message: result.to_string(),
        }
    }
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Starts a new session. `config` may be `undefined` for an 8x8 board with
/// default names.
#[wasm_bindgen]
pub fn new_session(config: JsValue) -> Result<JsValue, JsValue> {
    let config: SessionConfig = if config.is_undefined() || config.is_null() {
        SessionConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    let session = GameSession::new(config).map_err(to_js_error)?;
    let active = ActiveSession::new(session);
    let state = active.to_game_state();
    *lock()? = Some(active);
    to_js(&state)
}

#[wasm_bindgen]
pub fn start_game(size: usize) -> Result<JsValue, JsValue> {
    let state = with_session(|active| active.start_game(size).map_err(to_js_error))?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn place(row: i32, col: i32) -> Result<JsValue, JsValue> {
    let report = with_session(|active| Ok(active.play(row, col)))?;
    to_js(&report)
}

#[wasm_bindgen]
pub fn skip_turn() -> Result<JsValue, JsValue> {
    let state = with_session(|active| Ok(active.skip_turn()))?;
    to_js(&state)
}

/// Cell code at a position: 0=empty, 1=black, 2=white.
#[wasm_bindgen]
pub fn piece_at(row: i32, col: i32) -> Result<u8, JsValue> {
    with_session(|active| {
        active
            .session
            .game()
            .piece_at(row, col)
            .map(|cell| cell.code())
            .map_err(to_js_error)
    })
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    let state = with_session(|active| Ok(active.to_game_state()))?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn get_result() -> Result<JsValue, JsValue> {
    let view = with_session(|active| Ok(active.to_result_view()))?;
    to_js(&view)
}

#[wasm_bindgen]
pub fn get_legal_moves() -> Result<JsValue, JsValue> {
    let moves = with_session(|active| Ok(active.session.game().legal_moves()))?;
    to_js(&moves)
}

/// Full save line for the active session.
#[wasm_bindgen]
pub fn export_session() -> Result<String, JsValue> {
    with_session(|active| Ok(active.session.to_save_line()))
}

/// Replaces the active session with one parsed from a save line. On a
/// decode failure the previous session is kept.
#[wasm_bindgen]
pub fn import_session(line: &str) -> Result<JsValue, JsValue> {
    let session = GameSession::from_save_line(line).map_err(to_js_error)?;
    let active = ActiveSession::new(session);
    let state = active.to_game_state();
    *lock()? = Some(active);
    to_js(&state)
}

fn lock() -> Result<std::sync::MutexGuard<'static, Option<ActiveSession>>, JsValue> {
    SESSION
        .lock()
        .map_err(|_| JsValue::from_str("session state is poisoned"))
}

fn with_session<T>(
    f: impl FnOnce(&mut ActiveSession) -> Result<T, JsValue>,
) -> Result<T, JsValue> {
    let mut guard = lock()?;
    let active = guard
        .as_mut()
        .ok_or_else(|| JsValue::from_str("no active session"))?;
    f(active)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: ReversiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
