//! Reversi rules engine on square boards of any even size.
//!
//! [`GameEngine`] holds a single game. [`GameSession`] adds player names,
//! running scores and the one-line save format, and [`wasm`] exposes a
//! session to a browser UI.

pub mod board;
pub mod codec;
pub mod config;
pub mod error;
pub mod game;
pub mod io;
pub mod session;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::SessionConfig;
pub use error::{DecodeError, ReversiError, Result};
pub use game::GameEngine;
pub use session::{GameSession, TurnOutcome};
pub use types::{Cell, GameResult, Outcome, Player, Position};
