//! A sequence of games between two named players with running scores.

use std::str::FromStr;

use tracing::{debug, info, instrument};

use crate::codec::{self, FIELD_DELIMITER};
use crate::config::SessionConfig;
use crate::error::{DecodeError, ReversiError, Result};
use crate::game::GameEngine;
use crate::types::{GameResult, Player, Position};

/// Number of `;` fields in a full save line.
pub const SAVE_LINE_FIELDS: usize = 7;

/// What happened after a placement attempt through [`GameSession::play`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Illegal placement; nothing changed.
    Rejected,
    /// Move applied and the other player is to move.
    Moved { flipped: Vec<Position> },
    /// Move applied, but the other player had no legal reply so their turn
    /// was skipped and the mover goes again.
    Passed {
        flipped: Vec<Position>,
        skipped: Player,
    },
    /// Move applied and neither player can move any more.
    GameOver {
        flipped: Vec<Position>,
        result: GameResult,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    black_name: String,
    white_name: String,
    black_score: u32,
    white_score: u32,
    game: GameEngine,
}

impl GameSession {
    #[instrument]
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let game = GameEngine::new(config.board_size)?;
        Ok(Self {
            black_name: config.black_name,
            white_name: config.white_name,
            black_score: 0,
            white_score: 0,
            game,
        })
    }

    /// Replaces the current game with a fresh one.
    ///
    /// A finished game's piece counts are added to the running scores first;
    /// an unfinished game is dropped without scoring.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, size: usize) -> Result<()> {
        let next = GameEngine::new(size)?;

        if self.game.is_game_over() {
            let result = self.game.winner();
            self.black_score = add_points(self.black_score, result.black_count);
            self.white_score = add_points(self.white_score, result.white_count);
            info!(
                black_score = self.black_score,
                white_score = self.white_score,
                "finished game added to scores"
            );
        }

        self.game = next;
        Ok(())
    }

    /// Places a piece for the side to move and resolves forced passes.
    pub fn play(&mut self, row: i32, col: i32) -> TurnOutcome {
        let Some(flipped) = self.game.try_place(row, col) else {
            return TurnOutcome::Rejected;
        };

        if self.game.is_game_over() {
            let result = self.game.winner();
            info!(%result, "game over");
            return TurnOutcome::GameOver { flipped, result };
        }

        let next = self.game.current_player();
        if !self.game.has_legal_move(next) {
            debug!(player = %next, "no legal move, skipping turn");
            self.game.skip_turn();
            return TurnOutcome::Passed {
                flipped,
                skipped: next,
            };
        }

        TurnOutcome::Moved { flipped }
    }

    pub fn game(&self) -> &GameEngine {
        &self.game
    }

    /// Direct engine access for callers that drive turns themselves.
    pub fn game_mut(&mut self) -> &mut GameEngine {
        &mut self.game
    }

    pub fn black_name(&self) -> &str {
        &self.black_name
    }

    pub fn white_name(&self) -> &str {
        &self.white_name
    }

    pub fn name_of(&self, player: Player) -> &str {
        match player {
            Player::Black => &self.black_name,
            Player::White => &self.white_name,
        }
    }

    pub fn black_score(&self) -> u32 {
        self.black_score
    }

    pub fn white_score(&self) -> u32 {
        self.white_score
    }

    /// `<blackName>;<blackScore>;<whiteName>;<whiteScore>;<turnNumber>;<size>;<board>`
    pub fn to_save_line(&self) -> String {
        let d = FIELD_DELIMITER;
        format!(
            "{}{d}{}{d}{}{d}{}{d}{}",
            self.black_name,
            self.black_score,
            self.white_name,
            self.white_score,
            self.game.to_encoding_fragment()
        )
    }

    #[instrument(skip(line))]
    pub fn from_save_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line
            .trim_end_matches(['\r', '\n'])
            .split(FIELD_DELIMITER)
            .collect();
        if fields.len() != SAVE_LINE_FIELDS {
            return Err(DecodeError::FieldCount {
                expected: SAVE_LINE_FIELDS,
                found: fields.len(),
            }
            .into());
        }

        let black_score = codec::parse_number("blackScore", fields[1])?;
        let white_score = codec::parse_number("whiteScore", fields[3])?;
        let game = GameEngine::from_fragment(&fields[4..].join(";"))?;

        Ok(Self {
            black_name: fields[0].to_string(),
            white_name: fields[2].to_string(),
            black_score,
            white_score,
            game,
        })
    }
}

/// Scores saturate instead of overflowing on a loaded near-max total.
fn add_points(score: u32, points: usize) -> u32 {
    score.saturating_add(u32::try_from(points).unwrap_or(u32::MAX))
}

impl FromStr for GameSession {
    type Err = ReversiError;

    fn from_str(line: &str) -> Result<Self> {
        Self::from_save_line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: usize) -> GameSession {
        GameSession::new(SessionConfig {
            board_size: size,
            black_name: "Ada".to_string(),
            white_name: "Grace".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn new_session_starts_fresh_game_with_zero_scores() {
        let session = session(6);

        assert_eq!(session.game().board_size(), 6);
        assert_eq!(session.black_score(), 0);
        assert_eq!(session.white_score(), 0);
        assert_eq!(session.name_of(Player::White), "Grace");
    }

    #[test]
    fn new_session_rejects_bad_config() {
        let result = GameSession::new(SessionConfig {
            board_size: 5,
            ..SessionConfig::default()
        });

        assert!(matches!(result, Err(ReversiError::InvalidSize { .. })));
    }

    #[test]
    fn play_reports_rejected_and_moved() {
        let mut session = session(8);

        assert_eq!(session.play(0, 0), TurnOutcome::Rejected);
        assert_eq!(
            session.play(2, 3),
            TurnOutcome::Moved {
                flipped: vec![Position::new(3, 3)]
            }
        );
        assert_eq!(session.game().current_player(), Player::White);
    }

    #[test]
    fn play_skips_player_without_reply() {
        // ww--
        // wbw-
        // www-
        // wwb-
        let mut session =
            GameSession::from_save_line("A;0;B;0;1;4;w2,-2,w1,b1,w1,-1,w3,-1,w2,b1,-1").unwrap();
        assert_eq!(session.game().current_player(), Player::White);

        let outcome = session.play(0, 2);

        assert_eq!(
            outcome,
            TurnOutcome::Passed {
                flipped: vec![Position::new(1, 1)],
                skipped: Player::Black,
            }
        );
        assert_eq!(session.game().turn_number(), 3);
        assert_eq!(session.game().current_player(), Player::White);
        assert!(!session.game().is_game_over());
    }

    #[test]
    fn play_reports_game_over_with_result() {
        let mut session =
            GameSession::from_save_line("A;0;B;0;1;4;-1,b1,w14").unwrap();

        let outcome = session.play(0, 0);

        assert_eq!(
            outcome,
            TurnOutcome::GameOver {
                flipped: vec![Position::new(0, 1)],
                result: GameResult::from_counts(0, 16),
            }
        );
    }

    #[test]
    fn start_game_scores_finished_game_only() {
        let mut session = session(8);
        assert!(matches!(session.play(2, 3), TurnOutcome::Moved { .. }));

        session.start_game(8).unwrap();
        assert_eq!((session.black_score(), session.white_score()), (0, 0));

        let mut session = GameSession::from_save_line("A;3;B;4;1;4;-1,b1,w14").unwrap();
        assert!(matches!(session.play(0, 0), TurnOutcome::GameOver { .. }));

        session.start_game(6).unwrap();

        assert_eq!((session.black_score(), session.white_score()), (3, 20));
        assert_eq!(session.game().board_size(), 6);
        assert_eq!(session.game().turn_number(), 0);
    }

    #[test]
    fn start_game_saturates_scores_loaded_near_max() {
        let mut session =
            GameSession::from_save_line("A;0;B;4294967295;1;4;-1,b1,w14").unwrap();
        assert!(matches!(session.play(0, 0), TurnOutcome::GameOver { .. }));

        session.start_game(4).unwrap();

        assert_eq!(session.black_score(), 0);
        assert_eq!(session.white_score(), u32::MAX);
    }

    #[test]
    fn start_game_with_invalid_size_keeps_current_game() {
        let mut session = session(8);
        session.play(2, 3);
        let before = session.clone();

        assert!(session.start_game(3).is_err());
        assert_eq!(session, before);
    }

    #[test]
    fn save_line_round_trips() {
        let mut session = session(8);
        session.play(2, 3);
        session.play(2, 2);

        let line = session.to_save_line();
        assert!(line.starts_with("Ada;0;Grace;0;2;8;"));

        let restored: GameSession = line.parse().unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn from_save_line_rejects_malformed_lines() {
        assert!(matches!(
            GameSession::from_save_line("A;0;B;0;0;4"),
            Err(ReversiError::Decode(DecodeError::FieldCount { found: 6, .. }))
        ));
        assert!(matches!(
            GameSession::from_save_line("A;x;B;0;0;4;-5,w1,b1,-2,b1,w1,-5"),
            Err(ReversiError::Decode(DecodeError::InvalidNumber {
                field: "blackScore",
                ..
            }))
        ));
        assert!(matches!(
            GameSession::from_save_line("A;0;B;0;0;4;-5,w1,b1,-2,b1,w1,-4"),
            Err(ReversiError::Decode(DecodeError::RunLengthMismatch { .. }))
        ));
    }

    #[test]
    fn from_save_line_tolerates_trailing_newline() {
        let session = GameSession::from_save_line("A;1;B;2;0;4;-5,w1,b1,-2,b1,w1,-5\n").unwrap();

        assert_eq!(session.black_name(), "A");
        assert_eq!(session.white_score(), 2);
    }
}
