//! Saving and loading a session as a single-line text file.

use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use crate::error::Result;
use crate::session::GameSession;

/// Writes the session's save line to `path`, replacing any existing file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_session(path: impl AsRef<Path>, session: &GameSession) -> Result<()> {
    fs::write(path.as_ref(), session.to_save_line())?;
    info!("session saved");
    Ok(())
}

/// Reads a session previously written by [`save_session`].
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_session(path: impl AsRef<Path>) -> Result<GameSession> {
    let contents = fs::read_to_string(path.as_ref())?;
    let session = GameSession::from_save_line(&contents)?;
    info!(turn = session.game().turn_number(), "session loaded");
    Ok(session)
}
