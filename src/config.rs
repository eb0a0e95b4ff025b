use serde::{Deserialize, Serialize};

use crate::board::{self, DEFAULT_BOARD_SIZE};
use crate::codec::FIELD_DELIMITER;
use crate::error::{ReversiError, Result};

/// Settings for a new session. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub board_size: usize,
    pub black_name: String,
    pub white_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            black_name: "Black".to_string(),
            white_name: "White".to_string(),
        }
    }
}

impl SessionConfig {
    /// Checks the board size and that neither name would break the save line.
    pub fn validate(&self) -> Result<()> {
        board::validate_size(self.board_size)?;
        validate_name("blackName", &self.black_name)?;
        validate_name("whiteName", &self.white_name)?;
        Ok(())
    }
}

pub(crate) fn validate_name(field: &'static str, name: &str) -> Result<()> {
    if name.contains(FIELD_DELIMITER) || name.contains(['\n', '\r']) {
        return Err(ReversiError::InvalidName {
            field,
            value: name.to_string(),
        });
    }
    Ok(())
}
