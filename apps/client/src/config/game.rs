use std::env;

use crate::errors::{GameError, ValidationKind};

/// Environment variable naming the progress denominator.
const PROGRESS_TARGET_VAR: &str = "CLIENT_PROGRESS_TARGET";

/// Deployments disagree on how many answered turns fill the progress
/// display (10 or 20 have both been observed), so the denominator is
/// configuration, not a constant.
const DEFAULT_PROGRESS_TARGET: u32 = 10;

/// Tunables of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Closed-turn count that renders as 100% progress.
    pub progress_target: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            progress_target: DEFAULT_PROGRESS_TARGET,
        }
    }
}

impl GameConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, GameError> {
        let progress_target = match env::var(PROGRESS_TARGET_VAR) {
            Err(env::VarError::NotPresent) => DEFAULT_PROGRESS_TARGET,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(GameError::validation(
                    ValidationKind::Config,
                    format!("{PROGRESS_TARGET_VAR} is not valid unicode"),
                ));
            }
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|target| *target > 0)
                .ok_or_else(|| {
                    GameError::validation(
                        ValidationKind::Config,
                        format!("{PROGRESS_TARGET_VAR} must be a positive integer, got '{raw}'"),
                    )
                })?,
        };
        Ok(Self { progress_target })
    }
}
