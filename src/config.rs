use std::fmt;
use std::time::Duration;

use crate::mentor::session::Pacing;

pub const RESPONSE_DELAY_VAR: &str = "MENTOR_RESPONSE_DELAY_MS";
pub const FOLLOWUP_DELAY_VAR: &str = "MENTOR_FOLLOWUP_DELAY_MS";
pub const TOKEN_VAR: &str = "TELOXIDE_TOKEN";

#[derive(Debug)]
pub enum ConfigError {
    MissingToken,
    InvalidDelay { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingToken => write!(f, "{} is not set", TOKEN_VAR),
            ConfigError::InvalidDelay { var, value } => {
                write!(f, "{} must be a number of milliseconds, got {:?}", var, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorConfig {
    pub pacing: Pacing,
}

impl MentorConfig {
    /// Reads the process environment, after `.env` has been loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        if std::env::var(TOKEN_VAR).is_err() {
            return Err(ConfigError::MissingToken);
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Pacing::default();
        let pacing = Pacing {
            response_delay: read_delay(&lookup, RESPONSE_DELAY_VAR, defaults.response_delay)?,
            followup_delay: read_delay(&lookup, FOLLOWUP_DELAY_VAR, defaults.followup_delay)?,
        };
        Ok(Self { pacing })
    }
}

fn read_delay<F>(lookup: &F, var: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidDelay { var, value }),
    }
}
