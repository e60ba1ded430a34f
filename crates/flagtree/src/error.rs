//! Error taxonomy.
//!
//! Setup mistakes surface as [`ConfigError`] from the definition call itself.
//! Everything that can go wrong while reading a token sequence is a
//! [`ParseError`]; how it is reported is decided by the command's
//! [`ErrorHandling`](crate::ErrorHandling) policy.

use thiserror::Error;

use crate::command::ErrorHandling;

/// A programming mistake in how a command tree was declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("flag redefined: {0}")]
    DuplicateFlag(String),

    #[error("flag not defined: {0}")]
    UndefinedFlag(String),

    #[error("alias -{alias} is already bound to --{flag}")]
    AliasTaken { alias: char, flag: String },

    #[error("command redefined: {0}")]
    DuplicateCommand(String),
}

/// A typed conversion failure inside a [`Value`](crate::Value).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {expected} value {input:?}: {reason}")]
pub struct ValueError {
    pub input: String,
    pub expected: &'static str,
    pub reason: String,
}

impl ValueError {
    pub fn new(input: &str, expected: &'static str, reason: impl ToString) -> Self {
        Self {
            input: input.to_string(),
            expected,
            reason: reason.to_string(),
        }
    }
}

/// Failure while scanning a token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid flag format: {0}")]
    InvalidFormat(String),

    #[error("unknown flag: --{0}")]
    UnknownFlag(String),

    #[error("unknown alias: -{0}")]
    UnknownAlias(char),

    #[error("flag \"--{0}\" is missing a value")]
    MissingValue(String),

    #[error("flag \"--{flag}\": {source}")]
    InvalidValue {
        flag: String,
        #[source]
        source: ValueError,
    },
}

/// Failure of a whole dispatch pass.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Flag scanning failed on `command`.
    #[error("{command}: {source}")]
    Parse {
        command: String,
        usage: String,
        policy: ErrorHandling,
        #[source]
        source: ParseError,
    },

    /// The resolved handler returned an error.
    #[error("{command}: {source:#}")]
    Handler {
        command: String,
        policy: ErrorHandling,
        source: anyhow::Error,
    },
}

impl DispatchError {
    /// Path of the command the failure occurred on, e.g. `app remote add`.
    pub fn command(&self) -> &str {
        match self {
            Self::Parse { command, .. } | Self::Handler { command, .. } => command,
        }
    }

    /// Policy configured on the failing command.
    pub fn policy(&self) -> ErrorHandling {
        match self {
            Self::Parse { policy, .. } | Self::Handler { policy, .. } => *policy,
        }
    }

    /// The underlying parse error, if this was a parse failure.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse { source, .. } => Some(source),
            Self::Handler { .. } => None,
        }
    }
}
