//! Crate-level error types.

use std::fmt;

use crate::scene::ObjectId;

/// Errors produced by the scene-select crate.
#[derive(Debug)]
pub enum SelectError {
    /// An operation referenced an object that is not in the scene graph.
    UnknownObject(ObjectId),
    /// A selection listener reported a failure while handling an event.
    Listener {
        /// Name of the event being delivered (`"select"` / `"deselect"`).
        event: &'static str,
        /// Message reported by the listener.
        message: String,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl SelectError {
    /// Convenience constructor for listeners that fail with a plain message.
    pub fn listener(event: &'static str, message: impl Into<String>) -> Self {
        Self::Listener {
            event,
            message: message.into(),
        }
    }
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownObject(id) => write!(f, "unknown scene object {id}"),
            Self::Listener { event, message } => {
                write!(f, "'{event}' listener failed: {message}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for SelectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SelectError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
