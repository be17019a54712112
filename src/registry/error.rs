//! Mediator error types
//!
//! Error types for channel registration and dispatch.

/// Error returned by a failing handler
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result returned by every handler invocation
pub type HandlerResult = Result<(), HandlerError>;

/// Error type for mediator operations
#[derive(Debug)]
pub enum MediatorError {
    /// Channel path does not exist in the namespace tree
    ChannelNotFound(String),
    /// A handler returned an error; remaining handlers were not invoked
    HandlerFailed {
        /// Channel whose handler failed
        channel: String,
        /// Error returned by the handler
        source: HandlerError,
    },
    /// Delimiter is empty
    InvalidDelimiter,
    /// Path segment contains the delimiter
    InvalidSegment {
        /// Offending segment
        segment: String,
        /// Delimiter of the registry
        delimiter: String,
    },
}

impl MediatorError {
    /// Check if this is a missing-channel error
    pub fn is_not_found(&self) -> bool {
        matches!(self, MediatorError::ChannelNotFound(_))
    }
}

impl std::fmt::Display for MediatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediatorError::ChannelNotFound(channel) => write!(f, "Channel not found: {}", channel),
            MediatorError::HandlerFailed { channel, source } => {
                write!(f, "Handler failed on channel {}: {}", channel, source)
            }
            MediatorError::InvalidDelimiter => write!(f, "Delimiter must not be empty"),
            MediatorError::InvalidSegment { segment, delimiter } => write!(
                f,
                "Segment {:?} contains the delimiter {:?}",
                segment, delimiter
            ),
        }
    }
}

impl std::error::Error for MediatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MediatorError::HandlerFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
