/// Crate-wide result alias.
pub type SeqviewResult<T> = Result<T, SeqviewError>;

/// Errors surfaced by the viewer.
///
/// Playback scheduling and viewport math are total and never produce these; they come from startup
/// validation, frame decoding and the window/thread plumbing around the core.
#[derive(thiserror::Error, Debug)]
pub enum SeqviewError {
    /// Invalid startup configuration (fps, empty sequence, settings file).
    #[error("config error: {0}")]
    Config(String),

    /// Invalid argument at an API boundary.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The display window could not be created or updated.
    #[error("window error: {0}")]
    Window(String),

    /// The playback worker is unreachable or could not be started.
    #[error("scheduler error: {0}")]
    Scheduler(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeqviewError {
    /// Build a [`SeqviewError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SeqviewError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SeqviewError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SeqviewError::Window`].
    pub fn window(msg: impl Into<String>) -> Self {
        Self::Window(msg.into())
    }

    /// Build a [`SeqviewError::Scheduler`].
    pub fn scheduler(msg: impl Into<String>) -> Self {
        Self::Scheduler(msg.into())
    }

    /// Return `true` for errors that belong to the decode taxonomy.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
