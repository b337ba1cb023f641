/// Convenience result type used across folio-motion.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy used by orchestration APIs.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid configuration rejected at construction time.
    #[error("validation error: {0}")]
    Validation(String),

    /// Illegal lifecycle use of an engine, driver or selector.
    #[error("animation error: {0}")]
    Animation(String),

    /// Misuse of the scheduling primitive (e.g. moving time backwards).
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Errors when serializing or deserializing configuration and traces.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MotionError::Schedule`] value.
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
