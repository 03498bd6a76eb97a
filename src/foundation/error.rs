/// Convenience result type used across Crossfade.
pub type CrossfadeResult<T> = Result<T, CrossfadeError>;

/// Top-level error taxonomy used by the widget and its pure helpers.
///
/// Every failure is local to a single widget instance.
#[derive(thiserror::Error, Debug)]
pub enum CrossfadeError {
    /// A required image reference (`start` or `end`) is absent or empty.
    #[error("missing source: {0}")]
    MissingSource(String),

    /// Zero, negative or non-finite width/height handed to a geometry computation.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Rejected option value (non-positive distance, malformed position, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An image could not be fetched or decoded, or loading exceeded its deadline.
    #[error("load failure: {0}")]
    LoadFailure(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CrossfadeError {
    /// Build a [`CrossfadeError::MissingSource`] value.
    pub fn missing_source(msg: impl Into<String>) -> Self {
        Self::MissingSource(msg.into())
    }

    /// Build a [`CrossfadeError::InvalidDimension`] value.
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    /// Build a [`CrossfadeError::InvalidConfiguration`] value.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`CrossfadeError::LoadFailure`] value.
    pub fn load_failure(msg: impl Into<String>) -> Self {
        Self::LoadFailure(msg.into())
    }

    /// Return `true` for errors that must abort widget construction.
    pub fn is_construction_error(&self) -> bool {
        matches!(self, Self::MissingSource(_) | Self::InvalidConfiguration(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
