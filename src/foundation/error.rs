/// Crate-wide result alias.
pub type ReelResult<T> = Result<T, ReelError>;

/// Errors surfaced by timeline construction, scroll bindings and context lifecycle.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// A timeline, step or binding was declared inconsistently.
    #[error("configuration error: {0}")]
    Config(String),

    /// A textual anchor, position or color could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A loaded configuration file failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Escape hatch for host-side failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ReelError::Parse`].
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
