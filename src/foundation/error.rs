/// Convenience result type used across ruby-reveal.
pub type RevealResult<T> = Result<T, RevealError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// A `{base:annotation}` token that could not be parsed.
    #[error("malformed annotation: {token}")]
    MalformedAnnotation {
        /// Offending token text, braces included when present.
        token: String,
    },

    /// Invalid user-provided settings or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures reported by a geometry provider while shaping or measuring.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevealError {
    /// Build a [`RevealError::MalformedAnnotation`] value.
    pub fn malformed(token: impl Into<String>) -> Self {
        Self::MalformedAnnotation {
            token: token.into(),
        }
    }

    /// Build a [`RevealError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RevealError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`RevealError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for the non-fatal annotation parse failure.
    pub fn is_malformed_annotation(&self) -> bool {
        matches!(self, Self::MalformedAnnotation { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
