/// Convenience result type used across stepviz.
pub type VizResult<T> = Result<T, VizError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    /// Malformed or inconsistent step trace. Fatal at load time.
    #[error("schema error: {0}")]
    Schema(String),

    /// A step index outside `[0, len)` reached an internal API.
    #[error("index out of range: {index} not in [0, {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: i64,
        /// Number of steps in the trace.
        len: usize,
    },

    /// Layout lookup for an entity that was never initialized.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// The visual encoder has no style rule for a category.
    #[error("unstyled category: {category} in family {family}")]
    UnstyledCategory {
        /// Algorithm family whose table was consulted.
        family: String,
        /// Offending category or role name.
        category: String,
    },

    /// Narration collaborator failure.
    #[error("narration error: {0}")]
    Narration(String),

    /// Errors while drawing a frame onto a surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VizError {
    /// Build a [`VizError::Schema`] value.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Build a [`VizError::IndexOutOfRange`] value.
    pub fn index_out_of_range(index: i64, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Build a [`VizError::UnknownEntity`] value.
    pub fn unknown_entity(id: impl std::fmt::Display) -> Self {
        Self::UnknownEntity(id.to_string())
    }

    /// Build a [`VizError::UnstyledCategory`] value.
    pub fn unstyled(family: impl std::fmt::Display, category: impl std::fmt::Display) -> Self {
        Self::UnstyledCategory {
            family: family.to_string(),
            category: category.to_string(),
        }
    }

    /// Build a [`VizError::Narration`] value.
    pub fn narration(msg: impl Into<String>) -> Self {
        Self::Narration(msg.into())
    }

    /// Build a [`VizError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`VizError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
