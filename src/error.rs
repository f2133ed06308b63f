//! Outcome type for composition operations.
//!
//! Absent entities and wrong-mode calls are ordinary outcomes, not panics.
//! Call sites that only care about success use `.is_ok()` / `.ok()`.

use crate::entities::{CompositionMode, ProjectId, SceneId};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CompError {
    #[error("Project {0} not found")]
    ProjectNotFound(ProjectId),

    #[error("Scene '{0}' not found in composition")]
    SceneNotFound(SceneId),

    /// Operation is only valid for `expected` mode projects
    #[error("Operation requires {expected} mode, project is {actual}")]
    ModeMismatch {
        expected: CompositionMode,
        actual: CompositionMode,
    },

    #[error("Scene '{0}' already present")]
    AlreadyPresent(SceneId),

    #[error("Parse composition error: {0}")]
    Parse(String),

    #[error("Serialize composition error: {0}")]
    Serialize(String),
}

pub type CompResult<T> = Result<T, CompError>;
