use thiserror::Error;

use crate::id_generator::{ElementId, PathId};

/// Reasons a story path cannot enter the path graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Both endpoints name the same element
    #[error("a path cannot start and end at {0}")]
    SelfLoop(ElementId),
    /// An endpoint does not resolve in the entity store
    #[error("path endpoint {0} does not exist")]
    MissingEndpoint(ElementId),
    /// A path with this id is already in the graph
    #[error("path {0} already exists")]
    DuplicateId(PathId),
}

/// Errors surfaced by command execution and the edit history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The editor was opened read-only and the command mutates the map
    #[error("the map is read-only")]
    ReadOnly,
    #[error(transparent)]
    InvalidPath(#[from] PathError),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Errors that can occur while loading an editor configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config value out of range: {0}")]
    Invalid(String),
}
