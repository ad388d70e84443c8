use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskdeckError>;

#[derive(Debug, Error)]
pub enum TaskdeckError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("Invalid task ID format: {0}")]
    InvalidTaskId(String),

    #[error("Invalid list ID: {0:?}")]
    InvalidListId(String),

    #[error("A drag is already in progress for task {0}")]
    DragInProgress(String),

    #[error("Unknown surface node: {0}")]
    UnknownNode(usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
