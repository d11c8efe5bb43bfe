use thiserror::Error;

/// Errors that can escape a stack presentation.
///
/// Routine absence (missing part, missing tab, no drop target) is never an
/// error; it is reported through `Option` or ignored.
#[derive(Debug, Error)]
pub enum StackError {
    #[error("presentation site error: {0}")]
    Site(String),

    #[error("drag rejected by presentation site")]
    DragRejected,

    #[error("memento error: {0}")]
    Memento(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StackError>;
