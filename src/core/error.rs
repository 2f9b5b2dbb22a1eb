use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("A student with email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("Student with id {0} not found")]
    NotFound(u64),

    #[error("No students registered")]
    EmptyCollection,

    #[error("Failed to persist student collection: {0}")]
    Persist(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Persist(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Persist(err.to_string())
    }
}
