use thiserror::Error;

#[derive(Debug, Error)]
pub enum VigilError {
    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VigilError>;
