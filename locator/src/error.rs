use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Unknown color: {0}")]
    UnknownColor(String),
    #[error("Unknown document: {0}")]
    UnknownDocument(String),
    #[error("Page {page} not found in document {document_id}")]
    PageNotFound { document_id: String, page: usize },
    #[error("Invalid page number: {0}")]
    InvalidPage(u32),
}

pub type Result<T> = std::result::Result<T, AppError>;
