use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisitReportError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("No images found in: {0}")]
    NoImagesFound(String),

    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("Photo fetch error: {0}")]
    PhotoFetch(String),

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] visit_report_common::Error),
}

pub type Result<T> = std::result::Result<T, VisitReportError>;
