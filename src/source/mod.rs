use thiserror::Error;

pub mod zip_archive;

pub use zip_archive::ZipArchiveSource;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where source images come from.
pub trait ImageSource: Send + Sync {
    /// Raw bytes of the image called `name`.
    fn open(&self, name: &str) -> Result<Vec<u8>, SourceError>;
}
