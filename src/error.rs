//! Unified error type for the crate's top-level API.

use thiserror::Error;

/// Errors surfaced by [`crate::analyze_file`] and the high-level entry
/// points. Layer-specific errors convert into this type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Package error: {0}")]
    Opc(#[from] crate::opc::OpcError),

    #[error("Presentation error: {0}")]
    Pptx(#[from] crate::pptx::PptxError),
}

pub type Result<T> = std::result::Result<T, Error>;
