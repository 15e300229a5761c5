//! Error types for PresentationML handling.

use thiserror::Error;

use crate::opc::OpcError;

#[derive(Error, Debug)]
pub enum PptxError {
    #[error("OPC error: {0}")]
    Opc(#[from] OpcError),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<quick_xml::Error> for PptxError {
    fn from(err: quick_xml::Error) -> Self {
        PptxError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PptxError>;
