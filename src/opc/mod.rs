//! Open Packaging Convention (OPC) support.
//!
//! OPC is the container format shared by the Office Open XML file
//! types. A package is a ZIP archive whose members, the parts, are
//! wired together by relationship streams and described by a content
//! types stream. This module reads that container without knowing
//! anything about presentations.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys;
pub mod pkgreader;
pub mod rel;

pub use error::OpcError;
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart};
pub use rel::{Relationship, Relationships};
