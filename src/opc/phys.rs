//! Physical package access.
//!
//! An OPC package is physically a ZIP archive. This layer reads raw
//! member bytes and knows nothing about parts or relationships.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::CONTENT_TYPES_URI;

/// Reads members out of the ZIP archive underlying a package.
pub struct PhysPkgReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl PhysPkgReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> PhysPkgReader<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }

    /// Bytes of the named member. Missing members are an error.
    pub fn blob_for(&mut self, membername: &str) -> Result<Vec<u8>> {
        match self.read_member(membername)? {
            Some(blob) => Ok(blob),
            None => Err(OpcError::PartNotFound(membername.to_string())),
        }
    }

    /// Bytes of the named member, or `None` when the archive has no
    /// such entry. Rels streams are optional, so their absence is not
    /// an error.
    pub fn try_blob_for(&mut self, membername: &str) -> Result<Option<Vec<u8>>> {
        self.read_member(membername)
    }

    /// Bytes of the content types stream, which every package must have.
    pub fn content_types_xml(&mut self) -> Result<Vec<u8>> {
        self.blob_for(CONTENT_TYPES_URI.trim_start_matches('/'))
    }

    fn read_member(&mut self, membername: &str) -> Result<Option<Vec<u8>>> {
        let mut member = match self.archive.by_name(membername) {
            Ok(member) => member,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(err) => return Err(OpcError::ZipError(err)),
        };
        let mut blob = Vec::with_capacity(member.size() as usize);
        member.read_to_end(&mut blob)?;
        Ok(Some(blob))
    }
}
