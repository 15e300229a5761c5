//! Pack URI handling for OPC packages.
//!
//! A pack URI is the absolute, `/`-rooted name of a part within a
//! package, such as `/ppt/presentation.xml`. Relationship targets are
//! stored relative to the source part and must be resolved against its
//! base URI before lookup.

use std::fmt;

/// Pack URI of the package itself.
pub const PACKAGE_URI: &str = "/";

/// Pack URI of the content types stream.
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

/// An absolute part name within an OPC package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackURI {
    uri: String,
}

impl PackURI {
    /// Create a pack URI, which must begin with a slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self, String> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(format!("pack URI must begin with a slash, got '{uri}'"));
        }
        Ok(Self { uri })
    }

    /// Resolve a relative reference against a base URI, collapsing
    /// `..` and `.` segments.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self, String> {
        let joined = join_paths(base_uri, relative_ref);
        Self::new(normalize_path(&joined))
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// The directory portion, `/` for parts at the package root.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// The final path segment.
    pub fn filename(&self) -> &str {
        match self.uri.rfind('/') {
            Some(pos) => &self.uri[pos + 1..],
            None => &self.uri,
        }
    }

    /// The extension without its leading dot, empty when there is none.
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        match filename.rfind('.') {
            Some(pos) => &filename[pos + 1..],
            None => "",
        }
    }

    /// The ZIP member name, i.e. the pack URI without its leading slash.
    pub fn membername(&self) -> &str {
        self.uri.trim_start_matches('/')
    }

    /// Pack URI of the rels stream holding this part's relationships.
    pub fn rels_uri(&self) -> PackURI {
        let base = self.base_uri();
        let uri = if base == "/" {
            format!("/_rels/{}.rels", self.filename())
        } else {
            format!("{}/_rels/{}.rels", base, self.filename())
        };
        PackURI { uri }
    }
}

impl fmt::Display for PackURI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

fn join_paths(base: &str, relative: &str) -> String {
    if relative.starts_with('/') {
        relative.to_string()
    } else if base == "/" {
        format!("/{relative}")
    } else {
        format!("{base}/{relative}")
    }
}

fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    let mut normalized = String::with_capacity(path.len());
    for segment in &segments {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}
