//! Readable configuration resources.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// A named, readable source of configuration bytes.
///
/// The file name is used for extension matching and for diagnostics only; it
/// does not have to correspond to anything on disk.
pub trait Resource: Send + Sync {
    /// File name used for extension matching, if one can be resolved.
    fn file_name(&self) -> Option<&str>;

    /// Human-readable description for logs and error messages.
    fn description(&self) -> String {
        self.file_name().unwrap_or("<unnamed resource>").to_string()
    }

    /// Reads the full content. Any handle opened for this is released before
    /// returning.
    fn read_bytes(&self) -> io::Result<Vec<u8>>;
}

/// A resource backed by a file on disk.
///
/// The file is opened on every read and closed when the read finishes.
#[derive(Debug, Clone)]
pub struct FileResource {
    path: PathBuf,
}

impl FileResource {
    /// Creates a resource for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resource for FileResource {
    fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        let mut file = File::open(&self.path)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// An in-memory resource, handy for embedded defaults and tests.
#[derive(Debug, Clone)]
pub struct MemoryResource {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

impl MemoryResource {
    /// Creates a named in-memory resource.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            bytes: bytes.into(),
        }
    }

    /// Creates an in-memory resource without a file name.
    pub fn unnamed(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: None,
            bytes: bytes.into(),
        }
    }
}

impl Resource for MemoryResource {
    fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
