//! Remote file descriptors from file-list replies.

use serde::{Deserialize, Serialize};

/// A downloadable file: its server-side name and advertised size in bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    pub name: String,
    pub size: u32,
}

impl FileItem {
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}
