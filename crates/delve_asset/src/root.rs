//! Resource lookup primitive
//!
//! Turns a locator into something a decoder can read, or reports that
//! nothing exists there.

use crate::ResourceLocator;
use std::path::PathBuf;

/// Answers "is there a resource at this locator, and where?".
pub trait ResourceRoot: Send + Sync {
    fn locate(&self, locator: &ResourceLocator) -> Option<PathBuf>;
}

/// Resolves locators against a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryRoot {
    base: PathBuf,
}

impl DirectoryRoot {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl ResourceRoot for DirectoryRoot {
    fn locate(&self, locator: &ResourceLocator) -> Option<PathBuf> {
        let path = self.base.join(locator.relative());
        path.is_file().then_some(path)
    }
}
