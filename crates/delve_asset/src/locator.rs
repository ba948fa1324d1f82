use std::fmt;

/// Fully assembled address of a resource: prefix + filename + extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceLocator(String);

impl ResourceLocator {
    /// Plain concatenation, no separator handling or normalization.
    pub fn assemble(prefix: &str, filename: &str, extension: &str) -> Self {
        let mut locator = String::with_capacity(prefix.len() + filename.len() + extension.len());
        locator.push_str(prefix);
        locator.push_str(filename);
        locator.push_str(extension);
        Self(locator)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Locator with any leading `/` removed, for joining onto a root.
    pub fn relative(&self) -> &str {
        self.0.trim_start_matches('/')
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceLocator {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResourceLocator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ResourceLocator {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
