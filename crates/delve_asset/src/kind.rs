//! Asset kinds and category descriptors

use std::fmt;

/// Broad class of an asset. Selects which locale keys supply the path
/// prefix and file extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetKind {
    Image,
    Audio,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Image, AssetKind::Audio];

    pub fn name(self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Audio => "audio",
        }
    }

    /// Locale key holding the path prefix, e.g. `asset.image.path`.
    pub fn path_key(self) -> String {
        format!("asset.{}.path", self.name())
    }

    /// Locale key holding the file extension, e.g. `asset.image.extension`.
    pub fn extension_key(self) -> String {
        format!("asset.{}.extension", self.name())
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Descriptor shared by every identifier of one category.
///
/// `subdir` is appended to the kind's path prefix, so a UI image
/// lives under `<image prefix>ui/`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    pub name: &'static str,
    pub kind: AssetKind,
    pub subdir: &'static str,
}

impl Category {
    pub const fn new(name: &'static str, kind: AssetKind, subdir: &'static str) -> Self {
        Self { name, kind, subdir }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
