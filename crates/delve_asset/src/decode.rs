use crate::DecodeError;
use std::path::Path;

/// Byte-to-asset primitive used by the [`ResourceLoader`](crate::ResourceLoader).
///
/// Decoding may be slow and may fail. Implementations must not cache;
/// the loader owns caching.
pub trait Decoder: Send + Sync {
    type Asset: Send + Sync + 'static;

    fn decode(&self, path: &Path) -> Result<Self::Asset, DecodeError>;

    /// Asset handed out for the "no asset" identifier. Built once per
    /// loader.
    fn placeholder(&self) -> Self::Asset;
}

/// Reads the file as raw bytes. Useful for assets the game hands to
/// another subsystem undecoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesDecoder;

impl Decoder for BytesDecoder {
    type Asset = Vec<u8>;

    fn decode(&self, path: &Path) -> Result<Vec<u8>, DecodeError> {
        Ok(std::fs::read(path)?)
    }

    fn placeholder(&self) -> Vec<u8> {
        Vec::new()
    }
}
