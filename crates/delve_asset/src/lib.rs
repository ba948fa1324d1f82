//! Delve Asset Pipeline
//!
//! Resolves symbolic asset identifiers into localized locators and loads
//! them through a shared cache:
//!
//! ```text
//! AssetId --ordinal--> Catalog --filename--> LocaleConfig --locator--> ResourceLoader
//! ```
//!
//! Categories are declared as data with [`asset_ids!`]; the resolution
//! logic is written once in [`AssetId`].

pub mod builtin;
mod cache;
mod catalog;
mod decode;
mod error;
mod identifier;
mod kind;
mod loader;
mod locator;
mod resolver;
mod root;

pub use catalog::{Catalog, CatalogLoadError, Catalogs};
pub use decode::{BytesDecoder, Decoder};
pub use error::{AssetError, DecodeError};
pub use identifier::AssetId;
pub use kind::{AssetKind, Category};
pub use loader::{LoaderStats, ResourceLoader};
pub use locator::ResourceLocator;
pub use resolver::{AssetContext, LocaleConfig};
pub use root::{DirectoryRoot, ResourceRoot};
