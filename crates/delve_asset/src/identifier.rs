//! Symbolic asset identifiers
//!
//! Identifiers are fieldless enums declared with [`asset_ids!`]. Every
//! member except the sentinel gets a dense, zero-based ordinal in
//! declaration order, and that ordinal is the only key into the
//! category's [`Catalog`](crate::Catalog). Reordering or removing members
//! therefore changes lookups, so identifiers and catalogs ship together.

use crate::{AssetContext, AssetError, Catalogs, Category, ResourceLocator};
use std::fmt::Debug;
use std::hash::Hash;

/// Capability shared by every identifier enumeration.
///
/// Implemented by [`asset_ids!`]; the provided methods are the whole
/// resolution engine, written once for all categories.
pub trait AssetId: 'static + Copy + Eq + Hash + Debug + Send + Sync {
    /// Category every member belongs to.
    const CATEGORY: Category;

    /// Non-sentinel members, indexed by ordinal.
    const IDS: &'static [Self];

    /// The reserved "no asset" member.
    const SENTINEL: Self;

    /// Position in [`Self::IDS`], or `None` for the sentinel.
    fn ordinal(self) -> Option<usize>;

    fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::IDS.get(ordinal).copied()
    }

    /// Catalog filename for this identifier, `None` for the sentinel.
    fn ordinal_name(self, catalogs: &Catalogs) -> Result<Option<&str>, AssetError> {
        let Some(ordinal) = self.ordinal() else {
            return Ok(None);
        };
        catalogs.get(Self::CATEGORY.name)?.filename(ordinal).map(Some)
    }

    /// Fully assembled locator, `None` for the sentinel.
    fn resource_locator(self, ctx: &AssetContext) -> Result<Option<ResourceLocator>, AssetError> {
        let Some(filename) = self.ordinal_name(ctx.catalogs())? else {
            return Ok(None);
        };
        let locale = ctx.locale();
        let locator = ResourceLocator::assemble(
            &locale.category_prefix(&Self::CATEGORY)?,
            filename,
            locale.extension(Self::CATEGORY.kind)?,
        );
        Ok(Some(locator))
    }
}

/// Declares an identifier enumeration for one asset category.
///
/// Members are listed in ordinal order; the sentinel is appended after
/// them and has no ordinal.
///
/// # Example
/// ```ignore
/// asset_ids! {
///     /// Interface images.
///     pub enum UiImage {
///         category: UI_IMAGES,
///         sentinel: NoAsset,
///         ids: [Title, Logo, Cursor],
///     }
/// }
/// ```
#[macro_export]
macro_rules! asset_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            category: $category:expr,
            sentinel: $sentinel:ident,
            ids: [$($id:ident),+ $(,)?] $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($id,)+
            $sentinel,
        }

        impl $crate::AssetId for $name {
            const CATEGORY: $crate::Category = $category;
            const IDS: &'static [Self] = &[$($name::$id),+];
            const SENTINEL: Self = $name::$sentinel;

            fn ordinal(self) -> ::std::option::Option<usize> {
                match self {
                    $name::$sentinel => ::std::option::Option::None,
                    other => ::std::option::Option::Some(other as usize),
                }
            }
        }
    };
}
