//! Resource loader
//!
//! Thin composition of the lookup primitive, the decoder and the cache.
//! `load` blocks on I/O and decoding; callers on a latency-sensitive
//! thread should dispatch it elsewhere.

use crate::cache::{AssetCache, Lookup};
use crate::{
    AssetContext, AssetError, AssetId, Decoder, DirectoryRoot, ResourceLocator, ResourceRoot,
};
use delve_metrics::Counter;
use std::sync::{Arc, Mutex};

/// Snapshot of the loader's counters. All zero when the `metrics`
/// feature is off.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoaderStats {
    pub hits: usize,
    pub misses: usize,
    pub decode_failures: usize,
    pub not_found: usize,
    pub placeholders: usize,
}

pub struct ResourceLoader<D: Decoder, R: ResourceRoot = DirectoryRoot> {
    root: R,
    decoder: D,
    placeholder: Arc<D::Asset>,
    cache: AssetCache<D::Asset>,
    counters: Mutex<Counter>,
}

impl<D: Decoder, R: ResourceRoot> ResourceLoader<D, R> {
    pub fn new(root: R, decoder: D) -> Self {
        let placeholder = Arc::new(decoder.placeholder());
        Self {
            root,
            decoder,
            placeholder,
            cache: AssetCache::new(),
            counters: Mutex::new(Counter::new()),
        }
    }

    /// Shared asset returned for sentinel identifiers.
    pub fn placeholder(&self) -> &Arc<D::Asset> {
        &self.placeholder
    }

    /// Resolves `id` under `ctx` and loads it.
    ///
    /// The sentinel yields the placeholder without touching the root or
    /// the decoder.
    pub fn load<I: AssetId>(&self, ctx: &AssetContext, id: I) -> Result<Arc<D::Asset>, AssetError> {
        match id.resource_locator(ctx)? {
            Some(locator) => self.load_locator(ctx, &locator),
            None => {
                tracing::trace!(category = I::CATEGORY.name, "sentinel requested");
                self.count("placeholder");
                Ok(Arc::clone(&self.placeholder))
            }
        }
    }

    /// Loads an already assembled locator. The asset is cached under the
    /// locale of `ctx`.
    pub fn load_locator(
        &self,
        ctx: &AssetContext,
        locator: &ResourceLocator,
    ) -> Result<Arc<D::Asset>, AssetError> {
        let epoch = self.cache.enter(ctx.shared_locale());
        let lookup = self
            .cache
            .get_or_try_insert_with(epoch, locator, || self.fetch(locator));

        match lookup {
            Ok(Lookup::Hit(asset)) => {
                tracing::trace!(%locator, "cache hit");
                self.count("hit");
                Ok(asset)
            }
            Ok(lookup @ Lookup::Filled(_)) => {
                tracing::debug!(%locator, "decoded");
                self.count("miss");
                Ok(lookup.into_asset())
            }
            Err(err) => {
                tracing::warn!(%locator, error = %err, "asset load failed");
                match err {
                    AssetError::ResourceNotFound { .. } => self.count("not_found"),
                    _ => self.count("decode_failure"),
                }
                Err(err)
            }
        }
    }

    fn fetch(&self, locator: &ResourceLocator) -> Result<D::Asset, AssetError> {
        let path = self
            .root
            .locate(locator)
            .ok_or_else(|| AssetError::ResourceNotFound {
                locator: locator.clone(),
            })?;

        self.decoder.decode(&path).map_err(|source| {
            if source.is_not_found() {
                AssetError::ResourceNotFound {
                    locator: locator.clone(),
                }
            } else {
                AssetError::DecodeFailure {
                    locator: locator.clone(),
                    source,
                }
            }
        })
    }

    pub fn is_cached(&self, ctx: &AssetContext, locator: &ResourceLocator) -> bool {
        self.cache.contains(ctx.epoch(), locator)
    }

    /// Ready assets across every locale still in use.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached asset. Call after changing anything that feeds
    /// locators or decoding outside of [`AssetContext`].
    pub fn invalidate(&self) {
        tracing::debug!(entries = self.cache.len(), "asset cache invalidated");
        self.cache.invalidate();
    }

    pub fn stats(&self) -> LoaderStats {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        LoaderStats {
            hits: counters.get("hit"),
            misses: counters.get("miss"),
            decode_failures: counters.get("decode_failure"),
            not_found: counters.get("not_found"),
            placeholders: counters.get("placeholder"),
        }
    }

    fn count(&self, name: &'static str) {
        if delve_metrics::ENABLED {
            self.counters
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .increment(name, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetKind, Catalog, Catalogs, Category, DecodeError, LocaleConfig};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TEST_UI: Category = Category::new("loader_ui", AssetKind::Image, "ui/");

    crate::asset_ids! {
        enum TestImage {
            category: TEST_UI,
            sentinel: NoAsset,
            ids: [Title, Logo, Broken, Missing, Cursor],
        }
    }

    #[derive(Debug, PartialEq)]
    struct Bitmap(String);

    /// Pretends every locator in `files` exists.
    struct FakeRoot {
        files: HashMap<String, &'static str>,
    }

    impl ResourceRoot for FakeRoot {
        fn locate(&self, locator: &ResourceLocator) -> Option<PathBuf> {
            self.files
                .contains_key(locator.as_str())
                .then(|| PathBuf::from(locator.as_str()))
        }
    }

    #[derive(Default)]
    struct CountingDecoder {
        calls: AtomicUsize,
        fail_first: AtomicUsize,
    }

    impl Decoder for CountingDecoder {
        type Asset = Bitmap;

        fn decode(&self, path: &Path) -> Result<Bitmap, DecodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let path = path.to_string_lossy().to_string();
            if path.contains("broken") {
                return Err(DecodeError::malformed("bad header"));
            }
            if path.contains("cursor") {
                return Err(std::io::Error::from(std::io::ErrorKind::NotFound).into());
            }
            if self.fail_first.load(Ordering::SeqCst) > 0 {
                self.fail_first.fetch_sub(1, Ordering::SeqCst);
                return Err(DecodeError::malformed("transient"));
            }
            Ok(Bitmap(path))
        }

        fn placeholder(&self) -> Bitmap {
            Bitmap(String::new())
        }
    }

    fn context(image_prefix: &str) -> AssetContext {
        let locale = LocaleConfig::new("en").with_kind(AssetKind::Image, image_prefix, ".png");
        let catalogs = Catalogs::new().with(Catalog::from_static(
            "loader_ui",
            &["title", "logo", "broken", "missing", "cursor"],
        ));
        AssetContext::new(locale, catalogs)
    }

    fn loader() -> ResourceLoader<CountingDecoder, FakeRoot> {
        let files = [
            "/images/ui/title.png",
            "/images/ui/logo.png",
            "/images/ui/broken.png",
            "/images/ui/cursor.png",
            "/images/ja/ui/logo.png",
        ]
        .into_iter()
        .map(|f| (f.to_string(), f))
        .collect();
        ResourceLoader::new(FakeRoot { files }, CountingDecoder::default())
    }

    #[test]
    fn test_logo_loads_once() {
        let ctx = context("/images/");
        let loader = loader();

        let first = loader.load(&ctx, TestImage::Logo).unwrap();
        assert_eq!(*first, Bitmap("/images/ui/logo.png".into()));

        let second = loader.load(&ctx, TestImage::Logo).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), 1);
        assert!(loader.is_cached(&ctx, &ResourceLocator::from("/images/ui/logo.png")));
    }

    #[test]
    fn test_locator_and_identifier_share_cache() {
        let ctx = context("/images/");
        let loader = loader();

        let by_id = loader.load(&ctx, TestImage::Title).unwrap();
        let by_locator = loader
            .load_locator(&ctx, &ResourceLocator::from("/images/ui/title.png"))
            .unwrap();
        assert!(Arc::ptr_eq(&by_id, &by_locator));
        assert_eq!(loader.cached_len(), 1);
    }

    #[test]
    fn test_sentinel_returns_placeholder_without_decode() {
        let ctx = context("/images/");
        let loader = loader();

        let asset = loader.load(&ctx, TestImage::NoAsset).unwrap();
        assert!(Arc::ptr_eq(&asset, loader.placeholder()));
        assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(loader.cached_len(), 0);
    }

    #[test]
    fn test_missing_resource() {
        let ctx = context("/images/");
        let loader = loader();

        let err = loader.load(&ctx, TestImage::Missing).unwrap_err();
        match &err {
            AssetError::ResourceNotFound { locator } => {
                assert_eq!(locator.as_str(), "/images/ui/missing.png")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_retryable());
        assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_file_vanishing_before_decode_is_not_found() {
        let ctx = context("/images/");
        let loader = loader();

        for attempt in 1..=2 {
            let err = loader.load(&ctx, TestImage::Cursor).unwrap_err();
            match &err {
                AssetError::ResourceNotFound { locator } => {
                    assert_eq!(locator.as_str(), "/images/ui/cursor.png")
                }
                other => panic!("unexpected error: {other:?}"),
            }
            assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), attempt);
        }
        assert_eq!(loader.cached_len(), 0);
        assert!(!loader.is_cached(&ctx, &ResourceLocator::from("/images/ui/cursor.png")));
    }

    #[test]
    fn test_decode_failure_is_not_cached() {
        let ctx = context("/images/");
        let loader = loader();

        for attempt in 1..=2 {
            let err = loader.load(&ctx, TestImage::Broken).unwrap_err();
            assert!(matches!(err, AssetError::DecodeFailure { .. }));
            assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), attempt);
        }
        assert_eq!(loader.cached_len(), 0);
    }

    #[test]
    fn test_transient_failure_retries() {
        let ctx = context("/images/");
        let loader = loader();
        loader.decoder.fail_first.store(1, Ordering::SeqCst);

        assert!(loader.load(&ctx, TestImage::Logo).is_err());
        let asset = loader.load(&ctx, TestImage::Logo).unwrap();
        assert_eq!(*asset, Bitmap("/images/ui/logo.png".into()));
        assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_locale_switch_drops_stale_assets() {
        let mut ctx = context("/images/");
        let loader = loader();

        let english = loader.load(&ctx, TestImage::Logo).unwrap();

        ctx.switch_locale(LocaleConfig::new("ja").with_kind(
            AssetKind::Image,
            "/images/ja/",
            ".png",
        ));
        let japanese = loader.load(&ctx, TestImage::Logo).unwrap();

        assert!(!Arc::ptr_eq(&english, &japanese));
        assert_eq!(*japanese, Bitmap("/images/ja/ui/logo.png".into()));
        // Nothing uses the English configuration anymore
        assert_eq!(loader.cached_len(), 1);
        assert!(!loader.is_cached(&ctx, &ResourceLocator::from("/images/ui/logo.png")));
    }

    #[test]
    fn test_equal_locales_share_cached_assets() {
        let a = context("/images/");
        let b = context("/images/");
        let loader = loader();

        let first = loader.load(&a, TestImage::Logo).unwrap();
        let from_b = loader.load(&b, TestImage::Logo).unwrap();
        let again = loader.load(&a, TestImage::Logo).unwrap();

        assert!(Arc::ptr_eq(&first, &from_b));
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_old_context_does_not_undo_switch() {
        let old = context("/images/");
        let mut new = old.clone();
        new.switch_locale(LocaleConfig::new("ja").with_kind(
            AssetKind::Image,
            "/images/ja/",
            ".png",
        ));
        let loader = loader();

        let japanese = loader.load(&new, TestImage::Logo).unwrap();
        let english = loader.load(&old, TestImage::Logo).unwrap();
        let japanese_again = loader.load(&new, TestImage::Logo).unwrap();

        assert_eq!(*english, Bitmap("/images/ui/logo.png".into()));
        assert!(Arc::ptr_eq(&japanese, &japanese_again));
        assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_locale_switch_with_same_paths_still_reloads() {
        let mut ctx = context("/images/");
        let loader = loader();

        let before = loader.load(&ctx, TestImage::Logo).unwrap();
        ctx.switch_locale(LocaleConfig::new("en-GB").with_kind(
            AssetKind::Image,
            "/images/",
            ".png",
        ));
        let after = loader.load(&ctx, TestImage::Logo).unwrap();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalidate() {
        let ctx = context("/images/");
        let loader = loader();

        loader.load(&ctx, TestImage::Logo).unwrap();
        loader.invalidate();
        assert_eq!(loader.cached_len(), 0);
        loader.load(&ctx, TestImage::Logo).unwrap();
        assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drift_surfaces_before_io() {
        let locale = LocaleConfig::new("en").with_kind(AssetKind::Image, "/images/", ".png");
        let catalogs = Catalogs::new().with(Catalog::from_static("loader_ui", &["title"]));
        let ctx = AssetContext::new(locale, catalogs);
        let loader = loader();

        let err = loader.load(&ctx, TestImage::Logo).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), 0);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn test_stats() {
        let ctx = context("/images/");
        let loader = loader();

        loader.load(&ctx, TestImage::Logo).unwrap();
        loader.load(&ctx, TestImage::Logo).unwrap();
        loader.load(&ctx, TestImage::NoAsset).unwrap();
        let _ = loader.load(&ctx, TestImage::Missing);
        let _ = loader.load(&ctx, TestImage::Broken);

        assert_eq!(
            loader.stats(),
            LoaderStats {
                hits: 1,
                misses: 1,
                decode_failures: 1,
                not_found: 1,
                placeholders: 1,
            }
        );
    }
}
