//! Delve Runtime
//!
//! Boots services, builds the asset context and warms the asset caches.

mod decode;

use anyhow::{Context, Result};
use decode::ImageDecoder;
use delve_asset::builtin::{self, HaloImage, SoundCue, UiImage};
use delve_asset::{
    AssetContext, AssetId, BytesDecoder, Catalog, Catalogs, Decoder, DirectoryRoot, LocaleConfig,
    ResourceLoader,
};
use delve_services::ServiceConfig;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    tracing::info!("Delve v{}", delve_core::VERSION);

    let asset_dir = env_path("DELVE_ASSETS", "assets");
    let config = ServiceConfig {
        settings_path: env_path("DELVE_SETTINGS", "settings.json"),
        locale_dir: asset_dir.join("locale"),
    };

    tracing::info!("Initializing services...");
    let services = delve_services::init_services(&config).context("failed to start services")?;
    tracing::info!(
        ticks = services.settings.battle_step_ticks(),
        "battle pacing configured"
    );

    let locale = LocaleConfig::from_strings(&services.strings)?;
    let catalogs = load_catalogs(&asset_dir.join("catalogs"))?;
    builtin::verify(&catalogs).context("asset catalogs are out of sync with the game")?;
    let ctx = AssetContext::new(locale, catalogs);

    let images = ResourceLoader::new(DirectoryRoot::new(&asset_dir), ImageDecoder);
    let ui = preload::<UiImage, _>(&images, &ctx)?;
    let halos = preload::<HaloImage, _>(&images, &ctx)?;

    let sounds = ResourceLoader::new(DirectoryRoot::new(&asset_dir), BytesDecoder);
    let cues = preload::<SoundCue, _>(&sounds, &ctx)?;

    tracing::info!(ui, halos, cues, "assets preloaded");
    tracing::info!(images = ?images.stats(), sounds = ?sounds.stats(), "loader stats");

    Ok(())
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Built-in catalogs, with any `<category>.json` in `dir` replacing the
/// embedded table for that category.
fn load_catalogs(dir: &Path) -> Result<Catalogs> {
    let mut catalogs = builtin::catalogs();
    for category in [builtin::UI_IMAGES, builtin::HALO_IMAGES, builtin::SOUND_CUES] {
        let path = dir.join(format!("{}.json", category.name));
        if !path.is_file() {
            continue;
        }
        let catalog = Catalog::from_json_file(&path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?;
        anyhow::ensure!(
            catalog.category() == category.name,
            "{} declares category '{}', expected '{}'",
            path.display(),
            catalog.category(),
            category.name
        );
        tracing::info!(category = category.name, rows = catalog.len(), "catalog override");
        catalogs.insert(catalog);
    }
    Ok(catalogs)
}

/// Loads every identifier of `I`. Missing or undecodable files are
/// logged and skipped; configuration errors abort.
fn preload<I: AssetId, D: Decoder>(
    loader: &ResourceLoader<D, DirectoryRoot>,
    ctx: &AssetContext,
) -> Result<usize> {
    let mut loaded = 0;
    for id in I::IDS {
        match loader.load(ctx, *id) {
            Ok(_) => loaded += 1,
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => tracing::warn!(?id, error = %err, "skipping asset"),
        }
    }
    Ok(loaded)
}
