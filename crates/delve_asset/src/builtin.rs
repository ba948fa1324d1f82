//! Asset categories shipped with the game
//!
//! Identifier enumerations and their catalogs live side by side here so
//! they are versioned together. Append new members at the end of `ids`
//! and add the matching catalog row in the same change.

use crate::{asset_ids, AssetError, AssetKind, Catalog, Catalogs, Category};

pub const UI_IMAGES: Category = Category::new("ui", AssetKind::Image, "ui/");
pub const HALO_IMAGES: Category = Category::new("halo", AssetKind::Image, "halo/");
pub const SOUND_CUES: Category = Category::new("cue", AssetKind::Audio, "cue/");

asset_ids! {
    /// Title screen and interface chrome.
    pub enum UiImage {
        category: UI_IMAGES,
        sentinel: NoAsset,
        ids: [Title, Logo, Cursor, Frame, Portrait, Minimap],
    }
}

asset_ids! {
    /// Elemental halos drawn around party members in battle.
    pub enum HaloImage {
        category: HALO_IMAGES,
        sentinel: NoAsset,
        ids: [Fire, Ice, Thunder, Holy, Shadow, Poison],
    }
}

asset_ids! {
    /// Short sound effects.
    pub enum SoundCue {
        category: SOUND_CUES,
        sentinel: NoAsset,
        ids: [Step, Hit, Heal, Victory],
    }
}

const UI_FILES: &[&str] = &["title", "logo", "cursor", "frame", "portrait", "minimap"];

const HALO_FILES: &[&str] = &[
    "halo_fire",
    "halo_ice",
    "halo_thunder",
    "halo_holy",
    "halo_shadow",
    "halo_poison",
];

const CUE_FILES: &[&str] = &["step", "hit", "heal", "victory"];

/// Catalogs for every built-in category.
pub fn catalogs() -> Catalogs {
    Catalogs::new()
        .with(Catalog::from_static(UI_IMAGES.name, UI_FILES))
        .with(Catalog::from_static(HALO_IMAGES.name, HALO_FILES))
        .with(Catalog::from_static(SOUND_CUES.name, CUE_FILES))
}

/// Checks every built-in category against `catalogs`.
pub fn verify(catalogs: &Catalogs) -> Result<(), AssetError> {
    catalogs.verify::<UiImage>()?;
    catalogs.verify::<HaloImage>()?;
    catalogs.verify::<SoundCue>()?;
    Ok(())
}
