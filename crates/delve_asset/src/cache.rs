//! Locator-keyed asset cache
//!
//! Each (epoch, locator) pair maps to a shared `OnceCell`. The map's shard
//! lock is held only to check-then-insert that cell; decoding happens
//! outside it, and the cell lets exactly one caller initialize while the
//! others wait for the result. A failed initialization leaves the cell
//! empty, so nothing about the failure is remembered.
//!
//! Entries filled under one locale configuration are never visible under
//! another. A generation is evicted once every configuration with its
//! epoch has been dropped.

use crate::{LocaleConfig, ResourceLocator};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::sync::{Arc, Weak};

type Slot<A> = Arc<OnceCell<Arc<A>>>;

/// Outcome of a cache lookup.
pub(crate) enum Lookup<A> {
    Hit(Arc<A>),
    Filled(Arc<A>),
}

pub struct AssetCache<A> {
    entries: DashMap<(u64, ResourceLocator), Slot<A>>,
    /// A configuration per live epoch, used to notice when it is gone.
    generations: DashMap<u64, Weak<LocaleConfig>>,
}

impl<A> AssetCache<A> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            generations: DashMap::new(),
        }
    }

    /// Registers `locale` as in use and returns its epoch. The first time
    /// an epoch is seen, generations nobody uses anymore are evicted.
    pub fn enter(&self, locale: &Arc<LocaleConfig>) -> u64 {
        let epoch = locale.epoch();
        let fresh = match self.generations.entry(epoch) {
            Entry::Occupied(mut live) => {
                if live.get().strong_count() == 0 {
                    live.insert(Arc::downgrade(locale));
                }
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::downgrade(locale));
                true
            }
        };
        if fresh {
            self.evict_unused();
        }
        epoch
    }

    /// Drops the entries of every generation whose configuration has been
    /// dropped. Returns the number of entries removed.
    pub fn evict_unused(&self) -> usize {
        self.generations.retain(|_, locale| locale.strong_count() > 0);
        let before = self.entries.len();
        self.entries
            .retain(|(epoch, _), _| self.generations.contains_key(epoch));
        let dropped = before.saturating_sub(self.entries.len());
        if dropped > 0 {
            tracing::debug!(dropped, "evicted assets of retired locales");
        }
        dropped
    }

    /// Drops every cached asset. Outstanding `Arc`s stay valid.
    pub fn invalidate(&self) {
        self.entries.clear();
    }

    pub fn get(&self, epoch: u64, locator: &ResourceLocator) -> Option<Arc<A>> {
        self.entries
            .get(&(epoch, locator.clone()))
            .and_then(|slot| slot.value().get().cloned())
    }

    pub fn contains(&self, epoch: u64, locator: &ResourceLocator) -> bool {
        self.get(epoch, locator).is_some()
    }

    /// Number of entries with a ready asset, across all generations.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    /// Returns the cached asset for `locator` under `epoch`, running `init`
    /// at most once across concurrent callers when it is missing.
    pub(crate) fn get_or_try_insert_with<E>(
        &self,
        epoch: u64,
        locator: &ResourceLocator,
        init: impl FnOnce() -> Result<A, E>,
    ) -> Result<Lookup<A>, E> {
        let key = (epoch, locator.clone());
        let ready = self
            .entries
            .get(&key)
            .and_then(|slot| slot.value().get().cloned());
        if let Some(asset) = ready {
            return Ok(Lookup::Hit(asset));
        }

        let slot: Slot<A> = self.entries.entry(key.clone()).or_default().clone();

        let mut filled = false;
        let result = slot.get_or_try_init(|| {
            filled = true;
            init().map(Arc::new)
        });

        match result {
            Ok(asset) if filled => Ok(Lookup::Filled(asset.clone())),
            Ok(asset) => Ok(Lookup::Hit(asset.clone())),
            Err(err) => {
                self.entries.remove_if(&key, |_, current| {
                    Arc::ptr_eq(current, &slot) && current.get().is_none()
                });
                Err(err)
            }
        }
    }
}

impl<A> Default for AssetCache<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Lookup<A> {
    pub(crate) fn into_asset(self) -> Arc<A> {
        match self {
            Lookup::Hit(asset) | Lookup::Filled(asset) => asset,
        }
    }
}
