//! ThemeRegistry - handle-based ownership of shared theme assets.
//!
//! ```text
//! register(theme) ──► validate ──► ThemeId
//!                                     │
//! acquire(id) ──► Arc<ThemeAssets> ◄──┘  table + geometry built once (OnceLock)
//!                  │                     open-theme names resolved to a mask
//!                  ├── run A (clone)
//!                  └── run B (clone)
//!
//! unregister(id) ──► registry drops its Arc; in-flight runs keep theirs,
//!                    assets are freed when the last run finishes.
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use super::{GeometryCache, Theme};
use crate::constants::MAX_OPEN_FILL_IDS;
use crate::decompose::{ConfigurationTable, DecomposeOptions};
use crate::error::{RegistryError, ThemeError};

/// Atomic counter for generating unique ThemeIds.
static THEME_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque registered-theme handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ThemeId(u64);

impl ThemeId {
  fn next() -> Self {
    Self(THEME_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  /// Get the raw ID value.
  pub fn raw(&self) -> u64 {
    self.0
  }
}

// =============================================================================
// ThemeAssets
// =============================================================================

/// A validated theme plus its lazily derived, immutable data.
#[derive(Debug)]
pub struct ThemeAssets {
  theme: Theme,
  table: OnceLock<ConfigurationTable>,
  geometry: OnceLock<GeometryCache>,
  open_mask: AtomicU32,
}

impl ThemeAssets {
  /// Validate a theme and wrap it for sharing.
  ///
  /// Nothing is built yet; the table and geometry cache are derived on first
  /// access.
  pub fn new(theme: Theme) -> Result<Arc<Self>, ThemeError> {
    theme.validate()?;
    Ok(Arc::new(Self {
      theme,
      table: OnceLock::new(),
      geometry: OnceLock::new(),
      open_mask: AtomicU32::new(0),
    }))
  }

  #[inline]
  pub fn theme(&self) -> &Theme {
    &self.theme
  }

  /// Configuration table, built on first use.
  pub fn table(&self) -> &ConfigurationTable {
    self.table.get_or_init(|| {
      let _span = tracing::info_span!("theme::build_table", theme = %self.theme.name).entered();
      ConfigurationTable::build(&self.theme.patterns(), DecomposeOptions::for_theme(&self.theme))
    })
  }

  /// Flattened geometry, built on first use.
  pub fn geometry(&self) -> &GeometryCache {
    self
      .geometry
      .get_or_init(|| GeometryCache::build(&self.theme.pieces))
  }

  /// True once both derived assets exist.
  pub fn is_built(&self) -> bool {
    self.table.get().is_some() && self.geometry.get().is_some()
  }

  /// Fill ids (bit per id, ids below 32) this theme treats as its own.
  ///
  /// Resolved by the registry on `acquire`. `GenerationRequest::new`
  /// captures it, so a later `acquire` never changes a request already
  /// built.
  #[inline]
  pub fn open_mask(&self) -> u32 {
    self.open_mask.load(Ordering::Relaxed)
  }

  /// Store a newly resolved mask. Returns true if it changed.
  pub(crate) fn update_open_mask(&self, mask: u32) -> bool {
    self.open_mask.swap(mask, Ordering::Relaxed) != mask
  }
}

// =============================================================================
// ThemeRegistry
// =============================================================================

/// Owns registered themes and hands out shared assets.
#[derive(Debug, Default)]
pub struct ThemeRegistry {
  themes: HashMap<ThemeId, Arc<ThemeAssets>>,
}

impl ThemeRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Validate and register a theme.
  ///
  /// On failure nothing is stored, so the call can be retried with corrected
  /// data.
  pub fn register(&mut self, theme: Theme) -> Result<ThemeId, ThemeError> {
    if self.find(&theme.name).is_some() {
      tracing::warn!(theme = %theme.name, "theme name already registered; name lookups return the first");
    }
    let assets = ThemeAssets::new(theme)?;
    let id = ThemeId::next();
    self.themes.insert(id, assets);
    Ok(id)
  }

  /// Shared assets for a theme, building the table and geometry on first use.
  ///
  /// Open-theme names are resolved against the themes registered right now.
  pub fn acquire(&self, id: ThemeId) -> Result<Arc<ThemeAssets>, RegistryError> {
    let assets = self.themes.get(&id).ok_or(RegistryError::UnknownTheme(id))?;
    if assets.update_open_mask(self.resolve_open_mask(assets.theme())) {
      tracing::debug!(theme = %assets.theme().name, mask = assets.open_mask(), "open theme mask resolved");
    }
    assets.table();
    assets.geometry();
    Ok(Arc::clone(assets))
  }

  /// Drop the registry's reference to a theme.
  pub fn unregister(&mut self, id: ThemeId) -> Result<(), RegistryError> {
    self
      .themes
      .remove(&id)
      .map(|_| ())
      .ok_or(RegistryError::UnknownTheme(id))
  }

  /// Look up a registered theme by name.
  pub fn find(&self, name: &str) -> Option<ThemeId> {
    self
      .themes
      .iter()
      .filter(|(_, assets)| assets.theme().name == name)
      .map(|(id, _)| *id)
      .min_by_key(|id| id.raw())
  }

  /// Compatibility mask for a theme's `open_to` list.
  pub fn resolve_open_mask(&self, theme: &Theme) -> u32 {
    let mut mask = 0u32;
    for name in &theme.open_to {
      let Some(id) = self.find(name) else {
        tracing::debug!(theme = %theme.name, open_to = %name, "open theme not registered");
        continue;
      };
      let fill_id = self.themes[&id].theme().fill_id as usize;
      if fill_id >= MAX_OPEN_FILL_IDS {
        tracing::warn!(
          theme = %theme.name,
          open_to = %name,
          fill_id,
          "open theme fill id does not fit the compatibility mask"
        );
        continue;
      }
      mask |= 1 << fill_id;
    }
    mask
  }

  #[inline]
  pub fn contains(&self, id: ThemeId) -> bool {
    self.themes.contains_key(&id)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.themes.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.themes.is_empty()
  }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;
