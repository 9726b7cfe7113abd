//! Stage 1: Classification
//!
//! Samples the cells around every lattice vertex, looks the configuration up
//! in the theme's table and decides whether the tile is drawn.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ Classification (one independent task per lattice vertex)                │
//! │                                                                         │
//! │   configuration = Σ bit(i) for each filled corner cell i                │
//! │                                                                         │
//! │   0 / all-filled / empty group      → Void                              │
//! │   skip_borders(d): config is the    → Culled                            │
//! │     pure face mask facing d                                             │
//! │   skip_borders_and_touching(d):     → Culled                            │
//! │     no bit on d's side                                                  │
//! │   vertex on a registered negative   → Culled (neighbour draws the row)  │
//! │     side (X-, Y-, Z-)                                                   │
//! │   otherwise                         → Normal + variant selection        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use glam::IVec3;
use rayon::prelude::*;
use smallvec::SmallVec;

use super::sampling::{sampling_for, CellResolver, NeighborSampling};
use super::types::{ClassifiedLattice, GenerationRequest, TileKind, TileState};
use super::variants::{resolve_variant, VariantContext};
use crate::config::GenerationSettings;
use crate::constants::index_to_coord;
use crate::types::{Configuration, Dimensionality, Direction, DirectionSet};

/// Per-run culling rules resolved against the sampling strategy.
#[derive(Clone, Debug, Default)]
pub struct CullPolicy {
  /// Pure face masks that are culled outright.
  border_masks: SmallVec<[Configuration; 6]>,
  /// Side masks; configurations with no bit on one of them are culled.
  touching_masks: SmallVec<[Configuration; 6]>,
  /// Registered negative directions whose boundary row is culled.
  seam_sides: SmallVec<[Direction; 3]>,
}

impl CullPolicy {
  pub fn new(settings: &GenerationSettings, sampling: &dyn NeighborSampling, registered: DirectionSet) -> Self {
    let full = sampling.dimensionality().full_mask();

    let border_masks = settings
      .skip_borders
      .iter()
      .filter_map(|d| sampling.side_mask(d))
      .map(|side| !side & full)
      .collect();

    let touching_masks = settings
      .skip_borders_and_touching
      .iter()
      .filter_map(|d| sampling.side_mask(d))
      .collect();

    let seam_sides = registered
      .iter()
      .filter(|d| !d.is_positive() && sampling.side_mask(*d).is_some())
      .collect();

    Self {
      border_masks,
      touching_masks,
      seam_sides,
    }
  }

  /// True if a non-void tile at `vertex` is suppressed.
  pub fn culls(&self, configuration: Configuration, vertex: [u32; 3]) -> bool {
    self.border_masks.contains(&configuration)
      || self.touching_masks.iter().any(|&side| configuration & side == 0)
      || self.seam_sides.iter().any(|d| vertex[d.axis()] == 0)
  }
}

/// Classify every lattice vertex of a request.
///
/// Planar themes tile the XZ plane of layer `y = 0` only. Volumes with more
/// than one Y layer are accepted, but the upper layers are ignored and a
/// warning is logged.
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "pipeline::classify"))]
pub fn classify(request: &GenerationRequest) -> ClassifiedLattice {
  let assets = &request.theme;
  let theme = assets.theme();
  let table = assets.table();
  let geometry = assets.geometry();
  let sampling = sampling_for(theme.dimensionality);
  let dimensionality = sampling.dimensionality();

  let volume_dims = request.volume.dims();
  if dimensionality == Dimensionality::Planar && volume_dims[1] > 1 {
    tracing::warn!(
      theme = %theme.name,
      layers = volume_dims[1],
      "planar theme on a layered volume; only layer 0 is tiled"
    );
  }
  let dims = sampling.lattice_dims(volume_dims);
  let resolver = CellResolver::new(
    &request.volume,
    &request.adjacency,
    request.settings.filled_boundaries,
    theme.fill_id,
    request.open_mask,
  );
  let culling = CullPolicy::new(&request.settings, sampling, request.adjacency.registered());
  let offsets = sampling.corner_offsets();
  let selector = request.selector.as_ref();
  let seed = request.settings.seed;

  let tiles = (0..dims[0] * dims[1] * dims[2])
    .into_par_iter()
    .map(|index| {
      let vertex = index_to_coord(dims, index).map(|c| c as u32);
      let position = IVec3::new(vertex[0] as i32, vertex[1] as i32, vertex[2] as i32);
      let configuration = resolver.configuration(position, offsets);

      let group = table.get(configuration);
      if dimensionality.is_void(configuration) || group.is_empty() {
        return TileState::void(configuration);
      }

      if culling.culls(configuration, vertex) {
        return TileState {
          kind: TileKind::Culled,
          configuration,
          group: group.clone(),
          variants: SmallVec::new(),
        };
      }

      let variants = group
        .iter()
        .enumerate()
        .map(|(entry_index, entry)| {
          let context = VariantContext {
            piece: entry.piece,
            entry_index,
            vertex,
            configuration,
            variant_count: geometry.variant_count(entry.piece as usize),
            seed,
          };
          resolve_variant(selector, &context)
        })
        .collect();

      TileState {
        kind: TileKind::Normal,
        configuration,
        group: group.clone(),
        variants,
      }
    })
    .collect();

  ClassifiedLattice { dims, tiles }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;
