//! Neighbour sampling around lattice vertices.
//!
//! The only step that differs between planar and volumetric themes is which
//! cells surround a vertex. `NeighborSampling` captures that difference; the
//! classifier, placer and combiner are dimension-agnostic.
//!
//! # Boundary Resolution
//!
//! ```text
//! cell outside the volume
//!   │
//!   ├─ first out-of-range axis (x, then y, then z) gives direction d
//!   │
//!   ├─ adjacent volume registered for d and remapped cell inside it?
//!   │     yes ─► sample the adjacent volume
//!   │
//!   ├─ neighbour registered, cell also outside on a later axis (e)?
//!   │     yes ─► filled iff e ∈ filled_boundaries
//!   │
//!   └─ otherwise ─► filled iff d ∈ filled_boundaries
//! ```
//!
//! The later-axis check keeps chunked output equal to the unsplit volume: a cell
//! under a ±X seam with a filled floor is resolved by the floor, not by the
//! seam direction.

use std::sync::Arc;

use glam::IVec3;

use crate::constants::{EMPTY_FILL, MAX_OPEN_FILL_IDS};
use crate::corner_table::{CORNER_OFFSETS, RING_OFFSETS, SIDE_MASKS};
use crate::types::{Configuration, Dimensionality, Direction, DirectionSet, FillId};
use crate::volume::OccupancyVolume;

// =============================================================================
// Dimensionality strategy
// =============================================================================

/// Neighbourhood shape for one dimensionality.
pub trait NeighborSampling: Send + Sync {
  fn dimensionality(&self) -> Dimensionality;

  /// Lattice size for a volume size.
  fn lattice_dims(&self, volume_dims: [usize; 3]) -> [usize; 3];

  /// Cell offset from the vertex for each configuration bit.
  fn corner_offsets(&self) -> &'static [[i32; 3]];

  /// Configuration bits on the `direction` side of a vertex, or `None` if
  /// the direction does not apply.
  fn side_mask(&self, direction: Direction) -> Option<Configuration>;
}

/// 4 cells in the XZ plane around each vertex.
pub struct PlanarSampling;

/// 8 cells around each vertex.
pub struct VolumetricSampling;

const PLANAR_OFFSETS: [[i32; 3]; 4] = [
  [RING_OFFSETS[0][0], 0, RING_OFFSETS[0][1]],
  [RING_OFFSETS[1][0], 0, RING_OFFSETS[1][1]],
  [RING_OFFSETS[2][0], 0, RING_OFFSETS[2][1]],
  [RING_OFFSETS[3][0], 0, RING_OFFSETS[3][1]],
];

impl NeighborSampling for PlanarSampling {
  fn dimensionality(&self) -> Dimensionality {
    Dimensionality::Planar
  }

  fn lattice_dims(&self, volume_dims: [usize; 3]) -> [usize; 3] {
    [volume_dims[0] + 1, 1, volume_dims[2] + 1]
  }

  fn corner_offsets(&self) -> &'static [[i32; 3]] {
    &PLANAR_OFFSETS
  }

  fn side_mask(&self, direction: Direction) -> Option<Configuration> {
    match direction.axis() {
      1 => None,
      _ => Some(SIDE_MASKS[direction.index()] & Dimensionality::Planar.full_mask()),
    }
  }
}

impl NeighborSampling for VolumetricSampling {
  fn dimensionality(&self) -> Dimensionality {
    Dimensionality::Volumetric
  }

  fn lattice_dims(&self, volume_dims: [usize; 3]) -> [usize; 3] {
    volume_dims.map(|d| d + 1)
  }

  fn corner_offsets(&self) -> &'static [[i32; 3]] {
    &CORNER_OFFSETS
  }

  fn side_mask(&self, direction: Direction) -> Option<Configuration> {
    Some(SIDE_MASKS[direction.index()])
  }
}

/// Sampling strategy for a dimensionality.
pub fn sampling_for(dimensionality: Dimensionality) -> &'static dyn NeighborSampling {
  match dimensionality {
    Dimensionality::Planar => &PlanarSampling,
    Dimensionality::Volumetric => &VolumetricSampling,
  }
}

// =============================================================================
// Adjacency
// =============================================================================

/// Adjacent chunk volumes, one optional slot per direction.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
  volumes: [Option<Arc<OccupancyVolume>>; 6],
}

impl Adjacency {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register the volume lying in `direction` from the generated volume.
  pub fn with(mut self, direction: Direction, volume: Arc<OccupancyVolume>) -> Self {
    self.volumes[direction.index()] = Some(volume);
    self
  }

  pub fn set(&mut self, direction: Direction, volume: Option<Arc<OccupancyVolume>>) {
    self.volumes[direction.index()] = volume;
  }

  #[inline]
  pub fn get(&self, direction: Direction) -> Option<&OccupancyVolume> {
    self.volumes[direction.index()].as_deref()
  }

  /// Directions with a registered volume.
  pub fn registered(&self) -> DirectionSet {
    Direction::ALL
      .into_iter()
      .filter(|d| self.volumes[d.index()].is_some())
      .collect()
  }

  pub fn is_empty(&self) -> bool {
    self.registered().is_empty()
  }
}

// =============================================================================
// Cell resolution
// =============================================================================

/// Decides which cells count as filled for one theme.
pub struct CellResolver<'a> {
  volume: &'a OccupancyVolume,
  adjacency: &'a Adjacency,
  filled_boundaries: DirectionSet,
  fill_id: FillId,
  open_mask: u32,
}

impl<'a> CellResolver<'a> {
  pub fn new(
    volume: &'a OccupancyVolume,
    adjacency: &'a Adjacency,
    filled_boundaries: DirectionSet,
    fill_id: FillId,
    open_mask: u32,
  ) -> Self {
    Self {
      volume,
      adjacency,
      filled_boundaries,
      fill_id,
      open_mask,
    }
  }

  /// True if a fill id counts as filled for the theme.
  #[inline]
  pub fn matches(&self, fill: FillId) -> bool {
    fill != EMPTY_FILL
      && (fill == self.fill_id
        || ((fill as usize) < MAX_OPEN_FILL_IDS && (self.open_mask >> fill) & 1 == 1))
  }

  /// Resolve a cell, falling back to adjacency and boundary policy outside
  /// the volume.
  pub fn is_filled(&self, cell: IVec3) -> bool {
    if let Some(fill) = self.volume.sample(cell) {
      return self.matches(fill);
    }

    let dims = self.volume.dims();
    let Some((axis, direction)) = outside_axis(cell, dims, 0..3) else {
      return false;
    };

    if let Some(neighbor) = self.adjacency.get(direction) {
      let mut remapped = cell;
      remapped[axis] = if direction.is_positive() {
        cell[axis] - dims[axis] as i32
      } else {
        cell[axis] + neighbor.dims()[axis] as i32
      };
      if let Some(fill) = neighbor.sample(remapped) {
        return self.matches(fill);
      }
      if let Some((_, other)) = outside_axis(cell, dims, axis + 1..3) {
        return self.filled_boundaries.contains(other);
      }
    }

    self.filled_boundaries.contains(direction)
  }

  /// Configuration of the cells around a lattice vertex.
  pub fn configuration(&self, vertex: IVec3, offsets: &[[i32; 3]]) -> Configuration {
    offsets
      .iter()
      .enumerate()
      .filter(|(_, offset)| self.is_filled(vertex + IVec3::from_array(**offset)))
      .fold(0, |config, (bit, _)| config | (1 << bit))
  }
}

/// First axis in `axes` on which `cell` lies outside `dims`, with the
/// direction it leaves through.
fn outside_axis(cell: IVec3, dims: [usize; 3], axes: std::ops::Range<usize>) -> Option<(usize, Direction)> {
  axes.into_iter().find_map(|axis| {
    let c = cell[axis];
    if c < 0 {
      Some((axis, Direction::from_axis(axis, false)))
    } else if c as usize >= dims[axis] {
      Some((axis, Direction::from_axis(axis, true)))
    } else {
      None
    }
  })
}

#[cfg(test)]
#[path = "sampling_test.rs"]
mod sampling_test;
