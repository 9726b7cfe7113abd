//! GenerationSettings - per-run configuration for the tile pipeline.

use glam::Vec3;

use crate::types::{Direction, DirectionSet};

/// How the combiner sizes its output buffers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CombineMode {
  /// Output size is computed from the instance list up front; each stream
  /// is written by an independent parallel task.
  #[default]
  Fixed,

  /// Buffers grow while instances are appended and are finalized in one
  /// sequential step.
  Deferred,
}

/// Settings for a single generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
  /// World-space size of one cell along each axis.
  pub cell_size: Vec3,

  /// Cull tiles whose configuration is a pure border mask facing one of
  /// these directions.
  pub skip_borders: DirectionSet,

  /// Cull tiles with no filled cell on the side facing one of these
  /// directions. Removes strictly more tiles than `skip_borders` and can
  /// change the pieces chosen near the culled boundary.
  pub skip_borders_and_touching: DirectionSet,

  /// Directions in which cells outside the volume count as filled.
  /// Unset directions treat outside cells as empty.
  pub filled_boundaries: DirectionSet,

  /// Combiner buffer strategy.
  pub combine_mode: CombineMode,

  /// Seed handed to the variant selector.
  pub seed: u64,
}

impl Default for GenerationSettings {
  fn default() -> Self {
    Self {
      cell_size: Vec3::ONE,
      skip_borders: DirectionSet::EMPTY,
      skip_borders_and_touching: DirectionSet::EMPTY,
      filled_boundaries: DirectionSet::EMPTY,
      combine_mode: CombineMode::default(),
      seed: 0,
    }
  }
}

impl GenerationSettings {
  pub fn with_cell_size(mut self, cell_size: Vec3) -> Self {
    self.cell_size = cell_size;
    self
  }

  pub fn with_skip_borders(mut self, direction: Direction) -> Self {
    self.skip_borders = self.skip_borders.with(direction);
    self
  }

  pub fn with_skip_borders_and_touching(mut self, direction: Direction) -> Self {
    self.skip_borders_and_touching = self.skip_borders_and_touching.with(direction);
    self
  }

  pub fn with_filled_boundary(mut self, direction: Direction) -> Self {
    self.filled_boundaries = self.filled_boundaries.with(direction);
    self
  }

  pub fn with_filled_boundaries(mut self, directions: DirectionSet) -> Self {
    self.filled_boundaries = directions;
    self
  }

  pub fn with_combine_mode(mut self, mode: CombineMode) -> Self {
    self.combine_mode = mode;
    self
  }

  pub fn with_seed(mut self, seed: u64) -> Self {
    self.seed = seed;
    self
  }

  /// World-space position of a lattice vertex.
  #[inline]
  pub fn vertex_position(&self, vertex: [u32; 3]) -> Vec3 {
    Vec3::new(vertex[0] as f32, vertex[1] as f32, vertex[2] as f32) * self.cell_size
  }
}
