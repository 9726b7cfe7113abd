//! Core data types shared by the decomposer, classifier and combiner.

use smallvec::SmallVec;

use crate::constants::{MAX_GROUP_ENTRIES, PLANAR_CONFIG_COUNT, VOLUMETRIC_CONFIG_COUNT};
use crate::transform::RigidTransform;

/// Neighbourhood configuration: bit `i` set means corner cell `i` is filled.
pub type Configuration = u8;

/// Fill id stored in occupancy cells (0 = empty).
pub type FillId = u8;

// =============================================================================
// Dimensionality
// =============================================================================

/// Number of spatial dimensions a theme tiles in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dimensionality {
  /// 4 neighbour cells in the XZ plane, 16 configurations.
  Planar,
  /// 8 neighbour cells, 256 configurations.
  #[default]
  Volumetric,
}

impl Dimensionality {
  /// Number of configuration values (16 or 256).
  #[inline]
  pub const fn config_count(self) -> usize {
    match self {
      Dimensionality::Planar => PLANAR_CONFIG_COUNT,
      Dimensionality::Volumetric => VOLUMETRIC_CONFIG_COUNT,
    }
  }

  /// Number of neighbour cells (configuration bits).
  #[inline]
  pub const fn corner_count(self) -> usize {
    match self {
      Dimensionality::Planar => 4,
      Dimensionality::Volumetric => 8,
    }
  }

  /// The all-filled configuration, which is always void.
  #[inline]
  pub const fn full_mask(self) -> Configuration {
    (self.config_count() - 1) as Configuration
  }

  /// True for the two configurations that never produce geometry.
  #[inline]
  pub const fn is_void(self, configuration: Configuration) -> bool {
    configuration == 0 || configuration == self.full_mask()
  }
}

// =============================================================================
// Directions
// =============================================================================

/// Axis-aligned direction (face of a volume).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
  NegX,
  PosX,
  NegY,
  PosY,
  NegZ,
  PosZ,
}

impl Direction {
  pub const ALL: [Direction; 6] = [
    Direction::NegX,
    Direction::PosX,
    Direction::NegY,
    Direction::PosY,
    Direction::NegZ,
    Direction::PosZ,
  ];

  /// Stable index: -X, +X, -Y, +Y, -Z, +Z.
  #[inline]
  pub const fn index(self) -> usize {
    self as usize
  }

  /// Axis index (0 = X, 1 = Y, 2 = Z).
  #[inline]
  pub const fn axis(self) -> usize {
    self.index() / 2
  }

  #[inline]
  pub const fn is_positive(self) -> bool {
    self.index() % 2 == 1
  }

  #[inline]
  pub const fn opposite(self) -> Self {
    Self::ALL[self.index() ^ 1]
  }

  /// Direction for an axis and sign.
  #[inline]
  pub const fn from_axis(axis: usize, positive: bool) -> Self {
    Self::ALL[axis * 2 + positive as usize]
  }
}

/// Set of directions stored as a 6-bit mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet(u8);

impl DirectionSet {
  pub const EMPTY: Self = Self(0);
  pub const ALL: Self = Self(0b11_1111);

  #[inline]
  pub const fn contains(self, direction: Direction) -> bool {
    self.0 & (1 << direction.index()) != 0
  }

  #[inline]
  pub const fn with(self, direction: Direction) -> Self {
    Self(self.0 | (1 << direction.index()))
  }

  #[inline]
  pub const fn without(self, direction: Direction) -> Self {
    Self(self.0 & !(1 << direction.index()))
  }

  #[inline]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  pub fn iter(self) -> impl Iterator<Item = Direction> {
    Direction::ALL.into_iter().filter(move |d| self.contains(*d))
  }
}

impl FromIterator<Direction> for DirectionSet {
  fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
    iter.into_iter().fold(Self::EMPTY, |set, d| set.with(d))
  }
}

// =============================================================================
// Decomposition
// =============================================================================

/// One base piece placed with a rigid transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecompositionEntry {
  /// Index into the theme's base piece library.
  pub piece: u16,

  /// Placement transform: `transform.apply(piece.pattern)` is the covered
  /// island (or its complement when `inverted`).
  pub transform: RigidTransform,

  /// Found by matching the island's complement; geometry is turned inside
  /// out when placed.
  pub inverted: bool,
}

impl DecompositionEntry {
  pub const fn new(piece: u16, transform: RigidTransform) -> Self {
    Self {
      piece,
      transform,
      inverted: false,
    }
  }

  /// Cells covered by this entry given the piece's pattern.
  #[inline]
  pub const fn covered(&self, pattern: Configuration, dimensionality: Dimensionality) -> Configuration {
    let placed = self.transform.apply(pattern);
    if self.inverted {
      !placed & dimensionality.full_mask()
    } else {
      placed
    }
  }
}

/// Covering of a configuration by up to 4 placed base pieces.
///
/// Empty means no covering was found; the tile renders as void.
pub type DecompositionGroup = SmallVec<[DecompositionEntry; MAX_GROUP_ENTRIES]>;

// =============================================================================
// Bounds
// =============================================================================

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Create AABB from min/max corners.
  pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
    Self { min, max }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
