//! Pipeline I/O types for the tile generation task chain.
//!
//! ```text
//!                         TILE GENERATION TASK CHAIN
//!                         ==========================
//!
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │ GenerationRequest                                                           │
//! │   volume: Arc<OccupancyVolume>   theme: Arc<ThemeAssets>                    │
//! │   settings: GenerationSettings   adjacency: Adjacency   selector            │
//! └────────────────────────┬────────────────────────────────────────────────────┘
//!                          ▼
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │ STAGE 1: CLASSIFY (parallel per lattice vertex)                             │
//! │ Output: ClassifiedLattice { dims, tiles: Vec<TileState> }                   │
//! │                                                                             │
//! │   sample neighbours ─► configuration ─► table lookup ─► Void|Normal|Culled  │
//! │                                                 └─► variant selection       │
//! └────────────────────────┬────────────────────────────────────────────────────┘
//!                          ▼
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │ STAGE 2: PLACE (sequential, vertex index order)                             │
//! │ Output: Vec<PlacedInstance> { piece, variant, transform, inverted }         │
//! └────────────────────────┬────────────────────────────────────────────────────┘
//!                          ▼
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │ STAGE 3: COMBINE                                                            │
//! │ Fixed:    layout pass ─► one parallel task per stream                       │
//! │ Deferred: sequential grow ─► finalize                                       │
//! │ Output: CombinedMesh (streams + submesh ranges + bounds)                    │
//! └────────────────────────┬────────────────────────────────────────────────────┘
//!                          ▼
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │ STAGE 4: PRESENT (optional)                                                 │
//! │ Output: MeshData (little-endian byte streams for the renderer)              │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use glam::{Mat3, Mat4};
use smallvec::SmallVec;

use super::sampling::Adjacency;
use super::variants::{FirstVariant, VariantSelector};
use crate::config::GenerationSettings;
use crate::constants::{index_to_coord, MAX_GROUP_ENTRIES};
use crate::theme::{IndexRange, ThemeAssets};
use crate::types::{Configuration, DecompositionGroup, Direction, MinMaxAABB};
use crate::volume::OccupancyVolume;

// =============================================================================
// Stage 1: Classification
// =============================================================================

/// Classification of one lattice vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileKind {
  /// No geometry: void configuration or no covering.
  #[default]
  Void,
  /// Geometry is placed.
  Normal,
  /// Geometry exists but a skip policy or a seam suppresses it.
  Culled,
}

/// Per-vertex classification result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileState {
  pub kind: TileKind,
  pub configuration: Configuration,
  pub group: DecompositionGroup,
  /// Selected variant per group entry (Normal tiles only).
  pub variants: SmallVec<[u16; MAX_GROUP_ENTRIES]>,
}

impl TileState {
  pub fn void(configuration: Configuration) -> Self {
    Self {
      configuration,
      ..Default::default()
    }
  }

  #[inline]
  pub fn is_normal(&self) -> bool {
    self.kind == TileKind::Normal
  }
}

/// Classification of every lattice vertex.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassifiedLattice {
  /// Lattice size per axis (volume size + 1, planar Y = 1).
  pub dims: [usize; 3],
  /// Tiles in lattice index order (X-major, Z-minor).
  pub tiles: Vec<TileState>,
}

impl ClassifiedLattice {
  /// Lattice coordinate of a tile index.
  #[inline]
  pub fn vertex(&self, index: usize) -> [u32; 3] {
    index_to_coord(self.dims, index).map(|c| c as u32)
  }

  /// Number of tiles of a kind.
  pub fn count(&self, kind: TileKind) -> usize {
    self.tiles.iter().filter(|t| t.kind == kind).count()
  }

  /// Iterate `(vertex, tile)` over Normal tiles in index order.
  pub fn normal_tiles(&self) -> impl Iterator<Item = ([u32; 3], &TileState)> {
    self
      .tiles
      .iter()
      .enumerate()
      .filter(|(_, tile)| tile.is_normal())
      .map(|(index, tile)| (self.vertex(index), tile))
  }
}

// =============================================================================
// Stage 2: Placement
// =============================================================================

/// One piece variant placed in chunk space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedInstance {
  pub piece: u16,
  pub variant: u16,
  /// `translate(vertex · cell_size) · R · S`.
  pub transform: Mat4,
  /// Geometry is turned inside out (complement match).
  pub inverted: bool,
}

impl PlacedInstance {
  /// True if triangle winding must be reversed when placing this instance.
  ///
  /// Orientation flips when the linear part has a negative determinant
  /// (odd number of mirrored axes, independent of rotation) and again when
  /// the instance is inverted.
  #[inline]
  pub fn flips_winding(&self) -> bool {
    (Mat3::from_mat4(self.transform).determinant() < 0.0) ^ self.inverted
  }
}

// =============================================================================
// Stage 3: Combination
// =============================================================================

/// Contiguous index range of one submesh in the combined buffer.
pub type SubmeshRange = IndexRange;

/// Merged geometry of all placed instances.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CombinedMesh {
  pub positions: Vec<[f32; 3]>,
  pub normals: Vec<[f32; 3]>,
  pub colors: Option<Vec<[f32; 4]>>,
  pub tangents: Option<Vec<[f32; 4]>>,
  pub uvs: Vec<Vec<[f32; 2]>>,
  pub indices: Vec<u32>,
  /// One range per submesh, contiguous and in submesh order.
  pub submeshes: Vec<SubmeshRange>,
  pub bounds: MinMaxAABB,
}

impl CombinedMesh {
  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  #[inline]
  pub fn index_count(&self) -> usize {
    self.indices.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  /// Indices of one submesh.
  pub fn submesh_indices(&self, submesh: usize) -> &[u32] {
    self
      .submeshes
      .get(submesh)
      .map_or(&[][..], |range| &self.indices[range.as_range()])
  }
}

// =============================================================================
// Run I/O
// =============================================================================

/// Everything one generation run needs.
///
/// Volumes and theme assets are shared; the run never mutates them.
#[derive(Clone)]
pub struct GenerationRequest {
  pub volume: Arc<OccupancyVolume>,
  pub theme: Arc<ThemeAssets>,
  pub settings: GenerationSettings,
  pub adjacency: Adjacency,
  pub selector: Arc<dyn VariantSelector>,
  /// Open-theme mask captured from the theme when the request was built.
  pub open_mask: u32,
}

impl GenerationRequest {
  pub fn new(volume: Arc<OccupancyVolume>, theme: Arc<ThemeAssets>) -> Self {
    Self {
      volume,
      open_mask: theme.open_mask(),
      theme,
      settings: GenerationSettings::default(),
      adjacency: Adjacency::default(),
      selector: Arc::new(FirstVariant),
    }
  }

  pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
    self.settings = settings;
    self
  }

  pub fn with_adjacent(mut self, direction: Direction, volume: Arc<OccupancyVolume>) -> Self {
    self.adjacency = self.adjacency.with(direction, volume);
    self
  }

  pub fn with_selector(mut self, selector: Arc<dyn VariantSelector>) -> Self {
    self.selector = selector;
    self
  }
}

impl std::fmt::Debug for GenerationRequest {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GenerationRequest")
      .field("volume_dims", &self.volume.dims())
      .field("theme", &self.theme.theme().name)
      .field("settings", &self.settings)
      .field("adjacency", &self.adjacency.registered())
      .field("open_mask", &self.open_mask)
      .finish()
  }
}

/// Statistics from one generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
  pub lattice_vertices: usize,
  pub normal_tiles: usize,
  pub culled_tiles: usize,
  pub void_tiles: usize,
  pub instances: usize,
  pub vertices: usize,
  pub indices: usize,
  pub classify_us: u64,
  pub place_us: u64,
  pub combine_us: u64,
  pub total_us: u64,
}

/// Result of one generation run, handed to the caller.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
  pub mesh: CombinedMesh,
  pub stats: GenerationStats,
}
