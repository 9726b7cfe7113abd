//! voxel_tiles - Framework/engine independent tile-based mesh generation
//!
//! Turns an occupancy volume (a 3D grid of fill ids) into one combined mesh
//! by placing hand-authored base pieces at every lattice vertex. The
//! configuration of filled cells around each vertex is decomposed into at
//! most four base pieces with rigid transforms, so a small library of
//! authored pieces covers every possible configuration.
//!
//! # Features
//!
//! - **Configuration decomposition**: direct matches over quarter turns and
//!   mirrors, connected-island splitting, complement (inside-out) matching
//! - **Planar and volumetric themes**: 4-cell (XZ plane) and 8-cell
//!   neighbourhoods behind one pipeline
//! - **Chunk seams**: adjacent volumes are sampled across boundaries and the
//!   shared row is drawn exactly once
//! - **Parallel pipeline**: rayon classification and per-stream combination,
//!   non-blocking start/poll/complete orchestration
//!
//! # Example
//!
//! ```ignore
//! use voxel_tiles::{generate, GenerationRequest, OccupancyVolume, Theme, ThemeRegistry};
//!
//! let mut registry = ThemeRegistry::new();
//! let id = registry.register(stone_theme())?;
//!
//! let mut volume = OccupancyVolume::new([16, 8, 16])?;
//! volume.fill_box(IVec3::ZERO, IVec3::new(15, 2, 15), 1)?;
//!
//! let output = generate(&GenerationRequest::new(Arc::new(volume), registry.acquire(id)?));
//! println!("{} vertices, {} indices", output.mesh.vertex_count(), output.mesh.index_count());
//! ```

pub mod config;
pub mod constants;
pub mod corner_table;
pub mod error;
pub mod transform;
pub mod types;
pub mod volume;

// Re-export commonly used items
pub use config::{CombineMode, GenerationSettings};
pub use constants::{coord_to_index, index_to_coord, MAX_AXIS_CELLS, MAX_GROUP_ENTRIES};
pub use error::{GeometryError, RegistryError, Result, ThemeError, TileError, VolumeError};
pub use transform::{RigidTransform, Rotation};
pub use types::{
  Configuration, DecompositionEntry, DecompositionGroup, Dimensionality, Direction, DirectionSet, FillId,
  MinMaxAABB,
};
pub use volume::OccupancyVolume;

// Base piece libraries and the registry owning their derived assets
pub mod theme;
pub use theme::{BasePiece, GeometryCache, PieceMesh, Theme, ThemeAssets, ThemeId, ThemeRegistry};

// Configuration decomposer and lookup tables
pub mod decompose;
pub use decompose::{decompose, ConfigurationTable, DecomposeOptions};

// Pipeline task graph for parallel tile processing
pub mod pipeline;
pub use pipeline::{
  generate, present, Adjacency, CombinedMesh, GenerationOutput, GenerationRequest, GenerationStats, MeshData,
  TileMesher, VariantContext, VariantSelector,
};

// Task queue for batch generation
pub mod task_queue;
pub use task_queue::{GenerationCompletion, GenerationQueue, QueuedRequest};

// Generation statistics (collected with the `metrics` feature)
pub mod metrics;
