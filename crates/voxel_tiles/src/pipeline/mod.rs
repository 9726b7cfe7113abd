//! Tile Generation Pipeline
//!
//! A chain of parallel and sequential stages turning an occupancy volume
//! into one combined mesh.
//!
//! ```text
//! ┌──────────┐     ┌───────┐     ┌─────────┐     ┌──────────────┐
//! │ Classify ├────►│ Place ├────►│ Combine ├────►│ Presentation │
//! └──────────┘     └───────┘     └─────────┘     └──────────────┘
//!      │               │              │                  │
//!  TileState[]   PlacedInstance[] CombinedMesh        MeshData
//!  (parallel)     (sequential)   (per-stream tasks  (byte streams)
//!                                 or one sequential
//!                                 grow step)
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Classify**: samples the neighbourhood of every lattice vertex, looks
//!    the configuration up in the theme's table, applies skip and seam
//!    culling, selects geometry variants (parallel via rayon)
//! 2. **Place**: collects Normal tiles into a dense instance list with
//!    world transforms
//! 3. **Combine**: merges instance geometry, grouping indices by submesh
//!    and reversing winding for orientation-flipping instances
//! 4. **Presentation**: serializes the mesh for the renderer
//!
//! # Entry Points
//!
//! - `generate`: synchronous, uses rayon internally
//! - `TileMesher`: non-blocking start / poll / complete

pub mod types;

// Stage implementations
pub mod async_process;
pub mod classify;
pub mod combine;
pub mod placement;
pub mod presentation;
pub mod process;
pub mod sampling;
pub mod variants;

// Test utilities
#[cfg(test)]
pub mod test_utils;


// Re-exports
pub use types::{
  ClassifiedLattice, CombinedMesh, GenerationOutput, GenerationRequest, GenerationStats, PlacedInstance,
  SubmeshRange, TileKind, TileState,
};

pub use classify::{classify, CullPolicy};
pub use combine::{combine, combine_deferred, combine_fixed};
pub use placement::place_instances;
pub use presentation::{present, MeshData};
pub use sampling::{sampling_for, Adjacency, CellResolver, NeighborSampling, PlanarSampling, VolumetricSampling};
pub use variants::{resolve_variant, FirstVariant, VariantContext, VariantSelector};

// Synchronous entry point
pub use process::generate;

// Async entry point (non-blocking)
pub use async_process::TileMesher;
