//! Pipeline Orchestrator
//!
//! Runs classify → place → combine for one request using rayon for the
//! parallel stages. This is the synchronous entry point; `TileMesher` wraps
//! it for non-blocking use.
//!
//! # Usage
//!
//! ```ignore
//! let assets = registry.acquire(theme_id)?;
//! let request = GenerationRequest::new(volume, assets)
//!   .with_settings(GenerationSettings::default().with_cell_size(Vec3::splat(2.0)));
//!
//! let output = generate(&request);
//! renderer.upload(present(&output.mesh));
//! ```

use web_time::Instant;

use super::classify::classify;
use super::combine::combine;
use super::placement::place_instances;
use super::types::{GenerationOutput, GenerationRequest, GenerationStats, TileKind};

/// Run the full pipeline for one request.
///
/// All intermediate buffers are owned by this call and dropped before it
/// returns; only the combined mesh is handed back.
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "pipeline::generate"))]
pub fn generate(request: &GenerationRequest) -> GenerationOutput {
  let start = Instant::now();

  let lattice = {
    let _span = tracing::info_span!("classify").entered();
    classify(request)
  };
  let classify_us = start.elapsed().as_micros() as u64;

  let place_start = Instant::now();
  let instances = {
    let _span = tracing::info_span!("place_instances").entered();
    place_instances(&lattice, &request.settings)
  };
  let place_us = place_start.elapsed().as_micros() as u64;

  let combine_start = Instant::now();
  let mesh = {
    let _span = tracing::info_span!("combine").entered();
    combine(request.theme.geometry(), &instances, request.settings.combine_mode)
  };
  let combine_us = combine_start.elapsed().as_micros() as u64;

  let stats = GenerationStats {
    lattice_vertices: lattice.tiles.len(),
    normal_tiles: lattice.count(TileKind::Normal),
    culled_tiles: lattice.count(TileKind::Culled),
    void_tiles: lattice.count(TileKind::Void),
    instances: instances.len(),
    vertices: mesh.vertex_count(),
    indices: mesh.index_count(),
    classify_us,
    place_us,
    combine_us,
    total_us: start.elapsed().as_micros() as u64,
  };

  #[cfg(feature = "metrics")]
  crate::metrics::record_generation(&stats);

  GenerationOutput { mesh, stats }
}
