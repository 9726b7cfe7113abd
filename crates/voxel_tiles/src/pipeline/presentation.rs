//! Stage 4: Presentation
//!
//! Converts a combined mesh to byte arrays for the render collaborator.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ MeshData format (little-endian, tightly packed):                        │
//! │   - positions: Vec<u8>        // [f32; 3] per vertex                    │
//! │   - normals:   Vec<u8>        // [f32; 3] per vertex                    │
//! │   - colors:    Option<Vec<u8>>  // [f32; 4] per vertex                  │
//! │   - tangents:  Option<Vec<u8>>  // [f32; 4] per vertex                  │
//! │   - uvs:       Vec<Vec<u8>>   // [f32; 2] per vertex per channel        │
//! │   - indices:   Vec<u8>        // u32 per index                          │
//! │   - vertex_count, index_count: u32                                      │
//! │   - submeshes: Vec<SubmeshRange>                                        │
//! │   - bounds: MinMaxAABB                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use super::types::{CombinedMesh, SubmeshRange};
use crate::types::MinMaxAABB;

/// Byte-level mesh for rendering.
#[derive(Clone, Default, PartialEq)]
pub struct MeshData {
  pub positions: Vec<u8>,
  pub normals: Vec<u8>,
  pub colors: Option<Vec<u8>>,
  pub tangents: Option<Vec<u8>>,
  pub uvs: Vec<Vec<u8>>,
  pub indices: Vec<u8>,
  pub vertex_count: u32,
  pub index_count: u32,
  pub submeshes: Vec<SubmeshRange>,
  pub bounds: MinMaxAABB,
}

impl std::fmt::Debug for MeshData {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MeshData")
      .field("vertex_count", &self.vertex_count)
      .field("index_count", &self.index_count)
      .field("submeshes", &self.submeshes)
      .field("bounds", &self.bounds)
      .finish()
  }
}

fn floats_to_bytes<const N: usize>(values: &[[f32; N]]) -> Vec<u8> {
  let mut bytes = Vec::with_capacity(values.len() * N * 4);
  for value in values {
    for component in value {
      bytes.extend_from_slice(&component.to_le_bytes());
    }
  }
  bytes
}

fn indices_to_bytes(indices: &[u32]) -> Vec<u8> {
  let mut bytes = Vec::with_capacity(indices.len() * 4);
  for index in indices {
    bytes.extend_from_slice(&index.to_le_bytes());
  }
  bytes
}

/// Serialize a combined mesh.
pub fn present(mesh: &CombinedMesh) -> MeshData {
  MeshData {
    positions: floats_to_bytes(&mesh.positions),
    normals: floats_to_bytes(&mesh.normals),
    colors: mesh.colors.as_deref().map(floats_to_bytes),
    tangents: mesh.tangents.as_deref().map(floats_to_bytes),
    uvs: mesh.uvs.iter().map(|channel| floats_to_bytes(channel)).collect(),
    indices: indices_to_bytes(&mesh.indices),
    vertex_count: mesh.vertex_count() as u32,
    index_count: mesh.index_count() as u32,
    submeshes: mesh.submeshes.clone(),
    bounds: mesh.bounds,
  }
}
