//! GeometryCache - flattened geometry of every piece variant in a theme.
//!
//! ```text
//! streams:  positions [ p0v0 | p0v1 | p1v0 | p2v0 | ... ]   (+ normals, colors, ...)
//! indices:  [ p0v0.s0 | p0v0.s1 | p0v1.s0 | p1v0.s0 | ... ]  (variant-local)
//!
//! slices[piece][variant] = { vertex_start, vertex_count,
//!                            submeshes: [IndexRange; submesh] }
//! ```
//!
//! Optional streams are present if any variant supplies them; variants that
//! do not get default values so every stream stays vertex-aligned. Variants
//! with fewer submeshes than the theme maximum get empty ranges.

use smallvec::SmallVec;

use super::BasePiece;

/// Default color for variants without a color stream.
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Default tangent for variants without a tangent stream.
pub const DEFAULT_TANGENT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Contiguous range into an index buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexRange {
  pub start: u32,
  pub count: u32,
}

impl IndexRange {
  #[inline]
  pub fn as_range(&self) -> std::ops::Range<usize> {
    self.start as usize..(self.start + self.count) as usize
  }
}

/// Location of one piece variant inside the cache.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeometrySlice {
  pub vertex_start: u32,
  pub vertex_count: u32,
  /// Index range per submesh; indices are local to the variant.
  pub submeshes: SmallVec<[IndexRange; 4]>,
}

impl GeometrySlice {
  #[inline]
  pub fn vertex_range(&self) -> std::ops::Range<usize> {
    self.vertex_start as usize..(self.vertex_start + self.vertex_count) as usize
  }

  /// Total index count over all submeshes.
  pub fn index_count(&self) -> u32 {
    self.submeshes.iter().map(|r| r.count).sum()
  }
}

/// Immutable flattened geometry shared by all runs of a theme.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryCache {
  pub positions: Vec<[f32; 3]>,
  pub normals: Vec<[f32; 3]>,
  pub colors: Option<Vec<[f32; 4]>>,
  pub tangents: Option<Vec<[f32; 4]>>,
  pub uvs: Vec<Vec<[f32; 2]>>,
  pub indices: Vec<u32>,
  slices: Vec<Vec<GeometrySlice>>,
  submesh_count: usize,
}

impl GeometryCache {
  /// Flatten all variants of all pieces. Pieces must be validated.
  pub fn build(pieces: &[BasePiece]) -> Self {
    let variants = || pieces.iter().flat_map(|p| p.variants.iter());

    let has_colors = variants().any(|m| m.colors.is_some());
    let has_tangents = variants().any(|m| m.tangents.is_some());
    let uv_channels = variants().map(|m| m.uvs.len()).max().unwrap_or(0);
    let submesh_count = variants().map(|m| m.submeshes.len()).max().unwrap_or(0);
    let vertex_total: usize = variants().map(|m| m.vertex_count()).sum();
    let index_total: usize = variants().map(|m| m.index_count()).sum();

    let mut cache = Self {
      positions: Vec::with_capacity(vertex_total),
      normals: Vec::with_capacity(vertex_total),
      colors: has_colors.then(|| Vec::with_capacity(vertex_total)),
      tangents: has_tangents.then(|| Vec::with_capacity(vertex_total)),
      uvs: (0..uv_channels).map(|_| Vec::with_capacity(vertex_total)).collect(),
      indices: Vec::with_capacity(index_total),
      slices: Vec::with_capacity(pieces.len()),
      submesh_count,
    };

    for piece in pieces {
      let mut piece_slices = Vec::with_capacity(piece.variants.len());

      for mesh in &piece.variants {
        let vertex_start = cache.positions.len() as u32;
        let vertex_count = mesh.vertex_count();

        cache.positions.extend_from_slice(&mesh.positions);
        cache.normals.extend_from_slice(&mesh.normals);
        if let Some(colors) = cache.colors.as_mut() {
          match &mesh.colors {
            Some(src) => colors.extend_from_slice(src),
            None => colors.resize(colors.len() + vertex_count, DEFAULT_COLOR),
          }
        }
        if let Some(tangents) = cache.tangents.as_mut() {
          match &mesh.tangents {
            Some(src) => tangents.extend_from_slice(src),
            None => tangents.resize(tangents.len() + vertex_count, DEFAULT_TANGENT),
          }
        }
        for (channel, uvs) in cache.uvs.iter_mut().enumerate() {
          match mesh.uvs.get(channel) {
            Some(src) => uvs.extend_from_slice(src),
            None => uvs.resize(uvs.len() + vertex_count, [0.0; 2]),
          }
        }

        let mut submeshes = SmallVec::with_capacity(submesh_count);
        for submesh in 0..submesh_count {
          let start = cache.indices.len() as u32;
          if let Some(src) = mesh.submeshes.get(submesh) {
            cache.indices.extend_from_slice(src);
          }
          submeshes.push(IndexRange {
            start,
            count: cache.indices.len() as u32 - start,
          });
        }

        piece_slices.push(GeometrySlice {
          vertex_start,
          vertex_count: vertex_count as u32,
          submeshes,
        });
      }

      cache.slices.push(piece_slices);
    }

    cache
  }

  /// Slice for a piece variant.
  #[inline]
  pub fn slice(&self, piece: usize, variant: usize) -> Option<&GeometrySlice> {
    self.slices.get(piece)?.get(variant)
  }

  /// Number of variants of a piece (0 for unknown pieces).
  #[inline]
  pub fn variant_count(&self, piece: usize) -> usize {
    self.slices.get(piece).map_or(0, Vec::len)
  }

  #[inline]
  pub fn piece_count(&self) -> usize {
    self.slices.len()
  }

  /// Maximum submesh count over all variants.
  #[inline]
  pub fn submesh_count(&self) -> usize {
    self.submesh_count
  }

  #[inline]
  pub fn uv_channel_count(&self) -> usize {
    self.uvs.len()
  }
}

#[cfg(test)]
#[path = "geometry_cache_test.rs"]
mod geometry_cache_test;
