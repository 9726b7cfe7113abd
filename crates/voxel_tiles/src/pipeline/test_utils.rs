//! Test utilities for pipeline tests.
//!
//! Provides small piece libraries, marker geometry and volume fixtures for
//! testing each stage in isolation.

use std::sync::Arc;

use glam::{IVec3, Vec3};

use super::types::GenerationRequest;
use crate::corner_table::corner_sign;
use crate::theme::{BasePiece, PieceMesh, Theme, ThemeAssets};
use crate::types::{Configuration, Dimensionality, FillId};
use crate::volume::OccupancyVolume;

/// Fill id used by every fixture theme.
pub const FILL: FillId = 1;

// =============================================================================
// Piece patterns
// =============================================================================

/// One cell below-behind-left of the vertex.
pub const CORNER: Configuration = 0b0000_0001;
/// Two bottom cells along Z on the -X side.
pub const EDGE: Configuration = 0b0000_0011;
/// Two stacked cells.
pub const PILLAR: Configuration = 0b0001_0001;
/// Whole bottom level.
pub const FLOOR: Configuration = 0b0000_1111;
/// Whole -X side.
pub const WALL: Configuration = 0b0011_0011;

/// Volumetric library: one piece per symmetry class, no two pieces related
/// by a transform.
pub const CUBE_PATTERNS: [Configuration; 5] = [CORNER, EDGE, PILLAR, FLOOR, WALL];

/// Planar library covering every planar configuration directly or by
/// islands.
pub const PLANAR_PATTERNS: [Configuration; 3] = [0b0001, 0b0011, 0b0111];

// =============================================================================
// Geometry
// =============================================================================

/// Marker geometry: one small triangle per covered cell, placed in that
/// cell's octant with its normal pointing away from the vertex.
pub fn marker_mesh(pattern: Configuration) -> PieceMesh {
  let mut positions = Vec::new();
  let mut normals = Vec::new();
  let mut indices = Vec::new();

  for corner in 0..8u8 {
    if pattern & (1 << corner) == 0 {
      continue;
    }
    let [sx, sy, sz] = corner_sign(corner);
    let centre = Vec3::new(sx as f32, sy as f32, sz as f32) * 0.5;
    let normal = centre.normalize();

    let base = positions.len() as u32;
    for offset in [Vec3::X, Vec3::Y, Vec3::Z] {
      positions.push((centre + offset * 0.1).to_array());
      normals.push(normal.to_array());
    }
    indices.extend_from_slice(&[base, base + 1, base + 2]);
  }

  PieceMesh::new(positions, normals, indices)
}

/// Base piece with marker geometry.
pub fn marker_piece(pattern: Configuration) -> BasePiece {
  BasePiece::new(pattern, marker_mesh(pattern))
}

// =============================================================================
// Themes
// =============================================================================

pub fn theme_assets(theme: Theme) -> Arc<ThemeAssets> {
  ThemeAssets::new(theme).expect("fixture theme must validate")
}

pub fn library_theme(name: &str, dimensionality: Dimensionality, patterns: &[Configuration]) -> Theme {
  patterns.iter().fold(
    Theme::new(name, FILL, dimensionality).with_mirror_y(true),
    |theme, &pattern| theme.with_piece(marker_piece(pattern)),
  )
}

/// Volumetric theme with only the corner piece.
pub fn single_corner_theme() -> Arc<ThemeAssets> {
  theme_assets(library_theme("corner", Dimensionality::Volumetric, &[CORNER]))
}

/// Volumetric theme with `CUBE_PATTERNS`.
pub fn cube_theme() -> Arc<ThemeAssets> {
  theme_assets(library_theme("cube", Dimensionality::Volumetric, &CUBE_PATTERNS))
}

/// Planar theme with `PLANAR_PATTERNS`.
pub fn planar_theme() -> Arc<ThemeAssets> {
  theme_assets(library_theme("planar", Dimensionality::Planar, &PLANAR_PATTERNS))
}

// =============================================================================
// Volumes
// =============================================================================

pub fn empty_volume(dims: [usize; 3]) -> Arc<OccupancyVolume> {
  Arc::new(OccupancyVolume::new(dims).expect("valid fixture size"))
}

pub fn filled_volume(dims: [usize; 3]) -> Arc<OccupancyVolume> {
  let mut volume = OccupancyVolume::new(dims).expect("valid fixture size");
  volume.fill(FILL);
  Arc::new(volume)
}

/// Volume with the inclusive box `[min, max]` filled.
pub fn box_volume(dims: [usize; 3], min: [i32; 3], max: [i32; 3]) -> Arc<OccupancyVolume> {
  let mut volume = OccupancyVolume::new(dims).expect("valid fixture size");
  volume
    .fill_box(IVec3::from_array(min), IVec3::from_array(max), FILL)
    .expect("box inside volume");
  Arc::new(volume)
}

/// Volume with the listed cells filled.
pub fn cells_volume(dims: [usize; 3], cells: &[[i32; 3]]) -> Arc<OccupancyVolume> {
  let mut volume = OccupancyVolume::new(dims).expect("valid fixture size");
  for &cell in cells {
    volume.set(IVec3::from_array(cell), FILL).expect("cell inside volume");
  }
  Arc::new(volume)
}

pub fn request_for(volume: Arc<OccupancyVolume>, theme: Arc<ThemeAssets>) -> GenerationRequest {
  GenerationRequest::new(volume, theme)
}

// =============================================================================
// Assertions
// =============================================================================

/// Split an index list into triangles.
pub fn triangles(indices: &[u32]) -> Vec<[u32; 3]> {
  indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect()
}
