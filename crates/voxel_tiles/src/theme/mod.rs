//! Themes - base piece libraries and their geometry.
//!
//! ```text
//! Theme
//! ├── name, fill_id, dimensionality
//! ├── allow_mirror_y          gates the mirror-Y match pass
//! ├── open_to: [name, ...]    themes whose fill ids also count as filled
//! └── pieces: [BasePiece]     declared order is the match tie-break
//!       ├── pattern           exact configuration the piece represents
//!       └── variants: [PieceMesh]
//!             ├── positions, normals, colors?, tangents?, uvs[channel]
//!             └── submeshes: [indices]   one index list per material slot
//! ```
//!
//! Themes are plain data owned by the caller. `ThemeRegistry` validates them
//! and owns the derived, shared assets (configuration table and flattened
//! geometry cache).

mod geometry_cache;
mod registry;

pub use geometry_cache::{GeometryCache, GeometrySlice, IndexRange};
pub use registry::{ThemeAssets, ThemeId, ThemeRegistry};

use crate::constants::EMPTY_FILL;
use crate::error::{GeometryError, ThemeError};
use crate::types::{Configuration, Dimensionality, FillId};

// =============================================================================
// PieceMesh
// =============================================================================

/// Authored geometry for one variant of a base piece.
///
/// Geometry is expressed relative to the lattice vertex the piece is placed
/// at, in cell units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieceMesh {
  pub positions: Vec<[f32; 3]>,
  pub normals: Vec<[f32; 3]>,
  pub colors: Option<Vec<[f32; 4]>>,
  pub tangents: Option<Vec<[f32; 4]>>,
  /// UV channels, each with one entry per vertex.
  pub uvs: Vec<Vec<[f32; 2]>>,
  /// Triangle list per submesh (material slot).
  pub submeshes: Vec<Vec<u32>>,
}

impl PieceMesh {
  /// Single-submesh mesh from positions, normals and triangle indices.
  pub fn new(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
    Self {
      positions,
      normals,
      submeshes: vec![indices],
      ..Default::default()
    }
  }

  pub fn with_colors(mut self, colors: Vec<[f32; 4]>) -> Self {
    self.colors = Some(colors);
    self
  }

  pub fn with_tangents(mut self, tangents: Vec<[f32; 4]>) -> Self {
    self.tangents = Some(tangents);
    self
  }

  pub fn with_uv_channel(mut self, uvs: Vec<[f32; 2]>) -> Self {
    self.uvs.push(uvs);
    self
  }

  pub fn with_submesh(mut self, indices: Vec<u32>) -> Self {
    self.submeshes.push(indices);
    self
  }

  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  /// Total index count over all submeshes.
  pub fn index_count(&self) -> usize {
    self.submeshes.iter().map(Vec::len).sum()
  }

  /// Check stream lengths and index ranges.
  pub fn validate(&self, piece: usize, variant: usize) -> Result<(), GeometryError> {
    let expected = self.positions.len();
    let check = |stream: &'static str, actual: usize| {
      if actual == expected {
        Ok(())
      } else {
        Err(GeometryError::StreamLength {
          piece,
          variant,
          stream,
          expected,
          actual,
        })
      }
    };

    check("normals", self.normals.len())?;
    if let Some(colors) = &self.colors {
      check("colors", colors.len())?;
    }
    if let Some(tangents) = &self.tangents {
      check("tangents", tangents.len())?;
    }
    for channel in &self.uvs {
      check("uvs", channel.len())?;
    }

    for (submesh, indices) in self.submeshes.iter().enumerate() {
      if indices.len() % 3 != 0 {
        return Err(GeometryError::PartialTriangle {
          piece,
          variant,
          submesh,
          count: indices.len(),
        });
      }
      if let Some(&index) = indices.iter().find(|&&i| i as usize >= expected) {
        return Err(GeometryError::IndexOutOfRange {
          piece,
          variant,
          submesh,
          index,
          vertex_count: expected,
        });
      }
    }

    Ok(())
  }
}

// =============================================================================
// BasePiece
// =============================================================================

/// Authored piece tagged with the exact configuration it covers.
#[derive(Clone, Debug, PartialEq)]
pub struct BasePiece {
  pub pattern: Configuration,
  /// Geometry variants; variant 0 is the default.
  pub variants: Vec<PieceMesh>,
}

impl BasePiece {
  pub fn new(pattern: Configuration, mesh: PieceMesh) -> Self {
    Self {
      pattern,
      variants: vec![mesh],
    }
  }

  pub fn with_variant(mut self, mesh: PieceMesh) -> Self {
    self.variants.push(mesh);
    self
  }
}

// =============================================================================
// Theme
// =============================================================================

/// Named base piece library plus adjacency rules.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
  pub name: String,
  /// Cells holding this id are filled for this theme.
  pub fill_id: FillId,
  pub dimensionality: Dimensionality,
  pub pieces: Vec<BasePiece>,
  /// Enable the mirror-Y match pass (ignored for planar themes).
  pub allow_mirror_y: bool,
  /// Names of themes this theme is open toward.
  pub open_to: Vec<String>,
}

impl Theme {
  pub fn new(name: impl Into<String>, fill_id: FillId, dimensionality: Dimensionality) -> Self {
    Self {
      name: name.into(),
      fill_id,
      dimensionality,
      pieces: Vec::new(),
      allow_mirror_y: false,
      open_to: Vec::new(),
    }
  }

  pub fn with_piece(mut self, piece: BasePiece) -> Self {
    self.pieces.push(piece);
    self
  }

  pub fn with_mirror_y(mut self, allow: bool) -> Self {
    self.allow_mirror_y = allow;
    self
  }

  pub fn with_open_to(mut self, theme: impl Into<String>) -> Self {
    self.open_to.push(theme.into());
    self
  }

  /// Base piece patterns in declared order.
  pub fn patterns(&self) -> Vec<Configuration> {
    self.pieces.iter().map(|p| p.pattern).collect()
  }

  /// Mirror-Y matching is only meaningful for volumetric themes.
  #[inline]
  pub fn mirror_y_enabled(&self) -> bool {
    self.allow_mirror_y && self.dimensionality == Dimensionality::Volumetric
  }

  /// Validate the theme before any derived data is built.
  ///
  /// Duplicate patterns are reported but accepted; the first declared piece
  /// wins every match.
  pub fn validate(&self) -> Result<(), ThemeError> {
    if self.fill_id == EMPTY_FILL {
      return Err(ThemeError::ReservedFillId {
        theme: self.name.clone(),
      });
    }
    if self.pieces.is_empty() {
      return Err(ThemeError::NoPieces(self.name.clone()));
    }

    let full = self.dimensionality.full_mask();
    for (index, piece) in self.pieces.iter().enumerate() {
      if piece.pattern & !full != 0 || self.dimensionality.is_void(piece.pattern) {
        return Err(ThemeError::InvalidPattern {
          theme: self.name.clone(),
          piece: index,
          pattern: piece.pattern,
          config_count: self.dimensionality.config_count(),
        });
      }
      if piece.variants.is_empty() {
        return Err(ThemeError::NoVariants {
          theme: self.name.clone(),
          piece: index,
        });
      }
      for (variant, mesh) in piece.variants.iter().enumerate() {
        mesh.validate(index, variant).map_err(|source| ThemeError::Geometry {
          theme: self.name.clone(),
          source,
        })?;
      }
    }

    for (index, piece) in self.pieces.iter().enumerate() {
      if let Some(first) = self.pieces[..index].iter().position(|p| p.pattern == piece.pattern) {
        tracing::warn!(
          theme = %self.name,
          piece = index,
          duplicate_of = first,
          pattern = piece.pattern,
          "duplicate base piece pattern"
        );
      }
    }

    Ok(())
  }
}
