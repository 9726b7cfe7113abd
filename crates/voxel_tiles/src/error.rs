//! Error types.
//!
//! Only caller-facing failures are errors. Conditions the pipeline expects
//! (unmatched configurations, re-entrant starts) are reported through
//! `tracing` diagnostics and return values instead.

use crate::theme::ThemeId;

/// Occupancy volume access errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VolumeError {
  #[error("cell ({x}, {y}, {z}) is outside volume of size {dims:?}")]
  OutOfBounds { x: i64, y: i64, z: i64, dims: [usize; 3] },

  #[error("volume size {dims:?} must be 1..={max} cells per axis")]
  InvalidSize { dims: [usize; 3], max: usize },

  #[error("cell buffer holds {actual} cells, volume size {dims:?} needs {expected}")]
  CellCountMismatch { dims: [usize; 3], expected: usize, actual: usize },
}

/// Piece geometry validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
  #[error("piece {piece} variant {variant}: {stream} has {actual} entries, expected {expected}")]
  StreamLength {
    piece: usize,
    variant: usize,
    stream: &'static str,
    expected: usize,
    actual: usize,
  },

  #[error("piece {piece} variant {variant}: submesh {submesh} index {index} out of range ({vertex_count} vertices)")]
  IndexOutOfRange {
    piece: usize,
    variant: usize,
    submesh: usize,
    index: u32,
    vertex_count: usize,
  },

  #[error("piece {piece} variant {variant}: submesh {submesh} index count {count} is not a multiple of 3")]
  PartialTriangle {
    piece: usize,
    variant: usize,
    submesh: usize,
    count: usize,
  },
}

/// Theme validation errors. A theme that fails validation is not
/// registered, so the call can be retried after fixing the data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
  #[error("theme '{0}' has no base pieces")]
  NoPieces(String),

  #[error("theme '{theme}': piece {piece} has no geometry variants")]
  NoVariants { theme: String, piece: usize },

  #[error("theme '{theme}': piece {piece} pattern {pattern:#010b} is not a valid {config_count}-configuration pattern")]
  InvalidPattern {
    theme: String,
    piece: usize,
    pattern: u8,
    config_count: usize,
  },

  #[error("theme '{theme}': fill id 0 is reserved for empty cells")]
  ReservedFillId { theme: String },

  #[error("theme '{theme}': {source}")]
  Geometry {
    theme: String,
    #[source]
    source: GeometryError,
  },
}

/// Theme registry lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
  #[error("theme {0:?} is not registered")]
  UnknownTheme(ThemeId),
}

/// Umbrella error for the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileError {
  #[error(transparent)]
  Volume(#[from] VolumeError),

  #[error(transparent)]
  Theme(#[from] ThemeError),

  #[error(transparent)]
  Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, TileError>;
