//! Volume and configuration constants.
//!
//! # Lattice Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          LATTICE LAYOUT (one axis)                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Cells:          [  0  ][  1  ][  2  ]          (volume size = 3)       │
//! │  Vertices:      0      1      2      3          (lattice size = 4)      │
//! │                 │                    │                                  │
//! │                 └─ outside neighbour └─ outside neighbour               │
//! │                    resolved by the      resolved by the                 │
//! │                    boundary policy      boundary policy                 │
//! │                                                                         │
//! │  Vertex v sits between cell v-1 and cell v on every axis.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Memory Layout
//!
//! ```text
//! index = (x * size_y + y) * size_z + z
//!
//! X is the major axis, Z the minor axis (same ordering as a Z-column
//! sweep: sequential Z, then Y, then X).
//! ```

/// Maximum number of cells per volume axis.
pub const MAX_AXIS_CELLS: usize = 255;

/// Number of configurations for planar (2D) themes: 4 neighbour cells.
pub const PLANAR_CONFIG_COUNT: usize = 16;

/// Number of configurations for volumetric (3D) themes: 8 neighbour cells.
pub const VOLUMETRIC_CONFIG_COUNT: usize = 256;

/// Maximum entries in a decomposition group.
///
/// A cube corner configuration splits into at most 4 independent islands.
pub const MAX_GROUP_ENTRIES: usize = 4;

/// Fill id for empty cells.
pub const EMPTY_FILL: u8 = 0;

/// Number of fill ids addressable by an open-theme compatibility mask.
pub const MAX_OPEN_FILL_IDS: usize = 32;

/// Convert 3D cell coordinates to a linear index.
#[inline(always)]
pub const fn coord_to_index(dims: [usize; 3], x: usize, y: usize, z: usize) -> usize {
  (x * dims[1] + y) * dims[2] + z
}

/// Convert a linear index back to 3D cell coordinates.
#[inline(always)]
pub const fn index_to_coord(dims: [usize; 3], idx: usize) -> [usize; 3] {
  let z = idx % dims[2];
  let y = (idx / dims[2]) % dims[1];
  let x = idx / (dims[1] * dims[2]);
  [x, y, z]
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
