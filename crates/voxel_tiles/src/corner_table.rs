//! Corner layout and precomputed neighbourhood tables.
//!
//! Every lattice vertex is surrounded by up to 8 occupancy cells. Each cell
//! maps to one bit of the configuration byte.
//!
//! # Corner Layout
//!
//! ```text
//!   Top level (cells at y)          Bottom level (cells at y-1)
//!
//!        +Z                              +Z
//!         │                               │
//!     5───┼───6                       1───┼───2
//!     │   │   │                       │   │   │
//!  ───┼───V───┼─── +X              ───┼───V───┼─── +X
//!     │   │   │                       │   │   │
//!     4───┼───7                       0───┼───3
//!         │                               │
//!
//! Bit  Level   Ring  Cell offset (dx, dy, dz)
//! ───  ──────  ────  ─────────────────────────
//!  0   bottom   0    (-1, -1, -1)
//!  1   bottom   1    (-1, -1,  0)
//!  2   bottom   2    ( 0, -1,  0)
//!  3   bottom   3    ( 0, -1, -1)
//!  4   top      0    (-1,  0, -1)
//!  5   top      1    (-1,  0,  0)
//!  6   top      2    ( 0,  0,  0)
//!  7   top      3    ( 0,  0, -1)
//! ```
//!
//! Ring positions run cyclically around the vertical axis, so advancing a
//! ring position by one is a +90° rotation about +Y, and the vertical
//! counterpart of bit `i` is bit `i ^ 4`.
//!
//! Planar (2D) themes only use the bottom ring (bits 0-3), with the cells
//! lying in the XZ plane.

/// Bits of the bottom level (cells below the vertex).
pub const BOTTOM_LEVEL: u8 = 0x0F;

/// Bits of the top level (cells above the vertex).
pub const TOP_LEVEL: u8 = 0xF0;

/// Ring position offsets (dx, dz) in cyclic order around +Y.
pub const RING_OFFSETS: [[i32; 2]; 4] = [[-1, -1], [-1, 0], [0, 0], [0, -1]];

/// Cell offset relative to the lattice vertex for each corner bit.
pub const CORNER_OFFSETS: [[i32; 3]; 8] = generate_corner_offsets();

/// Connectivity mask for each corner.
///
/// Within a level, a corner connects to its two ring neighbours. Across
/// levels it connects only to its direct vertical counterpart.
pub const CORNER_NEIGHBORS: [u8; 8] = generate_corner_neighbors();

/// Corner bits lying on each side of the vertex.
///
/// Indexed by `Direction::index()`: -X, +X, -Y, +Y, -Z, +Z.
pub const SIDE_MASKS: [u8; 6] = generate_side_masks();

const fn generate_corner_offsets() -> [[i32; 3]; 8] {
  let mut offsets = [[0i32; 3]; 8];
  let mut corner = 0;

  while corner < 8 {
    let ring = corner & 3;
    let level = (corner >> 2) as i32;
    offsets[corner] = [RING_OFFSETS[ring][0], level - 1, RING_OFFSETS[ring][1]];
    corner += 1;
  }

  offsets
}

const fn generate_corner_neighbors() -> [u8; 8] {
  let mut table = [0u8; 8];
  let mut corner = 0;

  while corner < 8 {
    let level_base = corner & 4;
    let ring = corner & 3;
    let next = level_base | ((ring + 1) & 3);
    let prev = level_base | ((ring + 3) & 3);
    table[corner] = (1 << next) | (1 << prev) | (1 << (corner ^ 4));
    corner += 1;
  }

  table
}

const fn generate_side_masks() -> [u8; 6] {
  let mut masks = [0u8; 6];
  let mut corner = 0;

  while corner < 8 {
    let offset = CORNER_OFFSETS[corner];
    let mut axis = 0;
    while axis < 3 {
      // Offset -1 lies on the negative side, 0 on the positive side.
      let side = if offset[axis] < 0 { axis * 2 } else { axis * 2 + 1 };
      masks[side] |= 1 << corner;
      axis += 1;
    }
    corner += 1;
  }

  masks
}

/// Signed unit position of a corner cell centre relative to the vertex.
///
/// Components are -1 or +1; used to check that bit permutations agree with
/// the geometric transforms.
#[inline(always)]
pub const fn corner_sign(corner: u8) -> [i32; 3] {
  let offset = CORNER_OFFSETS[(corner & 7) as usize];
  [offset[0] * 2 + 1, offset[1] * 2 + 1, offset[2] * 2 + 1]
}

/// Find the corner whose signed position equals `sign`.
#[inline]
pub fn corner_from_sign(sign: [i32; 3]) -> Option<u8> {
  (0u8..8).find(|&corner| corner_sign(corner) == sign)
}

#[cfg(test)]
#[path = "corner_table_test.rs"]
mod corner_table_test;
