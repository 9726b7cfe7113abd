//! Rigid tile transforms: quarter turns about +Y combined with axis mirrors.
//!
//! The set of transforms is the symmetry group of the tile cube that keeps
//! the vertical axis vertical (dihedral group of the square × vertical
//! flip, 16 elements). Transforms act on both geometry (`to_mat4`) and on
//! configuration bit patterns (`apply`), and the two actions agree.
//!
//! # Application Order
//!
//! ```text
//! p' = R(rotation) · S(mirror_x, mirror_y, mirror_z) · p
//!
//!   1. mirror (negate flagged axes)
//!   2. rotate about +Y by quarter turns
//! ```
//!
//! `mirror_z` is redundant (it equals `mirror_x` + 180°), so composition
//! always returns the canonical form with `mirror_z == false`.

use glam::{Mat3, Mat4, Vec3};

use crate::corner_table::{corner_from_sign, corner_sign};

/// Quarter-turn rotation about the vertical (+Y) axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
  #[default]
  R0,
  R90,
  R180,
  R270,
}

impl Rotation {
  /// All rotations in ascending angle order.
  pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

  /// Build from a quarter-turn count (taken modulo 4).
  #[inline]
  pub const fn from_quarter_turns(turns: u8) -> Self {
    match turns & 3 {
      0 => Rotation::R0,
      1 => Rotation::R90,
      2 => Rotation::R180,
      _ => Rotation::R270,
    }
  }

  #[inline]
  pub const fn quarter_turns(self) -> u8 {
    match self {
      Rotation::R0 => 0,
      Rotation::R90 => 1,
      Rotation::R180 => 2,
      Rotation::R270 => 3,
    }
  }

  #[inline]
  pub const fn inverse(self) -> Self {
    Self::from_quarter_turns(4 - self.quarter_turns())
  }

  /// (cos, sin) of the rotation angle, exact.
  #[inline]
  const fn cos_sin(self) -> (f32, f32) {
    match self {
      Rotation::R0 => (1.0, 0.0),
      Rotation::R90 => (0.0, 1.0),
      Rotation::R180 => (-1.0, 0.0),
      Rotation::R270 => (0.0, -1.0),
    }
  }
}

/// Rotation about +Y combined with optional per-axis mirroring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RigidTransform {
  pub rotation: Rotation,
  pub mirror_x: bool,
  pub mirror_y: bool,
  pub mirror_z: bool,
}

impl RigidTransform {
  pub const IDENTITY: Self = Self::rotate(Rotation::R0);

  /// Candidate order for direct matching (before the mirror-Y pass).
  pub const DIRECT_MATCH_ORDER: [Self; 8] = [
    Self::rotate(Rotation::R0),
    Self::rotate(Rotation::R90),
    Self::rotate(Rotation::R180),
    Self::rotate(Rotation::R270),
    Self::rotate(Rotation::R0).with_mirror_x(),
    Self::rotate(Rotation::R90).with_mirror_x(),
    Self::rotate(Rotation::R180).with_mirror_x(),
    Self::rotate(Rotation::R270).with_mirror_x(),
  ];

  /// Pure rotation.
  pub const fn rotate(rotation: Rotation) -> Self {
    Self {
      rotation,
      mirror_x: false,
      mirror_y: false,
      mirror_z: false,
    }
  }

  pub const fn with_mirror_x(mut self) -> Self {
    self.mirror_x = !self.mirror_x;
    self
  }

  pub const fn with_mirror_y(mut self) -> Self {
    self.mirror_y = !self.mirror_y;
    self
  }

  pub const fn with_mirror_z(mut self) -> Self {
    self.mirror_z = !self.mirror_z;
    self
  }

  /// Fold `mirror_z` into `mirror_x` + 180°.
  pub const fn canonical(self) -> Self {
    if !self.mirror_z {
      return self;
    }
    Self {
      rotation: Rotation::from_quarter_turns(self.rotation.quarter_turns() + 2),
      mirror_x: !self.mirror_x,
      mirror_y: self.mirror_y,
      mirror_z: false,
    }
  }

  /// Composition `self ∘ first`: apply `first`, then `self`.
  pub const fn compose(self, first: Self) -> Self {
    let outer = self.canonical();
    let inner = first.canonical();

    // Mx · R(k) = R(-k) · Mx
    let inner_turns = if outer.mirror_x {
      4 - inner.rotation.quarter_turns()
    } else {
      inner.rotation.quarter_turns()
    };

    Self {
      rotation: Rotation::from_quarter_turns(outer.rotation.quarter_turns() + inner_turns),
      mirror_x: outer.mirror_x ^ inner.mirror_x,
      mirror_y: outer.mirror_y ^ inner.mirror_y,
      mirror_z: false,
    }
  }

  /// Inverse transform (canonical form).
  pub const fn inverse(self) -> Self {
    let t = self.canonical();
    if t.mirror_x {
      // Reflections in the XZ plane are involutions.
      t
    } else {
      Self {
        rotation: t.rotation.inverse(),
        ..t
      }
    }
  }

  /// True if the transform reverses orientation (odd number of mirrors).
  #[inline]
  pub const fn is_mirrored(self) -> bool {
    self.mirror_x ^ self.mirror_y ^ self.mirror_z
  }

  /// Map a corner bit index through the transform.
  #[inline]
  pub const fn permute_corner(self, corner: u8) -> u8 {
    let mut level = (corner >> 2) & 1;
    let mut ring = corner & 3;

    if self.mirror_y {
      level ^= 1;
    }
    if self.mirror_x {
      ring = 3 - ring;
    }
    if self.mirror_z {
      ring ^= 1;
    }
    ring = (ring + self.rotation.quarter_turns()) & 3;

    (level << 2) | ring
  }

  /// Apply the transform to a configuration bit pattern.
  #[inline]
  pub const fn apply(self, pattern: u8) -> u8 {
    let mut out = 0u8;
    let mut corner = 0u8;
    while corner < 8 {
      if pattern & (1 << corner) != 0 {
        out |= 1 << self.permute_corner(corner);
      }
      corner += 1;
    }
    out
  }

  /// Exact 3×3 linear part `R · S`.
  pub fn basis(self) -> Mat3 {
    let (c, s) = self.rotation.cos_sin();
    let sx = if self.mirror_x { -1.0 } else { 1.0 };
    let sy = if self.mirror_y { -1.0 } else { 1.0 };
    let sz = if self.mirror_z { -1.0 } else { 1.0 };

    Mat3::from_cols(
      Vec3::new(c, 0.0, -s) * sx,
      Vec3::new(0.0, 1.0, 0.0) * sy,
      Vec3::new(s, 0.0, c) * sz,
    )
  }

  /// Homogeneous matrix without translation.
  #[inline]
  pub fn to_mat4(self) -> Mat4 {
    Mat4::from_mat3(self.basis())
  }

  /// Corner permutation derived from the geometric basis.
  ///
  /// Slow reference for `permute_corner`; used by tests.
  pub fn permute_corner_geometric(self, corner: u8) -> Option<u8> {
    let [x, y, z] = corner_sign(corner);
    let v = self.basis() * Vec3::new(x as f32, y as f32, z as f32);
    corner_from_sign([v.x.round() as i32, v.y.round() as i32, v.z.round() as i32])
  }
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;
