use super::*;

/// Every transform, including the redundant mirror_z forms.
fn all_transforms() -> Vec<RigidTransform> {
  let mut out = Vec::new();
  for rotation in Rotation::ALL {
    for bits in 0..8u8 {
      let mut t = RigidTransform::rotate(rotation);
      t.mirror_x = bits & 1 != 0;
      t.mirror_y = bits & 2 != 0;
      t.mirror_z = bits & 4 != 0;
      out.push(t);
    }
  }
  out
}

#[test]
fn test_quarter_turn_roundtrip() {
  for turns in 0..8u8 {
    assert_eq!(Rotation::from_quarter_turns(turns).quarter_turns(), turns & 3);
  }
  assert_eq!(Rotation::R90.inverse(), Rotation::R270);
  assert_eq!(Rotation::R0.inverse(), Rotation::R0);
}

#[test]
fn test_rotate90_advances_ring() {
  let r90 = RigidTransform::rotate(Rotation::R90);
  assert_eq!(r90.permute_corner(0), 1);
  assert_eq!(r90.permute_corner(3), 0);
  assert_eq!(r90.permute_corner(4), 5);
  assert_eq!(r90.apply(0b0000_0001), 0b0000_0010);
}

#[test]
fn test_mirror_y_swaps_levels() {
  let my = RigidTransform::IDENTITY.with_mirror_y();
  for corner in 0..8u8 {
    assert_eq!(my.permute_corner(corner), corner ^ 4);
  }
}

#[test]
fn test_permutation_matches_geometry() {
  for t in all_transforms() {
    for corner in 0..8u8 {
      assert_eq!(
        t.permute_corner_geometric(corner),
        Some(t.permute_corner(corner)),
        "transform {:?} corner {}",
        t,
        corner
      );
    }
  }
}

#[test]
fn test_apply_is_a_bijection_on_bit_count() {
  for t in all_transforms() {
    for pattern in 0..=255u8 {
      assert_eq!(t.apply(pattern).count_ones(), pattern.count_ones());
    }
  }
}

#[test]
fn test_canonical_preserves_action() {
  for t in all_transforms() {
    let c = t.canonical();
    assert!(!c.mirror_z);
    for pattern in [0x01u8, 0x13, 0x37, 0x5A, 0xC4] {
      assert_eq!(t.apply(pattern), c.apply(pattern), "transform {:?}", t);
    }
    assert_eq!(t.basis(), c.basis());
  }
}

#[test]
fn test_compose_matches_sequential_application() {
  let transforms = all_transforms();
  for a in &transforms {
    for b in &transforms {
      let ab = a.compose(*b);
      for pattern in [0x01u8, 0x03, 0x17, 0x29, 0x8E] {
        assert_eq!(ab.apply(pattern), a.apply(b.apply(pattern)), "{:?} ∘ {:?}", a, b);
      }
    }
  }
}

#[test]
fn test_compose_matches_matrix_product() {
  let transforms = all_transforms();
  for a in &transforms {
    for b in &transforms {
      assert_eq!(a.compose(*b).basis(), a.basis() * b.basis(), "{:?} ∘ {:?}", a, b);
    }
  }
}

#[test]
fn test_inverse() {
  for t in all_transforms() {
    assert_eq!(t.compose(t.inverse()), RigidTransform::IDENTITY, "{:?}", t);
    assert_eq!(t.inverse().compose(t), RigidTransform::IDENTITY, "{:?}", t);
  }
}

#[test]
fn test_is_mirrored_matches_determinant() {
  for t in all_transforms() {
    let det = t.basis().determinant();
    assert_eq!(t.is_mirrored(), det < 0.0, "{:?}", t);
  }
}

#[test]
fn test_direct_match_order() {
  let order = RigidTransform::DIRECT_MATCH_ORDER;
  assert_eq!(order[0], RigidTransform::IDENTITY);
  assert_eq!(order[3].rotation, Rotation::R270);
  assert!(order[4].mirror_x && order[4].rotation == Rotation::R0);
  assert!(order.iter().all(|t| !t.mirror_y && !t.mirror_z));
}

#[test]
fn test_to_mat4_has_no_translation() {
  let m = RigidTransform::rotate(Rotation::R180).with_mirror_y().to_mat4();
  assert_eq!(m.w_axis, glam::Vec4::W);
  assert_eq!(m.transform_point3(Vec3::new(1.0, 1.0, 0.5)), Vec3::new(-1.0, -1.0, -0.5));
}
