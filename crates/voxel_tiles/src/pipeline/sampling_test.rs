use super::*;
use crate::pipeline::test_utils::{cells_volume, empty_volume, filled_volume, FILL};

fn resolver<'a>(volume: &'a OccupancyVolume, adjacency: &'a Adjacency, filled: DirectionSet) -> CellResolver<'a> {
  CellResolver::new(volume, adjacency, filled, FILL, 0)
}

#[test]
fn test_lattice_dims() {
  assert_eq!(VolumetricSampling.lattice_dims([2, 3, 4]), [3, 4, 5]);
  assert_eq!(PlanarSampling.lattice_dims([2, 1, 4]), [3, 1, 5]);
}

#[test]
fn test_planar_offsets_in_xz_plane() {
  let offsets = PlanarSampling.corner_offsets();
  assert_eq!(offsets.len(), 4);
  assert!(offsets.iter().all(|o| o[1] == 0));
  assert_eq!(VolumetricSampling.corner_offsets().len(), 8);
}

#[test]
fn test_side_masks() {
  assert_eq!(VolumetricSampling.side_mask(Direction::NegX), Some(0x33));
  assert_eq!(VolumetricSampling.side_mask(Direction::NegY), Some(0x0F));
  assert_eq!(PlanarSampling.side_mask(Direction::NegX), Some(0x03));
  assert_eq!(PlanarSampling.side_mask(Direction::PosY), None);
  assert_eq!(PlanarSampling.side_mask(Direction::NegY), None);
}

#[test]
fn test_fill_matching() {
  let volume = empty_volume([1, 1, 1]);
  let adjacency = Adjacency::new();
  let open = CellResolver::new(&volume, &adjacency, DirectionSet::EMPTY, 2, (1 << 3) | (1 << 5));

  assert!(!open.matches(0));
  assert!(open.matches(2));
  assert!(open.matches(3));
  assert!(open.matches(5));
  assert!(!open.matches(4));
  assert!(!open.matches(40));
}

#[test]
fn test_outside_cells_empty_by_default() {
  let volume = filled_volume([2, 2, 2]);
  let adjacency = Adjacency::new();
  let r = resolver(&volume, &adjacency, DirectionSet::EMPTY);

  assert!(r.is_filled(IVec3::new(1, 1, 1)));
  assert!(!r.is_filled(IVec3::new(-1, 0, 0)));
  assert!(!r.is_filled(IVec3::new(0, 2, 0)));
}

#[test]
fn test_filled_boundaries() {
  let volume = empty_volume([2, 2, 2]);
  let adjacency = Adjacency::new();
  let r = resolver(&volume, &adjacency, DirectionSet::EMPTY.with(Direction::NegY));

  assert!(r.is_filled(IVec3::new(0, -1, 0)));
  assert!(!r.is_filled(IVec3::new(0, 2, 0)));
  // First out-of-range axis decides: X before Y.
  assert!(!r.is_filled(IVec3::new(-1, -1, 0)));
  assert!(r.is_filled(IVec3::new(0, -1, 5)));
}

#[test]
fn test_adjacent_volume_sampled() {
  let volume = empty_volume([2, 2, 2]);
  let east = cells_volume([3, 2, 2], &[[0, 1, 1]]);
  let west = cells_volume([3, 2, 2], &[[2, 0, 0]]);
  let adjacency = Adjacency::new()
    .with(Direction::PosX, east)
    .with(Direction::NegX, west);
  let r = resolver(&volume, &adjacency, DirectionSet::EMPTY);

  assert!(r.is_filled(IVec3::new(2, 1, 1)));
  assert!(!r.is_filled(IVec3::new(2, 0, 0)));
  assert!(r.is_filled(IVec3::new(-1, 0, 0)));
  assert!(!r.is_filled(IVec3::new(-1, 1, 1)));
  assert_eq!(adjacency.registered(), DirectionSet::EMPTY.with(Direction::PosX).with(Direction::NegX));
}

#[test]
fn test_adjacent_volume_miss_falls_back_to_boundary() {
  let volume = empty_volume([2, 2, 2]);
  let east = filled_volume([1, 1, 1]);
  let adjacency = Adjacency::new().with(Direction::PosX, east);

  let r = resolver(&volume, &adjacency, DirectionSet::EMPTY.with(Direction::PosX));
  // (2, 1, 1) remaps to (0, 1, 1), outside the 1x1x1 neighbour.
  assert!(r.is_filled(IVec3::new(2, 1, 1)));

  let r = resolver(&volume, &adjacency, DirectionSet::EMPTY);
  assert!(!r.is_filled(IVec3::new(2, 1, 1)));
  assert!(r.is_filled(IVec3::new(2, 0, 0)));
}

#[test]
fn test_seam_cell_below_floor_uses_floor_policy() {
  let volume = empty_volume([2, 2, 2]);
  let east = empty_volume([2, 2, 2]);
  let adjacency = Adjacency::new().with(Direction::PosX, east);

  // (2, -1, 0) leaves through +X into the neighbour, which it also misses
  // through -Y; the floor decides, as it would for one unsplit volume.
  let floor = resolver(&volume, &adjacency, DirectionSet::EMPTY.with(Direction::NegY));
  assert!(floor.is_filled(IVec3::new(2, -1, 0)));
  assert!(floor.is_filled(IVec3::new(2, -1, 1)));
  assert!(!floor.is_filled(IVec3::new(2, 0, 0)));

  let seam_only = resolver(&volume, &adjacency, DirectionSet::EMPTY.with(Direction::PosX));
  assert!(!seam_only.is_filled(IVec3::new(2, -1, 0)));
}

#[test]
fn test_configuration_bits() {
  let volume = filled_volume([1, 1, 1]);
  let adjacency = Adjacency::new();
  let r = resolver(&volume, &adjacency, DirectionSet::EMPTY);
  let offsets = VolumetricSampling.corner_offsets();

  // Vertex (1, 1, 1) sits above-right-front of the only cell: bit 0.
  assert_eq!(r.configuration(IVec3::new(1, 1, 1), offsets), 0b0000_0001);
  // Vertex (0, 0, 0): the cell is top level, ring 2.
  assert_eq!(r.configuration(IVec3::ZERO, offsets), 0b0100_0000);
}

#[test]
fn test_planar_configuration_bits() {
  let mut volume = OccupancyVolume::planar(2, 2).unwrap();
  volume.set(IVec3::new(0, 0, 0), FILL).unwrap();
  let adjacency = Adjacency::new();
  let r = resolver(&volume, &adjacency, DirectionSet::EMPTY);
  let offsets = PlanarSampling.corner_offsets();

  assert_eq!(r.configuration(IVec3::new(1, 0, 1), offsets), 0b0001);
  assert_eq!(r.configuration(IVec3::new(0, 0, 0), offsets), 0b0100);
  assert_eq!(r.configuration(IVec3::new(2, 0, 2), offsets), 0);
}
