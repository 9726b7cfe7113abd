//! Stage 2: Placement
//!
//! Collects the sparse classification into a dense instance list. This is a
//! single sequential pass so instance order is vertex index order, then
//! group entry order, for every run.

use glam::Mat4;

use super::types::{ClassifiedLattice, PlacedInstance};
use crate::config::GenerationSettings;

/// Build placed instances for every Normal tile.
pub fn place_instances(lattice: &ClassifiedLattice, settings: &GenerationSettings) -> Vec<PlacedInstance> {
  let mut instances = Vec::new();

  for (vertex, tile) in lattice.normal_tiles() {
    let translation = Mat4::from_translation(settings.vertex_position(vertex));

    for (entry, &variant) in tile.group.iter().zip(tile.variants.iter()) {
      instances.push(PlacedInstance {
        piece: entry.piece,
        variant,
        transform: translation * entry.transform.to_mat4(),
        inverted: entry.inverted,
      });
    }
  }

  instances
}

#[cfg(test)]
mod tests {
  use glam::Vec3;
  use smallvec::smallvec;

  use super::*;
  use crate::pipeline::types::{TileKind, TileState};
  use crate::transform::{RigidTransform, Rotation};
  use crate::types::DecompositionEntry;

  fn lattice_with(tiles: Vec<(usize, TileState)>) -> ClassifiedLattice {
    let dims = [2, 2, 2];
    let mut lattice = ClassifiedLattice {
      dims,
      tiles: vec![TileState::default(); 8],
    };
    for (index, tile) in tiles {
      lattice.tiles[index] = tile;
    }
    lattice
  }

  #[test]
  fn test_translation_and_rotation() {
    let entry = DecompositionEntry::new(3, RigidTransform::rotate(Rotation::R90));
    let tile = TileState {
      kind: TileKind::Normal,
      configuration: 0b0000_0010,
      group: smallvec![entry],
      variants: smallvec![1],
    };
    // Index 7 = vertex (1, 1, 1).
    let lattice = lattice_with(vec![(7, tile)]);
    let settings = GenerationSettings::default().with_cell_size(Vec3::new(2.0, 3.0, 4.0));

    let instances = place_instances(&lattice, &settings);
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].piece, 3);
    assert_eq!(instances[0].variant, 1);
    assert_eq!(instances[0].transform.w_axis.truncate(), Vec3::new(2.0, 3.0, 4.0));

    // +90° about +Y maps +X to -Z.
    let x = instances[0].transform.transform_vector3(Vec3::X);
    assert!((x - Vec3::NEG_Z).length() < 1e-6);
  }

  #[test]
  fn test_culled_and_void_tiles_place_nothing() {
    let entry = DecompositionEntry::new(0, RigidTransform::IDENTITY);
    let culled = TileState {
      kind: TileKind::Culled,
      configuration: 1,
      group: smallvec![entry],
      variants: smallvec![],
    };
    let lattice = lattice_with(vec![(0, culled), (1, TileState::void(0))]);
    assert!(place_instances(&lattice, &GenerationSettings::default()).is_empty());
  }

  #[test]
  fn test_instance_order_follows_vertex_order() {
    let make = |piece| TileState {
      kind: TileKind::Normal,
      configuration: 1,
      group: smallvec![DecompositionEntry::new(piece, RigidTransform::IDENTITY)],
      variants: smallvec![0],
    };
    let lattice = lattice_with(vec![(5, make(5)), (2, make(2)), (6, make(6))]);
    let pieces: Vec<u16> = place_instances(&lattice, &GenerationSettings::default())
      .iter()
      .map(|i| i.piece)
      .collect();
    assert_eq!(pieces, vec![2, 5, 6]);
  }
}
