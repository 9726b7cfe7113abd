use super::*;
use crate::decompose::decompose;
use crate::pipeline::test_utils::{CORNER, CUBE_PATTERNS, PLANAR_PATTERNS};

#[test]
fn test_table_sizes() {
  let volumetric = ConfigurationTable::build(&CUBE_PATTERNS, DecomposeOptions::new(Dimensionality::Volumetric));
  assert_eq!(volumetric.len(), 256);
  assert_eq!(volumetric.dimensionality(), Dimensionality::Volumetric);

  let planar = ConfigurationTable::build(&PLANAR_PATTERNS, DecomposeOptions::new(Dimensionality::Planar));
  assert_eq!(planar.len(), 16);
  assert!(planar.unmatched().is_empty());
}

#[test]
fn test_void_entries_empty() {
  let table = ConfigurationTable::build(&CUBE_PATTERNS, DecomposeOptions::new(Dimensionality::Volumetric));
  assert!(table.get(0).is_empty());
  assert!(table.get(0xFF).is_empty());
}

#[test]
fn test_unmatched_recorded() {
  let options = DecomposeOptions::new(Dimensionality::Volumetric).with_mirror_y(true);
  let table = ConfigurationTable::build(&[CORNER], options);

  assert!(table.unmatched().contains(&0x03));
  assert!(!table.unmatched().contains(&0x01));
  assert!(!table.unmatched().contains(&0x00));
  assert!(!table.unmatched().contains(&0xFF));
  for &configuration in table.unmatched() {
    assert!(table.get(configuration).is_empty());
  }
}

#[test]
fn test_no_anomalies() {
  // A single island is always tried by the direct match first, so the
  // island pass never yields a one-part group.
  let options = DecomposeOptions::new(Dimensionality::Volumetric).with_mirror_y(true);
  let table = ConfigurationTable::build(&CUBE_PATTERNS, options);
  assert!(table.anomalies().is_empty());
}

#[test]
fn test_matches_decompose() {
  let options = DecomposeOptions::new(Dimensionality::Volumetric).with_mirror_y(true);
  let table = ConfigurationTable::build(&CUBE_PATTERNS, options);

  for (configuration, group) in table.iter() {
    assert_eq!(group, &decompose(configuration, &CUBE_PATTERNS, options));
  }
  assert_eq!(table.iter().count(), 256);
}

#[test]
fn test_planar_lookup_masks_upper_bits() {
  let table = ConfigurationTable::build(&PLANAR_PATTERNS, DecomposeOptions::new(Dimensionality::Planar));
  assert_eq!(table.get(0b0001_0001), table.get(0b0001));
}
