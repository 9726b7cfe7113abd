//! Connected-island extraction over the corner graph.

use smallvec::SmallVec;

use crate::constants::MAX_GROUP_ENTRIES;
use crate::corner_table::CORNER_NEIGHBORS;
use crate::types::Configuration;

/// Split a configuration into connected islands, lowest set bit first.
///
/// Corners connect to their ring neighbours within a level and to their
/// vertical counterpart across levels. Returns `None` if the configuration
/// does not split into at most `MAX_GROUP_ENTRIES` islands.
pub fn split_islands(configuration: Configuration) -> Option<SmallVec<[Configuration; MAX_GROUP_ENTRIES]>> {
  let mut islands = SmallVec::new();
  let mut remaining = configuration;

  while remaining != 0 {
    if islands.len() == MAX_GROUP_ENTRIES {
      return None;
    }
    let seed = remaining.trailing_zeros() as usize;
    let island = flood_fill(remaining, seed);
    remaining &= !island;
    islands.push(island);
  }

  Some(islands)
}

/// Maximal connected subset of `configuration` containing `seed`.
pub fn flood_fill(configuration: Configuration, seed: usize) -> Configuration {
  let mut island = 1u8 << seed;
  let mut frontier = island;

  while frontier != 0 {
    let corner = frontier.trailing_zeros() as usize;
    frontier &= frontier - 1;

    let reached = CORNER_NEIGHBORS[corner] & configuration & !island;
    island |= reached;
    frontier |= reached;
  }

  island
}
