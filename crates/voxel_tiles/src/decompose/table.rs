//! ConfigurationTable - decomposition of every configuration of a theme.

use super::{decompose_detailed, DecomposeOptions, DecomposeOutcome};
use crate::types::{Configuration, DecompositionGroup, Dimensionality};

/// Immutable lookup from configuration to decomposition group.
///
/// Built once per theme and shared read-only by all generation runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigurationTable {
  dimensionality: Dimensionality,
  groups: Vec<DecompositionGroup>,
  unmatched: Vec<Configuration>,
  anomalies: Vec<Configuration>,
}

impl ConfigurationTable {
  /// Decompose every configuration sequentially.
  ///
  /// 0 and the all-filled value stay void. Configurations the library cannot
  /// cover become void entries and are reported; the build never fails.
  pub fn build(patterns: &[Configuration], options: DecomposeOptions) -> Self {
    let dimensionality = options.dimensionality;
    let count = dimensionality.config_count();

    let mut groups = vec![DecompositionGroup::new(); count];
    let mut unmatched = Vec::new();
    let mut anomalies = Vec::new();

    for value in 1..count - 1 {
      let configuration = value as Configuration;
      let result = decompose_detailed(configuration, patterns, options);

      if result.outcome == DecomposeOutcome::Unmatched {
        tracing::warn!(configuration, "configuration has no decomposition; tile renders as void");
        unmatched.push(configuration);
      }
      if result.anomaly {
        anomalies.push(configuration);
      }
      groups[value] = result.group;
    }

    if !unmatched.is_empty() {
      tracing::warn!(
        unmatched = unmatched.len(),
        total = count - 2,
        "configuration table has unmatched configurations"
      );
    }

    Self {
      dimensionality,
      groups,
      unmatched,
      anomalies,
    }
  }

  /// Group for a configuration; empty for void or unmatched values.
  #[inline]
  pub fn get(&self, configuration: Configuration) -> &DecompositionGroup {
    &self.groups[(configuration & self.dimensionality.full_mask()) as usize]
  }

  #[inline]
  pub fn dimensionality(&self) -> Dimensionality {
    self.dimensionality
  }

  /// Number of entries (16 or 256).
  #[inline]
  pub fn len(&self) -> usize {
    self.groups.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }

  /// Configurations without a covering.
  #[inline]
  pub fn unmatched(&self) -> &[Configuration] {
    &self.unmatched
  }

  /// Configurations whose island pass yielded a single part.
  #[inline]
  pub fn anomalies(&self) -> &[Configuration] {
    &self.anomalies
  }

  /// Iterate `(configuration, group)` pairs.
  pub fn iter(&self) -> impl Iterator<Item = (Configuration, &DecompositionGroup)> {
    self
      .groups
      .iter()
      .enumerate()
      .map(|(value, group)| (value as Configuration, group))
  }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;
