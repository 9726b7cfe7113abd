//! Configuration decomposer.
//!
//! Maps a configuration to at most four base pieces with rigid transforms
//! whose covered cells exactly equal the configuration.
//!
//! ```text
//! configuration
//!     │
//!     ├─► direct match ───────────────────────────────► [entry]
//!     │     A: untransformed patterns, declared order
//!     │     B: piece × {id, r90, r180, r270, mX, mX+r90, mX+r180, mX+r270}
//!     │     C: same eight with mirror-Y (volumetric themes that allow it)
//!     │
//!     ├─► split into connected islands (lowest bit first, ≤ 4)
//!     │     direct match each island ─────────────────► [entry; n]
//!     │
//!     ├─► direct match each island's complement ──────► [inverted entry; n]
//!     │
//!     └─► no covering ────────────────────────────────► [] (void, warned)
//! ```
//!
//! # Tie-break
//!
//! When several pieces or transforms produce the same configuration, the
//! first piece in declared library order wins, then the first transform in
//! pass order. The choice carries no geometric meaning; authors control it
//! by ordering the library.

mod islands;
mod table;

pub use islands::{flood_fill, split_islands};
pub use table::ConfigurationTable;

use crate::theme::Theme;
use crate::transform::RigidTransform;
use crate::types::{Configuration, DecompositionEntry, DecompositionGroup, Dimensionality};

/// Decomposition parameters derived from a theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecomposeOptions {
  pub dimensionality: Dimensionality,
  /// Enables the mirror-Y pass. Ignored for planar themes.
  pub allow_mirror_y: bool,
}

impl DecomposeOptions {
  pub fn new(dimensionality: Dimensionality) -> Self {
    Self {
      dimensionality,
      allow_mirror_y: false,
    }
  }

  pub fn with_mirror_y(mut self, allow: bool) -> Self {
    self.allow_mirror_y = allow;
    self
  }

  pub fn for_theme(theme: &Theme) -> Self {
    Self::new(theme.dimensionality).with_mirror_y(theme.allow_mirror_y)
  }

  #[inline]
  fn mirror_y_enabled(&self) -> bool {
    self.allow_mirror_y && self.dimensionality == Dimensionality::Volumetric
  }
}

/// Which step produced a decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecomposeOutcome {
  /// 0 or all-filled.
  Void,
  /// Single entry from the direct match.
  Direct,
  /// One entry per island.
  Islands,
  /// One inverted entry per island complement.
  Inverted,
  /// No covering found.
  Unmatched,
}

/// Result of decomposing one configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decomposition {
  pub group: DecompositionGroup,
  pub outcome: DecomposeOutcome,
  /// The island pass covered the configuration with a single part, which
  /// the direct match should already have found.
  pub anomaly: bool,
}

/// Find a single piece and transform that produce `target` exactly.
///
/// The returned transform maps the piece pattern onto `target`.
pub fn direct_match(
  target: Configuration,
  patterns: &[Configuration],
  options: DecomposeOptions,
) -> Option<DecompositionEntry> {
  // Pass A: untransformed.
  if let Some(piece) = patterns.iter().position(|&p| p == target) {
    return Some(DecompositionEntry::new(piece as u16, RigidTransform::IDENTITY));
  }

  // Pass B: quarter turns and mirror-X, piece-major.
  if let Some(entry) = match_pass(target, patterns, std::convert::identity) {
    return Some(entry);
  }

  // Pass C: the same candidates flipped vertically.
  if options.mirror_y_enabled() {
    return match_pass(target, patterns, RigidTransform::with_mirror_y);
  }

  None
}

fn match_pass(
  target: Configuration,
  patterns: &[Configuration],
  candidate: impl Fn(RigidTransform) -> RigidTransform,
) -> Option<DecompositionEntry> {
  patterns.iter().enumerate().find_map(|(piece, &pattern)| {
    RigidTransform::DIRECT_MATCH_ORDER
      .into_iter()
      .map(&candidate)
      .find(|t| t.apply(pattern) == target)
      .map(|t| DecompositionEntry::new(piece as u16, t))
  })
}

/// Decompose a configuration into a group of placed base pieces.
///
/// Returns an empty group for void configurations and for configurations the
/// library cannot cover.
pub fn decompose(
  configuration: Configuration,
  patterns: &[Configuration],
  options: DecomposeOptions,
) -> DecompositionGroup {
  decompose_detailed(configuration, patterns, options).group
}

/// `decompose` plus the step that produced the result.
pub fn decompose_detailed(
  configuration: Configuration,
  patterns: &[Configuration],
  options: DecomposeOptions,
) -> Decomposition {
  let dim = options.dimensionality;
  let full = dim.full_mask();
  let configuration = configuration & full;

  let done = |group: DecompositionGroup, outcome| Decomposition {
    group,
    outcome,
    anomaly: false,
  };

  if dim.is_void(configuration) {
    return done(DecompositionGroup::new(), DecomposeOutcome::Void);
  }

  if let Some(entry) = direct_match(configuration, patterns, options) {
    let mut group = DecompositionGroup::new();
    group.push(entry);
    return done(group, DecomposeOutcome::Direct);
  }

  let Some(islands) = split_islands(configuration) else {
    return done(DecompositionGroup::new(), DecomposeOutcome::Unmatched);
  };

  // Forward pass: each island as-is.
  let forward: Option<DecompositionGroup> = islands
    .iter()
    .map(|&island| direct_match(island, patterns, options))
    .collect();
  if let Some(group) = forward {
    let anomaly = group.len() == 1;
    if anomaly {
      tracing::warn!(
        configuration,
        "island decomposition produced a single part that direct matching missed"
      );
    }
    return Decomposition {
      group,
      outcome: DecomposeOutcome::Islands,
      anomaly,
    };
  }

  // Inverse pass: match each island's complement, placed inside out.
  let inverse: Option<DecompositionGroup> = islands
    .iter()
    .map(|&island| {
      direct_match(!island & full, patterns, options).map(|entry| DecompositionEntry {
        inverted: true,
        ..entry
      })
    })
    .collect();
  if let Some(group) = inverse {
    return done(group, DecomposeOutcome::Inverted);
  }

  tracing::debug!(configuration, islands = islands.len(), "no covering for configuration");
  done(DecompositionGroup::new(), DecomposeOutcome::Unmatched)
}
