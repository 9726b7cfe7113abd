//! Geometry variant selection.
//!
//! A base piece may carry several geometry variants. The selector picks one
//! per decomposition entry; the default always picks variant 0. Custom
//! selectors must be deterministic for a given context if generation output
//! is expected to be reproducible.

/// Everything a selector may base its choice on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantContext {
  /// Base piece index.
  pub piece: u16,
  /// Position of the entry within the vertex's decomposition group.
  pub entry_index: usize,
  /// Lattice vertex coordinate.
  pub vertex: [u32; 3],
  /// Configuration of the vertex.
  pub configuration: u8,
  /// Number of variants available for the piece (≥ 1).
  pub variant_count: usize,
  /// Seed from the generation settings.
  pub seed: u64,
}

/// Picks a geometry variant for a placed piece.
pub trait VariantSelector: Send + Sync {
  fn select(&self, context: &VariantContext) -> usize;
}

/// Always selects variant 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstVariant;

impl VariantSelector for FirstVariant {
  #[inline]
  fn select(&self, _context: &VariantContext) -> usize {
    0
  }
}

impl<F> VariantSelector for F
where
  F: Fn(&VariantContext) -> usize + Send + Sync,
{
  #[inline]
  fn select(&self, context: &VariantContext) -> usize {
    self(context)
  }
}

/// Run a selector and clamp its answer to the available variants.
pub fn resolve_variant(selector: &dyn VariantSelector, context: &VariantContext) -> u16 {
  let last = context.variant_count.saturating_sub(1);
  let pick = selector.select(context);
  if pick > last {
    tracing::warn!(
      piece = context.piece,
      pick,
      variant_count = context.variant_count,
      "variant selection out of range; using last variant"
    );
    return last as u16;
  }
  pick as u16
}

#[cfg(test)]
mod tests {
  use super::*;

  fn context(variant_count: usize) -> VariantContext {
    VariantContext {
      piece: 2,
      entry_index: 0,
      vertex: [1, 2, 3],
      configuration: 0b0000_0001,
      variant_count,
      seed: 42,
    }
  }

  #[test]
  fn test_first_variant_default() {
    assert_eq!(resolve_variant(&FirstVariant, &context(3)), 0);
  }

  #[test]
  fn test_closure_selector() {
    let by_vertex = |ctx: &VariantContext| ctx.vertex[0] as usize;
    assert_eq!(resolve_variant(&by_vertex, &context(3)), 1);
  }

  #[test]
  fn test_out_of_range_is_clamped() {
    let too_far = |_: &VariantContext| 10usize;
    assert_eq!(resolve_variant(&too_far, &context(3)), 2);
  }
}
