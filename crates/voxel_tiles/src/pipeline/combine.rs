//! Stage 3: Combination
//!
//! Merges placed instances into one mesh.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ Fixed mode                                                              │
//! │                                                                         │
//! │   layout pass: vertex offset per instance,                              │
//! │                index cursor per (instance, submesh)                     │
//! │        │                                                                │
//! │        ├──► positions  M · (p, 1)                                       │
//! │        ├──► normals    normalize(M · (n, 0)), negated if inverted       │
//! │        ├──► colors     copy           one rayon::scope task per stream  │
//! │        ├──► tangents   copy                                             │
//! │        ├──► uv[k]      copy                                             │
//! │        └──► indices    + vertex offset, (a,b,c) → (a,c,b) if flipped    │
//! │                                                                         │
//! │ Deferred mode                                                           │
//! │                                                                         │
//! │   one sequential pass growing every stream, then finalize submeshes     │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//! Index buffer layout (submesh-major, instance order inside each submesh):
//!
//!   [ inst0.s0 | inst1.s0 | inst2.s0 | inst0.s1 | inst2.s1 | ... ]
//!   └──────── submesh 0 ────────────┘└──────── submesh 1 ─────┘
//! ```
//!
//! Both modes produce identical output.
//!
//! Vertex and index counts are bounded by the `u32` index range. Instances
//! that would push either total past it are dropped with a warning, in
//! instance order, so both modes drop the same tail.

use glam::{Mat4, Vec3};
use smallvec::SmallVec;

use super::types::{CombinedMesh, PlacedInstance, SubmeshRange};
use crate::config::CombineMode;
use crate::theme::{GeometryCache, GeometrySlice};
use crate::types::MinMaxAABB;

/// Combine instances with the given buffer strategy.
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "pipeline::combine"))]
pub fn combine(cache: &GeometryCache, instances: &[PlacedInstance], mode: CombineMode) -> CombinedMesh {
  match mode {
    CombineMode::Fixed => combine_fixed(cache, instances),
    CombineMode::Deferred => combine_deferred(cache, instances),
  }
}

// =============================================================================
// Per-element rules
// =============================================================================

#[inline]
fn transform_position(m: &Mat4, p: [f32; 3]) -> [f32; 3] {
  m.transform_point3(Vec3::from_array(p)).to_array()
}

#[inline]
fn transform_normal(m: &Mat4, n: [f32; 3], inverted: bool) -> [f32; 3] {
  let n = m.transform_vector3(Vec3::from_array(n)).normalize_or_zero();
  if inverted { (-n).to_array() } else { n.to_array() }
}

#[inline]
fn remap_triangle(tri: &[u32], offset: u32, flip: bool) -> [u32; 3] {
  let (a, b, c) = (tri[0] + offset, tri[1] + offset, tri[2] + offset);
  if flip { [a, c, b] } else { [a, b, c] }
}

fn compute_bounds(positions: &[[f32; 3]]) -> MinMaxAABB {
  let mut bounds = MinMaxAABB::empty();
  for &p in positions {
    bounds.encapsulate(p);
  }
  bounds
}

fn resolve<'a>(cache: &'a GeometryCache, instance: &PlacedInstance) -> Option<&'a GeometrySlice> {
  let slice = cache.slice(instance.piece as usize, instance.variant as usize);
  if slice.is_none() {
    tracing::warn!(
      piece = instance.piece,
      variant = instance.variant,
      "placed instance has no geometry; skipped"
    );
  }
  slice
}

/// Largest vertex or index total a combined mesh may hold.
const MAX_COMBINED_ELEMENTS: usize = u32::MAX as usize;

/// Running vertex and index totals checked against the `u32` index range.
struct ElementBudget {
  limit: usize,
  vertices: usize,
  indices: usize,
}

impl ElementBudget {
  fn new(limit: usize) -> Self {
    Self {
      limit,
      vertices: 0,
      indices: 0,
    }
  }

  /// Reserve room for a slice; callers stop at the first refusal.
  fn admit(&mut self, slice: &GeometrySlice, remaining: usize) -> bool {
    let vertices = self.vertices + slice.vertex_count as usize;
    let indices = self.indices + slice.index_count() as usize;
    if vertices > self.limit || indices > self.limit {
      tracing::warn!(
        vertices = self.vertices,
        indices = self.indices,
        dropped = remaining,
        "combined mesh exceeds the u32 index range; remaining instances dropped"
      );
      return false;
    }
    self.vertices = vertices;
    self.indices = indices;
    true
  }
}

// =============================================================================
// Fixed mode
// =============================================================================

/// Resolved instance with its output offsets.
struct LayoutItem<'a> {
  instance: &'a PlacedInstance,
  slice: &'a GeometrySlice,
  vertex_offset: u32,
  /// Output index position per submesh.
  index_cursors: SmallVec<[u32; 4]>,
}

struct Layout<'a> {
  items: Vec<LayoutItem<'a>>,
  vertex_total: usize,
  submeshes: Vec<SubmeshRange>,
}

impl<'a> Layout<'a> {
  fn build(cache: &'a GeometryCache, instances: &'a [PlacedInstance], limit: usize) -> Self {
    let submesh_count = cache.submesh_count();

    let mut budget = ElementBudget::new(limit);
    let mut resolved: Vec<(&PlacedInstance, &GeometrySlice)> = Vec::with_capacity(instances.len());
    for (at, instance) in instances.iter().enumerate() {
      let Some(slice) = resolve(cache, instance) else {
        continue;
      };
      if !budget.admit(slice, instances.len() - at) {
        break;
      }
      resolved.push((instance, slice));
    }

    // Submesh ranges: sizes summed over instances, then laid out in order.
    let mut submeshes = Vec::with_capacity(submesh_count);
    let mut start = 0u32;
    for submesh in 0..submesh_count {
      let count: u32 = resolved.iter().map(|(_, slice)| slice.submeshes[submesh].count).sum();
      submeshes.push(SubmeshRange { start, count });
      start += count;
    }

    let mut cursors: Vec<u32> = submeshes.iter().map(|r| r.start).collect();
    let mut vertex_offset = 0u32;
    let mut items = Vec::with_capacity(resolved.len());

    for (instance, slice) in resolved {
      let index_cursors = slice
        .submeshes
        .iter()
        .zip(cursors.iter_mut())
        .map(|(range, cursor)| {
          let at = *cursor;
          *cursor += range.count;
          at
        })
        .collect();

      items.push(LayoutItem {
        instance,
        slice,
        vertex_offset,
        index_cursors,
      });
      vertex_offset += slice.vertex_count;
    }

    Self {
      items,
      vertex_total: vertex_offset as usize,
      submeshes,
    }
  }

  fn index_total(&self) -> usize {
    self.submeshes.iter().map(|r| r.count as usize).sum()
  }
}

/// Write a per-vertex stream by applying `f` to every source element.
fn write_stream<T: Copy, U>(layout: &Layout, src: &[T], out: &mut [U], f: impl Fn(&PlacedInstance, T) -> U) {
  for item in &layout.items {
    let dst = &mut out[item.vertex_offset as usize..][..item.slice.vertex_count as usize];
    for (d, &s) in dst.iter_mut().zip(&src[item.slice.vertex_range()]) {
      *d = f(item.instance, s);
    }
  }
}

fn write_indices(layout: &Layout, src: &[u32], out: &mut [u32]) {
  for item in &layout.items {
    let flip = item.instance.flips_winding();
    for (range, &cursor) in item.slice.submeshes.iter().zip(&item.index_cursors) {
      let dst = &mut out[cursor as usize..][..range.count as usize];
      for (d, tri) in dst.chunks_exact_mut(3).zip(src[range.as_range()].chunks_exact(3)) {
        d.copy_from_slice(&remap_triangle(tri, item.vertex_offset, flip));
      }
    }
  }
}

/// Combine with sizes known up front; every stream is filled by its own task.
pub fn combine_fixed(cache: &GeometryCache, instances: &[PlacedInstance]) -> CombinedMesh {
  combine_fixed_within(cache, instances, MAX_COMBINED_ELEMENTS)
}

fn combine_fixed_within(cache: &GeometryCache, instances: &[PlacedInstance], limit: usize) -> CombinedMesh {
  let _span = tracing::info_span!("combine_fixed", instances = instances.len()).entered();

  let layout = Layout::build(cache, instances, limit);
  let n = layout.vertex_total;

  let mut positions = vec![[0.0f32; 3]; n];
  let mut normals = vec![[0.0f32; 3]; n];
  let mut colors = cache.colors.as_ref().map(|_| vec![[0.0f32; 4]; n]);
  let mut tangents = cache.tangents.as_ref().map(|_| vec![[0.0f32; 4]; n]);
  let mut uvs: Vec<Vec<[f32; 2]>> = cache.uvs.iter().map(|_| vec![[0.0f32; 2]; n]).collect();
  let mut indices = vec![0u32; layout.index_total()];

  {
    let layout = &layout;
    rayon::scope(|s| {
      s.spawn(|_| {
        write_stream(layout, &cache.positions, &mut positions, |i, p| transform_position(&i.transform, p))
      });
      s.spawn(|_| {
        write_stream(layout, &cache.normals, &mut normals, |i, n| {
          transform_normal(&i.transform, n, i.inverted)
        })
      });
      if let (Some(src), Some(out)) = (cache.colors.as_deref(), colors.as_deref_mut()) {
        s.spawn(move |_| write_stream(layout, src, out, |_, c| c));
      }
      if let (Some(src), Some(out)) = (cache.tangents.as_deref(), tangents.as_deref_mut()) {
        s.spawn(move |_| write_stream(layout, src, out, |_, t| t));
      }
      for (src, out) in cache.uvs.iter().zip(uvs.iter_mut()) {
        s.spawn(move |_| write_stream(layout, src, out, |_, uv| uv));
      }
      s.spawn(|_| write_indices(layout, &cache.indices, &mut indices));
    });
  }

  let bounds = compute_bounds(&positions);
  CombinedMesh {
    positions,
    normals,
    colors,
    tangents,
    uvs,
    indices,
    submeshes: layout.submeshes,
    bounds,
  }
}

// =============================================================================
// Deferred mode
// =============================================================================

/// Combine by growing buffers instance by instance, then finalize.
pub fn combine_deferred(cache: &GeometryCache, instances: &[PlacedInstance]) -> CombinedMesh {
  combine_deferred_within(cache, instances, MAX_COMBINED_ELEMENTS)
}

fn combine_deferred_within(cache: &GeometryCache, instances: &[PlacedInstance], limit: usize) -> CombinedMesh {
  let _span = tracing::info_span!("combine_deferred", instances = instances.len()).entered();

  let mut mesh = CombinedMesh {
    colors: cache.colors.as_ref().map(|_| Vec::new()),
    tangents: cache.tangents.as_ref().map(|_| Vec::new()),
    uvs: vec![Vec::new(); cache.uv_channel_count()],
    ..Default::default()
  };
  let mut per_submesh: Vec<Vec<u32>> = vec![Vec::new(); cache.submesh_count()];

  let mut budget = ElementBudget::new(limit);
  for (at, instance) in instances.iter().enumerate() {
    let Some(slice) = resolve(cache, instance) else {
      continue;
    };
    if !budget.admit(slice, instances.len() - at) {
      break;
    }
    let range = slice.vertex_range();
    let offset = mesh.positions.len() as u32;
    let m = &instance.transform;

    mesh
      .positions
      .extend(cache.positions[range.clone()].iter().map(|&p| transform_position(m, p)));
    mesh
      .normals
      .extend(cache.normals[range.clone()].iter().map(|&n| transform_normal(m, n, instance.inverted)));
    if let (Some(src), Some(out)) = (&cache.colors, &mut mesh.colors) {
      out.extend_from_slice(&src[range.clone()]);
    }
    if let (Some(src), Some(out)) = (&cache.tangents, &mut mesh.tangents) {
      out.extend_from_slice(&src[range.clone()]);
    }
    for (src, out) in cache.uvs.iter().zip(mesh.uvs.iter_mut()) {
      out.extend_from_slice(&src[range.clone()]);
    }

    let flip = instance.flips_winding();
    for (submesh, out) in slice.submeshes.iter().zip(per_submesh.iter_mut()) {
      for tri in cache.indices[submesh.as_range()].chunks_exact(3) {
        out.extend_from_slice(&remap_triangle(tri, offset, flip));
      }
    }
  }

  // Finalize: lay submeshes out contiguously.
  let mut start = 0u32;
  for list in per_submesh {
    let count = list.len() as u32;
    mesh.submeshes.push(SubmeshRange { start, count });
    mesh.indices.extend(list);
    start += count;
  }

  mesh.bounds = compute_bounds(&mesh.positions);
  mesh
}

#[cfg(test)]
#[path = "combine_test.rs"]
mod combine_test;
