//! Pipeline benchmarks.
//!
//! - **isolated**: configuration table build, classification, combination
//! - **pipeline**: full generation per volume size and combine mode, and
//!   batched neighbouring chunks through the task queue
//!
//! Volumes come from hashed noise thresholded at a fill ratio:
//! - **sparse**: ~20% filled (many isolated cells, island decompositions)
//! - **dense**: ~60% filled (mostly faces and complements)

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::IVec3;
use voxel_tiles::{
  pipeline::{classify, combine, place_instances},
  BasePiece, CombineMode, ConfigurationTable, DecomposeOptions, Dimensionality, Direction, GenerationQueue,
  GenerationRequest, GenerationSettings, OccupancyVolume, PieceMesh, Theme, ThemeAssets,
};

const FILL: u8 = 1;

// =============================================================================
// Fixtures
// =============================================================================

/// Hash 3D integer coordinates to u32.
#[inline]
fn hash_3d(x: i32, y: i32, z: i32, seed: u32) -> u32 {
  let mut h = seed;
  h ^= x as u32;
  h = h.wrapping_mul(0x85ebca6b);
  h ^= y as u32;
  h = h.wrapping_mul(0xc2b2ae35);
  h ^= z as u32;
  h = h.wrapping_mul(0x27d4eb2d);
  h ^= h >> 15;
  h
}

/// Volume with roughly `ratio` of its cells filled.
fn noise_volume(size: usize, ratio: f64, seed: u32) -> Arc<OccupancyVolume> {
  let mut volume = OccupancyVolume::new([size; 3]).expect("bench volume size");
  let threshold = (ratio * u32::MAX as f64) as u32;
  for x in 0..size as i32 {
    for y in 0..size as i32 {
      for z in 0..size as i32 {
        if hash_3d(x, y, z, seed) < threshold {
          volume.set(IVec3::new(x, y, z), FILL).expect("cell inside volume");
        }
      }
    }
  }
  Arc::new(volume)
}

/// Two-triangle quad per covered cell, roughly the density of authored
/// tile pieces.
fn piece_mesh(pattern: u8) -> PieceMesh {
  let mut positions = Vec::new();
  let mut indices = Vec::new();
  for corner in 0..8u8 {
    if pattern & (1 << corner) == 0 {
      continue;
    }
    let cx = if corner & 3 >= 2 { 0.5 } else { -0.5 };
    let cy = if corner & 4 != 0 { 0.5 } else { -0.5 };
    let cz = if matches!(corner & 3, 1 | 2) { 0.5 } else { -0.5 };
    let base = positions.len() as u32;
    positions.extend_from_slice(&[
      [cx - 0.25, cy, cz - 0.25],
      [cx + 0.25, cy, cz - 0.25],
      [cx + 0.25, cy, cz + 0.25],
      [cx - 0.25, cy, cz + 0.25],
    ]);
    indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
  }
  let normals = vec![[0.0, 1.0, 0.0]; positions.len()];
  let uvs = vec![[0.0, 0.0]; positions.len()];
  PieceMesh::new(positions, normals, indices).with_uv_channel(uvs)
}

const CUBE_PATTERNS: [u8; 8] = [0x01, 0x03, 0x11, 0x0F, 0x33, 0x07, 0x77, 0x05];

fn cube_theme() -> Theme {
  CUBE_PATTERNS.iter().fold(
    Theme::new("bench", FILL, Dimensionality::Volumetric).with_mirror_y(true),
    |theme, &pattern| theme.with_piece(BasePiece::new(pattern, piece_mesh(pattern))),
  )
}

fn theme_assets() -> Arc<ThemeAssets> {
  let assets = ThemeAssets::new(cube_theme()).expect("bench theme validates");
  assets.table();
  assets.geometry();
  assets
}

// =============================================================================
// Isolated stages
// =============================================================================

fn bench_table_build(c: &mut Criterion) {
  let mut group = c.benchmark_group("isolated/table_build");

  let theme = cube_theme();
  let options = DecomposeOptions::for_theme(&theme);
  let patterns = theme.patterns();
  group.bench_function("volumetric", |b| {
    b.iter(|| ConfigurationTable::build(black_box(&patterns), options))
  });

  let planar: [u8; 3] = [0b0001, 0b0011, 0b0111];
  group.bench_function("planar", |b| {
    b.iter(|| ConfigurationTable::build(black_box(&planar), DecomposeOptions::new(Dimensionality::Planar)))
  });

  group.finish();
}

fn bench_classify(c: &mut Criterion) {
  let mut group = c.benchmark_group("isolated/classify");
  let assets = theme_assets();

  for size in [8usize, 16, 32] {
    let request = GenerationRequest::new(noise_volume(size, 0.2, 7), assets.clone());
    group.bench_with_input(BenchmarkId::new("sparse", size), &request, |b, request| {
      b.iter(|| classify(black_box(request)))
    });
  }

  group.finish();
}

fn bench_combine(c: &mut Criterion) {
  let mut group = c.benchmark_group("isolated/combine");
  let assets = theme_assets();
  let request = GenerationRequest::new(noise_volume(32, 0.6, 11), assets.clone());
  let lattice = classify(&request);
  let instances = place_instances(&lattice, &request.settings);

  for mode in [CombineMode::Fixed, CombineMode::Deferred] {
    group.bench_with_input(
      BenchmarkId::new(format!("{mode:?}").to_lowercase(), instances.len()),
      &instances,
      |b, instances| b.iter(|| combine(assets.geometry(), black_box(instances), mode)),
    );
  }

  group.finish();
}

// =============================================================================
// Full pipeline
// =============================================================================

fn bench_generate(c: &mut Criterion) {
  let mut group = c.benchmark_group("pipeline/generate");
  let assets = theme_assets();

  for (name, ratio) in [("sparse", 0.2), ("dense", 0.6)] {
    for size in [16usize, 32] {
      let volume = noise_volume(size, ratio, 3);
      for mode in [CombineMode::Fixed, CombineMode::Deferred] {
        let request = GenerationRequest::new(volume.clone(), assets.clone())
          .with_settings(GenerationSettings::default().with_combine_mode(mode));
        group.bench_with_input(
          BenchmarkId::new(format!("{name}/{mode:?}"), size),
          &request,
          |b, request| b.iter(|| voxel_tiles::generate(black_box(request))),
        );
      }
    }
  }

  group.finish();
}

fn bench_batch(c: &mut Criterion) {
  let mut group = c.benchmark_group("pipeline/batch");
  let assets = theme_assets();

  for chunks in [2usize, 4, 8] {
    // A row of chunks along X, each registered with its neighbours.
    let volumes: Vec<_> = (0..chunks).map(|i| noise_volume(16, 0.4, i as u32)).collect();
    let requests: Vec<_> = (0..chunks)
      .map(|i| {
        let mut request = GenerationRequest::new(volumes[i].clone(), assets.clone());
        if i > 0 {
          request = request.with_adjacent(Direction::NegX, volumes[i - 1].clone());
        }
        if i + 1 < chunks {
          request = request.with_adjacent(Direction::PosX, volumes[i + 1].clone());
        }
        request
      })
      .collect();

    group.bench_with_input(BenchmarkId::new("row", chunks), &requests, |b, requests| {
      b.iter(|| {
        let mut queue = GenerationQueue::new();
        for request in requests {
          queue.enqueue(request.clone());
        }
        queue.tick();
        black_box(queue.drain_completions())
      })
    });
  }

  group.finish();
}

criterion_group!(isolated, bench_table_build, bench_classify, bench_combine,);

criterion_group!(pipeline, bench_generate, bench_batch,);

criterion_main!(isolated, pipeline);
