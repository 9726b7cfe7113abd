//! Engine-agnostic metrics collection for tile generation statistics.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use voxel_tiles::metrics::{self, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // Every `generate` call records its stats; read them back for UI:
//! let snapshot = metrics::snapshot();
//! println!("avg classify: {:.1}us", snapshot.classify_timings.average());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::{Mutex, OnceLock};

use crate::pipeline::GenerationStats;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create a new rolling window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Most recent value.
    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
    /// Compute the sum of all values.
    pub fn sum(&self) -> T {
        self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
    }
}

impl RollingWindow<u64> {
    /// Compute the average of all values.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    /// Get min and max values.
    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = *self.buffer.iter().min()?;
        let max = *self.buffer.iter().max()?;
        Some((min, max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128)
    }
}

/// Generation statistics accumulated across runs.
#[derive(Debug, Clone, Default)]
pub struct GenerationMetrics {
    // Timing
    /// Classification stage times in microseconds.
    pub classify_timings: RollingWindow<u64>,
    /// Placement stage times in microseconds.
    pub place_timings: RollingWindow<u64>,
    /// Combination stage times in microseconds.
    pub combine_timings: RollingWindow<u64>,
    /// Whole-run times in microseconds.
    pub total_timings: RollingWindow<u64>,

    // Totals
    pub runs: u64,
    pub normal_tiles: u64,
    pub culled_tiles: u64,
    pub void_tiles: u64,
    pub instances: u64,
    pub vertices: u64,
    pub indices: u64,

    /// Stats of the most recent run (for UI).
    pub last: GenerationStats,
}

impl GenerationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one run into the metrics.
    pub fn record(&mut self, stats: &GenerationStats) {
        if !is_enabled() {
            return;
        }

        self.classify_timings.push(stats.classify_us);
        self.place_timings.push(stats.place_us);
        self.combine_timings.push(stats.combine_us);
        self.total_timings.push(stats.total_us);

        self.runs += 1;
        self.normal_tiles += stats.normal_tiles as u64;
        self.culled_tiles += stats.culled_tiles as u64;
        self.void_tiles += stats.void_tiles as u64;
        self.instances += stats.instances as u64;
        self.vertices += stats.vertices as u64;
        self.indices += stats.indices as u64;
        self.last = *stats;
    }

    /// Reset timings and totals.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of drawable tiles suppressed by culling.
    pub fn cull_ratio(&self) -> f64 {
        let drawable = self.normal_tiles + self.culled_tiles;
        if drawable == 0 {
            0.0
        } else {
            self.culled_tiles as f64 / drawable as f64
        }
    }

    /// Approximate mesh memory in megabytes (32 bytes per vertex, 4 per index).
    pub fn mesh_memory_mb(&self) -> f64 {
        (self.vertices * 32 + self.indices * 4) as f64 / 1_048_576.0
    }
}

fn global() -> &'static Mutex<GenerationMetrics> {
    static METRICS: OnceLock<Mutex<GenerationMetrics>> = OnceLock::new();
    METRICS.get_or_init(|| Mutex::new(GenerationMetrics::new()))
}

/// Record one run into the process-wide metrics.
pub fn record_generation(stats: &GenerationStats) {
    if !is_enabled() {
        return;
    }
    if let Ok(mut metrics) = global().lock() {
        metrics.record(stats);
    }
}

/// Copy of the process-wide metrics.
pub fn snapshot() -> GenerationMetrics {
    global().lock().map(|m| m.clone()).unwrap_or_default()
}

/// Clear the process-wide metrics.
pub fn reset() {
    if let Ok(mut metrics) = global().lock() {
        metrics.reset();
    }
}
