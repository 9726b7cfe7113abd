//! OccupancyVolume - dense grid of fill ids.
//!
//! Owned by the caller and read-only to the generation pipeline. Editing
//! tools mutate cells between runs and trigger a full regeneration.

use glam::IVec3;

use crate::constants::{coord_to_index, EMPTY_FILL, MAX_AXIS_CELLS};
use crate::error::VolumeError;
use crate::types::FillId;

/// Dense 3D grid of fill ids (0 = empty).
///
/// Planar themes use a volume with a single Y layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyVolume {
  dims: [usize; 3],
  cells: Vec<FillId>,
}

impl OccupancyVolume {
  /// Create an empty volume.
  pub fn new(dims: [usize; 3]) -> Result<Self, VolumeError> {
    validate_dims(dims)?;
    Ok(Self {
      dims,
      cells: vec![EMPTY_FILL; dims[0] * dims[1] * dims[2]],
    })
  }

  /// Create an empty single-layer volume for planar themes.
  pub fn planar(size_x: usize, size_z: usize) -> Result<Self, VolumeError> {
    Self::new([size_x, 1, size_z])
  }

  /// Wrap an existing cell buffer (X-major, Z-minor layout).
  pub fn from_cells(dims: [usize; 3], cells: Vec<FillId>) -> Result<Self, VolumeError> {
    validate_dims(dims)?;
    let expected = dims[0] * dims[1] * dims[2];
    if cells.len() != expected {
      return Err(VolumeError::CellCountMismatch {
        dims,
        expected,
        actual: cells.len(),
      });
    }
    Ok(Self { dims, cells })
  }

  #[inline]
  pub fn dims(&self) -> [usize; 3] {
    self.dims
  }

  /// Raw cell buffer.
  #[inline]
  pub fn cells(&self) -> &[FillId] {
    &self.cells
  }

  #[inline]
  pub fn contains(&self, pos: IVec3) -> bool {
    pos.x >= 0
      && pos.y >= 0
      && pos.z >= 0
      && (pos.x as usize) < self.dims[0]
      && (pos.y as usize) < self.dims[1]
      && (pos.z as usize) < self.dims[2]
  }

  /// Read a cell, or `None` outside the volume.
  #[inline]
  pub fn sample(&self, pos: IVec3) -> Option<FillId> {
    if self.contains(pos) {
      Some(self.cells[coord_to_index(self.dims, pos.x as usize, pos.y as usize, pos.z as usize)])
    } else {
      None
    }
  }

  /// Read a cell. Out-of-range coordinates are a caller error.
  pub fn get(&self, pos: IVec3) -> Result<FillId, VolumeError> {
    self.sample(pos).ok_or_else(|| self.out_of_bounds(pos))
  }

  /// Write a cell. Out-of-range coordinates are a caller error.
  pub fn set(&mut self, pos: IVec3, fill: FillId) -> Result<(), VolumeError> {
    if !self.contains(pos) {
      return Err(self.out_of_bounds(pos));
    }
    let idx = coord_to_index(self.dims, pos.x as usize, pos.y as usize, pos.z as usize);
    self.cells[idx] = fill;
    Ok(())
  }

  /// Fill the inclusive box `[min, max]`.
  pub fn fill_box(&mut self, min: IVec3, max: IVec3, fill: FillId) -> Result<(), VolumeError> {
    if !self.contains(min) {
      return Err(self.out_of_bounds(min));
    }
    if !self.contains(max) {
      return Err(self.out_of_bounds(max));
    }
    for x in min.x..=max.x {
      for y in min.y..=max.y {
        for z in min.z..=max.z {
          let idx = coord_to_index(self.dims, x as usize, y as usize, z as usize);
          self.cells[idx] = fill;
        }
      }
    }
    Ok(())
  }

  /// Set every cell.
  pub fn fill(&mut self, fill: FillId) {
    self.cells.fill(fill);
  }

  /// Number of non-empty cells.
  pub fn count_filled(&self) -> usize {
    self.cells.iter().filter(|&&c| c != EMPTY_FILL).count()
  }

  fn out_of_bounds(&self, pos: IVec3) -> VolumeError {
    VolumeError::OutOfBounds {
      x: pos.x as i64,
      y: pos.y as i64,
      z: pos.z as i64,
      dims: self.dims,
    }
  }
}

fn validate_dims(dims: [usize; 3]) -> Result<(), VolumeError> {
  if dims.iter().any(|&d| d == 0 || d > MAX_AXIS_CELLS) {
    return Err(VolumeError::InvalidSize {
      dims,
      max: MAX_AXIS_CELLS,
    });
  }
  Ok(())
}

#[cfg(test)]
#[path = "volume_test.rs"]
mod volume_test;
