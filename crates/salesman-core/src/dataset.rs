//! FOXSELLS dataset files.
//!
//! Layout, little-endian with no padding:
//!
//! | bytes | field |
//! |---|---|
//! | 8 | magic `FOXSELLS` |
//! | 4 | format version |
//! | 4 | point count `n` |
//! | 4 | byte offset of the point array |
//! | 4 | byte offset of the solution array |
//!
//! followed by `n` points (`f32 x`, `f32 y`) in identity order and `n` `u32`
//! identities giving the visiting order slot by slot.

use std::fs;
use std::path::Path;

use scroll::{Pread, Pwrite, SizeWith, LE};
use serde::Serialize;

use crate::point::Point;
use crate::tour::{validate_order, TourMetric};
use crate::{Error, Result};

pub const MAGIC: [u8; 8] = *b"FOXSELLS";
pub const VERSION: u32 = 1;
pub const HEADER_SIZE: usize = 24;
const POINT_SIZE: usize = 8;
const ID_SIZE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct DatasetHeader {
    pub magic: [u8; 8],
    pub version: u32,
    pub point_count: u32,
    pub point_offset: u32,
    pub solution_offset: u32,
}

impl DatasetHeader {
    /// Header for `point_count` points laid out back to back after the header.
    pub fn for_count(point_count: usize) -> Result<Self> {
        let too_many =
            || Error::invalid_argument(format!("{point_count} points do not fit a dataset file"));
        let count = u32::try_from(point_count).map_err(|_| too_many())?;
        let point_offset = HEADER_SIZE as u32;
        let solution_offset = count
            .checked_mul(POINT_SIZE as u32)
            .and_then(|len| len.checked_add(point_offset))
            .ok_or_else(too_many)?;
        // The solution array has to be addressable too.
        count
            .checked_mul(ID_SIZE as u32)
            .and_then(|len| len.checked_add(solution_offset))
            .ok_or_else(too_many)?;

        Ok(Self {
            magic: MAGIC,
            version: VERSION,
            point_count: count,
            point_offset,
            solution_offset,
        })
    }

    fn points_end(&self) -> Option<usize> {
        (self.point_count as usize)
            .checked_mul(POINT_SIZE)?
            .checked_add(self.point_offset as usize)
    }

    fn solution_end(&self) -> Option<usize> {
        (self.point_count as usize)
            .checked_mul(ID_SIZE)?
            .checked_add(self.solution_offset as usize)
    }

    fn file_len(&self) -> usize {
        self.solution_end().unwrap_or(0).max(self.points_end().unwrap_or(0))
    }
}

/// A point set labeled with its best known visiting order.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    points: Vec<Point>,
    solution: Vec<u32>,
}

impl Dataset {
    pub fn new(points: Vec<Point>, solution: Vec<u32>) -> Result<Self> {
        DatasetHeader::for_count(points.len())?;
        validate_order(&solution, points.len())?;
        Ok(Self { points, solution })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn solution(&self) -> &[u32] {
        &self.solution
    }

    pub fn header(&self) -> Result<DatasetHeader> {
        DatasetHeader::for_count(self.points.len())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let header = self.header()?;
        let mut bytes = vec![0u8; header.file_len()];
        let mut offset = 0;
        bytes.gwrite_with(header, &mut offset, LE)?;
        for point in &self.points {
            bytes.gwrite_with(*point, &mut offset, LE)?;
        }
        for &id in &self.solution {
            bytes.gwrite_with(id, &mut offset, LE)?;
        }
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::invalid_data(format!(
                "file is {} bytes, shorter than the {HEADER_SIZE} byte header",
                bytes.len()
            )));
        }
        let header: DatasetHeader = bytes.pread_with(0, LE)?;
        if header.magic != MAGIC {
            return Err(Error::invalid_data("bad magic, not a FOXSELLS dataset"));
        }
        if header.version != VERSION {
            return Err(Error::invalid_data(format!(
                "unsupported dataset version {}",
                header.version
            )));
        }
        if (header.point_offset as usize) < HEADER_SIZE
            || (header.solution_offset as usize) < HEADER_SIZE
        {
            return Err(Error::invalid_data("array offset points into the header"));
        }
        match (header.points_end(), header.solution_end()) {
            (Some(points_end), Some(solution_end))
                if points_end <= bytes.len() && solution_end <= bytes.len() => {}
            _ => {
                return Err(Error::invalid_data(format!(
                    "{} points do not fit in a {} byte file",
                    header.point_count,
                    bytes.len()
                )))
            }
        }

        let n = header.point_count as usize;
        let mut offset = header.point_offset as usize;
        let mut points = Vec::with_capacity(n);
        for _ in 0..n {
            points.push(bytes.gread_with::<Point>(&mut offset, LE)?);
        }
        let mut offset = header.solution_offset as usize;
        let mut solution = Vec::with_capacity(n);
        for _ in 0..n {
            solution.push(bytes.gread_with::<u32>(&mut offset, LE)?);
        }

        Dataset::new(points, solution)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        // Encode fully before touching the filesystem.
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;
        log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    pub fn summary(&self, metric: TourMetric) -> DatasetSummary {
        DatasetSummary {
            version: VERSION,
            point_count: self.points.len(),
            metric,
            tour_length: metric.length(&self.points, &self.solution),
            points: self.points.clone(),
            solution: self.solution.clone(),
        }
    }
}

/// JSON-friendly view of a dataset.
#[derive(Clone, Debug, Serialize)]
pub struct DatasetSummary {
    pub version: u32,
    pub point_count: usize,
    pub metric: TourMetric,
    pub tour_length: f64,
    pub points: Vec<Point>,
    pub solution: Vec<u32>,
}
