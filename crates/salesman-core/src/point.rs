use scroll::{Pread, Pwrite, SizeWith};
use serde::{Deserialize, Serialize};

/// A point of the plane. Its identity is its index in the owning slice.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Pread, Pwrite, SizeWith,
)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(self, other)
    }
}

/// Euclidean distance, evaluated in `f64`.
#[inline(always)]
pub fn distance(a: &Point, b: &Point) -> f64 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    (dx * dx + dy * dy).sqrt()
}
