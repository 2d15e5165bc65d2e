use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use salesman_core::{Error, Point, Result};

/// Uniform points over a `width` x `height` rectangle centred on the origin.
pub struct PointSampler {
    rng: Xoshiro256PlusPlus,
    half_width: f32,
    half_height: f32,
}

impl PointSampler {
    pub fn new(width: f32, height: f32, seed: u64) -> Result<Self> {
        let half_width = half_extent("width", width)?;
        let half_height = half_extent("height", height)?;
        Ok(Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            half_width,
            half_height,
        })
    }

    pub fn sample(&mut self) -> Point {
        let x = self.rng.gen_range(-self.half_width..self.half_width);
        let y = self.rng.gen_range(-self.half_height..self.half_height);
        Point::new(x, y)
    }

    pub fn sample_n(&mut self, n: usize) -> Vec<Point> {
        (0..n).map(|_| self.sample()).collect()
    }
}

/// Half of `extent`, rejected when it is not finite or rounds down to zero.
fn half_extent(name: &str, extent: f32) -> Result<f32> {
    let half = extent * 0.5;
    if extent.is_finite() && half > 0.0 {
        Ok(half)
    } else {
        Err(Error::invalid_argument(format!(
            "{name} must be a positive number, got {extent}"
        )))
    }
}

/// Seed taken from the wall clock, used once at startup when none is given.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_points() {
        let a = PointSampler::new(100.0, 40.0, 17).unwrap().sample_n(12);
        let b = PointSampler::new(100.0, 40.0, 17).unwrap().sample_n(12);
        let c = PointSampler::new(100.0, 40.0, 18).unwrap().sample_n(12);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn points_stay_inside_the_rectangle() {
        let mut sampler = PointSampler::new(10.0, 2.0, 3).unwrap();
        for point in sampler.sample_n(1000) {
            assert!((-5.0..5.0).contains(&point.x), "{point:?}");
            assert!((-1.0..1.0).contains(&point.y), "{point:?}");
        }
    }

    #[test]
    fn rejects_empty_or_infinite_rectangles() {
        assert!(PointSampler::new(0.0, 1.0, 0).is_err());
        assert!(PointSampler::new(1.0, -1.0, 0).is_err());
        assert!(PointSampler::new(f32::INFINITY, 1.0, 0).is_err());
        assert!(PointSampler::new(1.0, f32::NAN, 0).is_err());
    }

    #[test]
    fn rejects_extents_that_vanish_when_halved() {
        let tiny = f32::from_bits(1);
        assert!(tiny > 0.0);
        assert!(matches!(
            PointSampler::new(tiny, 1.0, 1),
            Err(Error::InvalidArgument(_))
        ));
        assert!(PointSampler::new(1.0, tiny, 1).is_err());

        let mut smallest = PointSampler::new(f32::from_bits(2), f32::MIN_POSITIVE, 1).unwrap();
        for point in smallest.sample_n(16) {
            assert!(point.x.is_finite() && point.y.is_finite());
        }
    }
}
