//! Random placement on the grid
//!
//! Rejection sampling: draw a uniform cell, retry while it collides with an
//! excluded cell. There is no retry cap, so a grid must be checked to have a
//! free cell before sampling starts. [`Grid`] carries that check.

use rand::Rng;
use serde::Serialize;

use crate::Point;
use crate::error::ConfigError;

/// Placement area `[0, width) x [0, height)`, validated to fit its entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Distinct cells this grid is guaranteed to hold
    capacity: usize,
}

impl Grid {
    /// Build a grid that can hold `cells` entities on distinct cells
    pub fn new(width: u32, height: u32, cells: usize) -> Result<Self, ConfigError> {
        let area = width as u64 * height as u64;
        if area < cells.max(1) as u64 {
            return Err(ConfigError::GridTooSmall {
                width,
                height,
                excluded: cells.saturating_sub(1),
            });
        }
        Ok(Self {
            width: i32::try_from(width).map_err(|_| ConfigError::GridTooLarge(width))?,
            height: i32::try_from(height).map_err(|_| ConfigError::GridTooLarge(height))?,
            capacity: cells,
        })
    }

    /// Whether `point` lies inside the placement area
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0 && point.y >= 0 && point.x < self.width && point.y < self.height
    }

    /// Draw a cell not in `excluding`
    ///
    /// `excluding` must hold fewer points than the grid was built for.
    pub fn place<R: Rng + ?Sized>(&self, rng: &mut R, excluding: &[Point]) -> Point {
        debug_assert!(excluding.len() < self.capacity.max(1));
        sample_excluding(rng, self.width, self.height, excluding)
    }
}

/// Draw a cell in `[0, width) x [0, height)` not in `excluding`
///
/// Fails if every cell of the area is excluded.
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    excluding: &[Point],
) -> Result<Point, ConfigError> {
    let too_small = ConfigError::GridTooSmall {
        width,
        height,
        excluded: excluding.len(),
    };
    let area = Grid {
        width: i32::try_from(width).map_err(|_| ConfigError::GridTooLarge(width))?,
        height: i32::try_from(height).map_err(|_| ConfigError::GridTooLarge(height))?,
        capacity: 0,
    };

    let mut blocked: Vec<Point> = excluding
        .iter()
        .copied()
        .filter(|p| area.contains(*p))
        .collect();
    blocked.sort_by_key(|p| (p.x, p.y));
    blocked.dedup();

    if (width as u64 * height as u64) <= blocked.len() as u64 {
        return Err(too_small);
    }
    Ok(sample_excluding(rng, area.width, area.height, excluding))
}

fn sample_excluding<R: Rng + ?Sized>(
    rng: &mut R,
    width: i32,
    height: i32,
    excluding: &[Point],
) -> Point {
    loop {
        let candidate = Point::new(rng.random_range(0..width), rng.random_range(0..height));
        if !excluding.contains(&candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_place_stays_in_bounds_and_avoids_excluded() {
        let mut rng = Pcg32::seed_from_u64(42);
        let excluded = [Point::new(0, 0), Point::new(2, 7)];
        for _ in 0..500 {
            let p = place(&mut rng, 5, 10, &excluded).unwrap();
            assert!(p.x >= 0 && p.x < 5);
            assert!(p.y >= 0 && p.y < 10);
            assert!(!excluded.contains(&p));
        }
    }

    #[test]
    fn test_place_is_reproducible() {
        let mut a = Pcg32::seed_from_u64(9001);
        let mut b = Pcg32::seed_from_u64(9001);
        for _ in 0..20 {
            assert_eq!(
                place(&mut a, 5, 10, &[]).unwrap(),
                place(&mut b, 5, 10, &[]).unwrap()
            );
        }
    }

    #[test]
    fn test_place_finds_only_free_cell() {
        let mut rng = Pcg32::seed_from_u64(3);
        let excluded = [Point::new(0, 0), Point::new(0, 1)];
        for _ in 0..50 {
            assert_eq!(place(&mut rng, 1, 3, &excluded).unwrap(), Point::new(0, 2));
        }
    }

    #[test]
    fn test_place_unsatisfiable() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(matches!(
            place(&mut rng, 1, 1, &[Point::ZERO]),
            Err(ConfigError::GridTooSmall { excluded: 1, .. })
        ));
        assert!(place(&mut rng, 0, 4, &[]).is_err());
        // Duplicates and off-grid exclusions do not use up cells
        assert!(place(&mut rng, 1, 2, &[Point::ZERO, Point::ZERO, Point::new(-1, 0)]).is_ok());
    }

    #[test]
    fn test_grid_capacity_check() {
        assert!(Grid::new(1, 2, 3).is_err());
        assert!(Grid::new(3, 1, 3).is_ok());
        assert!(matches!(
            Grid::new(u32::MAX, 1, 3),
            Err(ConfigError::GridTooLarge(u32::MAX))
        ));

        let grid = Grid::new(5, 10, 3).unwrap();
        assert!(grid.contains(Point::ZERO));
        assert!(grid.contains(Point::new(4, 9)));
        assert!(!grid.contains(Point::new(4, 10)));
        assert!(!grid.contains(Point::new(5, 0)));
        assert!(!grid.contains(Point::new(0, -1)));
    }
}
