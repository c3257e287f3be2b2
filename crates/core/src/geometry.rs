//! Grid geometry: rasterized rays, clipping bounds, and distance metrics.

use crate::types::Pos;

/// Inclusive clipping rectangle for [`ray_within`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min: Pos,
    pub max: Pos,
}

impl Bounds {
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }
}

/// Integer Bresenham walk from `start` to `end`, both inclusive.
///
/// Midpoint ties round toward the smaller absolute coordinate, so a ray and
/// its reverse cover the same cells.
#[derive(Clone, Debug)]
pub struct Ray {
    origin: Pos,
    major_step: Pos,
    minor_step: Pos,
    major_len: i32,
    minor_len: i32,
    minor_positive: bool,
    error: i32,
    minor: i32,
    index: i32,
}

impl Ray {
    pub fn new(start: Pos, end: Pos) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let x_step = if dx >= 0 { 1 } else { -1 };
        let y_step = if dy >= 0 { 1 } else { -1 };
        let (adx, ady) = (dx.abs(), dy.abs());

        let (major_step, minor_step, major_len, minor_len, minor_positive) = if adx > ady {
            (Pos { y: 0, x: x_step }, Pos { y: y_step, x: 0 }, adx, ady, y_step > 0)
        } else {
            (Pos { y: y_step, x: 0 }, Pos { y: 0, x: x_step }, ady, adx, x_step > 0)
        };

        Self {
            origin: start,
            major_step,
            minor_step,
            major_len,
            minor_len,
            minor_positive,
            error: 2 * minor_len - major_len,
            minor: 0,
            index: 0,
        }
    }
}

impl Iterator for Ray {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.index > self.major_len {
            return None;
        }
        let point = Pos {
            y: self.origin.y + self.index * self.major_step.y + self.minor * self.minor_step.y,
            x: self.origin.x + self.index * self.major_step.x + self.minor * self.minor_step.x,
        };

        let advance_minor =
            if self.minor_positive { self.error > 0 } else { self.error >= 0 };
        if advance_minor {
            self.minor += 1;
            self.error -= 2 * self.major_len;
        }
        self.error += 2 * self.minor_len;
        self.index += 1;

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.major_len + 1 - self.index).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Ray {}

pub fn ray(start: Pos, end: Pos) -> Ray {
    Ray::new(start, end)
}

/// Same walk as [`ray`], but points outside `bounds` are skipped. The walk
/// continues past them rather than stopping.
pub fn ray_within(start: Pos, end: Pos, bounds: Bounds) -> impl Iterator<Item = Pos> {
    Ray::new(start, end).filter(move |&pos| bounds.contains(pos))
}

pub fn euclidean(a: Pos, b: Pos) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx * dx + dy * dy).sqrt()
}

pub fn squared_distance(a: Pos, b: Pos) -> i64 {
    let dx = i64::from(a.x - b.x);
    let dy = i64::from(a.y - b.y);
    dx * dx + dy * dy
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

pub fn chebyshev(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    fn walk(start: (i32, i32), end: (i32, i32)) -> Vec<(i32, i32)> {
        ray(Pos::from(start), Pos::from(end)).map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn single_cell_and_unit_steps() {
        assert_eq!(walk((0, 0), (0, 0)), vec![(0, 0)]);
        assert_eq!(walk((0, 0), (1, 0)), vec![(0, 0), (1, 0)]);
        assert_eq!(walk((0, 0), (0, 1)), vec![(0, 0), (0, 1)]);
        assert_eq!(walk((0, 0), (1, 1)), vec![(0, 0), (1, 1)]);
        assert_eq!(walk((0, 0), (-1, 1)), vec![(0, 0), (-1, 1)]);
        assert_eq!(walk((0, 0), (-1, -1)), vec![(0, 0), (-1, -1)]);
        assert_eq!(walk((0, 0), (1, -1)), vec![(0, 0), (1, -1)]);
    }

    #[test]
    fn shallow_line_visits_every_column_once() {
        let points = walk((0, 0), (6, 2));
        assert_eq!(points.len(), 7);
        for (index, (x, _)) in points.iter().enumerate() {
            assert_eq!(*x, index as i32);
        }
        assert_eq!(points.last(), Some(&(6, 2)));
    }

    #[test]
    fn midpoint_ties_round_toward_smaller_coordinate() {
        assert_eq!(walk((0, 0), (2, 1)), vec![(0, 0), (1, 0), (2, 1)]);
        assert_eq!(walk((2, 1), (0, 0)), vec![(2, 1), (1, 0), (0, 0)]);
    }

    #[test]
    fn bounded_ray_skips_but_continues() {
        let bounds = Bounds { min: Pos::new(0, 0), max: Pos::new(3, 3) };
        let points: Vec<Pos> = ray_within(Pos::new(-2, 0), Pos::new(2, 0), bounds).collect();
        assert_eq!(points, vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0)]);
    }

    #[test]
    fn distance_metrics_agree_on_axis_aligned_points() {
        let a = Pos::new(3, 0);
        let b = Pos::new(0, 4);
        assert_eq!(euclidean(a, b), 5.0);
        assert_eq!(squared_distance(a, b), 25);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(chebyshev(a, b), 4);
        assert_eq!(euclidean(Pos::new(0, 1), Pos::new(0, 0)), 1.0);
    }

    proptest! {
        #[test]
        fn ray_and_reverse_cover_same_cells(
            ax in -40_i32..40, ay in -40_i32..40, bx in -40_i32..40, by in -40_i32..40
        ) {
            let a = Pos::new(ax, ay);
            let b = Pos::new(bx, by);
            let forward: BTreeSet<Pos> = ray(a, b).collect();
            let backward: BTreeSet<Pos> = ray(b, a).collect();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn ray_is_eight_connected_and_hits_both_ends(
            ax in -40_i32..40, ay in -40_i32..40, bx in -40_i32..40, by in -40_i32..40
        ) {
            let a = Pos::new(ax, ay);
            let b = Pos::new(bx, by);
            let points: Vec<Pos> = ray(a, b).collect();
            prop_assert_eq!(points.first().copied(), Some(a));
            prop_assert_eq!(points.last().copied(), Some(b));
            prop_assert_eq!(points.len() as u32, chebyshev(a, b) + 1);
            for pair in points.windows(2) {
                prop_assert_eq!(chebyshev(pair[0], pair[1]), 1);
            }
        }
    }
}
