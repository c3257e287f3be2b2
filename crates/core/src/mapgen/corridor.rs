//! Dog-leg corridors between room centers.

use crate::tile::names;
use crate::types::Pos;

use super::room::Room;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Corridor {
    pub start: Pos,
    pub end: Pos,
    pub horizontal_first: bool,
    /// Last cell inside the start room before the path leaves it.
    pub start_door: Option<Pos>,
    /// First cell inside the end room once the path enters it.
    pub end_door: Option<Pos>,
    points: Vec<Pos>,
}

impl Corridor {
    pub fn new(from: &Room, to: &Room, horizontal_first: bool) -> Self {
        let start = from.center();
        let end = to.center();
        let corner = if horizontal_first {
            Pos { y: start.y, x: end.x }
        } else {
            Pos { y: end.y, x: start.x }
        };

        let mut points = straight_segment(start, corner);
        points.extend(straight_segment(corner, end).into_iter().skip(1));

        let start_door = points
            .windows(2)
            .find(|pair| from.contains(pair[0]) && !from.contains(pair[1]))
            .map(|pair| pair[0]);
        let end_door = points
            .windows(2)
            .rev()
            .find(|pair| !to.contains(pair[0]) && to.contains(pair[1]))
            .map(|pair| pair[1]);

        Self { start, end, horizontal_first, start_door, end_door, points }
    }

    /// Carved cells in walking order from `start` to `end`.
    pub fn points(&self) -> &[Pos] {
        &self.points
    }

    pub fn cells(&self) -> impl Iterator<Item = (Pos, &'static str)> + '_ {
        self.points.iter().map(|&pos| (pos, names::FLOOR))
    }
}

/// Axis-aligned run from `a` to `b`, inclusive. Expects `a` and `b` to share a row or column.
fn straight_segment(a: Pos, b: Pos) -> Vec<Pos> {
    let step = Pos { y: (b.y - a.y).signum(), x: (b.x - a.x).signum() };
    let len = a.x.abs_diff(b.x).max(a.y.abs_diff(b.y)) as i32;
    (0..=len).map(|i| Pos { y: a.y + step.y * i, x: a.x + step.x * i }).collect()
}
