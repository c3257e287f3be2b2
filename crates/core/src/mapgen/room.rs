//! Rectangular rooms: containment, overlap, and the cells they stamp.

use crate::tile::names;
use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    /// Top-left corner.
    pub position: Pos,
    pub width: usize,
    pub height: usize,
    /// Wall cells where corridors cross the room boundary.
    pub doors: Vec<Pos>,
}

impl Room {
    pub fn new(position: Pos, width: usize, height: usize) -> Self {
        Self { position, width, height, doors: Vec::new() }
    }

    /// Same bounds, no doors. Used to seed the next level.
    pub fn copy_bounds(&self) -> Self {
        Self::new(self.position, self.width, self.height)
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    /// Exclusive right bound.
    pub fn x2(&self) -> i32 {
        self.position.x + self.width as i32
    }

    /// Exclusive bottom bound.
    pub fn y2(&self) -> i32 {
        self.position.y + self.height as i32
    }

    pub fn center(&self) -> Pos {
        Pos { y: self.y() + (self.height / 2) as i32, x: self.x() + (self.width / 2) as i32 }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.x() <= pos.x && pos.x < self.x2() && self.y() <= pos.y && pos.y < self.y2()
    }

    pub fn overlaps(&self, other: &Room) -> bool {
        self.x() < other.x2() && other.x() < self.x2() && self.y() < other.y2() && other.y() < self.y2()
    }

    pub fn is_edge(&self, pos: Pos) -> bool {
        self.contains(pos)
            && (pos.x == self.x() || pos.x == self.x2() - 1 || pos.y == self.y() || pos.y == self.y2() - 1)
    }

    /// Every cell of the room with the template it is stamped with: a wall
    /// ring around a floor interior.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, &'static str)> + '_ {
        (self.y()..self.y2()).flat_map(move |y| {
            (self.x()..self.x2()).map(move |x| {
                let pos = Pos { y, x };
                (pos, if self.is_edge(pos) { names::WALL } else { names::FLOOR })
            })
        })
    }

    pub fn interior(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells().filter(|(_, name)| *name == names::FLOOR).map(|(pos, _)| pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_uses_exclusive_upper_bounds() {
        let room = Room::new(Pos::new(2, 3), 4, 5);
        assert_eq!((room.x2(), room.y2()), (6, 8));
        assert!(room.contains(Pos::new(2, 3)));
        assert!(room.contains(Pos::new(5, 7)));
        assert!(!room.contains(Pos::new(6, 7)));
        assert!(!room.contains(Pos::new(5, 8)));
        assert_eq!(room.center(), Pos::new(4, 5));
    }

    #[test]
    fn overlap_matches_pointwise_containment() {
        let base = Room::new(Pos::new(5, 5), 5, 5);
        let candidates = [
            Room::new(Pos::new(0, 0), 5, 5),
            Room::new(Pos::new(0, 0), 6, 6),
            Room::new(Pos::new(9, 9), 3, 3),
            Room::new(Pos::new(10, 5), 3, 3),
            Room::new(Pos::new(6, 6), 2, 2),
            Room::new(Pos::new(3, 7), 10, 1),
        ];
        for candidate in candidates {
            let pointwise = candidate.cells().any(|(pos, _)| base.contains(pos))
                || base.cells().any(|(pos, _)| candidate.contains(pos));
            assert_eq!(base.overlaps(&candidate), pointwise, "{candidate:?}");
            assert_eq!(candidate.overlaps(&base), pointwise, "{candidate:?}");
        }
    }

    #[test]
    fn cells_form_wall_ring_around_floor() {
        let room = Room::new(Pos::new(1, 1), 4, 3);
        let cells: Vec<_> = room.cells().collect();
        assert_eq!(cells.len(), 12);
        let interior: Vec<Pos> = room.interior().collect();
        assert_eq!(interior, vec![Pos::new(2, 2), Pos::new(3, 2)]);
        assert!(room.is_edge(Pos::new(1, 2)));
        assert!(!room.is_edge(Pos::new(2, 2)));
    }

    #[test]
    fn copy_bounds_drops_doors() {
        let mut room = Room::new(Pos::new(1, 1), 7, 7);
        room.doors.push(Pos::new(1, 4));
        let copy = room.copy_bounds();
        assert!(copy.doors.is_empty());
        assert_eq!((copy.position, copy.width, copy.height), (room.position, 7, 7));
    }
}
