use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

/// Integer grid coordinate. Ordering is row-major (`y` first, then `x`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// The eight surrounding cells, clockwise from north. Not bounds-filtered.
    pub fn neighbors(self) -> [Pos; 8] {
        Direction::COMPASS.map(|dir| self + dir)
    }

    /// The four orthogonal neighbours: north, east, south, west.
    pub fn orthogonal_neighbors(self) -> [Pos; 4] {
        [
            self + Direction::North,
            self + Direction::East,
            self + Direction::South,
            self + Direction::West,
        ]
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos { y: self.y + rhs.y, x: self.x + rhs.x }
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Pos {
        Pos { y: self.y - rhs.y, x: self.x - rhs.x }
    }
}

impl Add<Direction> for Pos {
    type Output = Pos;

    fn add(self, rhs: Direction) -> Pos {
        self + rhs.delta()
    }
}

impl Sub<Direction> for Pos {
    type Output = Pos;

    fn sub(self, rhs: Direction) -> Pos {
        self - rhs.delta()
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Pos { y, x }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    None,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const COMPASS: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Screen coordinates: north is `-y`.
    pub const fn delta(self) -> Pos {
        match self {
            Direction::None => Pos { y: 0, x: 0 },
            Direction::North => Pos { y: -1, x: 0 },
            Direction::NorthEast => Pos { y: -1, x: 1 },
            Direction::East => Pos { y: 0, x: 1 },
            Direction::SouthEast => Pos { y: 1, x: 1 },
            Direction::South => Pos { y: 1, x: 0 },
            Direction::SouthWest => Pos { y: 1, x: -1 },
            Direction::West => Pos { y: 0, x: -1 },
            Direction::NorthWest => Pos { y: -1, x: -1 },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Player,
    Mob,
    Item,
    Light,
}
