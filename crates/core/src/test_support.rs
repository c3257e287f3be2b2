//! Hand-drawn level fixtures for unit tests.

use crate::level::{Level, LevelPlan};
use crate::tile::{TileCatalog, names};
use crate::types::Pos;

/// `#` wall, `.` floor, `+` closed door, `H` hidden door, `-` open door.
/// Rows must be the same length.
pub(crate) fn level_from_ascii(rows: &[&str]) -> Level {
    let catalog = TileCatalog::default();
    let width = rows.first().map_or(0, |row| row.chars().count());
    let mut level =
        LevelPlan::new(width, rows.len()).build(&catalog).expect("default catalog has terrain");

    for (y, row) in rows.iter().enumerate() {
        for (x, glyph) in row.chars().enumerate() {
            let name = match glyph {
                '.' => names::FLOOR,
                '+' => names::CLOSED_DOOR,
                'H' => names::HIDDEN_DOOR,
                '-' => names::OPEN_DOOR,
                _ => names::WALL,
            };
            let tile = catalog.get(name).expect("fixture uses known templates");
            level.set(Pos::new(x as i32, y as i32), tile).expect("fixture rows fit the level");
        }
    }
    level
}

/// Marks every cell lit so visibility tests do not depend on lighting.
pub(crate) fn light_everything(level: &mut Level) {
    let positions: Vec<Pos> = level.iter().map(|(pos, _)| pos).collect();
    for pos in positions {
        level.get_mut(pos).expect("iterated position").lit = true;
    }
}

pub(crate) fn open_room_fixture() -> (Level, Pos) {
    let level = level_from_ascii(&[
        "###########",
        "#.........#",
        "#.........#",
        "#.........#",
        "#.........#",
        "#.........#",
        "###########",
    ]);
    (level, Pos::new(5, 3))
}
