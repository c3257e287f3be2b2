//! Door placement at narrow floor-through-wall junctions.

use crate::error::CatalogError;
use crate::level::Level;
use crate::rng::GameRng;
use crate::tile::{TileCatalog, names};
use crate::types::{Direction, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Wall,
    Floor,
    Other,
}

fn cell(level: &Level, pos: Pos) -> Cell {
    match level.get(pos) {
        Err(_) => Cell::Wall,
        Ok(tile) if tile.is(names::WALL) => Cell::Wall,
        Ok(tile) if tile.is(names::FLOOR) => Cell::Floor,
        Ok(_) => Cell::Other,
    }
}

/// A floor cell squeezed between two walls, opening onto floor on one side
/// and onto wall on the other.
pub(crate) fn is_door_site(level: &Level, pos: Pos) -> bool {
    if cell(level, pos) != Cell::Floor {
        return false;
    }
    let at = |dir: Direction| cell(level, pos + dir);
    let (n, e, s, w) =
        (at(Direction::North), at(Direction::East), at(Direction::South), at(Direction::West));
    let (ne, se, sw, nw) = (
        at(Direction::NorthEast),
        at(Direction::SouthEast),
        at(Direction::SouthWest),
        at(Direction::NorthWest),
    );
    let one_sided = |open: [Cell; 2], shut: [Cell; 2]| {
        open == [Cell::Floor, Cell::Floor] && shut == [Cell::Wall, Cell::Wall]
    };

    let walls_above_below = n == Cell::Wall && s == Cell::Wall && e == Cell::Floor && w == Cell::Floor;
    let walls_left_right = e == Cell::Wall && w == Cell::Wall && n == Cell::Floor && s == Cell::Floor;

    if walls_above_below {
        return one_sided([ne, se], [nw, sw]) || one_sided([nw, sw], [ne, se]);
    }
    if walls_left_right {
        return one_sided([nw, ne], [sw, se]) || one_sided([sw, se], [nw, ne]);
    }
    false
}

/// Door sites and the remaining plain floor, both in row-major order.
/// Classification reads the grid as it stands before any door is placed.
pub(crate) fn classify(level: &Level) -> (Vec<Pos>, Vec<Pos>) {
    let mut doors = Vec::new();
    let mut open = Vec::new();
    for (pos, tile) in level.iter() {
        if !tile.is(names::FLOOR) {
            continue;
        }
        if is_door_site(level, pos) {
            doors.push(pos);
        } else {
            open.push(pos);
        }
    }
    (doors, open)
}

/// Turns every door site into a closed or hidden door and records the
/// floor left over for spawning. The start position is never offered.
pub(crate) fn place_doors(
    level: &mut Level,
    catalog: &TileCatalog,
    rng: &mut GameRng,
    hidden_chance: u8,
) -> Result<usize, CatalogError> {
    let (doors, mut open) = classify(level);
    for &pos in &doors {
        let name = if rng.chance(hidden_chance) { names::HIDDEN_DOOR } else { names::CLOSED_DOOR };
        let door = catalog.get(name)?;
        if let Ok(tile) = level.get_mut(pos) {
            tile.replace_terrain(door);
        }
    }
    if let Some(start) = level.start_position() {
        open.retain(|&pos| pos != start);
    }
    level.set_open_positions(open);
    Ok(doors.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::level_from_ascii;

    #[test]
    fn corridor_entering_room_through_west_wall_is_a_door() {
        let level = level_from_ascii(&[
            "########", //
            "####....",
            "........",
            "####....",
            "########",
        ]);
        assert!(is_door_site(&level, Pos::new(3, 2)));
        assert!(!is_door_site(&level, Pos::new(1, 2)), "mid-corridor cell");
        assert!(!is_door_site(&level, Pos::new(5, 2)), "room interior");
        assert!(!is_door_site(&level, Pos::new(0, 2)), "level edge counts as wall");
    }

    #[test]
    fn corridor_entering_room_from_below_is_a_door() {
        let level = level_from_ascii(&[
            "#.....#", //
            "#.....#",
            "###.###",
            "###.###",
            "#######",
        ]);
        assert!(is_door_site(&level, Pos::new(3, 2)));
        assert!(!is_door_site(&level, Pos::new(3, 3)));
    }

    #[test]
    fn wall_cells_and_open_junctions_are_not_doors() {
        let level = level_from_ascii(&["#####", "#...#", "#...#", "#####"]);
        for (pos, _) in level.iter() {
            assert!(!is_door_site(&level, pos), "{pos:?}");
        }
    }

    fn junction_fixture() -> Level {
        level_from_ascii(&[
            "##########",
            "#....#####",
            "#.........",
            "#....#####",
            "##.#######",
            "##.#######",
        ])
    }

    #[test]
    fn classification_finds_every_junction_in_row_major_order() {
        let level = junction_fixture();
        let (doors, open) = classify(&level);
        assert_eq!(doors, vec![Pos::new(5, 2), Pos::new(2, 4)]);
        assert!(open.iter().all(|pos| !doors.contains(pos)));
        assert!(open.contains(&Pos::new(6, 2)));
    }

    #[test]
    fn placed_doors_do_not_change_neighbouring_classification() {
        let catalog = TileCatalog::default();
        let mut level = junction_fixture();
        let (expected, _) = classify(&level);

        let mut rng = GameRng::new(7);
        let placed = place_doors(&mut level, &catalog, &mut rng, 0).expect("door templates");
        assert_eq!(placed, expected.len());
        for pos in &expected {
            assert!(level.get(*pos).expect("in range").is(names::CLOSED_DOOR));
        }
        assert!(level.get(Pos::new(6, 2)).expect("in range").is(names::FLOOR));
        assert!(!level.open_positions().iter().any(|pos| expected.contains(pos)));
    }

    #[test]
    fn certain_hidden_chance_hides_every_door() {
        let catalog = TileCatalog::default();
        let mut level = junction_fixture();
        let mut rng = GameRng::new(7);
        place_doors(&mut level, &catalog, &mut rng, 100).expect("door templates");
        let hidden = level.iter().filter(|(_, tile)| tile.is(names::HIDDEN_DOOR)).count();
        assert_eq!(hidden, 2);
    }
}
