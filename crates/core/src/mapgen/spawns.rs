//! Mob and item placement on the open floor left after door placement.

use crate::config::DungeonConfig;
use crate::entity::Entity;
use crate::error::CatalogError;
use crate::geometry::chebyshev;
use crate::level::Level;
use crate::rng::GameRng;
use crate::tile::TileCatalog;
use crate::types::{EntityKind, Pos};

/// Mobs never start adjacent to the arrival point.
const SANCTUARY_RADIUS: u32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct SpawnReport {
    pub(super) mobs: usize,
    pub(super) items: usize,
}

struct Wave<'a> {
    kind: EntityKind,
    names: Vec<&'a str>,
    target: usize,
    keep_clear_of: Option<Pos>,
}

pub(super) fn populate(
    level: &mut Level,
    catalog: &TileCatalog,
    rng: &mut GameRng,
    config: &DungeonConfig,
) -> Result<SpawnReport, CatalogError> {
    let rooms = level.rooms().len();
    let mut pool = level.open_positions().to_vec();

    let mobs = Wave {
        kind: EntityKind::Mob,
        names: catalog.mob_names(),
        target: rng.range(config.min_mobs, config.min_mobs.max(rooms)),
        keep_clear_of: level.start_position(),
    };
    let placed_mobs = place_wave(level, catalog, rng, &mut pool, &mobs)?;

    let items = Wave {
        kind: EntityKind::Item,
        names: catalog.item_names(),
        target: rng.range(config.min_items, config.min_items.max(rooms)),
        keep_clear_of: None,
    };
    let placed_items = place_wave(level, catalog, rng, &mut pool, &items)?;

    Ok(SpawnReport { mobs: placed_mobs, items: placed_items })
}

/// Draws positions without replacement, up to twice the target. Positions
/// rejected for this wave go back into the pool for the next one.
fn place_wave(
    level: &mut Level,
    catalog: &TileCatalog,
    rng: &mut GameRng,
    pool: &mut Vec<Pos>,
    wave: &Wave<'_>,
) -> Result<usize, CatalogError> {
    let mut placed = 0;
    let mut rejected = Vec::new();

    if !wave.names.is_empty() {
        for _ in 0..wave.target * 2 {
            if placed == wave.target {
                break;
            }
            let Some(pos) = rng.take(pool) else {
                break;
            };
            if wave
                .keep_clear_of
                .is_some_and(|start| chebyshev(pos, start) <= SANCTUARY_RADIUS)
            {
                rejected.push(pos);
                continue;
            }
            let Some(&name) = rng.choose(&wave.names) else {
                break;
            };
            let tile = catalog.get(name)?;
            level.add_entity(Entity::new(name, wave.kind, pos, tile));
            placed += 1;
        }
    }

    if placed < wave.target {
        log::debug!("placed {placed} of {} {:?} entities", wave.target, wave.kind);
    }
    pool.append(&mut rejected);
    pool.sort_unstable();
    Ok(placed)
}
