//! Level-by-level generation orchestration: rooms, corridors, doors, spawns.

use crate::config::DungeonConfig;
use crate::error::{ConfigError, GenerationError};
use crate::level::{Level, LevelPlan};
use crate::rng::{GameRng, derive_level_seed};
use crate::tile::TileCatalog;
use crate::types::Pos;

use super::corridor::Corridor;
use super::doors::place_doors;
use super::dungeon::Dungeon;
use super::room::Room;
use super::spawns::populate;

pub struct DungeonGenerator<'a> {
    config: DungeonConfig,
    catalog: &'a TileCatalog,
}

impl<'a> DungeonGenerator<'a> {
    pub fn new(config: DungeonConfig, catalog: &'a TileCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, catalog })
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Every level or none: the first failure aborts the run.
    pub fn generate(&self) -> Result<Dungeon, GenerationError> {
        let mut levels = Vec::with_capacity(self.config.level_count);
        let mut seed_room = None;
        for index in 0..self.config.level_count {
            let level = self.generate_level(index, seed_room.take())?;
            seed_room = level.rooms().last().map(Room::copy_bounds);
            levels.push(level);
        }
        Ok(Dungeon::new(self.config.seed, levels))
    }

    /// One level from its own random stream. `seed_room`, when it fits, is
    /// placed before any random room.
    pub fn generate_level(
        &self,
        index: usize,
        seed_room: Option<Room>,
    ) -> Result<Level, GenerationError> {
        let config = &self.config;
        let mut rng = GameRng::new(derive_level_seed(config.seed, index));

        let width = rng.range(config.width.min, config.width.max);
        let height = rng.range(config.height.min, config.height.max);
        let target = rng.range(config.room_count.min, config.room_count.max);

        let mut plan = LevelPlan::new(width, height);
        place_rooms(&mut plan, &mut rng, config, target, seed_room);
        carve_corridors(&mut plan, &mut rng);

        let mut level = plan.build(self.catalog)?;
        let doors = place_doors(&mut level, self.catalog, &mut rng, config.hidden_door_chance)?;
        let spawned = populate(&mut level, self.catalog, &mut rng, config)?;

        log::info!(
            "level {index}: {width}x{height}, {} rooms, {} corridors, {doors} doors, {} mobs, {} items",
            level.rooms().len(),
            level.corridors().len(),
            spawned.mobs,
            spawned.items,
        );
        Ok(level)
    }
}

/// Rejection sampling. Running out of attempts leaves a sparser level.
fn place_rooms(
    plan: &mut LevelPlan,
    rng: &mut GameRng,
    config: &DungeonConfig,
    target: usize,
    seed_room: Option<Room>,
) {
    if let Some(room) = seed_room
        && plan.contains(&room)
    {
        plan.rooms.push(room);
    }

    let max_x = plan.width() as i32 - 2;
    let max_y = plan.height() as i32 - 2;
    for attempt in 0..target * config.attempts_per_room {
        if plan.rooms.len() >= target {
            break;
        }
        let anchor = Pos { y: rng.range_i32(1, max_y), x: rng.range_i32(1, max_x) };
        let room = Room::new(
            anchor,
            rng.range(config.room_size.min, config.room_size.max),
            rng.range(config.room_size.min, config.room_size.max),
        );
        if !plan.contains(&room) {
            log::trace!("attempt {attempt}: room at {anchor:?} leaves the level");
            continue;
        }
        if plan.rooms.iter().any(|placed| placed.overlaps(&room)) {
            log::trace!("attempt {attempt}: room at {anchor:?} overlaps");
            continue;
        }
        plan.rooms.push(room);
    }

    if plan.rooms.len() < target {
        log::debug!("placed {} of {target} rooms", plan.rooms.len());
    }
}

/// Joins each room to the one placed before it, wrapping the last back to
/// the first, so the rooms form a cycle.
fn carve_corridors(plan: &mut LevelPlan, rng: &mut GameRng) {
    let count = plan.rooms.len();
    if count < 2 {
        return;
    }
    for current in 0..count {
        let previous = (current + count - 1) % count;
        let corridor = Corridor::new(&plan.rooms[previous], &plan.rooms[current], rng.coin());
        if let Some(door) = corridor.start_door {
            plan.rooms[previous].doors.push(door);
        }
        if let Some(door) = corridor.end_door {
            plan.rooms[current].doors.push(door);
        }
        plan.corridors.push(corridor);
    }
}
