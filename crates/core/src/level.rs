//! One dungeon floor: the tile grid plus the rooms, corridors and entities on it.
//!
//! Construction is two-phase. A [`LevelPlan`] collects rooms and corridors;
//! [`LevelPlan::build`] consumes it and stamps the grid exactly once. After
//! that every access goes straight to the backing grid.

use std::collections::BTreeMap;
use std::fmt;
use std::mem;

use slotmap::SlotMap;

use crate::entity::{Entity, LightSource};
use crate::error::{CatalogError, DoorError, LevelError};
use crate::mapgen::{Corridor, Room};
use crate::render::RenderRequest;
use crate::tile::{Tile, TileCatalog, names};
use crate::types::{Direction, EntityId, EntityKind, Pos};

/// Something that can be tested for being inside a `width x height` level.
pub trait Placement {
    fn fits_within(&self, width: usize, height: usize) -> bool;
}

impl Placement for Pos {
    fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }
}

impl Placement for Room {
    /// Rooms must leave the outermost ring of the level untouched.
    fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x() >= 1 && self.y() >= 1 && (self.x2() as usize) < width && (self.y2() as usize) < height
    }
}

#[derive(Clone, Debug)]
pub struct LevelPlan {
    width: usize,
    height: usize,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
}

impl LevelPlan {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, rooms: Vec::new(), corridors: Vec::new() }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains<T: Placement>(&self, item: &T) -> bool {
        item.fits_within(self.width, self.height)
    }

    /// Walls everywhere, then room cells, then corridor floors.
    pub fn build(self, catalog: &TileCatalog) -> Result<Level, CatalogError> {
        let wall = catalog.get(names::WALL)?;
        let floor = catalog.get(names::FLOOR)?;
        let mut grid = vec![wall.clone(); self.width * self.height];

        let stamps = self
            .rooms
            .iter()
            .flat_map(|room| room.cells())
            .chain(self.corridors.iter().flat_map(|corridor| corridor.cells()));
        for (pos, name) in stamps {
            if !pos.fits_within(self.width, self.height) {
                continue;
            }
            let tile = if name == names::FLOOR { floor.clone() } else { wall.clone() };
            grid[(pos.y as usize) * self.width + (pos.x as usize)] = tile;
        }

        let start = self.rooms.first().map(Room::center);
        Ok(Level {
            width: self.width,
            height: self.height,
            grid,
            rooms: self.rooms,
            corridors: self.corridors,
            entities: SlotMap::with_key(),
            open_positions: Vec::new(),
            start,
            player: None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
}

#[derive(Clone, Debug)]
pub struct Level {
    width: usize,
    height: usize,
    grid: Vec<Tile>,
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
    entities: SlotMap<EntityId, Entity>,
    open_positions: Vec<Pos>,
    start: Option<Pos>,
    player: Option<EntityId>,
}

impl Level {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains<T: Placement>(&self, item: &T) -> bool {
        item.fits_within(self.width, self.height)
    }

    fn index(&self, pos: Pos) -> Result<usize, LevelError> {
        if !self.contains(&pos) {
            return Err(LevelError::OutOfRange { pos, width: self.width, height: self.height });
        }
        Ok((pos.y as usize) * self.width + (pos.x as usize))
    }

    pub fn get(&self, pos: Pos) -> Result<&Tile, LevelError> {
        let idx = self.index(pos)?;
        Ok(&self.grid[idx])
    }

    pub fn get_mut(&mut self, pos: Pos) -> Result<&mut Tile, LevelError> {
        let idx = self.index(pos)?;
        Ok(&mut self.grid[idx])
    }

    /// Replace a cell, returning the previous tile.
    pub fn set(&mut self, pos: Pos, tile: Tile) -> Result<Tile, LevelError> {
        let idx = self.index(pos)?;
        Ok(mem::replace(&mut self.grid[idx], tile))
    }

    /// Every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Tile)> + '_ {
        self.grid.iter().enumerate().map(|(idx, tile)| {
            let pos = Pos { y: (idx / self.width) as i32, x: (idx % self.width) as i32 };
            (pos, tile)
        })
    }

    /// Outer ring of the level, each cell once.
    pub fn perimeter(&self) -> Vec<Pos> {
        let (w, h) = (self.width as i32, self.height as i32);
        let mut edges = Vec::with_capacity(2 * (self.width + self.height));
        for x in 0..w {
            edges.push(Pos { y: 0, x });
            if h > 1 {
                edges.push(Pos { y: h - 1, x });
            }
        }
        for y in 1..(h - 1).max(1) {
            edges.push(Pos { y, x: 0 });
            if w > 1 {
                edges.push(Pos { y, x: w - 1 });
            }
        }
        edges
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    /// Center of the first room: where the player arrives.
    pub fn start_position(&self) -> Option<Pos> {
        self.start
    }

    /// Walkable floor that holds no door, entity, or start marker.
    pub fn open_positions(&self) -> &[Pos] {
        &self.open_positions
    }

    pub(crate) fn set_open_positions(&mut self, mut positions: Vec<Pos>) {
        positions.sort_unstable();
        self.open_positions = positions;
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.get(pos).is_ok_and(|tile| tile.walkable)
    }

    pub fn is_opaque(&self, pos: Pos) -> bool {
        self.get(pos).map_or(true, |tile| tile.opaque)
    }

    // ---------------------------------------------------------------------
    // Entities
    // ---------------------------------------------------------------------

    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let pos = entity.pos;
        self.open_positions.retain(|&open| open != pos);
        self.entities.insert(entity)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities.iter()
    }

    /// Top-most entity on a cell: players over mobs over items over lights.
    pub fn entity_at(&self, pos: Pos) -> Option<(EntityId, &Entity)> {
        self.entities.iter().filter(|(_, entity)| entity.pos == pos).min_by_key(|(_, e)| e.kind)
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn spawn_player(
        &mut self,
        tile: Tile,
        light: Option<LightSource>,
    ) -> Result<EntityId, LevelError> {
        let pos = self.start.ok_or(LevelError::NoStartPosition)?;
        let mut player = Entity::new(names::PLAYER, EntityKind::Player, pos, tile);
        player.light = light;
        let id = self.add_entity(player);
        self.player = Some(id);
        Ok(id)
    }

    /// Step an entity one cell. Blocked, out-of-range, and unknown moves return `None`.
    pub fn move_entity(&mut self, id: EntityId, direction: Direction) -> Option<Move> {
        let from = self.entities.get(id)?.pos;
        let to = from + direction;
        if !self.is_walkable(to) {
            return None;
        }
        self.entities.get_mut(id)?.pos = to;
        Some(Move { from, to })
    }

    // ---------------------------------------------------------------------
    // Doors
    // ---------------------------------------------------------------------

    /// Closed door becomes an open door. `Ok(false)` if there is no closed door here.
    pub fn open_door(&mut self, pos: Pos, catalog: &TileCatalog) -> Result<bool, DoorError> {
        self.swap_door(pos, names::CLOSED_DOOR, names::OPEN_DOOR, catalog)
    }

    /// Hidden door becomes a visible closed door.
    pub fn reveal_hidden_door(
        &mut self,
        pos: Pos,
        catalog: &TileCatalog,
    ) -> Result<bool, DoorError> {
        self.swap_door(pos, names::HIDDEN_DOOR, names::CLOSED_DOOR, catalog)
    }

    fn swap_door(
        &mut self,
        pos: Pos,
        from: &str,
        to: &str,
        catalog: &TileCatalog,
    ) -> Result<bool, DoorError> {
        if !self.get(pos)?.is(from) {
            return Ok(false);
        }
        let replacement = catalog.get(to)?;
        self.get_mut(pos)?.replace_terrain(replacement);
        Ok(true)
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    /// What the renderer should draw for a cell. Visible entities are overlaid
    /// without touching the terrain tile.
    pub fn render_request(&self, pos: Pos) -> Result<RenderRequest, LevelError> {
        let tile = self.get(pos)?;
        let mut request = RenderRequest {
            pos,
            glyph: tile.glyph(),
            foreground: tile.foreground(),
            background: tile.background(),
        };
        if tile.visible
            && let Some((_, entity)) = self.entity_at(pos)
        {
            request.glyph = entity.tile.character;
            request.foreground =
                if tile.lit { entity.tile.lit_color } else { entity.tile.unlit_color };
        }
        Ok(request)
    }

    pub fn render_all(&self) -> Vec<RenderRequest> {
        self.iter().filter_map(|(pos, _)| self.render_request(pos).ok()).collect()
    }

    /// Stable byte encoding of terrain, flags, rooms and entities.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.grid {
            bytes.extend(tile.name.as_bytes());
            bytes.push(0);
            let flags = [tile.lit, tile.visible, tile.explored, tile.walkable, tile.opaque]
                .iter()
                .enumerate()
                .fold(0_u8, |acc, (bit, &set)| acc | (u8::from(set) << bit));
            bytes.push(flags);
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.position.x.to_le_bytes());
            bytes.extend(room.position.y.to_le_bytes());
            bytes.extend((room.width as u32).to_le_bytes());
            bytes.extend((room.height as u32).to_le_bytes());
        }

        let mut entities: Vec<&Entity> = self.entities.values().collect();
        entities.sort_by(|a, b| (a.pos, a.kind, &a.name).cmp(&(b.pos, b.kind, &b.name)));
        bytes.extend((entities.len() as u32).to_le_bytes());
        for entity in entities {
            bytes.push(entity.kind as u8);
            bytes.extend(entity.pos.x.to_le_bytes());
            bytes.extend(entity.pos.y.to_le_bytes());
            bytes.extend(entity.name.as_bytes());
            bytes.push(0);
        }
        bytes
    }
}

/// Plain glyph dump, entities overlaid, exploration ignored.
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut overlay: BTreeMap<Pos, &Entity> = BTreeMap::new();
        for entity in self.entities.values() {
            overlay
                .entry(entity.pos)
                .and_modify(|top| {
                    if entity.kind < top.kind {
                        *top = entity;
                    }
                })
                .or_insert(entity);
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos { y: y as i32, x: x as i32 };
                let glyph = match overlay.get(&pos) {
                    Some(entity) => entity.tile.character,
                    None => self.grid[y * self.width + x].character,
                };
                write!(f, "{glyph}")?;
            }
            if y + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
