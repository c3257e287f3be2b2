pub mod color;
pub mod config;
pub mod entity;
pub mod error;
pub mod fov;
pub mod geometry;
pub mod level;
pub mod lighting;
pub mod mapgen;
pub mod render;
pub mod rng;
pub mod tile;
pub mod types;

#[cfg(test)]
mod test_support;

pub use color::Color;
pub use config::{DungeonConfig, LightConfig, SizeRange};
pub use entity::{Entity, LightSource};
pub use error::{CatalogError, ConfigError, DoorError, GenerationError, LevelError};
pub use fov::{Viewshed, compute_visible, handle_view};
pub use level::{Level, LevelPlan, Move};
pub use lighting::{Illumination, LightMap, LightingEngine};
pub use mapgen::{Corridor, Dungeon, DungeonGenerator, Room, generate_dungeon};
pub use render::{RenderRequest, RenderTarget};
pub use rng::GameRng;
pub use tile::{Tile, TileCatalog};
pub use types::*;
