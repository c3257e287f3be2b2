//! Settings file handling for the CLI: a TOML file with an optional
//! `[dungeon]` table and an optional tile catalog path.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use delve::{DungeonConfig, SizeRange, TileCatalog};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dungeon: DungeonConfig,
    /// JSON tile catalog layered over the built-in templates.
    pub catalog: Option<PathBuf>,
}

/// Command-line values that win over the settings file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub levels: Option<usize>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub rooms: Option<usize>,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    pub fn apply(&mut self, overrides: Overrides) {
        let dungeon = &mut self.dungeon;
        if let Some(seed) = overrides.seed {
            dungeon.seed = seed;
        }
        if let Some(levels) = overrides.levels {
            dungeon.level_count = levels;
        }
        if let Some(width) = overrides.width {
            dungeon.width = SizeRange::exactly(width);
        }
        if let Some(height) = overrides.height {
            dungeon.height = SizeRange::exactly(height);
        }
        if let Some(rooms) = overrides.rooms {
            dungeon.room_count = SizeRange::exactly(rooms);
        }
    }

    pub fn catalog(&self) -> Result<TileCatalog> {
        let Some(path) = &self.catalog else {
            return Ok(TileCatalog::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tile catalog: {}", path.display()))?;
        TileCatalog::from_json(&json)
            .with_context(|| format!("Failed to load tile catalog: {}", path.display()))
    }
}
