//! Error types surfaced by configuration, grid access, and template lookup.

use thiserror::Error;

use crate::types::Pos;

/// Rejected before generation starts; nothing is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be between 1 and i32::MAX, got {value}")]
    InvalidDimension { field: &'static str, value: usize },

    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange { field: &'static str, min: usize, max: usize },

    #[error("room size must be at least {minimum} to hold a floor cell, got {value}")]
    RoomTooSmall { minimum: usize, value: usize },

    #[error("level_count must be at least 1")]
    NoLevels,

    #[error("light decay rate must be a positive finite number, got {0}")]
    InvalidDecay(f64),

    #[error("light intensity must be positive")]
    InvalidIntensity,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    #[error("position ({}, {}) is outside the {width}x{height} level", .pos.x, .pos.y)]
    OutOfRange { pos: Pos, width: usize, height: usize },

    #[error("level has no rooms to start in")]
    NoStartPosition,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("no tile template named '{0}'")]
    UnknownTemplate(String),

    #[error("malformed tile catalog: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Anything that aborts dungeon generation. No partial dungeon is returned.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Error, Debug)]
pub enum DoorError {
    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
