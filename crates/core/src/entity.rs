//! The entity shape generation and lighting work with.

use std::sync::Arc;

use crate::color::Color;
use crate::tile::Tile;
use crate::types::{EntityKind, Pos};

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,
    pub pos: Pos,
    pub tile: Tile,
    pub light: Option<LightSource>,
}

impl Entity {
    pub fn new(name: impl Into<String>, kind: EntityKind, pos: Pos, tile: Tile) -> Self {
        Self { name: name.into(), kind, pos, tile, light: None }
    }

    pub fn with_light(mut self, light: LightSource) -> Self {
        self.light = Some(light);
        self
    }

    pub fn active_light(&self) -> Option<&LightSource> {
        self.light.as_ref().filter(|light| light.is_active())
    }
}

/// Light carried by an entity. Build through
/// [`LightingEngine::light`](crate::lighting::LightingEngine::light) so the
/// gradient and edge offsets come from the engine's caches.
#[derive(Clone, Debug, PartialEq)]
pub struct LightSource {
    pub color: Color,
    pub intensity: u32,
    /// Intensity by distance from the source; its length is the radius.
    pub gradient: Arc<[u32]>,
    /// Ray targets, relative to the source, just past the radius.
    pub edges: Arc<[Pos]>,
    pub lit: bool,
    /// Always cast, even when switched off.
    pub debug: bool,
}

impl LightSource {
    pub fn radius(&self) -> usize {
        self.gradient.len()
    }

    pub fn is_active(&self) -> bool {
        self.lit || self.debug
    }
}
