//! Ray-cast lighting with logarithmic falloff.
//!
//! Every light is described by its gradient, the intensity at each chebyshev
//! distance from the source, and by the ring of offsets just past its radius.
//! Rays are cast from the source to each ring offset. A cell takes the value
//! of the first ray that reaches it, and rays stop after the first opaque
//! cell.
//!
//! [`LightingEngine::refresh`] folds every active light on a level into one
//! map and applies only the difference from the last map it applied, so
//! moving a light clears the cells it left and shades the cells it reached.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::color::Color;
use crate::config::{LightConfig, MAX_GRADIENT_LEN};
use crate::entity::LightSource;
use crate::error::LevelError;
use crate::geometry::{ray, squared_distance};
use crate::level::Level;
use crate::render::RenderRequest;
use crate::types::{EntityId, Pos};

/// Share of the light tint blended into a lit cell's background at full intensity.
const BACKGROUND_GLOW: f32 = 0.25;

/// Light reaching one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Illumination {
    pub tint: Color,
    /// Fraction of the source's peak intensity, in `[0, 1]`.
    pub intensity: f32,
}

impl Illumination {
    /// Intensities add up to full brightness; tints mix in proportion to the
    /// intensity each side brings.
    pub fn combine(self, other: Illumination) -> Illumination {
        let total = self.intensity + other.intensity;
        let share = if total > 0.0 { other.intensity / total } else { 0.5 };
        Illumination {
            tint: self.tint.blend(other.tint, share),
            intensity: total.min(1.0),
        }
    }

    /// Foreground and background for a cell whose unlit template colors are
    /// `base_fg` and `base_bg`.
    pub fn shade(self, base_fg: Color, base_bg: Color) -> (Color, Color) {
        let foreground = base_fg.scale(self.intensity).saturating_add(self.tint);
        let background = base_bg.blend(self.tint, self.intensity * BACKGROUND_GLOW);
        (foreground, background)
    }
}

pub type LightMap = BTreeMap<Pos, Illumination>;

/// `intensity[0] = start`, then `intensity[d] = floor(intensity[d-1] / max(1, ln(d * k)))`
/// until a value reaches zero or the gradient hits [`MAX_GRADIENT_LEN`].
pub fn falloff(start: u32, decay_rate: f64) -> Vec<u32> {
    let mut gradient = Vec::new();
    let mut current = start;
    while current > 0 && gradient.len() < MAX_GRADIENT_LEN {
        gradient.push(current);
        let distance = gradient.len() as f64;
        let divisor = (distance * decay_rate).ln().max(1.0);
        current = (f64::from(current) / divisor).floor() as u32;
    }
    gradient
}

/// Offsets outside the radius that touch at least one offset inside it.
pub fn edge_offsets(radius: usize) -> Vec<Pos> {
    let r = radius as i32;
    let limit = i64::from(r) * i64::from(r);
    let origin = Pos::default();
    let inside = |pos: Pos| squared_distance(origin, pos) <= limit;

    let mut edges = Vec::new();
    for y in -(r + 1)..=(r + 1) {
        for x in -(r + 1)..=(r + 1) {
            let pos = Pos { y, x };
            if !inside(pos) && pos.neighbors().into_iter().any(inside) {
                edges.push(pos);
            }
        }
    }
    edges
}

/// Cells reached by one light at `origin`.
pub fn cast_light(light: &LightSource, origin: Pos, level: &Level) -> LightMap {
    let mut lit = LightMap::new();
    let radius = light.radius();
    let Some(&peak) = light.gradient.first() else {
        return lit;
    };
    let limit = (radius * radius) as i64;

    for &offset in light.edges.iter() {
        for (distance, pos) in ray(origin, origin + offset).enumerate() {
            if distance >= radius || squared_distance(origin, pos) > limit {
                break;
            }
            let Ok(tile) = level.get(pos) else {
                break;
            };
            lit.entry(pos).or_insert_with(|| {
                let (base_fg, _) = tile.base_colors();
                let fraction = light.gradient[distance] as f32 / peak as f32;
                Illumination { tint: base_fg.tint(light.color), intensity: fraction.clamp(0.0, 1.0) }
            });
            if tile.opaque {
                break;
            }
        }
    }
    lit
}

/// Owns the gradient and edge caches and remembers what it last applied.
#[derive(Clone, Debug)]
pub struct LightingEngine {
    config: LightConfig,
    gradients: BTreeMap<u32, Arc<[u32]>>,
    edges: BTreeMap<usize, Arc<[Pos]>>,
    applied: LightMap,
}

impl LightingEngine {
    pub fn new(config: &LightConfig) -> Self {
        Self {
            config: config.clone(),
            gradients: BTreeMap::new(),
            edges: BTreeMap::new(),
            applied: LightMap::new(),
        }
    }

    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    /// New falloff parameters invalidate every cached gradient. Lights built
    /// earlier keep the gradient they were built with.
    pub fn retune(&mut self, config: &LightConfig) {
        if self.config.decay_rate != config.decay_rate
            || self.config.max_intensity != config.max_intensity
        {
            self.gradients.clear();
        }
        self.config = config.clone();
    }

    pub fn gradient(&mut self, intensity: u32) -> Arc<[u32]> {
        if let Some(gradient) = self.gradients.get(&intensity) {
            return Arc::clone(gradient);
        }
        let start = intensity.min(self.config.max_intensity);
        let gradient: Arc<[u32]> = falloff(start, self.config.decay_rate).into();
        log::debug!("cached gradient for intensity {intensity}: radius {}", gradient.len());
        self.gradients.insert(intensity, Arc::clone(&gradient));
        gradient
    }

    pub fn edges(&mut self, radius: usize) -> Arc<[Pos]> {
        if let Some(edges) = self.edges.get(&radius) {
            return Arc::clone(edges);
        }
        let edges: Arc<[Pos]> = edge_offsets(radius).into();
        log::debug!("cached {} edge offsets for radius {radius}", edges.len());
        self.edges.insert(radius, Arc::clone(&edges));
        edges
    }

    /// A switched-on light with cached gradient and edges.
    pub fn light(&mut self, color: Color, intensity: u32) -> LightSource {
        let gradient = self.gradient(intensity);
        let edges = self.edges(gradient.len());
        LightSource { color, intensity, gradient, edges, lit: true, debug: false }
    }

    /// The light the player carries, as configured.
    pub fn player_light(&mut self) -> LightSource {
        self.light(self.config.player_color, self.config.player_intensity)
    }

    /// All active lights on the level folded into one map.
    pub fn illuminate(&self, level: &Level) -> LightMap {
        let mut total = LightMap::new();
        for (_, entity) in level.entities() {
            let Some(light) = entity.active_light() else {
                continue;
            };
            for (pos, illumination) in cast_light(light, entity.pos, level) {
                total
                    .entry(pos)
                    .and_modify(|existing| *existing = existing.combine(illumination))
                    .or_insert(illumination);
            }
        }
        total
    }

    /// What this engine last applied.
    pub fn applied(&self) -> &LightMap {
        &self.applied
    }

    /// Recompute every active light and apply the difference. Cells that went
    /// dark get their template colors back; newly or differently lit cells
    /// are shaded and marked explored.
    pub fn refresh(&mut self, level: &mut Level) -> Vec<RenderRequest> {
        let current = self.illuminate(level);
        let mut touched = Vec::new();

        for &pos in self.applied.keys() {
            if current.contains_key(&pos) {
                continue;
            }
            if let Ok(tile) = level.get_mut(pos) {
                tile.clear_light();
                touched.push(pos);
            }
        }
        for (&pos, &illumination) in &current {
            let Ok(tile) = level.get_mut(pos) else {
                continue;
            };
            let (base_fg, base_bg) = tile.base_colors();
            let (foreground, background) = illumination.shade(base_fg, base_bg);
            // Terrain swapped under a light keeps `lit` but not the shaded colors.
            if tile.lit && tile.lit_color == foreground && tile.background_lit_color == background {
                continue;
            }
            tile.apply_light(foreground, background);
            touched.push(pos);
        }

        self.applied = current;
        touched.sort_unstable();
        touched.into_iter().filter_map(|pos| level.render_request(pos).ok()).collect()
    }

    /// Put a light-carrying entity at `to` and relight. Unknown ids change nothing.
    pub fn move_light(
        &mut self,
        level: &mut Level,
        id: EntityId,
        to: Pos,
    ) -> Result<Vec<RenderRequest>, LevelError> {
        level.get(to)?;
        let Some(entity) = level.entity_mut(id) else {
            return Ok(Vec::new());
        };
        entity.pos = to;
        Ok(self.refresh(level))
    }

    /// Switch an entity's light on or off and relight.
    pub fn switch_light(&mut self, level: &mut Level, id: EntityId, on: bool) -> Vec<RenderRequest> {
        let Some(light) = level.entity_mut(id).and_then(|entity| entity.light.as_mut()) else {
            return Vec::new();
        };
        light.lit = on;
        self.refresh(level)
    }
}
