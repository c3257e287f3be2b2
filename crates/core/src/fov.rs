//! Field of view by casting rays from the viewer to every cell on the level
//! perimeter. A cell is seen when it is lit and no opaque cell precedes it on
//! the ray that reaches it.
//!
//! Lighting must be refreshed before visibility: the viewer only sees what is lit.

use std::collections::BTreeSet;

use crate::geometry::ray;
use crate::level::Level;
use crate::render::RenderRequest;
use crate::types::Pos;

pub fn compute_visible(level: &Level, viewer: Pos) -> BTreeSet<Pos> {
    let mut visible = BTreeSet::new();
    if !level.contains(&viewer) {
        return visible;
    }
    for edge in level.perimeter() {
        for pos in ray(viewer, edge) {
            let Ok(tile) = level.get(pos) else {
                break;
            };
            if tile.lit {
                visible.insert(pos);
            }
            if tile.opaque {
                break;
            }
        }
    }
    visible
}

/// Viewer moved from `old` to `new`. Cells that dropped out of view lose
/// `visible`; newly seen cells gain `visible` and `explored`. Returns a
/// render request for every cell whose state changed.
pub fn handle_view(level: &mut Level, old: Option<Pos>, new: Pos) -> Vec<RenderRequest> {
    let previous = old.map(|pos| compute_visible(level, pos)).unwrap_or_default();
    let current = compute_visible(level, new);
    apply_view(level, &previous, &current)
}

fn apply_view(
    level: &mut Level,
    previous: &BTreeSet<Pos>,
    current: &BTreeSet<Pos>,
) -> Vec<RenderRequest> {
    let mut touched = Vec::new();
    for &pos in previous.difference(current) {
        if let Ok(tile) = level.get_mut(pos) {
            tile.visible = false;
            touched.push(pos);
        }
    }
    for &pos in current {
        if let Ok(tile) = level.get_mut(pos) {
            let changed = !tile.visible || !tile.explored;
            tile.visible = true;
            tile.explored = true;
            if changed || !previous.contains(&pos) {
                touched.push(pos);
            }
        }
    }
    touched.sort_unstable();
    touched.dedup();
    touched.into_iter().filter_map(|pos| level.render_request(pos).ok()).collect()
}

/// What one viewer saw last time it looked. Diffing against the remembered
/// set rather than recomputing the old view clears cells that were visible
/// under lighting that has since changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Viewshed {
    origin: Option<Pos>,
    visible: BTreeSet<Pos>,
}

impl Viewshed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(&self) -> Option<Pos> {
        self.origin
    }

    pub fn visible(&self) -> &BTreeSet<Pos> {
        &self.visible
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.visible.contains(&pos)
    }

    pub fn update(&mut self, level: &mut Level, viewer: Pos) -> Vec<RenderRequest> {
        let current = compute_visible(level, viewer);
        let requests = apply_view(level, &self.visible, &current);
        self.origin = Some(viewer);
        self.visible = current;
        requests
    }
}
