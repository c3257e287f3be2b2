//! Tile values and the named template catalog they are copied from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::CatalogError;

pub mod names {
    pub const EMPTY: &str = "empty";
    pub const FLOOR: &str = "floor";
    pub const WALL: &str = "wall";
    pub const OPEN_DOOR: &str = "open door";
    pub const CLOSED_DOOR: &str = "closed door";
    pub const HIDDEN_DOOR: &str = "hidden door";
    pub const PLAYER: &str = "player";
    pub const TORCH: &str = "torch";
}

/// Contents of one grid cell. Every placement is an owned copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub name: String,
    pub character: char,
    pub lit_color: Color,
    pub unlit_color: Color,
    pub background_lit_color: Color,
    pub background_unlit_color: Color,
    pub lit: bool,
    pub visible: bool,
    pub walkable: bool,
    pub opaque: bool,
    pub explored: bool,
    pub destructable: bool,
    pub flyable: bool,
    base_lit_color: Color,
    base_background_lit_color: Color,
}

impl Tile {
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn is_door(&self) -> bool {
        self.is(names::CLOSED_DOOR) || self.is(names::HIDDEN_DOOR) || self.is(names::OPEN_DOOR)
    }

    pub fn transparent(&self) -> bool {
        !self.opaque
    }

    /// Displayed character: blank until the cell has been seen.
    pub fn glyph(&self) -> char {
        if self.explored || self.visible { self.character } else { ' ' }
    }

    pub fn foreground(&self) -> Color {
        if self.lit && self.visible {
            self.lit_color
        } else if self.explored || self.visible {
            self.unlit_color
        } else {
            Color::BLACK
        }
    }

    pub fn background(&self) -> Color {
        if self.lit && self.visible {
            self.background_lit_color
        } else if self.explored || self.visible {
            self.background_unlit_color
        } else {
            Color::BLACK
        }
    }

    /// Colors the template was created with, before any lighting.
    pub fn base_colors(&self) -> (Color, Color) {
        (self.base_lit_color, self.base_background_lit_color)
    }

    pub(crate) fn apply_light(&mut self, foreground: Color, background: Color) {
        self.lit = true;
        self.explored = true;
        self.lit_color = foreground;
        self.background_lit_color = background;
    }

    pub(crate) fn clear_light(&mut self) {
        self.lit = false;
        self.lit_color = self.base_lit_color;
        self.background_lit_color = self.base_background_lit_color;
    }

    /// Swap terrain for another template while keeping what the player knows about the cell.
    pub(crate) fn replace_terrain(&mut self, mut replacement: Tile) {
        replacement.lit = self.lit;
        replacement.visible = self.visible;
        replacement.explored = self.explored;
        *self = replacement;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Terrain,
    Player,
    Mob,
    Item,
    Light,
}

/// Immutable description a [`Tile`] is stamped from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileTemplate {
    #[serde(default)]
    pub kind: TemplateKind,
    pub character: char,
    #[serde(default = "default_lit_color")]
    pub lit_color: Color,
    #[serde(default = "default_unlit_color")]
    pub unlit_color: Color,
    #[serde(default)]
    pub background_lit_color: Color,
    #[serde(default)]
    pub background_unlit_color: Color,
    #[serde(default)]
    pub walkable: bool,
    #[serde(default)]
    pub opaque: bool,
    #[serde(default)]
    pub explored: bool,
    #[serde(default)]
    pub destructable: bool,
    #[serde(default)]
    pub flyable: bool,
}

fn default_lit_color() -> Color {
    Color::GREY
}

fn default_unlit_color() -> Color {
    Color::DARK_GREY
}

impl TileTemplate {
    fn terrain(character: char, lit: Color, unlit: Color) -> Self {
        Self {
            kind: TemplateKind::Terrain,
            character,
            lit_color: lit,
            unlit_color: unlit,
            background_lit_color: Color::BLACK,
            background_unlit_color: Color::BLACK,
            walkable: false,
            opaque: false,
            explored: false,
            destructable: false,
            flyable: false,
        }
    }

    fn actor(kind: TemplateKind, character: char, lit: Color, unlit: Color) -> Self {
        Self { kind, opaque: false, ..Self::terrain(character, lit, unlit) }
    }

    fn walkable(mut self) -> Self {
        self.walkable = true;
        self.flyable = true;
        self
    }

    fn opaque(mut self) -> Self {
        self.opaque = true;
        self
    }

    fn destructable(mut self) -> Self {
        self.destructable = true;
        self
    }

    pub fn instantiate(&self, name: &str) -> Tile {
        Tile {
            name: name.to_owned(),
            character: self.character,
            lit_color: self.lit_color,
            unlit_color: self.unlit_color,
            background_lit_color: self.background_lit_color,
            background_unlit_color: self.background_unlit_color,
            lit: false,
            visible: false,
            walkable: self.walkable,
            opaque: self.opaque,
            explored: self.explored,
            destructable: self.destructable,
            flyable: self.flyable,
            base_lit_color: self.lit_color,
            base_background_lit_color: self.background_lit_color,
        }
    }
}

/// Name-to-template mapping. Lookups always hand out fresh copies.
#[derive(Clone, Debug, PartialEq)]
pub struct TileCatalog {
    templates: BTreeMap<String, TileTemplate>,
}

impl TileCatalog {
    pub fn build_default() -> Self {
        let mut templates = BTreeMap::new();
        let mut add = |name: &str, template: TileTemplate| {
            templates.insert(name.to_owned(), template);
        };

        add(names::EMPTY, TileTemplate::terrain(' ', Color::GREY, Color::DARK_GREY));
        add(
            names::FLOOR,
            TileTemplate::terrain('.', Color::SEPIA, Color::DARKER_SEPIA).walkable(),
        );
        add(
            names::WALL,
            TileTemplate::terrain('#', Color::SEPIA, Color::DARKER_SEPIA).opaque().destructable(),
        );
        add(
            names::OPEN_DOOR,
            TileTemplate::terrain('-', Color::LIGHTER_SEPIA, Color::SEPIA).walkable(),
        );
        add(
            names::CLOSED_DOOR,
            TileTemplate::terrain('+', Color::LIGHTER_SEPIA, Color::SEPIA).opaque().destructable(),
        );
        add(
            names::HIDDEN_DOOR,
            TileTemplate::terrain('#', Color::SEPIA, Color::DARKER_SEPIA).opaque().destructable(),
        );

        add(
            names::PLAYER,
            TileTemplate {
                explored: true,
                ..TileTemplate::actor(TemplateKind::Player, '@', Color::YELLOW, Color::DARK_YELLOW)
            },
        );
        add(
            names::TORCH,
            TileTemplate::actor(TemplateKind::Light, '*', Color::AMBER, Color::DARK_YELLOW),
        );

        add("rat", TileTemplate::actor(TemplateKind::Mob, 'r', Color::GREY, Color::DARK_GREY));
        add(
            "goblin",
            TileTemplate::actor(TemplateKind::Mob, 'g', Color::GREEN, Color::DARK_GREEN),
        );
        add("orc", TileTemplate::actor(TemplateKind::Mob, 'o', Color::RED, Color::DARK_RED));

        add(
            "potion",
            TileTemplate::actor(TemplateKind::Item, '!', Color::AZURE, Color::DARK_AZURE),
        );
        add(
            "scroll",
            TileTemplate::actor(TemplateKind::Item, '?', Color::WHITE, Color::GREY),
        );
        add("gold", TileTemplate::actor(TemplateKind::Item, '$', Color::YELLOW, Color::DARK_YELLOW));

        Self { templates }
    }

    /// Parse a JSON object of `name -> template`, layered over the defaults.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let overrides: BTreeMap<String, TileTemplate> = serde_json::from_str(json)?;
        let mut catalog = Self::build_default();
        catalog.templates.extend(overrides);
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Result<Tile, CatalogError> {
        self.templates
            .get(name)
            .map(|template| template.instantiate(name))
            .ok_or_else(|| CatalogError::UnknownTemplate(name.to_owned()))
    }

    pub fn names_of_kind(&self, kind: TemplateKind) -> Vec<&str> {
        self.templates
            .iter()
            .filter(|(_, template)| template.kind == kind)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn mob_names(&self) -> Vec<&str> {
        self.names_of_kind(TemplateKind::Mob)
    }

    pub fn item_names(&self) -> Vec<&str> {
        self.names_of_kind(TemplateKind::Item)
    }
}

impl Default for TileCatalog {
    fn default() -> Self {
        Self::build_default()
    }
}
