//! Generation and lighting parameters, validated before any work starts.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;

/// Smallest room that still has an interior floor cell inside its wall ring.
pub const MIN_ROOM_SIZE: usize = 3;
pub const MAX_GRADIENT_LEN: usize = 200;
/// Grid coordinates are `i32`, so no extent may exceed it.
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// Inclusive `min..=max` range that survives a TOML/JSON round trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: usize,
    pub max: usize,
}

impl SizeRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub const fn exactly(value: usize) -> Self {
        Self { min: value, max: value }
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange { field, min: self.min, max: self.max });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// `k` in `intensity[d] = intensity[d-1] / max(1, ln(d * k))`.
    pub decay_rate: f64,
    pub max_intensity: u32,
    pub player_intensity: u32,
    pub player_color: Color,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            decay_rate: 10.0,
            max_intensity: 255,
            player_intensity: 255,
            player_color: Color::GREY,
        }
    }
}

impl LightConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.decay_rate.is_finite() || self.decay_rate <= 0.0 {
            return Err(ConfigError::InvalidDecay(self.decay_rate));
        }
        if self.max_intensity == 0 {
            return Err(ConfigError::InvalidIntensity);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub seed: u64,
    pub level_count: usize,
    pub width: SizeRange,
    pub height: SizeRange,
    pub room_count: SizeRange,
    pub room_size: SizeRange,
    /// Placement attempts per requested room.
    pub attempts_per_room: usize,
    pub min_mobs: usize,
    pub min_items: usize,
    /// Percent of doors generated hidden rather than closed.
    pub hidden_door_chance: u8,
    pub light: LightConfig,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            level_count: 1,
            width: SizeRange::new(50, 80),
            height: SizeRange::new(50, 80),
            room_count: SizeRange::new(8, 10),
            room_size: SizeRange::new(7, 12),
            attempts_per_room: 5,
            min_mobs: 3,
            min_items: 1,
            hidden_door_chance: 50,
            light: LightConfig::default(),
        }
    }
}

impl DungeonConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level_count == 0 {
            return Err(ConfigError::NoLevels);
        }
        for (field, range) in [("width", self.width), ("height", self.height)] {
            range.check(field)?;
            if range.min == 0 {
                return Err(ConfigError::InvalidDimension { field, value: range.min });
            }
        }
        self.room_count.check("room_count")?;
        self.room_size.check("room_size")?;
        for (field, range) in
            [("width", self.width), ("height", self.height), ("room_size", self.room_size)]
        {
            if range.max > MAX_DIMENSION {
                return Err(ConfigError::InvalidDimension { field, value: range.max });
            }
        }
        if self.room_size.min < MIN_ROOM_SIZE {
            return Err(ConfigError::RoomTooSmall {
                minimum: MIN_ROOM_SIZE,
                value: self.room_size.min,
            });
        }
        if self.attempts_per_room == 0 {
            return Err(ConfigError::InvalidDimension { field: "attempts_per_room", value: 0 });
        }
        self.light.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(DungeonConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_width_fails_fast() {
        let config = DungeonConfig { width: SizeRange::new(0, 10), ..DungeonConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDimension { field: "width", value: 0 })
        );
    }

    #[test]
    fn dimensions_past_i32_are_rejected() {
        let too_wide = MAX_DIMENSION + 1;
        let config =
            DungeonConfig { width: SizeRange::new(50, too_wide), ..DungeonConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDimension { field: "width", value: too_wide })
        );

        let config = DungeonConfig {
            room_size: SizeRange::new(7, too_wide),
            ..DungeonConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDimension { field: "room_size", value: too_wide })
        );

        let config =
            DungeonConfig { height: SizeRange::exactly(MAX_DIMENSION), ..DungeonConfig::default() };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn inverted_room_count_fails_fast() {
        let config =
            DungeonConfig { room_count: SizeRange::new(10, 2), ..DungeonConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange { field: "room_count", min: 10, max: 2 })
        );
    }

    #[test]
    fn light_rejects_non_positive_decay() {
        let mut config = DungeonConfig::default();
        config.light.decay_rate = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidDecay(0.0)));
        config.light.decay_rate = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DungeonConfig =
            serde_json::from_str(r#"{ "seed": 42, "room_count": { "min": 8, "max": 8 } }"#)
                .expect("valid config json");
        assert_eq!(config.seed, 42);
        assert_eq!(config.room_count, SizeRange::exactly(8));
        assert_eq!(config.room_size, SizeRange::new(7, 12));
        assert_eq!(config.light, LightConfig::default());
    }
}
