//! Opaque RGB color with the blend/tint arithmetic used by lighting.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREY: Color = Color::rgb(159, 159, 159);
    pub const DARK_GREY: Color = Color::rgb(95, 95, 95);
    pub const SEPIA: Color = Color::rgb(127, 101, 63);
    pub const DARKER_SEPIA: Color = Color::rgb(63, 50, 31);
    pub const LIGHTER_SEPIA: Color = Color::rgb(191, 171, 143);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const DARK_YELLOW: Color = Color::rgb(191, 191, 0);
    pub const AMBER: Color = Color::rgb(255, 191, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const DARK_RED: Color = Color::rgb(191, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const DARK_GREEN: Color = Color::rgb(0, 191, 0);
    pub const AZURE: Color = Color::rgb(0, 127, 255);
    pub const DARK_AZURE: Color = Color::rgb(0, 95, 191);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise multiply, as if `light` shone on `self`.
    pub fn tint(self, light: Color) -> Color {
        let mul = |a: u8, b: u8| ((u16::from(a) * u16::from(b)) / 255) as u8;
        Color { r: mul(self.r, light.r), g: mul(self.g, light.g), b: mul(self.b, light.b) }
    }

    /// Linear interpolation toward `other`; `amount` is clamped to `[0, 1]`.
    pub fn blend(self, other: Color, amount: f32) -> Color {
        let t = amount.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| {
            (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round().clamp(0.0, 255.0) as u8
        };
        Color { r: lerp(self.r, other.r), g: lerp(self.g, other.g), b: lerp(self.b, other.b) }
    }

    pub fn scale(self, factor: f32) -> Color {
        let f = factor.max(0.0);
        let mul = |a: u8| (f32::from(a) * f).round().clamp(0.0, 255.0) as u8;
        Color { r: mul(self.r), g: mul(self.g), b: mul(self.b) }
    }

    pub fn saturating_add(self, other: Color) -> Color {
        Color {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
        }
    }

    pub fn hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_with_white_is_identity_and_black_extinguishes() {
        assert_eq!(Color::SEPIA.tint(Color::WHITE), Color::SEPIA);
        assert_eq!(Color::SEPIA.tint(Color::BLACK), Color::BLACK);
    }

    #[test]
    fn blend_endpoints_and_clamping() {
        assert_eq!(Color::BLACK.blend(Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.blend(Color::WHITE, 1.0), Color::WHITE);
        assert_eq!(Color::BLACK.blend(Color::WHITE, 7.5), Color::WHITE);
        assert_eq!(Color::BLACK.blend(Color::rgb(200, 100, 0), 0.5), Color::rgb(100, 50, 0));
    }

    #[test]
    fn saturating_add_caps_channels() {
        let sum = Color::rgb(200, 10, 0).saturating_add(Color::rgb(100, 10, 0));
        assert_eq!(sum, Color::rgb(255, 20, 0));
        assert_eq!(Color::rgb(255, 0, 16).hex(), "ff0010");
    }
}
