//! The fixed material palette: [`Color`] and [`Material`].

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

// ---------------------------------------------------------------------------
// Material
// ---------------------------------------------------------------------------

/// A named palette material. Each variant carries a fixed colour.
///
/// Brush 0's Color option selects among [`Material::CHOICES`]; `Dirt` is
/// the fixed material of brush 1.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Material {
    AntHell,
    Desert,
    Garden,
    Hell,
    Ocean,
    Sewers,
    Dirt,
}

impl Material {
    /// Every palette material.
    pub const ALL: [Material; 7] = [
        Material::AntHell,
        Material::Desert,
        Material::Garden,
        Material::Hell,
        Material::Ocean,
        Material::Sewers,
        Material::Dirt,
    ];

    /// The materials selectable through brush 0's Color option.
    pub const CHOICES: [Material; 6] = [
        Material::AntHell,
        Material::Desert,
        Material::Garden,
        Material::Hell,
        Material::Ocean,
        Material::Sewers,
    ];

    /// The material's palette colour.
    pub const fn color(self) -> Color {
        match self {
            Material::AntHell => Color::from_rgb(0x8E, 0x60, 0x3F),
            Material::Desert => Color::from_rgb(0xE0, 0xD1, 0xAF),
            Material::Garden => Color::from_rgb(0x1E, 0xA7, 0x61),
            Material::Hell => Color::from_rgb(0x97, 0x33, 0x32),
            Material::Ocean => Color::from_rgb(0x66, 0x86, 0x9E),
            Material::Sewers => Color::from_rgb(0x66, 0x66, 0x33),
            Material::Dirt => Color::from_rgb(0x68, 0x47, 0x2E),
        }
    }

    /// The material's persisted name (camelCase, as in the save format and
    /// the toolbar's select values).
    pub const fn name(self) -> &'static str {
        match self {
            Material::AntHell => "antHell",
            Material::Desert => "desert",
            Material::Garden => "garden",
            Material::Hell => "hell",
            Material::Ocean => "ocean",
            Material::Sewers => "sewers",
            Material::Dirt => "dirt",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognised material names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown material name: {0:?}")]
pub struct UnknownMaterial(pub String);

impl FromStr for Material {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Material::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| UnknownMaterial(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_components() {
        let c = Color::from_rgb(0xAB, 0xCD, 0xEF);
        assert_eq!(c.r(), 0xAB);
        assert_eq!(c.g(), 0xCD);
        assert_eq!(c.b(), 0xEF);
    }

    #[test]
    fn material_colors() {
        assert_eq!(Material::AntHell.color(), Color(0x8E603F));
        assert_eq!(Material::Dirt.color(), Color(0x68472E));
    }

    #[test]
    fn name_round_trip() {
        for m in Material::ALL {
            assert_eq!(m.name().parse::<Material>(), Ok(m));
        }
        assert!("lava".parse::<Material>().is_err());
    }

    #[test]
    fn serde_names_match_toolbar_values() {
        assert_eq!(
            serde_json::to_string(&Material::AntHell).unwrap(),
            "\"antHell\""
        );
        assert_eq!(
            serde_json::from_str::<Material>("\"sewers\"").unwrap(),
            Material::Sewers
        );
    }

    #[test]
    fn dirt_is_not_a_brush_choice() {
        assert!(!Material::CHOICES.contains(&Material::Dirt));
    }
}
