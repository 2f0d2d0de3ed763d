//! Typed point annotations carried by a map.

use crate::geom::Point;

/// A point annotation on the map.
///
/// Declared by the save format but not yet consumed by any operation, so no
/// placement or uniqueness rules apply; only the variant tags and the
/// centre position are defined.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MapFeature {
    Spawnpoint { center: Point },
    MobSpawner { center: Point },
}

impl MapFeature {
    /// The annotation's centre cell.
    pub fn center(self) -> Point {
        match self {
            MapFeature::Spawnpoint { center } | MapFeature::MobSpawner { center } => center,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_encoding() {
        let f = MapFeature::MobSpawner {
            center: Point::new(4, 2),
        };
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, r#"{"type":"mob-spawner","center":{"x":4,"y":2}}"#);
        assert_eq!(serde_json::from_str::<MapFeature>(&json).unwrap(), f);
    }
}
