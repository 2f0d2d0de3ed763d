//! The persisted save format: gzip-compressed, base64-encoded cell data.
//!
//! Saving encodes the cell buffer as a JSON integer array, compresses it
//! and immediately verifies the round trip before handing the blob out —
//! a corrupted save must fail at save time, not at load time.

use std::io::{Read, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use thiserror::Error;

use crate::feature::MapFeature;
use crate::map::{LayerIndex, TileMap};

/// Errors raised by [`save`] and [`load`].
#[derive(Debug, Error)]
pub enum SaveError {
    /// The compressed data did not decompress back to its source encoding.
    #[error("compressed data failed round-trip verification")]
    Integrity,
    /// The cell buffer could not be encoded.
    #[error("cell encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
    /// The save blob is not valid base64.
    #[error("invalid base64 data: {0}")]
    Decode(#[from] base64::DecodeError),
    /// The gzip stream could not be read or written.
    #[error("compressed data stream error: {0}")]
    Stream(#[from] std::io::Error),
    /// The decompressed text is not a valid cell array.
    #[error("invalid cell data: {0}")]
    Parse(#[source] serde_json::Error),
    /// The cell count does not match the declared dimensions.
    #[error("expected {expected} cells for a {width}x{height} map, found {found}")]
    CellCount {
        width: i32,
        height: i32,
        expected: usize,
        found: usize,
    },
    /// The declared dimensions are not positive.
    #[error("invalid map dimensions {width}x{height}")]
    Dimensions { width: i32, height: i32 },
}

// ---------------------------------------------------------------------------
// SaveData
// ---------------------------------------------------------------------------

/// The persisted form of a map.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub width: i32,
    pub height: i32,
    /// Base64 text of the gzip-compressed cell encoding.
    pub data: String,
    /// Compressed-to-original length ratio. Informational only.
    pub compression_rate: f64,
    pub features: Vec<MapFeature>,
}

// ---------------------------------------------------------------------------
// save / load
// ---------------------------------------------------------------------------

/// Serialize a map into its persisted form.
///
/// The produced blob is decompressed again and compared with the source
/// encoding; a mismatch fails with [`SaveError::Integrity`].
pub fn save(map: &TileMap) -> Result<SaveData, SaveError> {
    let encoded = serde_json::to_string(map.cells()).map_err(SaveError::Encode)?;
    let data = compress(&encoded)?;

    if decompress(&data)? != encoded {
        return Err(SaveError::Integrity);
    }

    let compression_rate = data.len() as f64 / encoded.len() as f64;
    log::debug!(
        "saved {}x{} map, compression rate {:.3}",
        map.width(),
        map.height(),
        compression_rate
    );

    Ok(SaveData {
        width: map.width(),
        height: map.height(),
        data,
        compression_rate,
        features: map.features.clone(),
    })
}

/// Rebuild a map from its persisted form: decode, decompress, parse the
/// cell array, and validate that it matches the declared dimensions.
pub fn load(save: &SaveData) -> Result<TileMap, SaveError> {
    if save.width <= 0 || save.height <= 0 {
        return Err(SaveError::Dimensions {
            width: save.width,
            height: save.height,
        });
    }

    let encoded = decompress(&save.data)?;
    let cells: Vec<LayerIndex> = serde_json::from_str(&encoded).map_err(SaveError::Parse)?;

    let expected = (save.width * save.height) as usize;
    if cells.len() != expected {
        return Err(SaveError::CellCount {
            width: save.width,
            height: save.height,
            expected,
            found: cells.len(),
        });
    }

    let mut map = TileMap::from_parts(save.width, save.height, cells);
    map.features = save.features.clone();
    Ok(map)
}

fn compress(text: &str) -> Result<String, SaveError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    Ok(BASE64.encode(encoder.finish()?))
}

fn decompress(data: &str) -> Result<String, SaveError> {
    let bytes = BASE64.decode(data)?;
    let mut text = String::new();
    GzDecoder::new(bytes.as_slice()).read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    #[test]
    fn round_trip_preserves_cells() {
        let mut map = TileMap::new(6, 4);
        map.set(0, 0, 1).unwrap();
        map.set(5, 3, 1).unwrap();
        map.set(2, 2, 1).unwrap();

        let data = save(&map).unwrap();
        assert_eq!(data.width, 6);
        assert_eq!(data.height, 4);
        assert!(data.compression_rate > 0.0);

        let restored = load(&data).unwrap();
        assert_eq!(restored, map);
    }

    #[test]
    fn round_trip_preserves_features() {
        let mut map = TileMap::new(3, 3);
        map.features.push(MapFeature::Spawnpoint {
            center: Point::new(1, 1),
        });
        let restored = load(&save(&map).unwrap()).unwrap();
        assert_eq!(restored.features, map.features);
    }

    #[test]
    fn save_format_field_names() {
        let map = TileMap::new(2, 2);
        let json = serde_json::to_string(&save(&map).unwrap()).unwrap();
        assert!(json.contains("\"width\":2"));
        assert!(json.contains("\"compressionRate\":"));
        assert!(json.contains("\"features\":[]"));
    }

    #[test]
    fn load_rejects_tampered_data() {
        let map = TileMap::new(3, 3);
        let mut data = save(&map).unwrap();
        data.data = "not base64!!".to_string();
        assert!(matches!(load(&data), Err(SaveError::Decode(_))));
    }

    #[test]
    fn load_rejects_wrong_cell_count() {
        let map = TileMap::new(3, 3);
        let mut data = save(&map).unwrap();
        // Claim different dimensions than the cell array carries.
        data.width = 4;
        assert!(matches!(
            load(&data),
            Err(SaveError::CellCount {
                expected: 12,
                found: 9,
                ..
            })
        ));
    }

    #[test]
    fn load_rejects_bad_dimensions() {
        let map = TileMap::new(3, 3);
        let mut data = save(&map).unwrap();
        data.height = 0;
        assert!(matches!(load(&data), Err(SaveError::Dimensions { .. })));
    }

    #[test]
    fn load_rejects_non_integer_cells() {
        let map = TileMap::new(2, 1);
        let mut data = save(&map).unwrap();
        data.data = {
            let mut enc = GzEncoder::new(Vec::new(), Compression::default());
            enc.write_all(b"[1,\"x\"]").unwrap();
            BASE64.encode(enc.finish().unwrap())
        };
        assert!(matches!(load(&data), Err(SaveError::Parse(_))));
    }
}
