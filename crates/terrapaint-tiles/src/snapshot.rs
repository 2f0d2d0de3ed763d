//! Rendering a [`TileMap`] to an RGBA raster and encoding it as PNG.

use std::io::{Seek, Write};
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use terrapaint_core::{Color, LayerIndex, TileMap};

/// Cell side length, in pixels, used when the user supplies nothing usable.
pub const DEFAULT_CELL_SIZE: u32 = 8;

/// Error type for snapshot encoding.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The PNG encoder failed.
    #[error("png encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Render each map cell as a `cell_size × cell_size` block of its material
/// colour. `color_of` resolves cell values to colours (see
/// [`Editor::layer_color`](terrapaint_core::Editor::layer_color)).
pub fn render<F>(map: &TileMap, cell_size: u32, color_of: F) -> RgbaImage
where
    F: Fn(LayerIndex) -> Color,
{
    let cs = cell_size.max(1);
    let mut img = RgbaImage::new(map.width() as u32 * cs, map.height() as u32 * cs);

    for (p, layer) in map.iter() {
        let color = color_of(layer);
        let pixel = Rgba([color.r(), color.g(), color.b(), 255]);
        for dy in 0..cs {
            for dx in 0..cs {
                img.put_pixel(p.x as u32 * cs + dx, p.y as u32 * cs + dy, pixel);
            }
        }
    }
    img
}

/// Encode a rendered snapshot as PNG into a writer.
pub fn write_png<W: Write + Seek>(img: &RgbaImage, writer: &mut W) -> Result<(), SnapshotError> {
    img.write_to(writer, ImageFormat::Png)?;
    Ok(())
}

/// Encode a rendered snapshot as a PNG file.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<(), SnapshotError> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Interpret a user-supplied cell size. Anything that is not a positive
/// integer falls back to [`DEFAULT_CELL_SIZE`] rather than erroring.
pub fn coerce_cell_size(input: Option<&str>) -> u32 {
    input
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(DEFAULT_CELL_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use terrapaint_core::Material;

    fn color_of(layer: LayerIndex) -> Color {
        match layer {
            0 => Material::Garden.color(),
            _ => Material::Dirt.color(),
        }
    }

    #[test]
    fn snapshot_dimensions() {
        let map = TileMap::new(5, 3);
        let img = render(&map, 8, color_of);
        assert_eq!(img.dimensions(), (40, 24));
    }

    #[test]
    fn painted_cell_block_has_its_material_color() {
        let mut map = TileMap::new(4, 4);
        map.set(2, 1, 1).unwrap();
        let img = render(&map, 4, color_of);

        let dirt = Material::Dirt.color();
        let garden = Material::Garden.color();
        // Every pixel of the (2, 1) block is dirt.
        for dy in 0..4 {
            for dx in 0..4 {
                let p = img.get_pixel(8 + dx, 4 + dy);
                assert_eq!(p.0, [dirt.r(), dirt.g(), dirt.b(), 255]);
            }
        }
        // A neighbouring block kept the background material.
        let p = img.get_pixel(0, 0);
        assert_eq!(p.0, [garden.r(), garden.g(), garden.b(), 255]);
    }

    #[test]
    fn zero_cell_size_is_clamped() {
        let map = TileMap::new(2, 2);
        let img = render(&map, 0, color_of);
        assert_eq!(img.dimensions(), (2, 2));
    }

    #[test]
    fn png_output_starts_with_magic() {
        let map = TileMap::new(2, 2);
        let img = render(&map, 2, color_of);
        let mut buf = Cursor::new(Vec::new());
        write_png(&img, &mut buf).unwrap();
        assert_eq!(&buf.into_inner()[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn cell_size_coercion() {
        assert_eq!(coerce_cell_size(Some("12")), 12);
        assert_eq!(coerce_cell_size(Some(" 3 ")), 3);
        assert_eq!(coerce_cell_size(Some("0")), DEFAULT_CELL_SIZE);
        assert_eq!(coerce_cell_size(Some("-4")), DEFAULT_CELL_SIZE);
        assert_eq!(coerce_cell_size(Some("huge")), DEFAULT_CELL_SIZE);
        assert_eq!(coerce_cell_size(None), DEFAULT_CELL_SIZE);
    }
}
