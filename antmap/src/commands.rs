//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use terrapaint_core::{
    BrushOptions, Editor, Material, Msg, OptionValue, Point, SaveData, TileMap, footprint,
};
use terrapaint_tiles::{coerce_cell_size, render, save_png};

/// Parse an `X,Y` cell coordinate (clap value parser).
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in {s:?}"))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in {s:?}"))?;
    Ok(Point::new(x, y))
}

fn read_save(path: &Path) -> anyhow::Result<SaveData> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading save file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing save file {}", path.display()))
}

fn write_save(path: &Path, map: &TileMap) -> anyhow::Result<()> {
    let data = terrapaint_core::save(map).context("serializing map")?;
    let text = serde_json::to_string_pretty(&data).context("encoding save file")?;
    fs::write(path, text).with_context(|| format!("writing save file {}", path.display()))?;
    log::info!(
        "wrote {} ({}x{}, compression rate {:.3})",
        path.display(),
        data.width,
        data.height,
        data.compression_rate
    );
    Ok(())
}

fn load_map(path: &Path) -> anyhow::Result<TileMap> {
    let data = read_save(path)?;
    terrapaint_core::load(&data).with_context(|| format!("loading map from {}", path.display()))
}

pub fn new(width: i32, height: i32, fill: Option<u8>, out: &Path) -> anyhow::Result<()> {
    if width <= 0 || height <= 0 {
        bail!("map dimensions must be positive, got {width}x{height}");
    }
    let mut map = TileMap::new(width, height);
    if let Some(brush) = fill {
        map.fill(brush);
    }
    write_save(out, &map)
}

pub fn paint(
    input: &Path,
    brush: u8,
    width: i32,
    at: &[Point],
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let mut map = load_map(input)?;
    for &center in at {
        if !map.contains(center) {
            bail!(
                "{center} is outside the {}x{} map",
                map.width(),
                map.height()
            );
        }
        let cells = footprint(center, width.max(1), map.width(), map.height());
        map.paint(&cells, brush);
    }
    write_save(out.unwrap_or(input), &map)
}

pub fn fill(input: &Path, brush: u8, out: Option<&Path>) -> anyhow::Result<()> {
    let mut map = load_map(input)?;
    map.fill(brush);
    write_save(out.unwrap_or(input), &map)
}

pub fn export(
    input: &Path,
    cell_size: Option<&str>,
    color: Option<Material>,
    out: &Path,
) -> anyhow::Result<()> {
    let mut editor = Editor::with_map(load_map(input)?);
    if let Some(material) = color {
        editor.update(Msg::SetOption {
            brush: 0,
            name: BrushOptions::COLOR.to_string(),
            value: OptionValue::Choice(material),
        });
    }

    let cell_size = coerce_cell_size(cell_size);
    let img = render(editor.map(), cell_size, |layer| editor.layer_color(layer));
    save_png(&img, out).with_context(|| format!("writing {}", out.display()))?;
    log::info!(
        "exported {} ({}x{} pixels)",
        out.display(),
        img.width(),
        img.height()
    );
    Ok(())
}

pub fn info(input: &Path) -> anyhow::Result<()> {
    let data = read_save(input)?;
    let map = terrapaint_core::load(&data)
        .with_context(|| format!("loading map from {}", input.display()))?;

    println!("size: {}x{}", map.width(), map.height());
    println!("compression rate: {:.3}", data.compression_rate);
    println!("features: {}", map.features.len());

    let mut histogram = [0usize; 256];
    for &cell in map.cells() {
        histogram[cell as usize] += 1;
    }
    for (layer, count) in histogram.iter().enumerate().filter(|&(_, &n)| n > 0) {
        println!("layer {layer}: {count} cells");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("antmap-{}-{name}", std::process::id()))
    }

    #[test]
    fn parse_point_formats() {
        assert_eq!(parse_point("3,4"), Ok(Point::new(3, 4)));
        assert_eq!(parse_point(" 12 , 0 "), Ok(Point::new(12, 0)));
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn new_then_paint_then_reload() {
        let file = scratch("roundtrip.json");
        new(9, 9, None, &file).unwrap();

        paint(&file, 1, 3, &[Point::new(4, 4)], None).unwrap();

        let map = load_map(&file).unwrap();
        assert_eq!(map.get(4, 4), Ok(1));
        assert_eq!(map.get(3, 3), Ok(1));
        assert_eq!(map.cells().iter().filter(|&&c| c == 1).count(), 9);

        fs::remove_file(&file).unwrap();
    }

    #[test]
    fn paint_rejects_out_of_range_centre() {
        let file = scratch("oob.json");
        new(5, 5, None, &file).unwrap();
        assert!(paint(&file, 1, 1, &[Point::new(9, 0)], None).is_err());
        fs::remove_file(&file).unwrap();
    }

    #[test]
    fn export_writes_png() {
        let file = scratch("export.json");
        let png = scratch("export.png");
        new(4, 4, Some(1), &file).unwrap();

        export(&file, Some("not-a-number"), Some(Material::Ocean), &png).unwrap();

        let bytes = fs::read(&png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        // Lenient cell size fell back to 8 pixels per cell.
        let map = load_map(&file).unwrap();
        assert_eq!(map.width(), 4);

        fs::remove_file(&file).unwrap();
        fs::remove_file(&png).unwrap();
    }
}
