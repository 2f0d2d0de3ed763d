//! The editor state machine: explicit application state plus a
//! message-driven update function, testable without a live UI.

use crate::brush::{self, BrushOptions};
use crate::geom::Viewport;
use crate::map::{LayerIndex, TileMap};
use crate::messages::Msg;
use crate::palette::{Color, Material};
use crate::save::{self, SaveData, SaveError};

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect request returned by [`Editor::update`]. The driving front
/// end fulfils it (persisting a save blob, writing an image, tearing the
/// application down).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Stop the application.
    End,
    /// Persist the blob produced by [`Editor::save_data`].
    Save,
    /// Export a raster snapshot at the given cell size.
    Snapshot { cell_size: u32 },
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// All mutable editor state: the map, the brush toolbar, and the viewport
/// the map is rendered into.
pub struct Editor {
    map: TileMap,
    selected_brush: usize,
    brushes: Vec<BrushOptions>,
    viewport: Viewport,
}

impl Editor {
    /// Create an editor over a fresh zero-filled map.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_map(TileMap::new(width, height))
    }

    /// Create an editor over an existing map (e.g. a loaded save).
    pub fn with_map(map: TileMap) -> Self {
        Self {
            map,
            selected_brush: 0,
            brushes: brush::default_brushes(),
            viewport: Viewport::default(),
        }
    }

    /// The map being edited.
    #[inline]
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Mutable access to the map being edited.
    #[inline]
    pub fn map_mut(&mut self) -> &mut TileMap {
        &mut self.map
    }

    /// The brush toolbar.
    #[inline]
    pub fn brushes(&self) -> &[BrushOptions] {
        &self.brushes
    }

    /// The currently selected brush id.
    #[inline]
    pub fn selected_brush(&self) -> usize {
        self.selected_brush
    }

    /// The current viewport box.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Process one input message, returning an optional side-effect
    /// request for the front end.
    pub fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => None,
            Msg::Pointer { x, y, .. } => {
                self.paint_at(x, y);
                None
            }
            Msg::SelectBrush(id) => {
                if id < self.brushes.len() {
                    self.selected_brush = id;
                } else {
                    log::warn!("ignoring selection of unknown brush {id}");
                }
                None
            }
            Msg::SetOption { brush, name, value } => {
                match self.brushes.get_mut(brush) {
                    Some(options) => options.set(name, value),
                    None => log::warn!("ignoring option change on unknown brush {brush}"),
                }
                None
            }
            Msg::Fill => {
                self.map.fill(self.selected_brush as LayerIndex);
                None
            }
            Msg::Screen { width, height } => {
                self.viewport = Viewport::fit(width, height);
                None
            }
            Msg::Save => Some(Effect::Save),
            Msg::Export { cell_size } => Some(Effect::Snapshot { cell_size }),
            Msg::Quit => Some(Effect::End),
        }
    }

    /// Apply the selected brush at a canvas pixel position. Positions
    /// outside the map are ignored.
    fn paint_at(&mut self, px: f64, py: f64) {
        let Some(center) = self
            .viewport
            .cell_at(px, py, self.map.width(), self.map.height())
        else {
            return;
        };
        let size = self.brushes[self.selected_brush].width();
        let cells = brush::footprint(center, size, self.map.width(), self.map.height());
        self.map.paint(&cells, self.selected_brush as LayerIndex);
    }

    /// Resolve a cell value to its display colour. Layer 0 follows brush
    /// 0's Color option; every other layer is a fixed material.
    pub fn layer_color(&self, layer: LayerIndex) -> Color {
        match layer {
            0 => self
                .brushes
                .first()
                .and_then(BrushOptions::color)
                .unwrap_or(Material::AntHell)
                .color(),
            _ => Material::Dirt.color(),
        }
    }

    /// Produce the compressed save blob for the current map.
    pub fn save_data(&self) -> Result<SaveData, SaveError> {
        save::save(&self.map)
    }
}
