//! Input events delivered to the [`Editor`](crate::editor::Editor).

use crate::brush::OptionValue;

/// What the pointer is doing when it lands on the canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// The primary button was pressed (a click).
    Press,
    /// The pointer moved with the primary button held.
    Drag,
}

/// An input message. Front ends translate their native events (DOM
/// callbacks, CLI arguments) into these and feed them to
/// [`Editor::update`](crate::editor::Editor::update).
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    /// Sent once when the application starts.
    Init,
    /// A pointer event at a canvas pixel position.
    Pointer {
        action: PointerAction,
        x: f64,
        y: f64,
    },
    /// A toolbar brush was selected.
    SelectBrush(usize),
    /// A brush option control changed.
    SetOption {
        brush: usize,
        name: String,
        value: OptionValue,
    },
    /// The fill action button: flood the map with the selected brush.
    Fill,
    /// The save action: produce the compressed save blob.
    Save,
    /// The export action: produce a raster snapshot at the given cell size.
    Export { cell_size: u32 },
    /// The canvas was resized to the given pixel dimensions.
    Screen { width: f64, height: f64 },
    /// Request to quit.
    Quit,
}
