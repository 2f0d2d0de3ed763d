//! **terrapaint-core** — tile-map painter core types.
//!
//! This crate provides the pieces shared by every terrapaint front end:
//! geometry and viewport mapping, the material palette, the tile map and
//! its brush footprints, the compressed save format, and the
//! message-driven editor state machine.

pub mod brush;
pub mod editor;
pub mod feature;
pub mod geom;
pub mod map;
pub mod messages;
pub mod palette;
pub mod save;

pub use brush::{BrushOptions, OptionValue, footprint};
pub use editor::{Editor, Effect};
pub use feature::MapFeature;
pub use geom::{Point, Viewport};
pub use map::{LayerIndex, MapError, TileMap};
pub use messages::{Msg, PointerAction};
pub use palette::{Color, Material};
pub use save::{SaveData, SaveError, load, save};
