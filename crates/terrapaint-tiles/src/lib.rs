//! **terrapaint-tiles** — raster snapshot export for terrapaint maps.

mod snapshot;

pub use snapshot::{DEFAULT_CELL_SIZE, SnapshotError, coerce_cell_size, render, save_png, write_png};
