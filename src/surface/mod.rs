//! Volatility surfaces: repeated independent inversions over a
//! (strike, expiry) grid, plus presentation helpers.

mod error;
mod grid;
mod render;
mod snapshot;

pub use error::SurfaceError;
pub use grid::{CellOutcome, SurfaceCell, SurfaceConfig, VolatilitySurface};
pub use render::render_table;
pub use snapshot::{SURFACE_SNAPSHOT_FORMAT_VERSION, SurfaceSnapshot, SurfaceSnapshotPackage};
