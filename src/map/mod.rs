//! Map view and rendering surfaces.
//!
//! The tracker owns one [`MapView`], which drives a [`MapSurface`]:
//! - [`TerminalSurface`] renders a text summary for the CLI
//! - [`RecordingSurface`] records every call for assertions

mod recording;
mod surface;
mod terminal;
mod tiles;
mod view;

// Re-export public API
pub use recording::{RecordingSurface, SurfaceCall};
pub use surface::{
    LatLng, Layer, LayerId, LayerKind, MapSurface, MarkerIcon, PanOptions, TileSource,
    ViewOptions,
};
pub use terminal::TerminalSurface;
pub use tiles::{openstreetmap_link, tile_coordinates};
pub use view::MapView;
