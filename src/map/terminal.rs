//! Text rendering of a map view for the command line.

use log::{debug, info};

use super::surface::{
    LatLng, Layer, LayerId, LayerKind, MapSurface, MarkerIcon, PanOptions, SurfaceState,
    TileSource, ViewOptions,
};
use super::tiles::openstreetmap_link;

/// [`MapSurface`] that logs view changes and renders a short text summary.
#[derive(Debug, Clone, Default)]
pub struct TerminalSurface {
    state: SurfaceState,
}

impl TerminalSurface {
    /// Surface with no view yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Describes the current view, one fact per line.
    ///
    /// Empty until the view has been created.
    pub fn summary(&self) -> String {
        let (Some(center), Some(zoom)) = (self.state.center, self.state.zoom) else {
            return String::new();
        };

        let markers = self.state.markers();
        let mut lines = vec![
            format!("MAP      {center} @ zoom {zoom}"),
            format!(
                "MARKERS  {}",
                if markers.is_empty() {
                    "none".to_string()
                } else {
                    markers
                        .iter()
                        .map(|m| format!("({m})"))
                        .collect::<Vec<_>>()
                        .join(" ")
                }
            ),
        ];
        if let Some(source) = self.state.tile_source() {
            lines.push(format!("TILE     {}", source.tile_url(center, zoom)));
        }
        lines.push(format!("LINK     {}", openstreetmap_link(center, zoom)));
        lines.join("\n")
    }
}

impl MapSurface for TerminalSurface {
    fn create(&mut self, options: &ViewOptions) {
        debug!(
            "Creating map view at ({}) zoom {} (dragging={}, zoom_control={})",
            options.center, options.zoom, options.dragging, options.zoom_control
        );
        self.state.create(options);
    }

    fn attach_tile_source(&mut self, source: &TileSource) -> LayerId {
        debug!(
            "Attaching tile source {} (max zoom {})",
            source.url_template, source.max_zoom
        );
        self.state.add_layer(LayerKind::Tiles(source.clone()))
    }

    fn set_view(&mut self, center: LatLng, zoom: u8, pan: &PanOptions) {
        if pan.animate {
            debug!("Panning to ({center}) over {:?}", pan.duration);
        }
        info!("Map centered on {center} at zoom {zoom}");
        self.state.set_view(center, zoom);
    }

    fn add_marker(&mut self, at: LatLng, icon: Option<&MarkerIcon>) -> LayerId {
        debug!(
            "Adding marker at ({at}) with {}",
            icon.map(|i| i.url.as_str()).unwrap_or("default icon")
        );
        self.state.add_layer(LayerKind::Marker {
            at,
            icon: icon.cloned(),
        })
    }

    fn remove_layer(&mut self, id: LayerId) {
        if self.state.remove_layer(id) {
            debug!("Removed layer {:?}", id);
        }
    }

    fn layers(&self) -> Vec<Layer> {
        self.state.layers()
    }
}
