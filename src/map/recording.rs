//! Surface that records every call, for assertions in tests and for embedders
//! that want to replay view changes elsewhere.

use super::surface::{
    LatLng, Layer, LayerId, LayerKind, MapSurface, MarkerIcon, PanOptions, SurfaceState,
    TileSource, ViewOptions,
};

/// One operation received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    /// [`MapSurface::create`]
    Create(ViewOptions),
    /// [`MapSurface::attach_tile_source`]
    AttachTileSource(TileSource),
    /// [`MapSurface::set_view`]
    SetView {
        /// New center
        center: LatLng,
        /// New zoom level
        zoom: u8,
        /// Animation used for the move
        pan: PanOptions,
    },
    /// [`MapSurface::add_marker`]
    AddMarker {
        /// Marked coordinate
        at: LatLng,
        /// Custom image, if any
        icon: Option<MarkerIcon>,
    },
    /// [`MapSurface::remove_layer`]
    RemoveLayer(LayerId),
}

/// In-memory [`MapSurface`] keeping a log of calls and the resulting state.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    state: SurfaceState,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    /// Empty surface with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received, in order.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Options passed to `create`, once created.
    pub fn options(&self) -> Option<&ViewOptions> {
        self.state.options.as_ref()
    }

    /// Current center, once created.
    pub fn center(&self) -> Option<LatLng> {
        self.state.center
    }

    /// Current zoom level, once created.
    pub fn zoom(&self) -> Option<u8> {
        self.state.zoom
    }

    /// Coordinates of the markers currently shown, oldest first.
    pub fn markers(&self) -> Vec<LatLng> {
        self.state.markers()
    }

    /// The attached tile source, if any.
    pub fn tile_source(&self) -> Option<&TileSource> {
        self.state.tile_source()
    }
}

impl MapSurface for RecordingSurface {
    fn create(&mut self, options: &ViewOptions) {
        self.calls.push(SurfaceCall::Create(options.clone()));
        self.state.create(options);
    }

    fn attach_tile_source(&mut self, source: &TileSource) -> LayerId {
        self.calls.push(SurfaceCall::AttachTileSource(source.clone()));
        self.state.add_layer(LayerKind::Tiles(source.clone()))
    }

    fn set_view(&mut self, center: LatLng, zoom: u8, pan: &PanOptions) {
        self.calls.push(SurfaceCall::SetView {
            center,
            zoom,
            pan: *pan,
        });
        self.state.set_view(center, zoom);
    }

    fn add_marker(&mut self, at: LatLng, icon: Option<&MarkerIcon>) -> LayerId {
        self.calls.push(SurfaceCall::AddMarker {
            at,
            icon: icon.cloned(),
        });
        self.state.add_layer(LayerKind::Marker {
            at,
            icon: icon.cloned(),
        })
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.calls.push(SurfaceCall::RemoveLayer(id));
        self.state.remove_layer(id);
    }

    fn layers(&self) -> Vec<Layer> {
        self.state.layers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let mut surface = RecordingSurface::new();
        surface.create(&ViewOptions::default());
        let tiles = surface.attach_tile_source(&TileSource::default());
        let marker = surface.add_marker(LatLng::new(1.0, 1.0), None);
        surface.remove_layer(marker);

        assert_eq!(surface.calls().len(), 4);
        assert!(matches!(surface.calls()[0], SurfaceCall::Create(_)));
        assert_eq!(surface.calls()[3], SurfaceCall::RemoveLayer(marker));
        assert_eq!(surface.layers().len(), 1);
        assert_eq!(surface.layers()[0].id, tiles);
        assert!(surface.markers().is_empty());
    }

    #[test]
    fn test_set_view_updates_center_and_zoom() {
        let mut surface = RecordingSurface::new();
        surface.create(&ViewOptions::default());
        assert_eq!(surface.center(), Some(LatLng::ORIGIN));

        surface.set_view(LatLng::new(37.4, -122.1), 13, &PanOptions::default());
        assert_eq!(surface.center(), Some(LatLng::new(37.4, -122.1)));
        assert_eq!(surface.zoom(), Some(13));
    }
}
