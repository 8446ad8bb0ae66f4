//! Owned map view.

use super::surface::{LatLng, LayerId, MapSurface, MarkerIcon, PanOptions, TileSource, ViewOptions};
use crate::config::{MarkerPolicy, DEFAULT_ZOOM};

/// A mounted map: the surface plus the policy used to place markers.
///
/// The view owns its surface for its whole lifetime; callers reach the
/// surface through [`MapView::surface`] for inspection only.
#[derive(Debug)]
pub struct MapView<S: MapSurface> {
    surface: S,
    zoom: u8,
    pan: PanOptions,
    policy: MarkerPolicy,
    icon: MarkerIcon,
}

impl<S: MapSurface> MapView<S> {
    /// Creates a static view on `surface` and attaches `tiles`.
    pub fn mount(mut surface: S, tiles: &TileSource, zoom: u8, policy: MarkerPolicy) -> Self {
        surface.create(&ViewOptions::fixed(zoom));
        surface.attach_tile_source(tiles);
        Self {
            surface,
            zoom,
            pan: PanOptions::default(),
            policy,
            icon: MarkerIcon::location_pin(),
        }
    }

    /// Mounts with the default zoom, tile source, and marker policy.
    pub fn mount_default(surface: S) -> Self {
        Self::mount(
            surface,
            &TileSource::default(),
            DEFAULT_ZOOM,
            MarkerPolicy::Replace,
        )
    }

    /// Pans to `(lat, lng)` and marks it.
    ///
    /// Under [`MarkerPolicy::Replace`] every existing marker is removed first and
    /// the new one uses the location pin; under [`MarkerPolicy::Accumulate`]
    /// earlier markers stay and the new one uses the surface's default icon.
    pub fn show_location(&mut self, lat: f64, lng: f64) -> LayerId {
        let at = LatLng::new(lat, lng);
        self.surface.set_view(at, self.zoom, &self.pan);

        match self.policy {
            MarkerPolicy::Replace => {
                self.clear_markers();
                self.surface.add_marker(at, Some(&self.icon))
            }
            MarkerPolicy::Accumulate => self.surface.add_marker(at, None),
        }
    }

    /// Removes every marker layer, leaving tiles in place.
    pub fn clear_markers(&mut self) {
        let markers: Vec<LayerId> = self
            .surface
            .layers()
            .into_iter()
            .filter(|layer| layer.is_marker())
            .map(|layer| layer.id)
            .collect();
        for id in markers {
            self.surface.remove_layer(id);
        }
    }

    /// Number of markers currently on the surface.
    pub fn marker_count(&self) -> usize {
        self.surface.layers().iter().filter(|l| l.is_marker()).count()
    }

    /// The surface, for inspection.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}
