//! Map surface abstraction.
//!
//! A [`MapSurface`] is the rendering backend a [`MapView`](super::MapView)
//! drives. It exposes only the handful of operations the tracker needs, so a
//! terminal renderer and a recording fake can stand in for a real map widget.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::config::{DEFAULT_TILE_URL, DEFAULT_ZOOM, PAN_DURATION, TILE_ATTRIBUTION, TILE_MAX_ZOOM};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Latitude, positive north
    pub lat: f64,
    /// Longitude, positive east
    pub lng: f64,
}

impl LatLng {
    /// Where a view starts before the first lookup.
    pub const ORIGIN: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    /// Coordinate from latitude and longitude in degrees.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Options a view is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    /// Initial center
    pub center: LatLng,
    /// Initial zoom level
    pub zoom: u8,
    /// Whether the user may pan by dragging
    pub dragging: bool,
    /// Whether double-click zooms in
    pub double_click_zoom: bool,
    /// Whether the scroll wheel zooms
    pub scroll_wheel_zoom: bool,
    /// Whether the +/- zoom buttons are shown
    pub zoom_control: bool,
}

impl ViewOptions {
    /// A static view: centered on (0, 0) with every user interaction disabled.
    pub fn fixed(zoom: u8) -> Self {
        Self {
            center: LatLng::ORIGIN,
            zoom,
            dragging: false,
            double_click_zoom: false,
            scroll_wheel_zoom: false,
            zoom_control: false,
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::fixed(DEFAULT_ZOOM)
    }
}

/// Raster tile source attached to a view.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    /// URL template with `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    /// Highest zoom level the source serves tiles for
    pub max_zoom: u8,
    /// HTML attribution shown with the tiles
    pub attribution: String,
}

impl TileSource {
    /// OpenStreetMap-style source for `url_template`.
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            max_zoom: TILE_MAX_ZOOM,
            attribution: TILE_ATTRIBUTION.to_string(),
        }
    }
}

impl Default for TileSource {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_URL)
    }
}

/// Animation applied by [`MapSurface::set_view`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    /// Animate the move instead of jumping
    pub animate: bool,
    /// Length of the animation
    pub duration: Duration,
}

impl Default for PanOptions {
    fn default() -> Self {
        Self {
            animate: true,
            duration: PAN_DURATION,
        }
    }
}

/// Custom marker image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    /// Image location, relative to the surface's asset root
    pub url: String,
    /// Width and height in pixels
    pub size: (u32, u32),
    /// Pixel of the image placed on the coordinate
    pub anchor: (u32, u32),
}

impl MarkerIcon {
    /// The location pin used for lookup results.
    pub fn location_pin() -> Self {
        Self {
            url: "images/icon-location.svg".to_string(),
            size: (46, 56),
            anchor: (23, 56),
        }
    }
}

/// Handle of a layer on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

/// What a layer draws.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// Raster tiles
    Tiles(TileSource),
    /// A single marker; `None` uses the surface's default icon
    Marker {
        /// Marked coordinate
        at: LatLng,
        /// Custom image, if any
        icon: Option<MarkerIcon>,
    },
}

/// A layer as reported by [`MapSurface::layers`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Handle for [`MapSurface::remove_layer`]
    pub id: LayerId,
    /// What the layer draws
    pub kind: LayerKind,
}

impl Layer {
    /// Whether this layer is a marker rather than tiles.
    pub fn is_marker(&self) -> bool {
        matches!(self.kind, LayerKind::Marker { .. })
    }
}

/// Rendering backend for a map view.
pub trait MapSurface: Send {
    /// Creates the view. Called once, before any other operation.
    fn create(&mut self, options: &ViewOptions);

    /// Adds a tile layer.
    fn attach_tile_source(&mut self, source: &TileSource) -> LayerId;

    /// Moves the view to `center` at `zoom`.
    fn set_view(&mut self, center: LatLng, zoom: u8, pan: &PanOptions);

    /// Adds a marker, with the default icon when `icon` is `None`.
    fn add_marker(&mut self, at: LatLng, icon: Option<&MarkerIcon>) -> LayerId;

    /// Removes a layer. Unknown ids are ignored.
    fn remove_layer(&mut self, id: LayerId);

    /// All layers in insertion order.
    fn layers(&self) -> Vec<Layer>;
}

/// View state shared by the bundled surfaces.
#[derive(Debug, Clone, Default)]
pub(crate) struct SurfaceState {
    pub options: Option<ViewOptions>,
    pub center: Option<LatLng>,
    pub zoom: Option<u8>,
    layers: BTreeMap<LayerId, LayerKind>,
    next_id: u64,
}

impl SurfaceState {
    pub fn create(&mut self, options: &ViewOptions) {
        self.center = Some(options.center);
        self.zoom = Some(options.zoom);
        self.options = Some(options.clone());
    }

    pub fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.center = Some(center);
        self.zoom = Some(zoom);
    }

    pub fn add_layer(&mut self, kind: LayerKind) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, kind);
        id
    }

    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        self.layers.remove(&id).is_some()
    }

    pub fn layers(&self) -> Vec<Layer> {
        self.layers
            .iter()
            .map(|(id, kind)| Layer {
                id: *id,
                kind: kind.clone(),
            })
            .collect()
    }

    pub fn markers(&self) -> Vec<LatLng> {
        self.layers
            .values()
            .filter_map(|kind| match kind {
                LayerKind::Marker { at, .. } => Some(*at),
                LayerKind::Tiles(_) => None,
            })
            .collect()
    }

    pub fn tile_source(&self) -> Option<&TileSource> {
        self.layers.values().find_map(|kind| match kind {
            LayerKind::Tiles(source) => Some(source),
            LayerKind::Marker { .. } => None,
        })
    }
}
