//! Web-Mercator tile addressing.

use std::f64::consts::PI;

use super::surface::{LatLng, TileSource};

/// Web-Mercator cannot represent the poles; latitudes are clamped to this.
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Returns the `(x, y)` index of the tile containing `at` at `zoom`.
pub fn tile_coordinates(at: LatLng, zoom: u8) -> (u32, u32) {
    let n = f64::from(1u32 << u32::from(zoom.min(31)));
    let lat = at.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let lng = (at.lng + 180.0).rem_euclid(360.0);

    let x = (lng / 360.0 * n).floor();
    let y = ((1.0 - lat.tan().asinh() / PI) / 2.0 * n).floor();

    let max = n - 1.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    (x.clamp(0.0, max) as u32, y.clamp(0.0, max) as u32)
}

impl TileSource {
    /// URL of the tile under `center`, with `zoom` capped at the source's max zoom.
    pub fn tile_url(&self, center: LatLng, zoom: u8) -> String {
        let zoom = zoom.min(self.max_zoom);
        let (x, y) = tile_coordinates(center, zoom);
        self.url_template
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// Link to the same view on openstreetmap.org, with a marker at `center`.
pub fn openstreetmap_link(center: LatLng, zoom: u8) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={lat:.5}&mlon={lng:.5}#map={zoom}/{lat:.5}/{lng:.5}",
        lat = center.lat,
        lng = center.lng,
        zoom = zoom
    )
}
