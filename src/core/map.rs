//! Map geometry for the points screen: the visible region around the user's
//! coordinate, the fixed collection-point marker, and the conversions the
//! map widget needs to draw and hit-test it.

use serde::{Deserialize, Serialize};

use super::model::Coordinate;

pub const DEFAULT_DELTA: f64 = 0.014;

const MARKER_IMAGE_URL: &str = "https://encrypted-tbn0.gstatic.com/images?q=tbn%3AANd9GcQjrNeIskY1R3MkStVIB4bWF5Hc19ms3uuWTHwJcpcW76sYlD_f&usqp=CAU";

pub const MARKER_WIDTH: f32 = 90.0;
pub const MARKER_HEIGHT: f32 = 80.0;

/// The collection point pinned on the map. Pressing it opens the details
/// screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionPoint {
    pub name: String,
    pub image_url: String,
    pub coordinate: Coordinate,
}

impl Default for CollectionPoint {
    fn default() -> Self {
        Self {
            name: "Mercado".to_string(),
            image_url: MARKER_IMAGE_URL.to_string(),
            coordinate: Coordinate::new(-46.8287926, -23.3484127),
        }
    }
}

/// Axis-aligned rectangle in widget pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A drag on the map, in widget pixels, together with the widget size it
/// happened in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPan {
    pub dx: f32,
    pub dy: f32,
    pub width: f32,
    pub height: f32,
}

/// Visible map area: a center plus the span in degrees on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for MapRegion {
    fn default() -> Self {
        Self::around(Coordinate::ORIGIN)
    }
}

impl MapRegion {
    pub fn around(center: Coordinate) -> Self {
        Self {
            center,
            latitude_delta: DEFAULT_DELTA,
            longitude_delta: DEFAULT_DELTA,
        }
    }

    pub fn with_deltas(mut self, latitude_delta: f64, longitude_delta: f64) -> Self {
        self.latitude_delta = latitude_delta;
        self.longitude_delta = longitude_delta;
        self
    }

    /// Moves the region so the content follows the pointer: dragging right
    /// reveals what lies west, dragging down reveals what lies north.
    pub fn panned(mut self, pan: MapPan) -> Self {
        if pan.width <= 0.0 || pan.height <= 0.0 {
            return self;
        }
        self.center.longitude -= f64::from(pan.dx / pan.width) * self.longitude_delta;
        self.center.latitude += f64::from(pan.dy / pan.height) * self.latitude_delta;
        self
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.project(coordinate, 1.0, 1.0).is_some()
    }

    /// Equirectangular projection of `coordinate` into a `width` x `height`
    /// viewport. Returns `None` when the coordinate falls outside the region.
    pub fn project(&self, coordinate: Coordinate, width: f32, height: f32) -> Option<(f32, f32)> {
        let west = self.center.longitude - self.longitude_delta / 2.0;
        let north = self.center.latitude + self.latitude_delta / 2.0;

        let fx = (coordinate.longitude - west) / self.longitude_delta;
        let fy = (north - coordinate.latitude) / self.latitude_delta;
        if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
            return None;
        }
        Some((fx as f32 * width, fy as f32 * height))
    }

    /// Pixel box of a marker anchored bottom-center on `coordinate`.
    pub fn marker_bounds(&self, coordinate: Coordinate, width: f32, height: f32) -> Option<PixelRect> {
        let (x, y) = self.project(coordinate, width, height)?;
        Some(PixelRect {
            x: x - MARKER_WIDTH / 2.0,
            y: y - MARKER_HEIGHT,
            width: MARKER_WIDTH,
            height: MARKER_HEIGHT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_projects_to_middle() {
        let region = MapRegion::around(Coordinate::new(-46.6, -23.5));
        let (x, y) = region.project(region.center, 400.0, 300.0).unwrap();
        assert!((x - 200.0).abs() < 0.01);
        assert!((y - 150.0).abs() < 0.01);
    }

    #[test]
    fn north_east_corner_is_top_right() {
        let region = MapRegion::around(Coordinate::ORIGIN).with_deltas(2.0, 2.0);
        let (x, y) = region.project(Coordinate::new(1.0, 1.0), 100.0, 100.0).unwrap();
        assert!((x - 100.0).abs() < 0.01);
        assert!(y.abs() < 0.01);
    }

    #[test]
    fn far_coordinates_are_not_projected() {
        let region = MapRegion::default();
        let point = CollectionPoint::default();
        assert!(region.project(point.coordinate, 400.0, 300.0).is_none());
        assert!(region.marker_bounds(point.coordinate, 400.0, 300.0).is_none());
    }

    #[test]
    fn dragging_moves_center_against_pointer() {
        let region = MapRegion::around(Coordinate::ORIGIN).with_deltas(2.0, 4.0);
        let panned = region.panned(MapPan {
            dx: 100.0,
            dy: -50.0,
            width: 400.0,
            height: 200.0,
        });
        assert!((panned.center.longitude + 1.0).abs() < 1e-9);
        assert!((panned.center.latitude + 0.5).abs() < 1e-9);
    }

    #[test]
    fn empty_viewport_does_not_pan() {
        let region = MapRegion::default();
        let pan = MapPan {
            dx: 10.0,
            dy: 10.0,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(region.panned(pan), region);
    }

    #[test]
    fn contains_matches_projection() {
        let point = CollectionPoint::default();
        assert!(MapRegion::around(point.coordinate).contains(point.coordinate));
        assert!(!MapRegion::default().contains(point.coordinate));
    }

    #[test]
    fn marker_hit_box_sits_above_anchor() {
        let point = CollectionPoint::default();
        let region = MapRegion::around(point.coordinate);
        let bounds = region.marker_bounds(point.coordinate, 400.0, 300.0).unwrap();

        assert!(bounds.contains(200.0, 140.0));
        assert!(bounds.contains(160.0, 75.0));
        assert!(!bounds.contains(200.0, 160.0));
        assert!(!bounds.contains(100.0, 140.0));
    }
}
