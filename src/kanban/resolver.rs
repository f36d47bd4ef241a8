//! Hit-testing fallback for drop targets.
//!
//! When a drag-over event carries no column metadata the coordinator asks a
//! [`ColumnResolver`] which column sits under the last pointer position. The
//! UI layer supplies the real implementation; [`LayeredTargets`] is a
//! geometry-only one that scans a front-to-back stack of regions.

use super::column::ColumnKey;
use super::event::Point;

/// Resolves the column under a screen point.
pub trait ColumnResolver {
    /// Returns the column key declared by the front-most element at `point`
    /// that declares one.
    fn column_at(&self, point: Point) -> Option<ColumnKey>;
}

impl<F> ColumnResolver for F
where
    F: Fn(Point) -> Option<ColumnKey>,
{
    fn column_at(&self, point: Point) -> Option<ColumnKey> {
        self(point)
    }
}

/// Resolver for platforms without point queries. Never finds a column.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHitTesting;

impl ColumnResolver for NoHitTesting {
    fn column_at(&self, _point: Point) -> Option<ColumnKey> {
        None
    }
}

/// Axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if `point` lies inside (edges inclusive on the top-left).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// One rendered element for hit-testing.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    /// Element bounds
    pub bounds: Rect,
    /// Column key attribute, if the element declares one
    pub column: Option<ColumnKey>,
}

/// A stack of regions ordered front-to-back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayeredTargets {
    regions: Vec<HitRegion>,
}

impl LayeredTargets {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a region behind every region already present.
    pub fn push_back(&mut self, bounds: Rect, column: Option<ColumnKey>) {
        self.regions.push(HitRegion { bounds, column });
    }

    /// Adds a region in front of every region already present.
    pub fn push_front(&mut self, bounds: Rect, column: Option<ColumnKey>) {
        self.regions.insert(0, HitRegion { bounds, column });
    }

    /// Lays out equally wide columns side by side, starting at `origin`.
    #[must_use]
    pub fn columns<I, K>(origin: Point, column_width: f64, height: f64, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ColumnKey>,
    {
        let mut targets = Self::new();
        let mut x = origin.x;
        for key in keys {
            targets.push_back(
                Rect::new(x, origin.y, column_width, height),
                Some(key.into()),
            );
            x += column_width;
        }
        targets
    }

    /// Regions at `point`, front-most first.
    pub fn regions_at(&self, point: Point) -> impl Iterator<Item = &HitRegion> {
        self.regions
            .iter()
            .filter(move |region| region.bounds.contains(point))
    }
}

impl ColumnResolver for LayeredTargets {
    fn column_at(&self, point: Point) -> Option<ColumnKey> {
        self.regions_at(point)
            .find_map(|region| region.column.clone())
    }
}
