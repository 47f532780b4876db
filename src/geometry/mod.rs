//! Geometric primitives for page text.
//!
//! Zone rectangles arrive in the decoder's native units with the origin at the
//! bottom-left of the page. Callers work in page units with the origin at the
//! top-left. [`PageTransform`] converts between the two.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page units per native unit used by DjVu decoders (native units are 5x smaller).
pub const DEFAULT_SCALE: f64 = 0.2;

/// An axis-aligned rectangle given by two corners.
///
/// `(x1, y1)` is the minimum corner and `(x2, y2)` the maximum corner in
/// whichever coordinate space the rectangle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum x coordinate
    pub x1: f64,
    /// Minimum y coordinate
    pub y1: f64,
    /// Maximum x coordinate
    pub x2: f64,
    /// Maximum y coordinate
    pub y2: f64,
}

impl Rect {
    /// Create a new rectangle from its two corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use djvu_text::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width(), 100.0);
    /// assert_eq!(rect.height(), 50.0);
    /// ```
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Check if this rectangle overlaps another.
    ///
    /// Edges are inclusive: rectangles that only touch still intersect. This is
    /// the test used to decide which zones a selection rectangle picks up.
    ///
    /// # Examples
    ///
    /// ```
    /// use djvu_text::geometry::Rect;
    ///
    /// let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    /// assert!(a.intersects(&Rect::new(10.0, 10.0, 20.0, 20.0)));
    /// assert!(!a.intersects(&Rect::new(11.0, 0.0, 20.0, 10.0)));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x2 >= other.x1 && self.y1 <= other.y2 && self.x1 <= other.x2 && self.y2 >= other.y1
    }

    /// Smallest rectangle that contains both rectangles.
    ///
    /// # Examples
    ///
    /// ```
    /// use djvu_text::geometry::Rect;
    ///
    /// let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    /// let b = Rect::new(10.0, 0.0, 20.0, 12.0);
    /// assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 20.0, 12.0));
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Multiply every coordinate by `factor`.
    pub fn scaled(&self, factor: f64) -> Rect {
        Rect {
            x1: self.x1 * factor,
            y1: self.y1 * factor,
            x2: self.x2 * factor,
            y2: self.y2 * factor,
        }
    }

    /// Mirror the rectangle across the horizontal axis of a page `height` tall.
    ///
    /// Converts between bottom-left and top-left origins; the corners are
    /// swapped so that `y1 <= y2` still holds.
    pub fn flipped_vertically(&self, height: f64) -> Rect {
        Rect {
            x1: self.x1,
            y1: height - self.y2,
            x2: self.x2,
            y2: height - self.y1,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Page rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// Upright
    #[default]
    None,
    /// 90 degrees
    Quarter,
    /// 180 degrees
    Half,
    /// 270 degrees
    ThreeQuarter,
}

impl Rotation {
    /// Rotation for a number of degrees; only multiples of 90 are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use djvu_text::geometry::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(270), Some(Rotation::ThreeQuarter));
    /// assert_eq!(Rotation::from_degrees(-90), Some(Rotation::ThreeQuarter));
    /// assert_eq!(Rotation::from_degrees(45), None);
    /// ```
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Quarter),
            180 => Some(Rotation::Half),
            270 => Some(Rotation::ThreeQuarter),
            _ => None,
        }
    }

    /// Rotation in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 90,
            Rotation::Half => 180,
            Rotation::ThreeQuarter => 270,
        }
    }
}

/// Conversion between native zone coordinates and caller page coordinates.
///
/// `width` and `height` are the page dimensions in page units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageTransform {
    /// Page units per native unit
    pub scale: f64,
    /// Page width in page units
    pub width: f64,
    /// Page height in page units
    pub height: f64,
    /// Current display rotation
    pub rotation: Rotation,
}

impl PageTransform {
    /// Create a transform for an upright page of the given size in page units.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scale: DEFAULT_SCALE,
            width,
            height,
            rotation: Rotation::None,
        }
    }

    /// Create a transform from the page size in native units.
    ///
    /// # Examples
    ///
    /// ```
    /// use djvu_text::geometry::PageTransform;
    ///
    /// let transform = PageTransform::page_size_from_native(2550.0, 3300.0, 0.2);
    /// assert_eq!(transform.width, 510.0);
    /// assert_eq!(transform.height, 660.0);
    /// ```
    pub fn page_size_from_native(width: f64, height: f64, scale: f64) -> Self {
        Self {
            scale,
            width: width * scale,
            height: height * scale,
            rotation: Rotation::None,
        }
    }

    /// Set the native-to-page scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the page rotation.
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Map a native rectangle into page space: scale, then flip vertically.
    ///
    /// # Examples
    ///
    /// ```
    /// use djvu_text::geometry::{PageTransform, Rect};
    ///
    /// let transform = PageTransform::new(100.0, 2.0);
    /// let page = transform.to_page(&Rect::new(0.0, 0.0, 20.0, 10.0));
    /// assert_eq!(page, Rect::new(0.0, 0.0, 4.0, 2.0));
    /// ```
    pub fn to_page(&self, native: &Rect) -> Rect {
        native.scaled(self.scale).flipped_vertically(self.height)
    }

    /// Map a page-space rectangle (as seen with the current rotation) into
    /// native units, ready for selection.
    pub fn to_native(&self, page: &Rect) -> Rect {
        let (w, h) = (self.width, self.height);
        let r = page;
        let corrected = match self.rotation {
            Rotation::Quarter => Rect::new(r.y1, r.x1, r.y2, r.x2),
            Rotation::Half => Rect::new(w - r.x2, r.y1, w - r.x1, r.y2),
            Rotation::ThreeQuarter => Rect::new(w - r.y2, h - r.x2, w - r.y1, h - r.x1),
            Rotation::None => r.flipped_vertically(h),
        };
        if self.scale == 0.0 {
            return corrected;
        }
        corrected.scaled(1.0 / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
        assert_eq!(r.area(), 5000.0);
    }

    #[test]
    fn test_rect_intersects_inclusive_edges() {
        let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r2 = Rect::new(50.0, 50.0, 150.0, 150.0);
        let r3 = Rect::new(200.0, 200.0, 300.0, 300.0);
        let touching = Rect::new(100.0, 0.0, 120.0, 10.0);

        assert!(r1.intersects(&r2));
        assert!(r2.intersects(&r1));
        assert!(!r1.intersects(&r3));
        assert!(r1.intersects(&touching));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_flip_swaps_corners() {
        let r = Rect::new(5.0, 10.0, 15.0, 30.0);
        assert_eq!(r.flipped_vertically(100.0), Rect::new(5.0, 70.0, 15.0, 90.0));
    }

    #[test]
    fn test_to_page_scales_and_flips() {
        let t = PageTransform::new(100.0, 2.0);
        let page = t.to_page(&Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(page, Rect::new(0.0, 0.0, 4.0, 2.0));
    }

    #[test]
    fn test_to_native_upright_inverts_to_page() {
        let t = PageTransform::new(100.0, 200.0);
        let native = Rect::new(50.0, 100.0, 250.0, 300.0);
        let page = t.to_page(&native);
        let back = t.to_native(&page);
        assert!((back.x1 - native.x1).abs() < 1e-9);
        assert!((back.y1 - native.y1).abs() < 1e-9);
        assert!((back.x2 - native.x2).abs() < 1e-9);
        assert!((back.y2 - native.y2).abs() < 1e-9);
    }

    #[test]
    fn test_to_native_rotations() {
        let t = PageTransform::new(100.0, 200.0).with_scale(1.0);
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);

        let quarter = t.with_rotation(Rotation::Quarter).to_native(&r);
        assert_eq!(quarter, Rect::new(20.0, 10.0, 40.0, 30.0));

        let half = t.with_rotation(Rotation::Half).to_native(&r);
        assert_eq!(half, Rect::new(70.0, 20.0, 90.0, 40.0));

        let three = t.with_rotation(Rotation::ThreeQuarter).to_native(&r);
        assert_eq!(three, Rect::new(60.0, 170.0, 80.0, 190.0));
    }

    #[test]
    fn test_rotation_degrees_roundtrip() {
        for deg in [0, 90, 180, 270] {
            let rotation = Rotation::from_degrees(deg).unwrap();
            assert_eq!(rotation.degrees() as i32, deg);
        }
        assert_eq!(Rotation::from_degrees(360), Some(Rotation::None));
        assert_eq!(Rotation::from_degrees(100), None);
    }
}
