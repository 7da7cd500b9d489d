//! Axis-aligned rectangles in page and layout space.

use serde::{Deserialize, Serialize};

/// A rectangle in page coordinates (bottom-left origin, y-up).
///
/// This is how the page parser reports images, graphics, annotations and
/// form fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRect {
    /// Left edge
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    /// Width (negative values are treated as zero)
    pub width: f32,
    /// Height (negative values are treated as zero)
    pub height: f32,
}

impl PageRect {
    /// Create a new page rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A rectangle in layout space (top-left origin, y-down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Width, never negative
    pub width: f32,
    /// Height, never negative
    pub height: f32,
}

impl Rect {
    /// Create a rectangle, clamping negative sizes to zero.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Convert a page rectangle into layout space.
    pub fn from_page(rect: &PageRect, page_height: f32) -> Self {
        let width = rect.width.max(0.0);
        let height = rect.height.max(0.0);
        Self::new(rect.x, page_height - (rect.y + height), width, height)
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Area shared with another rectangle (0 when disjoint).
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let w = self.right().min(other.right()) - self.left.max(other.left);
        let h = self.bottom().min(other.bottom()) - self.top.max(other.top);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }

    /// Euclidean distance between the closest points of two rectangles.
    ///
    /// Each axis contributes its separation, or zero when the ranges overlap.
    pub fn distance_to(&self, other: &Rect) -> f32 {
        let dx = (other.left - self.right()).max(self.left - other.right()).max(0.0);
        let dy = (other.top - self.bottom()).max(self.top - other.bottom()).max(0.0);
        (dx * dx + dy * dy).sqrt()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        Rect::new(
            left,
            top,
            self.right().max(other.right()) - left,
            self.bottom().max(other.bottom()) - top,
        )
    }
}

/// Serde helpers for distances that may be infinite.
///
/// JSON has no infinity literal, so `+∞` is written as `null`.
pub(crate) mod serde_distance {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::INFINITY))
    }
}
