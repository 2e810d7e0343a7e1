//! Geometry value types shared by components, items and layouts.

use horizon_tiles_core::Document;
use serde_json::json;

/// Float equality under which NaN equals NaN, so every value equals itself.
pub(crate) fn same_f64(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// A width/height pair in points.
#[derive(Debug, Clone, Copy, Default)]
pub struct Size {
    /// The width.
    pub width: f64,
    /// The height.
    pub height: f64,
}

impl Size {
    /// A size with zero width and height.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if both dimensions are zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Reads a size nested under `key` in `doc`.
    ///
    /// Each dimension falls back to 0.0 independently when it is missing or
    /// not a number.
    pub fn from_document_key(doc: &Document, key: &str) -> Self {
        Self {
            width: doc.f64(&format!("{key}.width")).unwrap_or(0.0),
            height: doc.f64(&format!("{key}.height")).unwrap_or(0.0),
        }
    }

    /// Returns the `{"width", "height"}` document for this size.
    pub fn to_json(&self) -> serde_json::Value {
        json!({ "width": self.width, "height": self.height })
    }
}

impl PartialEq for Size {
    fn eq(&self, other: &Self) -> bool {
        same_f64(self.width, other.width) && same_f64(self.height, other.height)
    }
}

/// Edge insets, used for layout padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inset {
    /// Inset from the top edge.
    pub top: f64,
    /// Inset from the left edge.
    pub left: f64,
    /// Inset from the bottom edge.
    pub bottom: f64,
    /// Inset from the right edge.
    pub right: f64,
}

impl Inset {
    /// Creates a new inset.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Creates an inset with the same value on every edge.
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Reads an inset from its document form, defaulting missing edges to 0.0.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            top: doc.f64("top").unwrap_or(0.0),
            left: doc.f64("left").unwrap_or(0.0),
            bottom: doc.f64("bottom").unwrap_or(0.0),
            right: doc.f64("right").unwrap_or(0.0),
        }
    }

    /// Returns the document form of this inset.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "top": self.top,
            "left": self.left,
            "bottom": self.bottom,
            "right": self.right,
        })
    }
}

impl PartialEq for Inset {
    fn eq(&self, other: &Self) -> bool {
        same_f64(self.top, other.top)
            && same_f64(self.left, other.left)
            && same_f64(self.bottom, other.bottom)
            && same_f64(self.right, other.right)
    }
}
