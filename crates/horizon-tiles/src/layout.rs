//! Layout configuration for components.
//!
//! A [`Layout`] travels as a nested document under the [`Layout::ROOT_KEY`]
//! key of a component document:
//!
//! ```json
//! {
//!   "layout": {
//!     "span": 2.0,
//!     "items-per-row": 2,
//!     "item-spacing": 8.0,
//!     "inset": {"top": 10, "left": 10, "bottom": 10, "right": 10},
//!     "header-mode": "sticky"
//!   }
//! }
//! ```

use horizon_tiles_core::Document;
use serde_json::Value;

use crate::geometry::{Inset, same_f64};

mod keys {
    pub const SPAN: &str = "span";
    pub const DYNAMIC_SPAN: &str = "dynamic-span";
    pub const DYNAMIC_HEIGHT: &str = "dynamic-height";
    pub const ITEMS_PER_ROW: &str = "items-per-row";
    pub const ITEM_SPACING: &str = "item-spacing";
    pub const LINE_SPACING: &str = "line-spacing";
    pub const INSET: &str = "inset";
    pub const HEADER_MODE: &str = "header-mode";
    pub const PAGE_INDICATOR_PLACEMENT: &str = "page-indicator-placement";
    pub const INFINITE_SCROLLING: &str = "infinite-scrolling";
    pub const SHOW_EMPTY_COMPONENT: &str = "show-empty-component";
}

/// How a component's header behaves while scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeaderMode {
    /// The header scrolls with the content.
    #[default]
    Default,
    /// The header sticks to the top edge.
    Sticky,
}

impl HeaderMode {
    /// Returns the name used in documents.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HeaderMode::Default => "default",
            HeaderMode::Sticky => "sticky",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(HeaderMode::Default),
            "sticky" => Some(HeaderMode::Sticky),
            _ => None,
        }
    }
}

/// Where a carousel draws its page indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageIndicatorPlacement {
    /// Below the carousel content.
    Below,
    /// Overlaid on the carousel content.
    Overlay,
}

impl PageIndicatorPlacement {
    /// Returns the name used in documents.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PageIndicatorPlacement::Below => "below",
            PageIndicatorPlacement::Overlay => "overlay",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "below" => Some(PageIndicatorPlacement::Below),
            "overlay" => Some(PageIndicatorPlacement::Overlay),
            _ => None,
        }
    }
}

/// Sizing and spacing rules for a component's items.
#[derive(Debug, Clone)]
pub struct Layout {
    /// How many items fit across the visible width. 0.0 means "unset".
    pub span: f64,
    /// Whether `span` shrinks to the item count when there are fewer items.
    pub dynamic_span: bool,
    /// Whether the component grows to fit its content.
    pub dynamic_height: bool,
    /// Number of items per row in grids and carousels.
    pub items_per_row: usize,
    /// Horizontal spacing between items.
    pub item_spacing: f64,
    /// Vertical spacing between rows.
    pub line_spacing: f64,
    /// Padding around the content.
    pub inset: Inset,
    /// Header scrolling behaviour.
    pub header_mode: HeaderMode,
    /// Page indicator placement; `None` hides the indicator.
    pub page_indicator_placement: Option<PageIndicatorPlacement>,
    /// Whether a carousel wraps around at its ends.
    pub infinite_scrolling: bool,
    /// Whether the component is shown when it has no items.
    pub show_empty_component: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            span: 0.0,
            dynamic_span: false,
            dynamic_height: true,
            items_per_row: 1,
            item_spacing: 0.0,
            line_spacing: 0.0,
            inset: Inset::default(),
            header_mode: HeaderMode::default(),
            page_indicator_placement: None,
            infinite_scrolling: false,
            show_empty_component: false,
        }
    }
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        same_f64(self.span, other.span)
            && self.dynamic_span == other.dynamic_span
            && self.dynamic_height == other.dynamic_height
            && self.items_per_row == other.items_per_row
            && same_f64(self.item_spacing, other.item_spacing)
            && same_f64(self.line_spacing, other.line_spacing)
            && self.inset == other.inset
            && self.header_mode == other.header_mode
            && self.page_indicator_placement == other.page_indicator_placement
            && self.infinite_scrolling == other.infinite_scrolling
            && self.show_empty_component == other.show_empty_component
    }
}

impl Layout {
    /// The key a layout document is nested under in a component document.
    pub const ROOT_KEY: &'static str = "layout";

    /// Creates a default layout with the given span.
    pub fn with_span(span: f64) -> Self {
        Self {
            span,
            ..Default::default()
        }
    }

    /// Decodes a layout from its document form.
    ///
    /// Every missing or mistyped key keeps its default.
    pub fn from_document(doc: &Document) -> Self {
        let defaults = Self::default();
        Self {
            span: doc.f64(keys::SPAN).unwrap_or(defaults.span),
            dynamic_span: doc.bool(keys::DYNAMIC_SPAN).unwrap_or(defaults.dynamic_span),
            dynamic_height: doc
                .bool(keys::DYNAMIC_HEIGHT)
                .unwrap_or(defaults.dynamic_height),
            items_per_row: doc
                .usize(keys::ITEMS_PER_ROW)
                .unwrap_or(defaults.items_per_row),
            item_spacing: doc.f64(keys::ITEM_SPACING).unwrap_or(defaults.item_spacing),
            line_spacing: doc.f64(keys::LINE_SPACING).unwrap_or(defaults.line_spacing),
            inset: doc
                .document(keys::INSET)
                .map(|inset| Inset::from_document(&inset))
                .unwrap_or(defaults.inset),
            header_mode: doc
                .str(keys::HEADER_MODE)
                .and_then(HeaderMode::from_name)
                .unwrap_or(defaults.header_mode),
            page_indicator_placement: doc
                .str(keys::PAGE_INDICATOR_PLACEMENT)
                .and_then(PageIndicatorPlacement::from_name),
            infinite_scrolling: doc
                .bool(keys::INFINITE_SCROLLING)
                .unwrap_or(defaults.infinite_scrolling),
            show_empty_component: doc
                .bool(keys::SHOW_EMPTY_COMPONENT)
                .unwrap_or(defaults.show_empty_component),
        }
    }

    /// Returns the document form of this layout.
    pub fn document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(keys::SPAN, self.span);
        doc.insert(keys::DYNAMIC_SPAN, self.dynamic_span);
        doc.insert(keys::DYNAMIC_HEIGHT, self.dynamic_height);
        doc.insert(keys::ITEMS_PER_ROW, self.items_per_row);
        doc.insert(keys::ITEM_SPACING, self.item_spacing);
        doc.insert(keys::LINE_SPACING, self.line_spacing);
        doc.insert(keys::INSET, self.inset.to_json());
        doc.insert(keys::HEADER_MODE, self.header_mode.as_str());
        if let Some(placement) = self.page_indicator_placement {
            doc.insert(keys::PAGE_INDICATOR_PLACEMENT, placement.as_str());
        }
        doc.insert(keys::INFINITE_SCROLLING, self.infinite_scrolling);
        doc.insert(keys::SHOW_EMPTY_COMPONENT, self.show_empty_component);
        doc
    }

    /// Returns a copy of this layout with `span` replaced.
    pub fn configured_with_span(&self, span: f64) -> Self {
        Self {
            span,
            ..self.clone()
        }
    }
}

impl From<Layout> for Value {
    fn from(layout: Layout) -> Self {
        layout.document().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = Layout::default();
        assert_eq!(layout.span, 0.0);
        assert_eq!(layout.items_per_row, 1);
        assert!(layout.dynamic_height);
        assert!(layout.page_indicator_placement.is_none());
    }

    #[test]
    fn test_decode_full_layout() {
        let doc = Document::parse(
            r#"{
                "span": 2.5,
                "dynamic-span": true,
                "items-per-row": 3,
                "item-spacing": 8,
                "line-spacing": 4.5,
                "inset": {"top": 10, "left": 5},
                "header-mode": "sticky",
                "page-indicator-placement": "overlay",
                "infinite-scrolling": true
            }"#,
        )
        .unwrap();

        let layout = Layout::from_document(&doc);
        assert_eq!(layout.span, 2.5);
        assert!(layout.dynamic_span);
        assert_eq!(layout.items_per_row, 3);
        assert_eq!(layout.item_spacing, 8.0);
        assert_eq!(layout.line_spacing, 4.5);
        assert_eq!(layout.inset, Inset::new(10.0, 5.0, 0.0, 0.0));
        assert_eq!(layout.header_mode, HeaderMode::Sticky);
        assert_eq!(
            layout.page_indicator_placement,
            Some(PageIndicatorPlacement::Overlay)
        );
        assert!(layout.infinite_scrolling);
        assert!(!layout.show_empty_component);
    }

    #[test]
    fn test_decode_ignores_bad_values() {
        let doc = Document::parse(
            r#"{"span": "wide", "items-per-row": -1, "header-mode": "floating"}"#,
        )
        .unwrap();
        assert_eq!(Layout::from_document(&doc), Layout::default());
    }

    #[test]
    fn test_document_roundtrip() {
        let layout = Layout {
            span: 3.0,
            items_per_row: 2,
            inset: Inset::uniform(12.0),
            page_indicator_placement: Some(PageIndicatorPlacement::Below),
            show_empty_component: true,
            ..Default::default()
        };
        assert_eq!(Layout::from_document(&layout.document()), layout);
    }

    #[test]
    fn test_nan_span_equals_itself() {
        let layout = Layout::with_span(f64::NAN);
        assert_eq!(layout, layout.clone());
        assert_ne!(layout, Layout::with_span(1.0));
    }

    #[test]
    fn test_configured_with_span_copies() {
        let layout = Layout::with_span(1.0);
        let wider = layout.configured_with_span(4.0);
        assert_eq!(layout.span, 1.0);
        assert_eq!(wider.span, 4.0);
        assert_eq!(wider.items_per_row, layout.items_per_row);
    }
}
