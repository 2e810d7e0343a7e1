//! User interaction rules for components.

use horizon_tiles_core::Document;

mod keys {
    pub const PAGINATE: &str = "paginate";
    pub const MOUSE_CLICK: &str = "mouse-click";
}

/// How a scrolling component snaps when the user lifts their finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Paginate {
    /// Free scrolling.
    #[default]
    Disabled,
    /// Snap to whole pages.
    ByPage,
    /// Snap to item boundaries.
    ByItem,
}

impl Paginate {
    /// Returns the name used in documents.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Paginate::Disabled => "disabled",
            Paginate::ByPage => "by-page",
            Paginate::ByItem => "by-item",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "disabled" => Some(Paginate::Disabled),
            "by-page" => Some(Paginate::ByPage),
            "by-item" => Some(Paginate::ByItem),
            _ => None,
        }
    }
}

/// Which click gesture selects an item on pointer-driven platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseClick {
    /// A single click selects.
    #[default]
    Single,
    /// A double click selects.
    Double,
}

impl MouseClick {
    /// Returns the name used in documents.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MouseClick::Single => "single",
            MouseClick::Double => "double",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "single" => Some(MouseClick::Single),
            "double" => Some(MouseClick::Double),
            _ => None,
        }
    }
}

/// Interaction rules for a component. Always present on a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Interaction {
    /// Scroll snapping behaviour.
    pub paginate: Paginate,
    /// Selection gesture.
    pub mouse_click: MouseClick,
}

impl Interaction {
    /// The key an interaction document is nested under in a component document.
    pub const ROOT_KEY: &'static str = "interaction";

    /// Creates interaction rules with the given pagination.
    pub fn with_paginate(paginate: Paginate) -> Self {
        Self {
            paginate,
            ..Default::default()
        }
    }

    /// Decodes interaction rules, defaulting unknown values.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            paginate: doc
                .str(keys::PAGINATE)
                .and_then(Paginate::from_name)
                .unwrap_or_default(),
            mouse_click: doc
                .str(keys::MOUSE_CLICK)
                .and_then(MouseClick::from_name)
                .unwrap_or_default(),
        }
    }

    /// Returns the document form of these rules.
    pub fn document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(keys::PAGINATE, self.paginate.as_str());
        doc.insert(keys::MOUSE_CLICK, self.mouse_click.as_str());
        doc
    }
}
