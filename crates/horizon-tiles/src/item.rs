//! Items: the content elements of a component.

use horizon_tiles_core::{Document, Meta};
use serde_json::Value;

use crate::geometry::Size;

mod keys {
    pub const IDENTIFIER: &str = "identifier";
    pub const TITLE: &str = "title";
    pub const SUBTITLE: &str = "subtitle";
    pub const TEXT: &str = "text";
    pub const IMAGE: &str = "image";
    pub const KIND: &str = "kind";
    pub const ACTION: &str = "action";
    pub const SIZE: &str = "size";
    pub const META: &str = "meta";
    pub const CHILDREN: &str = "children";
}

/// A single piece of content inside a component.
///
/// `kind` selects the view an item is rendered with. `children` holds raw
/// nested documents; for composite items these are component documents.
///
/// `PartialEq` is full structural equality, children included. Use
/// [`Item::equals_shallow`] to compare everything except children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    /// Stable key for this item.
    pub identifier: Option<String>,
    /// Primary text.
    pub title: String,
    /// Secondary text.
    pub subtitle: String,
    /// Body text.
    pub text: String,
    /// Image name or URL.
    pub image: String,
    /// View kind used to render this item.
    pub kind: String,
    /// Action URI triggered on selection.
    pub action: Option<String>,
    /// Preferred size; zero lets the layout decide.
    pub size: Size,
    /// Open extension bag.
    pub meta: Meta,
    /// Nested raw documents.
    pub children: Vec<Document>,
}

impl Item {
    /// The reserved kind of items that wrap a nested component.
    pub const COMPOSITE_KIND: &'static str = "composite";

    /// Creates an item with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Creates a composite item carrying `children` as nested component documents.
    pub fn composite(children: Vec<Document>) -> Self {
        Self {
            kind: Self::COMPOSITE_KIND.to_string(),
            children,
            ..Default::default()
        }
    }

    /// Returns a copy with `kind` replaced.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Returns a copy with `identifier` replaced.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Returns a copy with `children` replaced.
    pub fn with_children(mut self, children: Vec<Document>) -> Self {
        self.children = children;
        self
    }

    /// Returns true if this item wraps nested components.
    pub fn is_composite(&self) -> bool {
        self.kind == Self::COMPOSITE_KIND
    }

    /// Decodes an item from its document form.
    ///
    /// Missing or mistyped keys keep their defaults; `children` elements
    /// that are not documents are dropped.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            identifier: doc.str(keys::IDENTIFIER).map(str::to_string),
            title: doc.str(keys::TITLE).unwrap_or_default().to_string(),
            subtitle: doc.str(keys::SUBTITLE).unwrap_or_default().to_string(),
            text: doc.str(keys::TEXT).unwrap_or_default().to_string(),
            image: doc.str(keys::IMAGE).unwrap_or_default().to_string(),
            kind: doc.str(keys::KIND).unwrap_or_default().to_string(),
            action: doc.str(keys::ACTION).map(str::to_string),
            size: Size::from_document_key(doc, keys::SIZE),
            meta: doc.get(keys::META).map(Meta::from_json).unwrap_or_default(),
            children: doc.documents(keys::CHILDREN),
        }
    }

    /// Returns the document form of this item.
    pub fn document(&self) -> Document {
        let mut doc = Document::new();
        if let Some(identifier) = &self.identifier {
            doc.insert(keys::IDENTIFIER, identifier.as_str());
        }
        doc.insert(keys::TITLE, self.title.as_str());
        doc.insert(keys::SUBTITLE, self.subtitle.as_str());
        doc.insert(keys::TEXT, self.text.as_str());
        doc.insert(keys::IMAGE, self.image.as_str());
        doc.insert(keys::KIND, self.kind.as_str());
        if let Some(action) = &self.action {
            doc.insert(keys::ACTION, action.as_str());
        }
        doc.insert(keys::SIZE, self.size.to_json());
        if !self.meta.is_empty() {
            doc.insert(keys::META, self.meta.to_json());
        }
        if !self.children.is_empty() {
            let children: Vec<Value> = self.children.iter().cloned().map(Value::from).collect();
            doc.insert(keys::CHILDREN, children);
        }
        doc
    }

    /// Compares every field except `children`.
    pub fn equals_shallow(&self, other: &Item) -> bool {
        self.identifier == other.identifier
            && self.title == other.title
            && self.subtitle == other.subtitle
            && self.text == other.text
            && self.image == other.image
            && self.kind == other.kind
            && self.action == other.action
            && self.size == other.size
            && self.meta == other.meta
    }
}

impl From<&Item> for Value {
    fn from(item: &Item) -> Self {
        item.document().into()
    }
}

/// Returns true if both sequences have the same length and every positional
/// pair is [shallow-equal](Item::equals_shallow).
pub fn items_equal_shallow(lhs: &[Item], rhs: &[Item]) -> bool {
    lhs.len() == rhs.len()
        && lhs
            .iter()
            .zip(rhs)
            .all(|(left, right)| left.equals_shallow(right))
}
