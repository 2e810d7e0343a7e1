//! The component model and its document marshalling.
//!
//! A [`ComponentModel`] is the declarative description of one UI component:
//! what kind of container it is, how it is laid out, and which items it
//! shows. Models are built from JSON documents, persisted back to them, and
//! compared against newer versions to decide how much of the UI to refresh
//! (see [`ComponentModel::compare`]).
//!
//! # Decoding
//!
//! ```
//! use horizon_tiles::{ComponentKind, ComponentModel};
//!
//! let model = ComponentModel::from_json_str(r#"{
//!     "identifier": "featured",
//!     "kind": "carousel",
//!     "span": 2.5,
//!     "items": [{"title": "One"}, {"title": "Two"}]
//! }"#)?;
//!
//! assert_eq!(model.kind, ComponentKind::Carousel);
//! assert_eq!(model.span(), 2.5);
//! assert_eq!(model.items.len(), 2);
//! # Ok::<(), horizon_tiles::DocumentError>(())
//! ```
//!
//! Decoding never fails. Every key has a default, so an empty or malformed
//! document yields a default `list` model.

use horizon_tiles_core::logging::targets;
use horizon_tiles_core::{Document, DocumentError, FromMetaValue, Meta, tiles_trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::Size;
use crate::interaction::Interaction;
use crate::item::Item;
use crate::kind::ComponentKind;
use crate::layout::Layout;

mod keys {
    pub const IDENTIFIER: &str = "identifier";
    pub const INDEX: &str = "index";
    pub const KIND: &str = "kind";
    pub const HEADER: &str = "header";
    pub const FOOTER: &str = "footer";
    pub const ITEMS: &str = "items";
    pub const META: &str = "meta";
    pub const SIZE: &str = "size";
    pub const SPAN: &str = "span";
    pub const COMPONENTS: &str = "components";
}

/// Declarative description of one UI component's configuration and content.
///
/// Two equality relations are provided:
///
/// - [`equals_shallow`](Self::equals_shallow) (also `==`) compares the
///   wrapper fields only: identifier, header, footer, kind, layout and meta.
/// - [`equals_deep`](Self::equals_deep) additionally compares item content
///   and every nested child component.
///
/// In-place mutators (`add_child`, `set_layout`, `set_span`) change the
/// receiver. Methods prefixed with `with_` or `configured_` return a
/// modified copy and leave the receiver untouched.
#[derive(Debug, Clone, Default)]
pub struct ComponentModel {
    /// Stable key for this component instance.
    pub identifier: Option<String>,
    /// Position among sibling components. Maintained by the owner of the
    /// component list and never read back from documents.
    pub index: usize,
    /// Container kind.
    pub kind: ComponentKind,
    /// Optional header item.
    pub header: Option<Item>,
    /// Optional footer item.
    pub footer: Option<Item>,
    /// Optional layout; see [`span`](Self::span).
    pub layout: Option<Layout>,
    /// Interaction rules.
    pub interaction: Interaction,
    /// Content items, in display order.
    pub items: Vec<Item>,
    /// Preferred size; zero lets the host decide.
    pub size: Size,
    /// Open extension bag.
    pub meta: Meta,
}

impl ComponentModel {
    /// Creates an empty model of the given kind.
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    // ========================================================================
    // Fluent Copies
    // ========================================================================

    /// Returns a copy with `identifier` replaced.
    pub fn with_identifier(&self, identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            ..self.clone()
        }
    }

    /// Returns a copy with `items` replaced.
    pub fn with_items(&self, items: Vec<Item>) -> Self {
        Self {
            items,
            ..self.clone()
        }
    }

    /// Returns a copy with `layout` replaced.
    pub fn configured_with(&self, layout: Layout) -> Self {
        Self {
            layout: Some(layout),
            ..self.clone()
        }
    }

    /// Returns a copy with `child` appended as a composite item.
    pub fn with_child(&self, child: &ComponentModel) -> Self {
        let mut model = self.clone();
        model.add_child(child);
        model
    }

    /// Returns a copy with each of `children` appended as a composite item.
    pub fn with_children(&self, children: &[ComponentModel]) -> Self {
        let mut model = self.clone();
        model.add_children(children);
        model
    }

    // ========================================================================
    // In-Place Mutators
    // ========================================================================

    /// Appends `child` as a composite item carrying its document.
    pub fn add_child(&mut self, child: &ComponentModel) {
        self.items.push(Item::composite(vec![child.document()]));
    }

    /// Appends each of `children`, in order, as a composite item.
    pub fn add_children(&mut self, children: &[ComponentModel]) {
        for child in children {
            self.add_child(child);
        }
    }

    /// Replaces the layout.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = Some(layout);
    }

    /// Returns the layout span, or 0.0 when there is no layout.
    pub fn span(&self) -> f64 {
        self.layout.as_ref().map_or(0.0, |layout| layout.span)
    }

    /// Sets the layout span, creating a default layout if there is none.
    pub fn set_span(&mut self, span: f64) {
        match &mut self.layout {
            Some(layout) => layout.span = span,
            None => self.layout = Some(Layout::with_span(span)),
        }
    }

    // ========================================================================
    // Meta Accessors
    // ========================================================================

    /// Reads `key` from the meta bag as `T`, or returns `default`.
    pub fn meta<T: FromMetaValue>(&self, key: &str, default: T) -> T {
        self.meta.get_or(key, default)
    }

    /// Reads `key` from the meta bag as `T`.
    ///
    /// Returns `None` if the key is missing or holds a different type.
    pub fn meta_value<T: FromMetaValue>(&self, key: &str) -> Option<T> {
        self.meta.get(key)
    }

    // ========================================================================
    // Decoding
    // ========================================================================

    /// Decodes a model from its document form. Never fails.
    pub fn from_document(doc: &Document) -> Self {
        let kind = match doc.str(keys::KIND) {
            Some(name) => name.parse().unwrap_or_else(|err| {
                tiles_trace!(targets::MODEL, %err, "falling back to default kind");
                ComponentKind::default()
            }),
            None => ComponentKind::default(),
        };

        let mut model = Self {
            identifier: doc.str(keys::IDENTIFIER).map(str::to_string),
            index: 0,
            kind,
            header: doc
                .document(keys::HEADER)
                .map(|header| Item::from_document(&header)),
            footer: doc
                .document(keys::FOOTER)
                .map(|footer| Item::from_document(&footer)),
            layout: doc
                .document(Layout::ROOT_KEY)
                .map(|layout| Layout::from_document(&layout)),
            interaction: doc
                .document(Interaction::ROOT_KEY)
                .map(|interaction| Interaction::from_document(&interaction))
                .unwrap_or_default(),
            items: doc
                .documents(keys::ITEMS)
                .iter()
                .map(Item::from_document)
                .collect(),
            size: Size::from_document_key(doc, keys::SIZE),
            meta: doc.get(keys::META).map(Meta::from_json).unwrap_or_default(),
        };

        // Documents written before layouts were structured carry a flat span.
        if model.layout.is_none()
            && let Some(span) = doc.f64(keys::SPAN)
        {
            tiles_trace!(targets::MODEL, span, "reading legacy flat span");
            model.set_span(span);
        }

        model
    }

    /// Parses a JSON string and decodes a model from it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the text is not a JSON object; the decoding
    /// itself never fails.
    pub fn from_json_str(s: &str) -> Result<Self, DocumentError> {
        Document::parse(s).map(|doc| Self::from_document(&doc))
    }

    /// Decodes one model per document, preserving order.
    pub fn from_documents(docs: &[Document]) -> Vec<Self> {
        docs.iter().map(Self::from_document).collect()
    }

    /// Decodes the `"components"` array of a page document.
    ///
    /// Each decoded model's `index` is set to its position in the array.
    pub fn list_from_document(doc: &Document) -> Vec<Self> {
        doc.documents(keys::COMPONENTS)
            .iter()
            .enumerate()
            .map(|(index, component)| Self {
                index,
                ..Self::from_document(component)
            })
            .collect()
    }

    /// Returns a page document holding `models` under `"components"`.
    pub fn list_document(models: &[ComponentModel]) -> Document {
        let components: Vec<Value> = models.iter().map(|model| model.document().into()).collect();
        let mut doc = Document::new();
        doc.insert(keys::COMPONENTS, components);
        doc
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    /// Returns the full document form of this model.
    pub fn document(&self) -> Document {
        self.to_document(None)
    }

    /// Returns the document form of this model, keeping at most
    /// `amount_of_items` items (all of them when `None`).
    ///
    /// Items are taken from the front of the list.
    pub fn to_document(&self, amount_of_items: Option<usize>) -> Document {
        let count = amount_of_items.map_or(self.items.len(), |n| n.min(self.items.len()));
        let items: Vec<Value> = self.items[..count].iter().map(Value::from).collect();

        let mut doc = Document::new();
        doc.insert(keys::INDEX, self.index);
        doc.insert(keys::KIND, self.kind.as_str());
        doc.insert(keys::SIZE, self.size.to_json());
        doc.insert(keys::ITEMS, items);

        if let Some(layout) = &self.layout {
            doc.insert(Layout::ROOT_KEY, layout.document());
        }
        doc.insert(Interaction::ROOT_KEY, self.interaction.document());

        if let Some(identifier) = &self.identifier {
            doc.insert(keys::IDENTIFIER, identifier.as_str());
        }
        if let Some(header) = &self.header {
            doc.insert(keys::HEADER, header.document());
        }
        if let Some(footer) = &self.footer {
            doc.insert(keys::FOOTER, footer.document());
        }
        if !self.meta.is_empty() {
            doc.insert(keys::META, self.meta.to_json());
        }

        doc
    }

    /// Serializes the full document form to a compact JSON string.
    pub fn to_json_string(&self) -> String {
        self.document().to_json_string()
    }

    // ========================================================================
    // Equality
    // ========================================================================

    /// Compares identifier, header, footer, kind, layout and meta.
    ///
    /// Items are not compared.
    pub fn equals_shallow(&self, other: &ComponentModel) -> bool {
        self.identifier == other.identifier
            && self.header == other.header
            && self.footer == other.footer
            && self.kind == other.kind
            && self.layout == other.layout
            && self.meta == other.meta
    }

    /// Shallow equality plus item content and all nested child components.
    ///
    /// Child documents of every item are decoded as components and compared
    /// positionally, recursively. Decoding never fails, so both sides yield
    /// exactly one child model per child document.
    pub fn equals_deep(&self, other: &ComponentModel) -> bool {
        self.equals_shallow(other)
            && models_equal_deep(&self.child_models(), &other.child_models())
            && self.items == other.items
    }

    /// Decodes the children of every item, in item order.
    pub fn child_models(&self) -> Vec<ComponentModel> {
        self.items
            .iter()
            .flat_map(|item| item.children.iter())
            .map(Self::from_document)
            .collect()
    }
}

impl PartialEq for ComponentModel {
    fn eq(&self, other: &Self) -> bool {
        self.equals_shallow(other)
    }
}

impl From<&ComponentModel> for Value {
    fn from(model: &ComponentModel) -> Self {
        model.document().into()
    }
}

impl Serialize for ComponentModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.document().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ComponentModel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Document::deserialize(deserializer).map(|doc| Self::from_document(&doc))
    }
}

/// Returns true if both sequences have the same length and every positional
/// pair is [deep-equal](ComponentModel::equals_deep).
pub fn models_equal_deep(lhs: &[ComponentModel], rhs: &[ComponentModel]) -> bool {
    lhs.len() == rhs.len()
        && lhs
            .iter()
            .zip(rhs)
            .all(|(left, right)| left.equals_deep(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::Paginate;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    #[test]
    fn test_decode_empty_document() {
        let model = ComponentModel::from_document(&Document::new());
        assert_eq!(model.kind, ComponentKind::List);
        assert_eq!(model.index, 0);
        assert!(model.identifier.is_none());
        assert!(model.items.is_empty());
        assert!(model.size.is_zero());
        assert!(model.meta.is_empty());
        assert!(model.layout.is_none());
        assert_eq!(model.interaction, Interaction::default());
        assert_eq!(model.span(), 0.0);
    }

    #[test]
    fn test_decode_malformed_document() {
        let model = ComponentModel::from_document(&doc(json!({
            "identifier": 42,
            "kind": "table",
            "header": "not a document",
            "items": {"title": "not an array"},
            "meta": [1, 2],
            "layout": 3,
            "size": {"width": "wide"}
        })));

        assert!(model.identifier.is_none());
        assert_eq!(model.kind, ComponentKind::List);
        assert!(model.header.is_none());
        assert!(model.items.is_empty());
        assert!(model.meta.is_empty());
        assert!(model.layout.is_none());
        assert!(model.size.is_zero());
    }

    #[test]
    fn test_decode_full_document() {
        let model = ComponentModel::from_document(&doc(json!({
            "identifier": "featured",
            "index": 7,
            "kind": "grid",
            "header": {"title": "Header"},
            "footer": {"title": "Footer"},
            "layout": {"span": 3, "items-per-row": 3},
            "interaction": {"paginate": "by-page"},
            "items": [{"title": "a"}, 1, {"title": "b"}],
            "size": {"width": 320, "height": 200.5},
            "meta": {"columns": 3}
        })));

        assert_eq!(model.identifier.as_deref(), Some("featured"));
        assert_eq!(model.index, 0);
        assert_eq!(model.kind, ComponentKind::Grid);
        assert_eq!(model.header.as_ref().map(|h| h.title.as_str()), Some("Header"));
        assert_eq!(model.footer.as_ref().map(|f| f.title.as_str()), Some("Footer"));
        assert_eq!(model.span(), 3.0);
        assert_eq!(model.layout.as_ref().map(|l| l.items_per_row), Some(3));
        assert_eq!(model.interaction.paginate, Paginate::ByPage);
        assert_eq!(model.items.len(), 2);
        assert_eq!(model.items[1].title, "b");
        assert_eq!(model.size, Size::new(320.0, 200.5));
        assert_eq!(model.meta::<i64>("columns", 1), 3);
    }

    #[test]
    fn test_flat_span_fallback() {
        let model = ComponentModel::from_document(&doc(json!({"span": 2.5})));
        assert_eq!(model.layout.as_ref().map(|l| l.span), Some(2.5));

        let model = ComponentModel::from_document(&doc(json!({
            "span": 2.5,
            "layout": {"span": 4.0}
        })));
        assert_eq!(model.span(), 4.0);
    }

    #[test]
    fn test_set_span_creates_layout() {
        let mut model = ComponentModel::default();
        assert!(model.layout.is_none());

        model.set_span(2.0);
        assert_eq!(model.layout, Some(Layout::with_span(2.0)));

        model.set_layout(Layout {
            items_per_row: 4,
            ..Layout::default()
        });
        model.set_span(6.0);
        assert_eq!(model.span(), 6.0);
        assert_eq!(model.layout.as_ref().map(|l| l.items_per_row), Some(4));
    }

    #[test]
    fn test_encode_always_and_conditional_keys() {
        let doc = ComponentModel::default().document();
        for key in ["index", "kind", "size", "items", "interaction"] {
            assert!(doc.contains_key(key), "missing {key}");
        }
        for key in ["layout", "identifier", "header", "footer", "meta"] {
            assert!(!doc.contains_key(key), "unexpected {key}");
        }
        assert_eq!(doc.str("kind"), Some("list"));
        assert_eq!(doc.f64("size.width"), Some(0.0));
    }

    #[test]
    fn test_encode_caps_items() {
        let model = ComponentModel::default().with_items(vec![
            Item::new("first"),
            Item::new("second"),
            Item::new("third"),
        ]);

        let capped = model.to_document(Some(1));
        let items = capped.documents("items");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].str("title"), Some("first"));

        assert_eq!(model.to_document(Some(0)).documents("items").len(), 0);
        assert_eq!(model.to_document(Some(10)).documents("items").len(), 3);
        assert_eq!(model.document().documents("items").len(), 3);
    }

    #[test]
    fn test_roundtrip() {
        let mut model = ComponentModel::new(ComponentKind::Carousel)
            .with_identifier("hero")
            .configured_with(Layout::with_span(1.5))
            .with_items(vec![Item::new("one"), Item::new("two").with_kind("card")]);
        model.header = Some(Item::new("Top"));
        model.interaction = Interaction::with_paginate(Paginate::ByItem);
        model.size = Size::new(375.0, 180.0);
        model.meta.insert("autoplay", true);

        let decoded = ComponentModel::from_document(&model.document());
        assert!(decoded.equals_shallow(&model));
        assert!(decoded.equals_deep(&model));
        assert_eq!(decoded.interaction, model.interaction);
        assert_eq!(decoded.size, model.size);
    }

    #[test]
    fn test_roundtrip_drops_only_index() {
        let mut model = ComponentModel::new(ComponentKind::Row)
            .with_identifier("strip")
            .with_items(vec![Item::new("a")]);
        model.index = 4;
        model.footer = Some(Item::new("More"));
        model.size = Size::new(0.0, 64.0);
        model.interaction = Interaction::with_paginate(Paginate::ByPage);

        let decoded = ComponentModel::from_document(&model.document());
        assert_eq!(decoded.index, 0);
        assert!(decoded.equals_deep(&model));
        assert_eq!(decoded.size, model.size);
        assert_eq!(decoded.interaction, model.interaction);
        assert_eq!(decoded.items, model.items);
    }

    #[test]
    fn test_add_children_appends_in_order() {
        let first = ComponentModel::new(ComponentKind::Row).with_identifier("c1");
        let second = ComponentModel::new(ComponentKind::Grid).with_identifier("c2");

        let mut parent = ComponentModel::default().with_items(vec![Item::new("existing")]);
        parent.add_children(&[first.clone(), second.clone()]);

        assert_eq!(parent.items.len(), 3);
        assert!(parent.items[1].is_composite());
        assert!(parent.items[2].is_composite());
        assert_eq!(parent.items[1].children, vec![first.document()]);
        assert_eq!(parent.items[2].children, vec![second.document()]);

        let children = parent.child_models();
        assert_eq!(children.len(), 2);
        assert!(children[0].equals_deep(&first));
        assert!(children[1].equals_deep(&second));
    }

    #[test]
    fn test_fluent_copies_leave_receiver_untouched() {
        let child = ComponentModel::new(ComponentKind::Row);
        let original = ComponentModel::default();

        let with_child = original.with_child(&child);
        let configured = original.configured_with(Layout::with_span(3.0));

        assert!(original.items.is_empty());
        assert!(original.layout.is_none());
        assert_eq!(with_child.items.len(), 1);
        assert_eq!(configured.span(), 3.0);
    }

    #[test]
    fn test_shallow_and_deep_equality_diverge() {
        let base = ComponentModel::new(ComponentKind::List).with_identifier("feed");
        let lhs = base.with_child(&ComponentModel::new(ComponentKind::Row).with_identifier("a"));
        let rhs = base.with_child(&ComponentModel::new(ComponentKind::Row).with_identifier("b"));

        assert!(lhs.equals_shallow(&rhs));
        assert_eq!(lhs, rhs);
        assert!(!lhs.equals_deep(&rhs));
    }

    #[test]
    fn test_deep_equality_compares_items() {
        let lhs = ComponentModel::default().with_items(vec![Item::new("a")]);
        let rhs = ComponentModel::default().with_items(vec![Item::new("b")]);

        assert!(lhs.equals_shallow(&rhs));
        assert!(!lhs.equals_deep(&rhs));
        assert!(lhs.equals_deep(&lhs.clone()));
    }

    #[test]
    fn test_list_document_roundtrip() {
        let models = vec![
            ComponentModel::new(ComponentKind::Carousel).with_identifier("top"),
            ComponentModel::new(ComponentKind::List).with_identifier("feed"),
        ];

        let page = ComponentModel::list_document(&models);
        let decoded = ComponentModel::list_from_document(&page);

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0], models[0]);
        assert_eq!(decoded[1], models[1]);
        assert_eq!(decoded[1].index, 1);
    }

    #[test]
    fn test_serde_through_document() {
        let model = ComponentModel::new(ComponentKind::Grid).with_identifier("grid");
        let text = serde_json::to_string(&model).unwrap();
        let back: ComponentModel = serde_json::from_str(&text).unwrap();
        assert!(back.equals_deep(&model));

        let err = ComponentModel::from_json_str("[]").unwrap_err();
        assert!(matches!(err, DocumentError::NotAnObject { .. }));
    }
}
