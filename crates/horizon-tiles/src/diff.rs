//! Difference classification between component models and items.
//!
//! When a new page arrives, each component is compared against the one
//! currently on screen. The result tells the host how much work the update
//! needs: nothing, a targeted refresh (header, items, ...), or a full
//! rebuild of the component.
//!
//! Component comparison reports only the single most significant
//! difference, checked in this order:
//!
//! | Order | Outcome                              | Condition                             |
//! |-------|--------------------------------------|---------------------------------------|
//! | 1     | [`ComponentModelDiff::Kind`]         | kinds differ                          |
//! | 2     | [`ComponentModelDiff::Identifier`]   | identifiers differ                    |
//! | 3     | [`ComponentModelDiff::Layout`]       | layouts differ                        |
//! | 4     | [`ComponentModelDiff::Header`]       | headers differ                        |
//! | 5     | [`ComponentModelDiff::Footer`]       | footers differ                        |
//! | 6     | [`ComponentModelDiff::Meta`]         | meta bags differ                      |
//! | 7     | [`ComponentModelDiff::Items`]        | items differ shallowly                |
//! | 8     | [`ComponentModelDiff::Items`]        | flattened item children differ        |
//! | 9     | [`ComponentModelDiff::Unchanged`]    | otherwise                             |
//!
//! [`diff_components`] and [`diff_items`] extend this to whole sequences,
//! reporting `New` and `Removed` for entries present on one side only.

use std::fmt;

use horizon_tiles_core::logging::targets;
use horizon_tiles_core::{Document, tiles_debug};

use crate::component::ComponentModel;
use crate::item::{Item, items_equal_shallow};

/// The most significant difference between two component models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentModelDiff {
    /// The kind changed.
    Kind,
    /// The identifier changed.
    Identifier,
    /// The layout changed.
    Layout,
    /// The header changed.
    Header,
    /// The footer changed.
    Footer,
    /// The meta bag changed.
    Meta,
    /// The items or their nested children changed.
    Items,
    /// The component is new.
    New,
    /// The component was removed.
    Removed,
    /// Nothing relevant changed.
    Unchanged,
}

impl ComponentModelDiff {
    /// Returns true if nothing changed.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, ComponentModelDiff::Unchanged)
    }

    /// Returns true if the component has to be rebuilt rather than updated
    /// in place.
    pub fn requires_rebuild(&self) -> bool {
        matches!(
            self,
            ComponentModelDiff::Kind
                | ComponentModelDiff::Identifier
                | ComponentModelDiff::New
                | ComponentModelDiff::Removed
        )
    }

    /// Returns a short lowercase label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ComponentModelDiff::Kind => "kind",
            ComponentModelDiff::Identifier => "identifier",
            ComponentModelDiff::Layout => "layout",
            ComponentModelDiff::Header => "header",
            ComponentModelDiff::Footer => "footer",
            ComponentModelDiff::Meta => "meta",
            ComponentModelDiff::Items => "items",
            ComponentModelDiff::New => "new",
            ComponentModelDiff::Removed => "removed",
            ComponentModelDiff::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for ComponentModelDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ComponentModel {
    /// Classifies the most significant difference between `self` (the
    /// current model) and `other` (its replacement).
    ///
    /// Header and footer are compared as optional values: a header present
    /// on only one side is a difference in either direction.
    pub fn compare(&self, other: &ComponentModel) -> ComponentModelDiff {
        let diff = self.classify(other);
        tiles_debug!(
            targets::DIFF,
            identifier = ?other.identifier,
            kind = %other.kind,
            outcome = %diff,
            "compared component models"
        );
        diff
    }

    fn classify(&self, other: &ComponentModel) -> ComponentModelDiff {
        if self.kind != other.kind {
            return ComponentModelDiff::Kind;
        }
        if self.identifier != other.identifier {
            return ComponentModelDiff::Identifier;
        }
        if self.layout != other.layout {
            return ComponentModelDiff::Layout;
        }
        if self.header != other.header {
            return ComponentModelDiff::Header;
        }
        if self.footer != other.footer {
            return ComponentModelDiff::Footer;
        }
        if self.meta != other.meta {
            return ComponentModelDiff::Meta;
        }
        if !items_equal_shallow(&self.items, &other.items) {
            return ComponentModelDiff::Items;
        }
        if flattened_children(&self.items) != flattened_children(&other.items) {
            return ComponentModelDiff::Items;
        }
        ComponentModelDiff::Unchanged
    }
}

fn flattened_children(items: &[Item]) -> Vec<&Document> {
    items.iter().flat_map(|item| item.children.iter()).collect()
}

/// Compares two component sequences position by position.
///
/// The result has one entry per position of the longer sequence. Positions
/// only `new` covers are [`New`](ComponentModelDiff::New); positions only
/// `old` covers are [`Removed`](ComponentModelDiff::Removed).
pub fn diff_components(old: &[ComponentModel], new: &[ComponentModel]) -> Vec<ComponentModelDiff> {
    let diffs: Vec<ComponentModelDiff> = (0..old.len().max(new.len()))
        .map(|index| match (old.get(index), new.get(index)) {
            (Some(current), Some(next)) => current.compare(next),
            (None, Some(_)) => ComponentModelDiff::New,
            _ => ComponentModelDiff::Removed,
        })
        .collect();

    tiles_debug!(
        targets::DIFF,
        old = old.len(),
        new = new.len(),
        changed = diffs.iter().filter(|diff| !diff.is_unchanged()).count(),
        "diffed component list"
    );
    diffs
}

/// The most significant difference between two items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemDiff {
    /// The identifier changed.
    Identifier,
    /// The view kind changed.
    Kind,
    /// The preferred size changed.
    Size,
    /// The title changed.
    Title,
    /// The subtitle changed.
    Subtitle,
    /// The body text changed.
    Text,
    /// The image changed.
    Image,
    /// The action changed.
    Action,
    /// The meta bag changed.
    Meta,
    /// The nested children changed.
    Children,
    /// The item is new.
    New,
    /// The item was removed.
    Removed,
    /// Nothing changed.
    Unchanged,
}

impl ItemDiff {
    /// Returns true if nothing changed.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, ItemDiff::Unchanged)
    }

    /// Returns true if the item's view has to be recreated because it is
    /// rendered by a different view or at a different size.
    pub fn requires_reload(&self) -> bool {
        matches!(self, ItemDiff::Kind | ItemDiff::Size)
    }
}

impl Item {
    /// Classifies the most significant difference between `self` and
    /// `other`.
    ///
    /// Fields are checked in the order identifier, kind, size, title,
    /// subtitle, text, image, action, meta, children.
    pub fn compare(&self, other: &Item) -> ItemDiff {
        if self.identifier != other.identifier {
            ItemDiff::Identifier
        } else if self.kind != other.kind {
            ItemDiff::Kind
        } else if self.size != other.size {
            ItemDiff::Size
        } else if self.title != other.title {
            ItemDiff::Title
        } else if self.subtitle != other.subtitle {
            ItemDiff::Subtitle
        } else if self.text != other.text {
            ItemDiff::Text
        } else if self.image != other.image {
            ItemDiff::Image
        } else if self.action != other.action {
            ItemDiff::Action
        } else if self.meta != other.meta {
            ItemDiff::Meta
        } else if self.children != other.children {
            ItemDiff::Children
        } else {
            ItemDiff::Unchanged
        }
    }
}

/// Compares two item sequences position by position.
///
/// Like [`diff_components`], the result covers the longer sequence and
/// reports surplus positions as `New` or `Removed`.
pub fn diff_items(old: &[Item], new: &[Item]) -> Vec<ItemDiff> {
    (0..old.len().max(new.len()))
        .map(|index| match (old.get(index), new.get(index)) {
            (Some(current), Some(next)) => current.compare(next),
            (None, Some(_)) => ItemDiff::New,
            _ => ItemDiff::Removed,
        })
        .collect()
}

/// Item positions grouped by the kind of update they need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    /// Positions of new items.
    pub insertions: Vec<usize>,
    /// Positions of removed items.
    pub deletions: Vec<usize>,
    /// Positions whose view must be recreated.
    pub reloads: Vec<usize>,
    /// Positions whose nested children changed.
    pub child_updates: Vec<usize>,
    /// Positions whose content can be refreshed in place.
    pub updates: Vec<usize>,
}

impl ItemChanges {
    /// Groups the output of [`diff_items`] by position.
    pub fn from_diffs(diffs: &[ItemDiff]) -> Self {
        let mut changes = Self::default();
        for (index, diff) in diffs.iter().enumerate() {
            match diff {
                ItemDiff::New => changes.insertions.push(index),
                ItemDiff::Removed => changes.deletions.push(index),
                ItemDiff::Kind | ItemDiff::Size => changes.reloads.push(index),
                ItemDiff::Children => changes.child_updates.push(index),
                ItemDiff::Unchanged => {}
                _ => changes.updates.push(index),
            }
        }
        changes
    }

    /// Diffs two item sequences and groups the result.
    pub fn between(old: &[Item], new: &[Item]) -> Self {
        Self::from_diffs(&diff_items(old, new))
    }

    /// Returns true if no position needs any update.
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty()
            && self.deletions.is_empty()
            && self.reloads.is_empty()
            && self.child_updates.is_empty()
            && self.updates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::kind::ComponentKind;
    use crate::layout::Layout;

    fn model() -> ComponentModel {
        ComponentModel::new(ComponentKind::List)
            .with_identifier("feed")
            .with_items(vec![Item::new("a"), Item::new("b")])
    }

    #[test]
    fn test_identical_models_are_unchanged() {
        let diff = model().compare(&model());
        assert_eq!(diff, ComponentModelDiff::Unchanged);
        assert!(diff.is_unchanged());
        assert!(!diff.requires_rebuild());
    }

    #[test]
    fn test_kind_outranks_everything() {
        let mut other = ComponentModel::new(ComponentKind::Grid)
            .with_identifier("other")
            .configured_with(Layout::with_span(3.0));
        other.header = Some(Item::new("header"));
        other.meta.insert("k", 1);

        let diff = model().compare(&other);
        assert_eq!(diff, ComponentModelDiff::Kind);
        assert!(diff.requires_rebuild());
    }

    #[test]
    fn test_precedence_order() {
        let base = model();

        let other = base.with_identifier("renamed").configured_with(Layout::with_span(2.0));
        assert_eq!(base.compare(&other), ComponentModelDiff::Identifier);

        let mut other = base.configured_with(Layout::with_span(2.0));
        other.header = Some(Item::new("h"));
        assert_eq!(base.compare(&other), ComponentModelDiff::Layout);

        let mut other = base.clone();
        other.header = Some(Item::new("h"));
        other.footer = Some(Item::new("f"));
        assert_eq!(base.compare(&other), ComponentModelDiff::Header);

        let mut other = base.clone();
        other.footer = Some(Item::new("f"));
        other.meta.insert("k", true);
        assert_eq!(base.compare(&other), ComponentModelDiff::Footer);

        let mut other = base.with_items(vec![Item::new("z")]);
        other.meta.insert("k", true);
        assert_eq!(base.compare(&other), ComponentModelDiff::Meta);

        let other = base.with_items(vec![Item::new("a")]);
        assert_eq!(base.compare(&other), ComponentModelDiff::Items);
    }

    #[test]
    fn test_header_presence_is_symmetric() {
        let without = model();
        let mut with = model();
        with.header = Some(Item::new("title"));

        assert_eq!(without.compare(&with), ComponentModelDiff::Header);
        assert_eq!(with.compare(&without), ComponentModelDiff::Header);
    }

    #[test]
    fn test_nested_children_are_items_change() {
        let base = ComponentModel::default();
        let lhs = base.with_child(&ComponentModel::new(ComponentKind::Row).with_identifier("a"));
        let rhs = base.with_child(&ComponentModel::new(ComponentKind::Row).with_identifier("b"));

        assert!(items_equal_shallow(&lhs.items, &rhs.items));
        assert_eq!(lhs.compare(&rhs), ComponentModelDiff::Items);
    }

    #[test]
    fn test_meta_numeric_equality() {
        let mut lhs = model();
        let mut rhs = model();
        lhs.meta.insert("columns", 2);
        rhs.meta.insert("columns", 2.0);
        assert_eq!(lhs.compare(&rhs), ComponentModelDiff::Unchanged);
    }

    #[test]
    fn test_compare_is_reflexive_for_nan_values() {
        let mut model = model().configured_with(Layout::with_span(f64::NAN));
        model.meta.insert("ratio", f64::NAN);
        model.items[0].size = Size::new(f64::NAN, 44.0);

        assert_eq!(model.compare(&model.clone()), ComponentModelDiff::Unchanged);
        assert!(model.equals_deep(&model.clone()));
        assert!(ItemChanges::between(&model.items, &model.items).is_empty());
    }

    #[test]
    fn test_diff_components_new_and_removed() {
        let a = ComponentModel::new(ComponentKind::Row).with_identifier("a");
        let b = ComponentModel::new(ComponentKind::Grid).with_identifier("b");
        let c = ComponentModel::new(ComponentKind::List).with_identifier("c");

        let grown = diff_components(&[a.clone()], &[a.clone(), b.clone(), c.clone()]);
        assert_eq!(
            grown,
            vec![
                ComponentModelDiff::Unchanged,
                ComponentModelDiff::New,
                ComponentModelDiff::New
            ]
        );

        let shrunk = diff_components(&[a.clone(), b, c], &[a]);
        assert_eq!(
            shrunk,
            vec![
                ComponentModelDiff::Unchanged,
                ComponentModelDiff::Removed,
                ComponentModelDiff::Removed
            ]
        );

        assert!(diff_components(&[], &[]).is_empty());
    }

    #[test]
    fn test_item_compare_precedence() {
        let base = Item::new("title").with_kind("card");

        let mut other = base.clone().with_identifier("x").with_kind("banner");
        assert_eq!(base.compare(&other), ItemDiff::Identifier);

        other.identifier = None;
        other.size = Size::new(10.0, 10.0);
        assert_eq!(base.compare(&other), ItemDiff::Kind);

        let mut other = base.clone();
        other.size = Size::new(10.0, 10.0);
        other.title = "changed".to_string();
        assert_eq!(base.compare(&other), ItemDiff::Size);

        let mut other = base.clone();
        other.title = "changed".to_string();
        other.image = "new.png".to_string();
        assert_eq!(base.compare(&other), ItemDiff::Title);

        let mut other = base.clone();
        other.action = Some("app://open".to_string());
        assert_eq!(base.compare(&other), ItemDiff::Action);

        let other = base.clone().with_children(vec![Document::new()]);
        assert_eq!(base.compare(&other), ItemDiff::Children);

        assert_eq!(base.compare(&base.clone()), ItemDiff::Unchanged);
    }

    #[test]
    fn test_item_changes_buckets() {
        let old = vec![
            Item::new("same"),
            Item::new("retitled"),
            Item::new("resized"),
            Item::new("nested"),
            Item::new("dropped"),
        ];
        let mut resized = Item::new("resized");
        resized.size = Size::new(0.0, 120.0);
        let new = vec![
            Item::new("same"),
            Item::new("retitled!"),
            resized,
            Item::new("nested").with_children(vec![Document::new()]),
        ];

        let changes = ItemChanges::between(&old, &new);
        assert_eq!(changes.updates, vec![1]);
        assert_eq!(changes.reloads, vec![2]);
        assert_eq!(changes.child_updates, vec![3]);
        assert_eq!(changes.deletions, vec![4]);
        assert!(changes.insertions.is_empty());
        assert!(!changes.is_empty());

        let grown = ItemChanges::between(&old[..1], &old[..2]);
        assert_eq!(grown.insertions, vec![1]);

        assert!(ItemChanges::between(&old, &old).is_empty());
    }

    #[test]
    fn test_item_diff_reload() {
        assert!(ItemDiff::Kind.requires_reload());
        assert!(ItemDiff::Size.requires_reload());
        assert!(!ItemDiff::Title.requires_reload());
    }
}
