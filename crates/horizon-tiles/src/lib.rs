//! Horizon Tiles: declarative UI component models.
//!
//! A screen is described as a list of [`ComponentModel`]s, each a container
//! ([`ComponentKind`]) with a [`Layout`], [`Interaction`] rules and a list of
//! [`Item`]s. This crate provides:
//!
//! - **Marshalling**: conversion between models and JSON [`Document`]s that
//!   round-trips every field except `index`, which the owner of a component
//!   list assigns. Decoding tolerates missing and mistyped keys
//! - **Equality**: [shallow](ComponentModel::equals_shallow) and
//!   [deep](ComponentModel::equals_deep) comparison, the latter descending
//!   into nested child components
//! - **Diffing**: classification of what changed between two versions of a
//!   component ([`ComponentModelDiff`]) or an item ([`ItemDiff`]), and of
//!   whole lists ([`diff_components`], [`ItemChanges`])
//! - **Caching**: a keyed on-disk store of the last shown state
//!   ([`StateCache`])
//!
//! # Example
//!
//! ```
//! use horizon_tiles::{ComponentModel, ComponentModelDiff, Layout};
//!
//! let current = ComponentModel::from_json_str(r#"{"kind": "grid", "span": 2}"#)?;
//! let next = current.configured_with(Layout::with_span(3.0));
//!
//! assert_eq!(current.compare(&next), ComponentModelDiff::Layout);
//! assert!(!current.compare(&next).requires_rebuild());
//! # Ok::<(), horizon_tiles::DocumentError>(())
//! ```
//!
//! # Logging
//!
//! All diagnostics go through `tracing`; see [`logging::targets`] for the
//! target names to filter on.

pub use horizon_tiles_core::*;

pub mod cache;
pub mod component;
pub mod diff;
pub mod geometry;
pub mod interaction;
pub mod item;
pub mod kind;
pub mod layout;

pub use cache::{CacheError, CacheResult, StateCache};
pub use component::{ComponentModel, models_equal_deep};
pub use diff::{ComponentModelDiff, ItemChanges, ItemDiff, diff_components, diff_items};
pub use geometry::{Inset, Size};
pub use interaction::{Interaction, MouseClick, Paginate};
pub use item::{Item, items_equal_shallow};
pub use kind::{ComponentKind, ParseKindError};
pub use layout::{HeaderMode, Layout, PageIndicatorPlacement};

static_assertions::assert_impl_all!(ComponentModel: Send, Sync, Clone);
static_assertions::assert_impl_all!(Item: Send, Sync, Clone);
static_assertions::assert_impl_all!(StateCache: Send, Sync);
static_assertions::assert_impl_all!(ComponentModelDiff: Send, Sync, Copy);
