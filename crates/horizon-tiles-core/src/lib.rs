//! Core data types for Horizon Tiles.
//!
//! This crate provides the toolkit-independent building blocks the component
//! layer is written against:
//!
//! - **Documents**: string-keyed JSON objects with typed readers and dotted
//!   key-path lookup ([`Document`])
//! - **Meta values**: an open, untyped extension bag with typed accessors
//!   ([`Meta`], [`MetaValue`])
//! - **Errors**: the error type for the textual JSON edge ([`DocumentError`])
//! - **Logging**: `tracing` targets and helpers ([`logging`])
//!
//! # Example
//!
//! ```
//! use horizon_tiles_core::{Document, Meta};
//!
//! let doc = Document::parse(r#"{"meta": {"columns": 2}, "size": {"width": 90}}"#)?;
//! let meta = doc.get("meta").map(Meta::from_json).unwrap_or_default();
//!
//! assert_eq!(meta.get_or("columns", 1i64), 2);
//! assert_eq!(doc.f64("size.width").unwrap_or(0.0), 90.0);
//! # Ok::<(), horizon_tiles_core::DocumentError>(())
//! ```

pub mod document;
pub mod error;
pub mod logging;
pub mod meta;

pub use document::Document;
pub use error::{DocumentError, Result};
pub use logging::PerfSpan;
pub use meta::{FromMetaValue, Meta, MetaValue};

// Document and meta values are plain data and must stay shareable across threads.
static_assertions::assert_impl_all!(Document: Send, Sync);
static_assertions::assert_impl_all!(Meta: Send, Sync);
static_assertions::assert_impl_all!(MetaValue: Send, Sync);
