//! Component kinds.

use std::fmt;
use std::str::FromStr;

/// The presentation style of a component.
///
/// A kind decides which native container a component is rendered with; a
/// change of kind therefore means the whole component has to be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentKind {
    /// A horizontally scrolling strip.
    Carousel,
    /// A multi-column grid.
    Grid,
    /// A vertical list.
    #[default]
    List,
    /// A single non-scrolling row.
    Row,
}

impl ComponentKind {
    /// All kinds, in declaration order.
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Carousel,
        ComponentKind::Grid,
        ComponentKind::List,
        ComponentKind::Row,
    ];

    /// Returns the lowercase name used in documents.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Carousel => "carousel",
            ComponentKind::Grid => "grid",
            ComponentKind::List => "list",
            ComponentKind::Row => "row",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`ComponentKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component kind '{0}'")]
pub struct ParseKindError(pub String);

impl FromStr for ComponentKind {
    type Err = ParseKindError;

    /// Parses a kind name in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

impl PartialEq<str> for ComponentKind {
    /// Compares against a raw name by lowercasing it first.
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other.to_lowercase()
    }
}

impl PartialEq<&str> for ComponentKind {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for ComponentKind {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}
