//! The rendering surface as seen by the drop resolver: hit-testing plus
//! tagged ancestry. Any UI toolkit can implement [`Surface`]; [`SceneTree`]
//! is an in-memory implementation for headless hosts and tests.

pub mod resolver;
pub mod scene;

use crate::gesture::event::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use resolver::{resolve_drop, AbandonReason, DropPoint, DropResolution, DropTarget};
pub use scene::{Rect, SceneTree};

/// Opaque handle to an element on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Tags the list owner attaches to rendered elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    /// Marks a list container; the value is the list id
    ListId,
    /// Marks a task card; the value is its index within the rendered list
    TaskIndex,
}

impl Tag {
    /// The attribute name a web host renders this tag as
    pub fn attribute_name(&self) -> &'static str {
        match self {
            Self::ListId => "data-list-id",
            Self::TaskIndex => "data-task-index",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attribute_name())
    }
}

/// Hit-testing and ancestry queries over whatever the host renders
pub trait Surface {
    /// Topmost element at `point`, if any
    fn hit_test(&self, point: Point) -> Option<NodeId>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Raw value of `tag` on `node`, exactly as rendered
    fn tag(&self, node: NodeId, tag: Tag) -> Option<&str>;

    /// Nearest element at or above `start` carrying `tag`, with its raw value
    fn closest(&self, start: NodeId, tag: Tag) -> Option<(NodeId, &str)> {
        let mut current = Some(start);
        while let Some(node) = current {
            if let Some(value) = self.tag(node, tag) {
                return Some((node, value));
            }
            current = self.parent(node);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_display() {
        assert_eq!(Tag::ListId.to_string(), "data-list-id");
        assert_eq!(Tag::TaskIndex.to_string(), "data-task-index");
    }
}
