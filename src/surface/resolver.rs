use crate::domain::{ListId, ReorderIntent, Task};
use crate::gesture::event::Point;
use crate::surface::{NodeId, Surface, Tag};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where a drag was released
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropPoint {
    /// Release coordinate, hit-tested against the surface (touch path)
    At(Point),
    /// Element the host already reported as the drop target (pointer path)
    Node(NodeId),
}

/// Destination list and optional insert-before index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropTarget {
    pub list_id: ListId,
    /// `None` appends to the end of the list
    pub index: Option<usize>,
}

impl DropTarget {
    pub fn new(list_id: ListId, index: Option<usize>) -> Self {
        Self { list_id, index }
    }

    pub fn into_intent(self, task: Task) -> ReorderIntent {
        ReorderIntent::new(task, self.list_id, self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbandonReason {
    /// Nothing was rendered at the release point
    NothingUnderPoint,
    /// No ancestor of the release point is a list container
    OutsideList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropResolution {
    Resolved(DropTarget),
    Abandoned(AbandonReason),
}

impl DropResolution {
    pub fn target(&self) -> Option<&DropTarget> {
        match self {
            Self::Resolved(target) => Some(target),
            Self::Abandoned(_) => None,
        }
    }

    pub fn into_target(self) -> Option<DropTarget> {
        match self {
            Self::Resolved(target) => Some(target),
            Self::Abandoned(_) => None,
        }
    }
}

/// Resolves a release point into a destination list and index.
///
/// The list comes from the nearest ancestor tagged [`Tag::ListId`]. The
/// index comes, independently, from the nearest ancestor tagged
/// [`Tag::TaskIndex`]; a missing or non-numeric index means "append".
///
/// # Examples
/// ```
/// use taskdeck_core::gesture::Point;
/// use taskdeck_core::surface::{resolve_drop, DropPoint, Rect, SceneTree, Tag};
///
/// let mut scene = SceneTree::new();
/// let list = scene.add_root(Rect::new(0.0, 0.0, 100.0, 300.0));
/// scene.set_tag(list, Tag::ListId, "listB").unwrap();
/// let card = scene.add_child(list, Rect::new(0.0, 100.0, 100.0, 50.0)).unwrap();
/// scene.set_tag(card, Tag::TaskIndex, "2").unwrap();
///
/// let target = resolve_drop(&scene, DropPoint::At(Point::new(10.0, 120.0)))
///     .into_target()
///     .unwrap();
/// assert_eq!(target.list_id.as_str(), "listB");
/// assert_eq!(target.index, Some(2));
/// ```
pub fn resolve_drop(surface: &dyn Surface, at: DropPoint) -> DropResolution {
    let start = match at {
        DropPoint::At(point) => match surface.hit_test(point) {
            Some(node) => node,
            None => {
                debug!(x = point.x, y = point.y, "Drop abandoned: nothing under release point");
                return DropResolution::Abandoned(AbandonReason::NothingUnderPoint);
            }
        },
        DropPoint::Node(node) => node,
    };

    let list_id = match surface
        .closest(start, Tag::ListId)
        .and_then(|(_, raw)| ListId::parse(raw).ok())
    {
        Some(list_id) => list_id,
        None => {
            debug!(node = start.0, "Drop abandoned: release point is outside any list");
            return DropResolution::Abandoned(AbandonReason::OutsideList);
        }
    };

    let index = surface
        .closest(start, Tag::TaskIndex)
        .and_then(|(node, raw)| match raw.trim().parse::<usize>() {
            Ok(index) => Some(index),
            Err(_) => {
                debug!(node = node.0, value = raw, "Malformed task index, appending instead");
                None
            }
        });

    DropResolution::Resolved(DropTarget { list_id, index })
}
