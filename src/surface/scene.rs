use crate::error::{Result, TaskdeckError};
use crate::gesture::event::Point;
use crate::surface::{NodeId, Surface, Tag};
use std::collections::HashMap;

/// Axis-aligned bounds of an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges belong to the neighbour
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

#[derive(Debug, Clone)]
struct SceneNode {
    parent: Option<NodeId>,
    bounds: Rect,
    tags: HashMap<Tag, String>,
}

/// In-memory element tree. Nodes added later paint over earlier ones.
#[derive(Debug, Clone, Default)]
pub struct SceneTree {
    nodes: Vec<SceneNode>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_root(&mut self, bounds: Rect) -> NodeId {
        self.push(None, bounds)
    }

    pub fn add_child(&mut self, parent: NodeId, bounds: Rect) -> Result<NodeId> {
        self.node(parent)?;
        Ok(self.push(Some(parent), bounds))
    }

    /// Sets or replaces a tag value. The value is stored verbatim, even if malformed.
    pub fn set_tag(&mut self, node: NodeId, tag: Tag, value: impl Into<String>) -> Result<()> {
        let entry = self
            .nodes
            .get_mut(node.0)
            .ok_or(TaskdeckError::UnknownNode(node.0))?;
        entry.tags.insert(tag, value.into());
        Ok(())
    }

    fn node(&self, id: NodeId) -> Result<&SceneNode> {
        self.nodes.get(id.0).ok_or(TaskdeckError::UnknownNode(id.0))
    }

    fn push(&mut self, parent: Option<NodeId>, bounds: Rect) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            parent,
            bounds,
            tags: HashMap::new(),
        });
        id
    }
}

impl Surface for SceneTree {
    fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, node)| node.bounds.contains(point))
            .map(|(index, _)| NodeId(index))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn tag(&self, node: NodeId, tag: Tag) -> Option<&str> {
        self.nodes
            .get(node.0)
            .and_then(|n| n.tags.get(&tag))
            .map(String::as_str)
    }
}
