use crate::surface::NodeId;
use serde::{Deserialize, Serialize};

/// A position on the rendering surface, in host pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Which device produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A raw pointer or touch event delivered to the card that captured the press
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub source: InputSource,
    pub position: Point,
    /// Native drop target reported by the host, if it has one.
    /// When absent the release position is hit-tested instead.
    pub target: Option<NodeId>,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, source: InputSource, position: Point) -> Self {
        Self {
            phase,
            source,
            position,
            target: None,
        }
    }

    pub fn touch(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self::new(phase, InputSource::Touch, Point::new(x, y))
    }

    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self::new(phase, InputSource::Mouse, Point::new(x, y))
    }

    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }
}
