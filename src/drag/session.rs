use crate::domain::{ListId, Task, TaskId};
use crate::error::{Result, TaskdeckError};
use crate::gesture::InputSource;
use crate::surface::DropTarget;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// "Task T is being carried". Snapshot taken when the drag starts.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub task: Arc<Task>,
    pub source_list: ListId,
    pub source_index: usize,
    pub source: InputSource,
    pub started_at: DateTime<Utc>,
    /// Advisory drop target currently under the pointer
    pub hover: Option<DropTarget>,
}

impl DragSession {
    pub fn new(task: Arc<Task>, source_index: usize, source: InputSource) -> Self {
        Self {
            source_list: task.list_id.clone(),
            task,
            source_index,
            source,
            started_at: Utc::now(),
            hover: None,
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task.id
    }
}

/// Drop-target indicator changes produced by one pointer move
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverChange {
    pub left: Option<DropTarget>,
    pub entered: Option<DropTarget>,
}

impl HoverChange {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Holds the single active drag for a set of sibling cards.
///
/// The list owner keeps one of these and lends it to whichever card is
/// handling an event, so every card sees the same session.
#[derive(Debug, Default)]
pub struct DragCoordinator {
    active: Option<DragSession>,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_carrying(&self, id: &TaskId) -> bool {
        self.active.as_ref().is_some_and(|s| &s.task.id == id)
    }

    /// Whether the card at `index` in `list_id` should show the drop-target indicator
    pub fn is_drop_target(&self, list_id: &ListId, index: usize) -> bool {
        self.active
            .as_ref()
            .and_then(|s| s.hover.as_ref())
            .is_some_and(|h| &h.list_id == list_id && h.index == Some(index))
    }

    /// Starts carrying a task. Only one session may be active at a time.
    pub fn begin(&mut self, session: DragSession) -> Result<()> {
        if let Some(current) = &self.active {
            warn!(
                active_task = %current.task.id,
                refused_task = %session.task.id,
                "Refusing to start a second drag session"
            );
            return Err(TaskdeckError::DragInProgress(current.task.id.to_string()));
        }
        debug!(
            task_id = %session.task.id,
            list_id = %session.source_list,
            index = session.source_index,
            source = ?session.source,
            "Drag session started"
        );
        self.active = Some(session);
        Ok(())
    }

    /// Updates the advisory drop target. Returns what was left and entered.
    pub fn hover(&mut self, target: Option<DropTarget>) -> HoverChange {
        let Some(session) = self.active.as_mut() else {
            return HoverChange::default();
        };
        if session.hover == target {
            return HoverChange::default();
        }
        let left = std::mem::replace(&mut session.hover, target.clone());
        HoverChange {
            left,
            entered: target,
        }
    }

    /// Ends the session normally, handing it to the drop resolver
    pub fn finish(&mut self) -> Option<DragSession> {
        let session = self.active.take();
        if let Some(session) = &session {
            let held_for = Utc::now() - session.started_at;
            debug!(
                task_id = %session.task.id,
                held_ms = held_for.num_milliseconds(),
                "Drag session finished"
            );
        }
        session
    }

    /// Ends the session without resolving a drop
    pub fn cancel(&mut self) -> Option<DragSession> {
        let session = self.active.take();
        if let Some(session) = &session {
            debug!(task_id = %session.task.id, "Drag session cancelled");
        }
        session
    }
}

/// Cosmetic state a card renders; has no effect on resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardVisual {
    pub edit_mode: bool,
    pub dragging: bool,
    pub drop_target: bool,
}

impl CardVisual {
    pub const CARRIED_OPACITY: f32 = 0.5;
    pub const CARRIED_SCALE: f32 = 0.95;

    pub fn opacity(&self) -> f32 {
        if self.dragging {
            Self::CARRIED_OPACITY
        } else {
            1.0
        }
    }

    pub fn scale(&self) -> f32 {
        if self.dragging {
            Self::CARRIED_SCALE
        } else {
            1.0
        }
    }

    /// Drag handle affordance, shown whenever the card can be dragged
    pub fn shows_drag_handle(&self) -> bool {
        self.edit_mode
    }
}
