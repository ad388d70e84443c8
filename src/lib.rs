//! # Taskdeck Core
//!
//! Gesture recognition and drag-to-reorder logic for Taskdeck task cards.
//!
//! A card distinguishes a tap, a long-press that enters edit mode, and a
//! drag that carries the task to a new list position. Releases are resolved
//! against the rendering surface into a [`ReorderIntent`] that the list
//! owner commits. Nothing here depends on a particular UI toolkit.

pub mod card;
pub mod config;
pub mod domain;
pub mod drag;
pub mod error;
pub mod gesture;
pub mod surface;

// Re-export commonly used types
pub use card::{CardContext, CardListener, EventResponse, TaskCard};
pub use config::GestureConfig;
pub use domain::{
    board::{Board, MoveOutcome, TaskList},
    intent::ReorderIntent,
    task::{ListId, Task, TaskId},
};
pub use drag::{CardVisual, DragCoordinator, DragSession};
pub use error::{Result, TaskdeckError};
pub use gesture::{Gesture, GestureRecognizer, PointerEvent, TimerScheduler};
pub use surface::{resolve_drop, DropResolution, DropTarget, Surface};
