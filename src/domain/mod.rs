pub mod board;
pub mod intent;
pub mod task;

pub use board::{Board, MoveOutcome, Placement, TaskList};
pub use intent::ReorderIntent;
pub use task::{ListId, Quadrant, Task, TaskId};
