use crate::domain::task::{ListId, Task};
use serde::{Deserialize, Serialize};

/// Proposed move of a task, emitted when a drag resolves over a list.
///
/// The core never applies this itself; the list owner commits it (see
/// [`Board::apply`](crate::domain::Board::apply)) and re-supplies the
/// updated tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderIntent {
    /// Snapshot of the task taken when the drag started
    pub task: Task,
    pub destination_list_id: ListId,
    /// Insert-before index; `None` appends to the end of the destination list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_index: Option<usize>,
}

impl ReorderIntent {
    pub fn new(task: Task, destination_list_id: ListId, destination_index: Option<usize>) -> Self {
        Self {
            task,
            destination_list_id,
            destination_index,
        }
    }

    pub fn is_same_list(&self) -> bool {
        self.task.list_id == self.destination_list_id
    }
}
