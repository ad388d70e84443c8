use crate::domain::intent::ReorderIntent;
use crate::domain::task::{ListId, Task, TaskId};
use crate::error::{Result, TaskdeckError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An ordered list of tasks, sorted by `order`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskList {
    pub id: ListId,
    pub name: String,
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(id: ListId, name: impl Into<String>, mut tasks: Vec<Task>) -> Self {
        tasks.sort_by_key(|t| t.order);
        Self {
            id,
            name: name.into(),
            tasks,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn position_of(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Re-assigns `order` as 0..n in the current sequence
    fn renumber(&mut self) {
        for (order, task) in self.tasks.iter_mut().enumerate() {
            task.order = order as i64;
        }
    }
}

/// Where a task sits on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub list_id: ListId,
    pub index: usize,
}

/// Result of committing a reorder intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task already sits where the intent would put it
    Unchanged,
    Moved { from: Placement, to: Placement },
}

/// Owner of every rendered list; commits reorder intents
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Board {
    pub lists: Vec<TaskList>,
}

impl Board {
    pub fn new(lists: Vec<TaskList>) -> Self {
        Self { lists }
    }

    pub fn add_list(&mut self, list: TaskList) {
        self.lists.push(list);
    }

    pub fn list(&self, id: &ListId) -> Option<&TaskList> {
        self.lists.iter().find(|l| &l.id == id)
    }

    /// Finds a task and its current placement
    pub fn find_task(&self, id: &TaskId) -> Option<(&Task, Placement)> {
        self.lists.iter().find_map(|list| {
            list.position_of(id).map(|index| {
                (
                    &list.tasks[index],
                    Placement {
                        list_id: list.id.clone(),
                        index,
                    },
                )
            })
        })
    }

    fn list_index(&self, id: &ListId) -> Option<usize> {
        self.lists.iter().position(|l| &l.id == id)
    }

    /// Applies a reorder intent with insert-before semantics.
    ///
    /// The destination index refers to the list as it was rendered when the
    /// drop happened, so moving a task further down its own list lands it
    /// just before the task that was under the pointer. Indices past the end
    /// and `None` both append.
    pub fn apply(&mut self, intent: &ReorderIntent) -> Result<MoveOutcome> {
        let task_id = intent.task.id;
        let (source_list, source_index) = self
            .lists
            .iter()
            .enumerate()
            .find_map(|(li, list)| list.position_of(&task_id).map(|ti| (li, ti)))
            .ok_or_else(|| TaskdeckError::TaskNotFound(task_id.to_string()))?;

        let dest_list = self
            .list_index(&intent.destination_list_id)
            .ok_or_else(|| TaskdeckError::ListNotFound(intent.destination_list_id.to_string()))?;

        let dest_len = self.lists[dest_list].len();
        let requested = intent.destination_index.unwrap_or(dest_len).min(dest_len);

        let insert_at = if source_list == dest_list && requested > source_index {
            requested - 1
        } else {
            requested
        };

        if source_list == dest_list && insert_at == source_index {
            debug!(task_id = %task_id, list_id = %intent.destination_list_id, "Reorder intent is a no-op");
            return Ok(MoveOutcome::Unchanged);
        }

        let from = Placement {
            list_id: self.lists[source_list].id.clone(),
            index: source_index,
        };

        let mut task = self.lists[source_list].tasks.remove(source_index);
        task.list_id = self.lists[dest_list].id.clone();
        self.lists[dest_list].tasks.insert(insert_at, task);

        self.lists[source_list].renumber();
        if source_list != dest_list {
            self.lists[dest_list].renumber();
        }

        let to = Placement {
            list_id: self.lists[dest_list].id.clone(),
            index: insert_at,
        };
        debug!(
            task_id = %task_id,
            from_list = %from.list_id,
            from_index = from.index,
            to_list = %to.list_id,
            to_index = to.index,
            "Applied reorder intent"
        );

        Ok(MoveOutcome::Moved { from, to })
    }
}
