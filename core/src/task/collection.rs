//! Local task collection
//!
//! Mirrors the server's task list in server order and keeps the completed
//! count in step with every change. All mutation goes through
//! [`TaskCollection::apply`].

use serde::Serialize;

use super::model::{Task, TaskId};

/// A confirmed change to apply to the local collection
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// Full fetch replaced the collection
    Loaded(Vec<Task>),
    /// The server created a task
    Created(Task),
    /// The server accepted a full replacement of a task
    Updated(Task),
    /// The server deleted a task
    Removed(TaskId),
}

/// Ordered collection of tasks with a maintained completed count
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCollection {
    tasks: Vec<Task>,
    completed_count: usize,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut collection = Self::new();
        collection.apply(TaskEvent::Loaded(tasks));
        collection
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

    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Apply a confirmed change.
    ///
    /// Returns whether the collection changed. Events naming an unknown id
    /// are ignored.
    pub fn apply(&mut self, event: TaskEvent) -> bool {
        match event {
            TaskEvent::Loaded(tasks) => {
                self.tasks = dedup_by_id(tasks);
                self.completed_count = self.tasks.iter().filter(|t| t.completed).count();
                true
            }
            TaskEvent::Created(task) => {
                if self.contains(task.id) {
                    self.replace(task)
                } else {
                    if task.completed {
                        self.completed_count += 1;
                    }
                    self.tasks.push(task);
                    true
                }
            }
            TaskEvent::Updated(task) => self.replace(task),
            TaskEvent::Removed(id) => {
                let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
                    return false;
                };
                let removed = self.tasks.remove(index);
                if removed.completed {
                    self.completed_count -= 1;
                }
                true
            }
        }
    }

    fn replace(&mut self, task: Task) -> bool {
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) else {
            return false;
        };
        match (slot.completed, task.completed) {
            (false, true) => self.completed_count += 1,
            (true, false) => self.completed_count -= 1,
            _ => {}
        }
        *slot = task;
        true
    }
}

// Keeps the first position of each id, with the last occurrence's contents.
fn dedup_by_id(tasks: Vec<Task>) -> Vec<Task> {
    let mut unique: Vec<Task> = Vec::with_capacity(tasks.len());
    for task in tasks {
        match unique.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => unique.push(task),
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Color;

    fn task(id: TaskId, title: &str, completed: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            color: Color::neutral(),
            completed,
            created_at: None,
            updated_at: None,
        }
    }

    fn recount(collection: &TaskCollection) -> usize {
        collection.iter().filter(|t| t.completed).count()
    }

    #[test]
    fn test_loaded_counts_completed() {
        let collection =
            TaskCollection::from_tasks(vec![task(1, "a", false), task(2, "b", true)]);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.completed_count(), 1);
    }

    #[test]
    fn test_loaded_keeps_server_order_and_dedups() {
        let collection = TaskCollection::from_tasks(vec![
            task(3, "c", false),
            task(1, "a", false),
            task(3, "c2", true),
        ]);
        let ids: Vec<TaskId> = collection.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(collection.get(3).unwrap().title, "c2");
        assert_eq!(collection.completed_count(), 1);
    }

    #[test]
    fn test_created_appends_and_replaces_duplicates() {
        let mut collection = TaskCollection::new();
        assert!(collection.apply(TaskEvent::Created(task(1, "a", false))));
        assert!(collection.apply(TaskEvent::Created(task(2, "b", true))));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.completed_count(), 1);

        assert!(collection.apply(TaskEvent::Created(task(2, "b", false))));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.completed_count(), 0);
    }

    #[test]
    fn test_updated_adjusts_count() {
        let mut collection = TaskCollection::from_tasks(vec![task(1, "a", false)]);

        assert!(collection.apply(TaskEvent::Updated(task(1, "a", true))));
        assert_eq!(collection.completed_count(), 1);

        // Same flag again leaves the count alone
        assert!(collection.apply(TaskEvent::Updated(task(1, "a2", true))));
        assert_eq!(collection.completed_count(), 1);
        assert_eq!(collection.get(1).unwrap().title, "a2");

        assert!(collection.apply(TaskEvent::Updated(task(1, "a2", false))));
        assert_eq!(collection.completed_count(), 0);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut collection = TaskCollection::from_tasks(vec![task(1, "a", true)]);

        assert!(!collection.apply(TaskEvent::Updated(task(9, "x", true))));
        assert!(!collection.apply(TaskEvent::Removed(9)));

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.completed_count(), 1);
    }

    #[test]
    fn test_removed_decrements_completed() {
        let mut collection =
            TaskCollection::from_tasks(vec![task(1, "a", true), task(2, "b", false)]);

        assert!(collection.apply(TaskEvent::Removed(1)));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.completed_count(), 0);
        assert!(!collection.contains(1));
    }

    #[test]
    fn test_count_matches_recount_after_mixed_events() {
        let mut collection = TaskCollection::new();
        let events = vec![
            TaskEvent::Created(task(1, "a", false)),
            TaskEvent::Created(task(2, "b", true)),
            TaskEvent::Updated(task(1, "a", true)),
            TaskEvent::Updated(task(2, "b2", false)),
            TaskEvent::Created(task(3, "c", true)),
            TaskEvent::Removed(1),
            TaskEvent::Updated(task(3, "c", false)),
            TaskEvent::Removed(42),
        ];

        for event in events {
            collection.apply(event);
            assert_eq!(collection.completed_count(), recount(&collection));
        }
        assert_eq!(collection.len(), 2);
    }
}
