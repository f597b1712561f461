//! Ephemeral UI state and view snapshots

use serde::Serialize;

use crate::store::LoadStatus;
use crate::task::{Color, Palette, Task, TaskId};

/// Which of the two views is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    #[default]
    Listing,
    Create,
}

/// In-progress edit of one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditDraft {
    pub id: TaskId,
    pub title: String,
    pub color: Color,
}

impl EditDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            color: task.color.clone(),
        }
    }

    pub fn palette(&self) -> Vec<Color> {
        Palette::Hex.colors()
    }
}

/// The modal dialog over the listing; at most one is open
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Modal {
    #[default]
    Idle,
    Editing(EditDraft),
    ConfirmingDelete { id: TaskId },
}

impl Modal {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Fields of the creation view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateForm {
    pub title: String,
    pub color: Color,
}

impl Default for CreateForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            color: Palette::Named.initial(),
        }
    }
}

impl CreateForm {
    pub fn palette(&self) -> Vec<Color> {
        Palette::Named.colors()
    }
}

/// User intent delivered to the [`super::ViewController`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Load,
    OpenCreate,
    Back,
    CreateTitleChanged(String),
    CreateColorPicked(Color),
    SubmitCreate,
    ToggleCompleted(TaskId),
    BeginEdit(TaskId),
    EditTitleChanged(String),
    EditColorPicked(Color),
    SaveEdit,
    CancelEdit,
    RequestDelete(TaskId),
    ConfirmDelete,
    CancelDelete,
    DismissNotice,
}

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub color: Color,
    pub completed: bool,
    /// A request for this task has not come back yet
    pub pending: bool,
}

/// Everything the listing view renders
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub rows: Vec<TaskRow>,
    pub total: usize,
    pub completed: usize,
    pub loading: bool,
    /// Load failure shown in place of the list
    pub error: Option<String>,
    /// Failure of the last user action
    pub notice: Option<String>,
    pub modal: Modal,
}

impl ListingView {
    pub(crate) fn new(
        tasks: Vec<Task>,
        completed: usize,
        status: &LoadStatus,
        pending: &[TaskId],
        notice: Option<String>,
        modal: Modal,
    ) -> Self {
        let rows: Vec<TaskRow> = tasks
            .into_iter()
            .map(|task| TaskRow {
                pending: pending.contains(&task.id),
                id: task.id,
                title: task.title,
                color: task.color,
                completed: task.completed,
            })
            .collect();

        Self {
            total: rows.len(),
            rows,
            completed,
            loading: status.is_loading(),
            error: status.error().map(str::to_string),
            notice,
            modal,
        }
    }
}
