//! View controller
//!
//! Turns user intent into task store operations and owns the state that
//! only the UI cares about: the current view, the create form, the open
//! modal and the last error shown to the user.

use tracing::{debug, info, warn};

use super::state::{CreateForm, EditDraft, ListingView, Modal, Route, UiEvent};
use crate::error::Error;
use crate::store::TaskStore;
use crate::task::{Color, Palette, TaskId};
use crate::Result;

pub struct ViewController {
    store: TaskStore,
    route: Route,
    modal: Modal,
    form: CreateForm,
    notice: Option<String>,
}

impl ViewController {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            route: Route::default(),
            modal: Modal::default(),
            form: CreateForm::default(),
            notice: None,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn create_form(&self) -> &CreateForm {
        &self.form
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Snapshot for the listing view
    pub async fn listing(&self) -> ListingView {
        let snapshot = self.store.snapshot().await;
        ListingView::new(
            snapshot.tasks,
            snapshot.completed_count,
            &snapshot.status,
            &snapshot.pending,
            self.notice.clone(),
            self.modal.clone(),
        )
    }

    /// Handle one user event.
    ///
    /// A failed store operation is also kept as the notice, and the
    /// workflow stays where it was before the event.
    pub async fn handle(&mut self, event: UiEvent) -> Result<()> {
        debug!(?event, "Handling UI event");
        match event {
            UiEvent::Load => {
                // The store records load failures in its status
                self.store.load_all().await
            }
            UiEvent::OpenCreate => {
                self.form = CreateForm::default();
                self.route = Route::Create;
                Ok(())
            }
            UiEvent::Back => {
                self.route = Route::Listing;
                Ok(())
            }
            UiEvent::CreateTitleChanged(title) => {
                self.form.title = title;
                Ok(())
            }
            UiEvent::CreateColorPicked(color) => {
                self.form.color = self.pick_color(Palette::Named, color)?;
                Ok(())
            }
            UiEvent::SubmitCreate => self.submit_create().await,
            UiEvent::ToggleCompleted(id) => {
                let result = self.store.toggle_completed(id).await.map(|_| ());
                self.surface(result)
            }
            UiEvent::BeginEdit(id) => self.begin_edit(id).await,
            UiEvent::EditTitleChanged(title) => {
                if let Modal::Editing(draft) = &mut self.modal {
                    draft.title = title;
                }
                Ok(())
            }
            UiEvent::EditColorPicked(color) => {
                if !matches!(self.modal, Modal::Editing(_)) {
                    return Ok(());
                }
                let color = self.pick_color(Palette::Hex, color)?;
                if let Modal::Editing(draft) = &mut self.modal {
                    draft.color = color;
                }
                Ok(())
            }
            UiEvent::SaveEdit => self.save_edit().await,
            UiEvent::CancelEdit => {
                if matches!(self.modal, Modal::Editing(_)) {
                    self.modal = Modal::Idle;
                }
                Ok(())
            }
            UiEvent::RequestDelete(id) => self.request_delete(id).await,
            UiEvent::ConfirmDelete => self.confirm_delete().await,
            UiEvent::CancelDelete => {
                if matches!(self.modal, Modal::ConfirmingDelete { .. }) {
                    self.modal = Modal::Idle;
                }
                Ok(())
            }
            UiEvent::DismissNotice => {
                self.notice = None;
                Ok(())
            }
        }
    }

    async fn submit_create(&mut self) -> Result<()> {
        if self.route != Route::Create {
            debug!("Ignoring create submit outside the creation view");
            return Ok(());
        }

        let result = self
            .store
            .create(&self.form.title, self.form.color.clone())
            .await;
        let task = self.surface(result)?;
        info!(id = task.id, "Task created from form");

        self.form = CreateForm::default();
        self.route = Route::Listing;

        // The task exists either way; a failed reload only shows up in the
        // load status and the notice
        if let Err(e) = self.store.load_all().await {
            warn!("Reload after create failed: {}", e);
            self.notice = Some(e.to_string());
        }
        Ok(())
    }

    async fn begin_edit(&mut self, id: TaskId) -> Result<()> {
        if !self.modal.is_idle() {
            debug!(id, "Ignoring edit while another dialog is open");
            return Ok(());
        }
        let task = self.store.get(id).await.ok_or(Error::TaskNotFound(id));
        let task = self.surface(task)?;
        self.modal = Modal::Editing(EditDraft::from_task(&task));
        Ok(())
    }

    async fn save_edit(&mut self) -> Result<()> {
        let Modal::Editing(draft) = &self.modal else {
            return Ok(());
        };
        let draft = draft.clone();

        let result = self
            .store
            .edit(draft.id, &draft.title, draft.color.clone())
            .await;
        self.surface(result)?;
        self.modal = Modal::Idle;
        Ok(())
    }

    async fn request_delete(&mut self, id: TaskId) -> Result<()> {
        if !self.modal.is_idle() {
            debug!(id, "Ignoring delete while another dialog is open");
            return Ok(());
        }
        if self.store.get(id).await.is_none() {
            return self.surface(Err(Error::TaskNotFound(id)));
        }
        self.modal = Modal::ConfirmingDelete { id };
        Ok(())
    }

    async fn confirm_delete(&mut self) -> Result<()> {
        let Modal::ConfirmingDelete { id } = self.modal else {
            return Ok(());
        };

        let result = self.store.remove(id).await;
        self.surface(result)?;
        self.modal = Modal::Idle;
        Ok(())
    }

    fn pick_color(&mut self, palette: Palette, color: Color) -> Result<Color> {
        if palette.contains(&color) {
            return Ok(color);
        }
        debug!(color = color.as_str(), "Rejected color outside the palette");
        self.surface(Err(Error::InvalidInput(format!(
            "{} is not an available color",
            color.as_str()
        ))))
    }

    /// Record a failure as the notice; success clears it
    fn surface<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.notice = None,
            Err(e) => self.notice = Some(e.to_string()),
        }
        result
    }
}
