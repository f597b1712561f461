//! Per-task in-flight request tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::Error;
use crate::task::TaskId;
use crate::Result;

type Pending = Arc<Mutex<HashMap<TaskId, Uuid>>>;

/// Maps each task with a pending operation to that operation's token
#[derive(Debug, Clone, Default)]
pub(crate) struct InFlight {
    pending: Pending,
}

impl InFlight {
    fn lock(pending: &Pending) -> MutexGuard<'_, HashMap<TaskId, Uuid>> {
        pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Claim `id` for one operation; released when the guard drops
    pub(crate) fn acquire(&self, id: TaskId) -> Result<InFlightGuard> {
        let mut pending = Self::lock(&self.pending);
        if pending.contains_key(&id) {
            return Err(Error::OperationPending(id));
        }
        let token = Uuid::new_v4();
        pending.insert(id, token);
        Ok(InFlightGuard {
            pending: Arc::clone(&self.pending),
            id,
            token,
        })
    }

    pub(crate) fn is_pending(&self, id: TaskId) -> bool {
        Self::lock(&self.pending).contains_key(&id)
    }

    pub(crate) fn pending_ids(&self) -> Vec<TaskId> {
        let mut ids: Vec<TaskId> = Self::lock(&self.pending).keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[derive(Debug)]
pub(crate) struct InFlightGuard {
    pending: Pending,
    id: TaskId,
    token: Uuid,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut pending = InFlight::lock(&self.pending);
        if pending.get(&self.id) == Some(&self.token) {
            pending.remove(&self.id);
        }
    }
}
