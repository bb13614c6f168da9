//! Checkpoint domain: where characters come back to after dying.
//!
//! The ledger is shared by every controller in the process but only ever changed
//! through its own methods; controllers hold a handle to it, they never reach in.

use std::sync::{Arc, PoisonError, RwLock};

use bevy::prelude::*;

#[cfg(test)]
mod tests;

/// Stable identifier for a checkpoint placed in a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckpointId(pub u32);

/// Query/notify contract the controller consumes.
pub trait CheckpointService: Send + Sync {
    /// Position of the active checkpoint, or the level spawn point if none is active.
    fn active_checkpoint_or_spawn(&self) -> Vec2;

    /// A character touched a checkpoint.
    fn notify_checkpoint_reached(&self, id: CheckpointId, position: Vec2);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveCheckpoint {
    pub id: CheckpointId,
    pub position: Vec2,
}

#[derive(Debug, Default)]
struct LedgerInner {
    spawn_point: Vec2,
    active: Option<ActiveCheckpoint>,
    reached: Vec<CheckpointId>,
}

/// Shared checkpoint bookkeeping. Cloning yields another handle to the same ledger.
#[derive(Resource, Debug, Clone, Default)]
pub struct CheckpointLedger {
    inner: Arc<RwLock<LedgerInner>>,
}

impl CheckpointLedger {
    pub fn new(spawn_point: Vec2) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LedgerInner {
                spawn_point,
                ..default()
            })),
        }
    }

    pub fn set_spawn_point(&self, spawn_point: Vec2) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.spawn_point = spawn_point;
        info!("Set spawn point to: {:?}", spawn_point);
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .spawn_point
    }

    pub fn active(&self) -> Option<ActiveCheckpoint> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).active
    }

    /// Every checkpoint reached so far, in first-reached order.
    pub fn reached(&self) -> Vec<CheckpointId> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .reached
            .clone()
    }

    /// Forget the active checkpoint, e.g. when a level restarts.
    pub fn deactivate(&self) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = inner.active.take() {
            debug!("Deactivated checkpoint {:?}", previous.id);
        }
    }
}

impl CheckpointService for CheckpointLedger {
    fn active_checkpoint_or_spawn(&self) -> Vec2 {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .active
            .map(|checkpoint| checkpoint.position)
            .unwrap_or(inner.spawn_point)
    }

    fn notify_checkpoint_reached(&self, id: CheckpointId, position: Vec2) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.active.is_some_and(|active| active.id == id) {
            return;
        }
        if !inner.reached.contains(&id) {
            inner.reached.push(id);
        }
        inner.active = Some(ActiveCheckpoint { id, position });
        info!("Activated checkpoint {:?} at {:?}", id, position);
    }
}
