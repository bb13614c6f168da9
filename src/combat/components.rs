//! Combat domain: contact kinds and damage requests.

use bevy::prelude::*;

use crate::checkpoint::CheckpointId;

/// What a collider does to a character that touches it.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum Collidable {
    /// Damages and knocks the character away from the contact point
    Enemy { damage: i32, knockback: f32 },
    Hazard { damage: i32 },
    /// Damages, then puts the character back on the active checkpoint
    RespawnZone { damage: i32 },
    Checkpoint { id: CheckpointId, position: Vec2 },
    Teleporter { destination: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    Fall,
    Enemy,
    Hazard,
    RespawnZone,
    /// Damage applied directly by game code
    Scripted,
}

/// Damage waiting to be resolved at the end of a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub amount: i32,
    pub cause: DamageCause,
    pub grant_invincibility: bool,
    /// Impulse applied after velocity is reset
    pub knockback: Option<Vec2>,
    /// Move back to the active checkpoint afterwards, keeping remaining health
    pub return_to_checkpoint: bool,
}

impl DamageRequest {
    pub fn new(amount: i32, cause: DamageCause) -> Self {
        Self {
            amount,
            cause,
            grant_invincibility: true,
            knockback: None,
            return_to_checkpoint: false,
        }
    }

    pub fn with_knockback(mut self, impulse: Vec2) -> Self {
        self.knockback = Some(impulse);
        self
    }

    pub fn without_invincibility(mut self) -> Self {
        self.grant_invincibility = false;
        self
    }

    pub fn returning_to_checkpoint(mut self) -> Self {
        self.return_to_checkpoint = true;
        self
    }
}

/// Result of applying one damage request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead or invincible
    Ignored,
    Hurt,
    /// Health reached zero and the character respawned
    Killed,
}
