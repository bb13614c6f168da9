//! Combat domain: contact messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::Collidable;

/// A character touched a [`Collidable`] and the controller reacted to it.
#[derive(Debug)]
pub struct ContactEvent {
    pub character: Entity,
    pub collider: Entity,
    pub contact: Collidable,
}

impl Message for ContactEvent {}
