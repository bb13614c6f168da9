//! Movement domain: system modules driving the controller from Bevy schedules.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::AvianCaster;
pub(crate) use input::read_input;
pub(crate) use movement::{frame_controllers, step_controllers};
