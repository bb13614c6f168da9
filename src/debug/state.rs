//! Debug domain: debug tooling state.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Log a one-line summary of the player controller every frame
    pub show_info: bool,
    /// Most recent F3 dump, kept for inspection from other tools
    pub last_dump: Option<String>,
}
