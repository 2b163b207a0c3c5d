//! Application state for the shift allocation API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::RosterEngine;

/// Shared application state.
///
/// Wraps the engine so every handler sees the same store, configuration,
/// and event channel.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RosterEngine>,
}

impl AppState {
    /// Creates a new application state around the given engine.
    pub fn new(engine: RosterEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Creates application state from an already-shared engine.
    pub fn from_arc(engine: Arc<RosterEngine>) -> Self {
        Self { engine }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &RosterEngine {
        &self.engine
    }
}
