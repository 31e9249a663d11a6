//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{CharacterStore, ClockPort, IdentityPort};
use crate::use_cases;

/// Main application state.
///
/// Holds all use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub auth: use_cases::AuthUseCases,
    pub roster: use_cases::RosterUseCases,
    pub sheet: use_cases::SheetUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        store: Arc<dyn CharacterStore>,
        identity: Arc<dyn IdentityPort>,
        clock: Arc<dyn ClockPort>,
        save_delay: Duration,
    ) -> Self {
        let use_cases = UseCases {
            auth: use_cases::AuthUseCases::new(identity),
            roster: use_cases::RosterUseCases::new(store.clone()),
            sheet: use_cases::SheetUseCases::new(store, clock, save_delay),
        };

        Self { use_cases }
    }

    /// Bring up everything that must be live before serving.
    pub async fn start(&self) -> Result<(), use_cases::AuthError> {
        self.use_cases.auth.init().await
    }

    /// Write pending edits, then tear the identity provider down.
    pub async fn shutdown(&self) {
        let flushed = self.use_cases.sheet.shutdown().await;
        self.use_cases.auth.teardown().await;
        tracing::info!(flushed, "Application stopped");
    }
}
