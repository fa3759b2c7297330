//! Per-build state shared by the rewrite and injection phases.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::document::DocumentId;

/// State for one build invocation.
///
/// Create a fresh context for every build and pass it by reference to both
/// phases. Nothing leaks from one build into the next.
#[derive(Debug, Default)]
pub struct BuildContext {
    registry: AlertRegistry,
}

impl BuildContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents rewritten during this build.
    #[must_use]
    pub fn registry(&self) -> &AlertRegistry {
        &self.registry
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    /// Recording order.
    ids: Vec<DocumentId>,
    seen: HashSet<DocumentId>,
    alerts: usize,
}

/// Ordered, duplicate-free set of documents whose content contains alerts.
///
/// Guarded by a mutex so documents can be rewritten in parallel.
#[derive(Debug, Default)]
pub struct AlertRegistry {
    state: Mutex<RegistryState>,
}

impl AlertRegistry {
    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        // State is a plain list; a panic mid-push cannot leave it inconsistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a rewritten document.
    ///
    /// Returns `false` if the document was already recorded.
    pub fn record(&self, id: DocumentId) -> bool {
        let mut state = self.lock();
        if !state.seen.insert(id) {
            return false;
        }
        state.ids.push(id);
        true
    }

    /// Add to the number of alerts rewritten in this build.
    pub fn add_alerts(&self, count: usize) {
        self.lock().alerts += count;
    }

    /// Number of recorded documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().ids.is_empty()
    }

    /// Total alerts rewritten across all recorded documents.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.lock().alerts
    }

    /// Snapshot of the recorded ids in recording order.
    #[must_use]
    pub fn ids(&self) -> Vec<DocumentId> {
        self.lock().ids.clone()
    }

    /// Remove and return the recorded ids.
    ///
    /// The alert count is kept for reporting.
    pub fn take(&self) -> Vec<DocumentId> {
        let mut state = self.lock();
        state.seen.clear();
        std::mem::take(&mut state.ids)
    }
}
