//! Bounded, most-recent-first log of completed analyses.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::analysis::AnalysisResult;
use crate::error::HistoryError;

/// Maximum number of retained analyses.
pub const MAX_HISTORY: usize = 20;

/// Insertion-ordered, capacity-bounded analysis log with internal locking.
///
/// Cloning yields another handle to the same underlying sequence, so the
/// store can be shared between the pipeline and the transport layer. The
/// newest entry is always at index 0; inserting past capacity evicts the
/// tail. Entries are whole-value: nothing mutates a result after insertion.
#[derive(Clone)]
pub struct AnalysisHistory {
    entries: Arc<Mutex<VecDeque<AnalysisResult>>>,
}

impl Default for AnalysisHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_HISTORY))),
        }
    }

    /// Insert at the front, evicting the tail when the store is full.
    pub fn record(&self, result: AnalysisResult) -> Result<(), HistoryError> {
        let mut entries = self.lock()?;
        entries.push_front(result);
        if entries.len() > MAX_HISTORY {
            entries.pop_back();
        }
        debug!(len = entries.len(), "recorded analysis");
        Ok(())
    }

    /// The full retained sequence, newest first.
    pub fn list(&self) -> Result<Vec<AnalysisResult>, HistoryError> {
        Ok(self.lock()?.iter().cloned().collect())
    }

    /// Drop every retained entry.
    pub fn clear(&self) -> Result<(), HistoryError> {
        self.lock()?.clear();
        debug!("history cleared");
        Ok(())
    }

    pub fn len(&self) -> Result<usize, HistoryError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, VecDeque<AnalysisResult>>, HistoryError> {
        self.entries.lock().map_err(|e| HistoryError::LockPoisoned {
            reason: e.to_string(),
        })
    }
}
