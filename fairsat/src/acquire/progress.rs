//! Per-course download progress for UI consumption.

use std::collections::HashMap;
use std::sync::Mutex;

/// Point-in-time download state of one course's large image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownloadState {
    /// Whether a download is currently in flight.
    pub in_progress: bool,
    /// Progress fraction in `[0.0, 1.0]`.
    pub fraction: f64,
}

/// Shared map of per-course download states.
///
/// Entries are only ever replaced as whole values under one lock, so a
/// reader either sees the state before an update or after it, never a
/// half-applied mix, and start/finish transitions are observed in order.
/// Completion callbacks landing on arbitrary executor threads all funnel
/// through here.
#[derive(Debug, Default)]
pub struct DownloadProgress {
    states: Mutex<HashMap<String, DownloadState>>,
}

impl DownloadProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a course download as started.
    pub fn started(&self, course_id: &str) {
        let mut states = self.states.lock().unwrap();
        states.insert(
            course_id.to_string(),
            DownloadState {
                in_progress: true,
                fraction: 0.0,
            },
        );
    }

    /// Mark a course download as finished.
    ///
    /// The fraction reaches 1.0 only on success; a failed download keeps the
    /// fraction it had so the UI can show where it stopped.
    pub fn finished(&self, course_id: &str, success: bool) {
        let mut states = self.states.lock().unwrap();
        let entry = states.entry(course_id.to_string()).or_insert(DownloadState {
            in_progress: false,
            fraction: 0.0,
        });
        *entry = DownloadState {
            in_progress: false,
            fraction: if success { 1.0 } else { entry.fraction },
        };
    }

    /// Snapshot of a course's download state, if any download was recorded.
    pub fn snapshot(&self, course_id: &str) -> Option<DownloadState> {
        let states = self.states.lock().unwrap();
        states.get(course_id).copied()
    }
}
