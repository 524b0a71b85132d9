//! Edit-history retention policy (spec §3, §4.10).

/// Retention limits for a node's edit-history log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetentionPolicy {
    /// Maximum edit records retained per node.
    pub max_edits: usize,
    /// Maximum age (days) a record may reach before it's eligible for pruning.
    pub max_age_days: i64,
    /// Undo window, in hours, from the time of the edit.
    pub undo_window_hours: i64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_edits: 100,
            max_age_days: 30,
            undo_window_hours: 24,
        }
    }
}
