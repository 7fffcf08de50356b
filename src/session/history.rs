//! Capped, newest-first history of completed generations

use chrono::{DateTime, Local, TimeZone};

use crate::kind::AssistantKind;
use crate::storage::{HistoryEntry, Persistence};

/// Entries kept per assistant kind
pub const HISTORY_CAPACITY: usize = 10;

/// Format a timestamp the way history entries display it
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use teachassist::session::history::format_timestamp;
///
/// let at = Utc.with_ymd_and_hms(2026, 10, 17, 15, 4, 0).unwrap();
/// assert_eq!(format_timestamp(&at), "Oct 17, 2026, 3:04 PM");
/// ```
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%b %-d, %Y, %-I:%M %p").to_string()
}

impl HistoryEntry {
    /// Entry stamped with the current local time
    pub fn now(input: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            timestamp: format_timestamp(&Local::now()),
            input: input.into(),
            content: content.into(),
        }
    }
}

/// Insert `entry` at the front and drop anything past [`HISTORY_CAPACITY`]
pub fn push_capped(log: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    log.insert(0, entry);
    log.truncate(HISTORY_CAPACITY);
}

/// Per-kind history persisted in its own slot
///
/// There is a single writer (the active session), so no ordering beyond
/// insertion order is needed.
#[derive(Clone)]
pub struct HistoryLog {
    persistence: Persistence,
}

impl HistoryLog {
    /// History over the given persistence adapter
    pub fn new(persistence: Persistence) -> Self {
        Self { persistence }
    }

    /// Prepend `entry` to the log for `kind`, keeping at most ten entries
    ///
    /// Returns whether the updated log was saved.
    pub fn append(&self, kind: AssistantKind, entry: HistoryEntry) -> bool {
        let mut log = self.list(kind);
        push_capped(&mut log, entry);
        self.persistence.save(&kind.history_key(), &log)
    }

    /// Entries for `kind`, newest first; empty when nothing is stored
    pub fn list(&self, kind: AssistantKind) -> Vec<HistoryEntry> {
        self.persistence
            .load::<Vec<HistoryEntry>>(&kind.history_key())
            .unwrap_or_default()
    }

    /// Delete the log for `kind`
    pub fn clear(&self, kind: AssistantKind) {
        self.persistence.clear(&kind.history_key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Utc;
    use std::sync::Arc;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry {
            timestamp: format!("t{}", n),
            input: format!("input {}", n),
            content: format!("content {}", n),
        }
    }

    fn history() -> HistoryLog {
        HistoryLog::new(Persistence::new(Arc::new(MemoryStore::new())))
    }

    #[test]
    fn test_append_inserts_newest_first() {
        let log = history();
        assert!(log.append(AssistantKind::Report, entry(1)));
        assert!(log.append(AssistantKind::Report, entry(2)));

        let entries = log.list(AssistantKind::Report);
        assert_eq!(entries, vec![entry(2), entry(1)]);
    }

    #[test]
    fn test_eleventh_append_evicts_oldest() {
        let log = history();
        for n in 1..=10 {
            log.append(AssistantKind::LessonPlan, entry(n));
        }
        assert_eq!(log.list(AssistantKind::LessonPlan).len(), HISTORY_CAPACITY);

        log.append(AssistantKind::LessonPlan, entry(11));
        let entries = log.list(AssistantKind::LessonPlan);
        assert_eq!(entries.len(), HISTORY_CAPACITY);
        assert_eq!(entries[0], entry(11));
        assert_eq!(entries[9], entry(2));
        assert!(!entries.contains(&entry(1)));
    }

    #[test]
    fn test_kinds_are_independent() {
        let log = history();
        log.append(AssistantKind::Report, entry(1));
        assert!(log.list(AssistantKind::LearningPlan).is_empty());
    }

    #[test]
    fn test_clear_removes_only_that_kind() {
        let log = history();
        log.append(AssistantKind::Report, entry(1));
        log.append(AssistantKind::LessonPlan, entry(2));
        log.clear(AssistantKind::Report);
        assert!(log.list(AssistantKind::Report).is_empty());
        assert_eq!(log.list(AssistantKind::LessonPlan), vec![entry(2)]);
    }

    #[test]
    fn test_push_capped_on_empty() {
        let mut log = Vec::new();
        push_capped(&mut log, entry(1));
        assert_eq!(log, vec![entry(1)]);
    }

    #[test]
    fn test_format_timestamp_morning_and_midnight() {
        let morning = Utc.with_ymd_and_hms(2026, 1, 5, 9, 7, 0).unwrap();
        assert_eq!(format_timestamp(&morning), "Jan 5, 2026, 9:07 AM");
        let midnight = Utc.with_ymd_and_hms(2026, 12, 31, 0, 30, 0).unwrap();
        assert_eq!(format_timestamp(&midnight), "Dec 31, 2026, 12:30 AM");
    }

    #[test]
    fn test_entry_now_has_timestamp() {
        let entry = HistoryEntry::now("notes", "draft");
        assert!(entry.timestamp.contains(", "));
        assert_eq!(entry.input, "notes");
    }
}
