// events.rs — Event model and notification dispatch.
//
// The driver emits a QuestEvent whenever it changes or persists a ledger.
// Notification sinks subscribe to these events; the always-on sink appends
// them as JSONL so `quest history` can replay what happened.
//
// `GoalLedger` never emits events itself; only the driver dispatches them.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::goal::Goal;
use crate::ledger::GoalLedger;

/// Events emitted at key points in a ledger's life.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum QuestEvent {
    /// A new, empty ledger was started.
    LedgerCreated {
        owner_name: String,
        timestamp: DateTime<Utc>,
    },

    /// A goal was appended to the ledger.
    GoalAdded {
        goal_number: usize,
        goal_name: String,
        kind: String,
        timestamp: DateTime<Utc>,
    },

    /// A completion event was recorded against a goal.
    EventRecorded {
        goal_number: usize,
        goal_name: String,
        points: i64,
        score: i64,
        completed: bool,
        timestamp: DateTime<Utc>,
    },

    /// The ledger was written to disk.
    LedgerSaved {
        path: String,
        goal_count: usize,
        score: i64,
        timestamp: DateTime<Utc>,
    },

    /// The ledger was read from disk.
    LedgerLoaded {
        path: String,
        goal_count: usize,
        score: i64,
        timestamp: DateTime<Utc>,
    },
}

impl QuestEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            QuestEvent::LedgerCreated { .. } => "ledger_created",
            QuestEvent::GoalAdded { .. } => "goal_added",
            QuestEvent::EventRecorded { .. } => "event_recorded",
            QuestEvent::LedgerSaved { .. } => "ledger_saved",
            QuestEvent::LedgerLoaded { .. } => "ledger_loaded",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            QuestEvent::LedgerCreated { timestamp, .. }
            | QuestEvent::GoalAdded { timestamp, .. }
            | QuestEvent::EventRecorded { timestamp, .. }
            | QuestEvent::LedgerSaved { timestamp, .. }
            | QuestEvent::LedgerLoaded { timestamp, .. } => *timestamp,
        }
    }

    pub fn ledger_created(owner_name: &str) -> Self {
        QuestEvent::LedgerCreated {
            owner_name: owner_name.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// `goal_number` is 1-based, as shown to the user.
    pub fn goal_added(goal_number: usize, goal: &Goal) -> Self {
        QuestEvent::GoalAdded {
            goal_number,
            goal_name: goal.name().to_string(),
            kind: goal.kind_name().to_string(),
            timestamp: Utc::now(),
        }
    }

    /// `goal_number` is 1-based, as shown to the user.
    pub fn event_recorded(goal_number: usize, goal: &Goal, points: i64, score: i64) -> Self {
        QuestEvent::EventRecorded {
            goal_number,
            goal_name: goal.name().to_string(),
            points,
            score,
            completed: goal.is_completed(),
            timestamp: Utc::now(),
        }
    }

    pub fn ledger_saved(path: &Path, ledger: &GoalLedger) -> Self {
        QuestEvent::LedgerSaved {
            path: path.display().to_string(),
            goal_count: ledger.len(),
            score: ledger.score(),
            timestamp: Utc::now(),
        }
    }

    pub fn ledger_loaded(path: &Path, ledger: &GoalLedger) -> Self {
        QuestEvent::LedgerLoaded {
            path: path.display().to_string(),
            goal_count: ledger.len(),
            score: ledger.score(),
            timestamp: Utc::now(),
        }
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        match self {
            QuestEvent::LedgerCreated { owner_name, .. } => {
                format!("started a quest log for {}", owner_name)
            }
            QuestEvent::GoalAdded {
                goal_number,
                goal_name,
                kind,
                ..
            } => format!("added {} goal #{} \"{}\"", kind, goal_number, goal_name),
            QuestEvent::EventRecorded {
                goal_number,
                goal_name,
                points,
                score,
                ..
            } => format!(
                "recorded goal #{} \"{}\" for {} points (score {})",
                goal_number, goal_name, points, score
            ),
            QuestEvent::LedgerSaved {
                path, goal_count, ..
            } => format!("saved {} goal(s) to {}", goal_count, path),
            QuestEvent::LedgerLoaded {
                path, goal_count, ..
            } => format!("loaded {} goal(s) from {}", goal_count, path),
        }
    }
}

/// Trait for receiving quest events.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged but don't stop the caller.
    fn send(&self, event: &QuestEvent) -> Result<(), GoalError>;
}

/// Logs events as JSONL to a file (always-on sink).
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read every event in the log, oldest first. A missing log is empty.
    ///
    /// Lines that fail to parse are skipped with a warning so a single bad
    /// line doesn't hide the rest of the history.
    pub fn read_all(&self) -> Result<Vec<QuestEvent>, GoalError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(&self.path).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        let mut events = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| GoalError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<QuestEvent>(&line) {
                Ok(event) => events.push(event),
                Err(e) => tracing::warn!(line = i + 1, "skipping unreadable event: {}", e),
            }
        }
        Ok(events)
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &QuestEvent) -> Result<(), GoalError> {
        // Ensure parent directory exists.
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| GoalError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)
            .map_err(|e| GoalError::NotificationError(e.to_string()))?;
        writeln!(file, "{}", json).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Dispatches events to multiple sinks.
///
/// Errors from individual sinks are logged (via tracing) but don't
/// prevent other sinks from receiving the event.
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no sinks.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a notification sink.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Dispatch an event to all sinks.
    pub fn dispatch(&self, event: &QuestEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!("notification sink error: {}", e);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn send(&self, _event: &QuestEvent) -> Result<(), GoalError> {
            Err(GoalError::NotificationError("sink offline".to_string()))
        }
    }

    #[test]
    fn event_serialization_round_trip() {
        let goal = Goal::eternal("Read scriptures", 100);
        let event = QuestEvent::event_recorded(2, &goal, 100, 350);
        let json = serde_json::to_string(&event).unwrap();
        let restored: QuestEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event.event_type(), restored.event_type());
        assert_eq!(event.timestamp(), restored.timestamp());
        assert!(json.contains("\"event_recorded\""));
    }

    #[test]
    fn log_sink_appends_and_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let sink = LogSink::new(&path);

        let goal = Goal::simple("Run a marathon", 1000);
        sink.send(&QuestEvent::ledger_created("Nephi")).unwrap();
        sink.send(&QuestEvent::goal_added(1, &goal)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);

        let events = sink.read_all().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "ledger_created");
        assert_eq!(events[1].event_type(), "goal_added");
    }

    #[test]
    fn read_all_of_missing_log_is_empty() {
        let dir = tempdir().unwrap();
        let sink = LogSink::new(dir.path().join("nothing.jsonl"));
        assert!(sink.read_all().unwrap().is_empty());
    }

    #[test]
    fn read_all_skips_unreadable_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let sink = LogSink::new(&path);
        sink.send(&QuestEvent::ledger_created("Nephi")).unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{ not an event").unwrap();
        sink.send(&QuestEvent::ledger_created("Lehi")).unwrap();

        assert_eq!(sink.read_all().unwrap().len(), 2);
    }

    #[test]
    fn dispatcher_sends_to_all_sinks_despite_failures() {
        let dir = tempdir().unwrap();
        let path1 = dir.path().join("sink1.jsonl");
        let path2 = dir.path().join("sink2.jsonl");

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(LogSink::new(&path1)));
        dispatcher.add_sink(Box::new(FailingSink));
        dispatcher.add_sink(Box::new(LogSink::new(&path2)));

        dispatcher.dispatch(&QuestEvent::ledger_created("Nephi"));

        assert!(fs::read_to_string(&path1)
            .unwrap()
            .contains("ledger_created"));
        assert!(fs::read_to_string(&path2)
            .unwrap()
            .contains("ledger_created"));
    }

    #[test]
    fn summaries_describe_events() {
        let mut goal = Goal::checklist("Attend the temple", 50, 1, 500);
        let points = goal.complete();
        let event = QuestEvent::event_recorded(3, &goal, points, 550);
        assert_eq!(
            event.summary(),
            "recorded goal #3 \"Attend the temple\" for 550 points (score 550)"
        );
        assert_eq!(
            QuestEvent::goal_added(1, &Goal::simple("Run", 5)).summary(),
            "added simple goal #1 \"Run\""
        );
    }
}
