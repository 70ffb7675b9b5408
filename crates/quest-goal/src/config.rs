// config.rs — Quest configuration.
//
// QuestConfig determines where a project's quest state lives: the ledger
// file and the event log. `for_project()` lays everything out under a
// `.quest/` directory in the project root. An optional
// `.quest/config.toml` overrides individual keys; relative paths in it are
// resolved against the project root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Name of the per-project state directory.
pub const QUEST_DIR: &str = ".quest";

/// Name of the optional config file inside [`QUEST_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Where quest state is stored and how the driver behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestConfig {
    /// Root directory of the project.
    pub project_root: PathBuf,

    /// Ledger file read and written by every command.
    pub ledger_file: PathBuf,

    /// JSONL log of quest events.
    pub events_log: PathBuf,

    /// Owner name used when a ledger is created without one.
    pub default_owner: String,

    /// Whether events are appended to `events_log`.
    pub record_events: bool,
}

/// On-disk shape of `.quest/config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    ledger_file: Option<PathBuf>,
    events_log: Option<PathBuf>,
    default_owner: Option<String>,
    record_events: Option<bool>,
}

impl QuestConfig {
    /// Create a config with the standard `.quest/` layout for a project.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let root = project_root.as_ref().to_path_buf();
        let quest_dir = root.join(QUEST_DIR);
        Self {
            ledger_file: quest_dir.join("ledger.json"),
            events_log: quest_dir.join("events.jsonl"),
            default_owner: "Adventurer".to_string(),
            record_events: true,
            project_root: root,
        }
    }

    /// Path of the optional config file for a project.
    pub fn config_path(project_root: impl AsRef<Path>) -> PathBuf {
        project_root.as_ref().join(QUEST_DIR).join(CONFIG_FILE)
    }

    /// Load `path` on top of the project defaults.
    pub fn load(project_root: impl AsRef<Path>, path: &Path) -> Result<Self, GoalError> {
        let content = std::fs::read_to_string(path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| GoalError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::for_project(project_root).merge(file))
    }

    /// Load the project's config file, or fall back to defaults if it
    /// doesn't exist. A present but invalid file is still an error.
    pub fn load_or_default(project_root: impl AsRef<Path>) -> Result<Self, GoalError> {
        let root = project_root.as_ref();
        let path = Self::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no quest config, using defaults");
            return Ok(Self::for_project(root));
        }
        Self::load(root, &path)
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(ledger_file) = file.ledger_file {
            self.ledger_file = self.project_root.join(ledger_file);
        }
        if let Some(events_log) = file.events_log {
            self.events_log = self.project_root.join(events_log);
        }
        if let Some(default_owner) = file.default_owner {
            self.default_owner = default_owner;
        }
        if let Some(record_events) = file.record_events {
            self.record_events = record_events;
        }
        self
    }
}
