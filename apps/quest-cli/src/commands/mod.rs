pub mod goal;
pub mod history;
pub mod init;
pub mod menu;

use std::path::Path;

use quest_goal::{EventDispatcher, GoalLedger, LedgerStore, LogSink, QuestConfig, QuestEvent};

/// Resolved config plus the event dispatcher every command shares.
pub struct QuestContext {
    pub config: QuestConfig,
    dispatcher: EventDispatcher,
}

impl QuestContext {
    pub fn new(config: QuestConfig) -> Self {
        let mut dispatcher = EventDispatcher::new();
        if config.record_events {
            dispatcher.add_sink(Box::new(LogSink::new(&config.events_log)));
        }
        Self { config, dispatcher }
    }

    pub fn store(&self) -> LedgerStore {
        LedgerStore::new(&self.config.ledger_file)
    }

    pub fn emit(&self, event: &QuestEvent) {
        self.dispatcher.dispatch(event);
    }

    /// Load the configured ledger, with a hint when none exists yet.
    pub fn load_ledger(&self) -> anyhow::Result<GoalLedger> {
        let store = self.store();
        if !store.exists() {
            anyhow::bail!(
                "No quest log at {}. Run `quest init <name>` first.",
                store.path().display()
            );
        }
        self.load_from(store.path())
    }

    pub fn save_ledger(&self, ledger: &GoalLedger) -> anyhow::Result<()> {
        self.save_to(&self.config.ledger_file, ledger)
    }

    pub fn load_from(&self, path: &Path) -> anyhow::Result<GoalLedger> {
        let ledger = LedgerStore::new(path).load()?;
        self.emit(&QuestEvent::ledger_loaded(path, &ledger));
        Ok(ledger)
    }

    pub fn save_to(&self, path: &Path, ledger: &GoalLedger) -> anyhow::Result<()> {
        LedgerStore::new(path).save(ledger)?;
        self.emit(&QuestEvent::ledger_saved(path, ledger));
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::temp_context;
    use super::*;

    #[test]
    fn load_without_init_explains_what_to_do() {
        let (_dir, ctx) = temp_context();
        let err = ctx.load_ledger().unwrap_err();
        assert!(err.to_string().contains("quest init"));
    }

    #[test]
    fn save_and_load_emit_events() {
        let (_dir, ctx) = temp_context();
        ctx.save_ledger(&GoalLedger::new("Nephi")).unwrap();
        ctx.load_ledger().unwrap();

        let events = LogSink::new(&ctx.config.events_log).read_all().unwrap();
        let types: Vec<&str> = events.iter().map(|e| e.event_type()).collect();
        assert_eq!(types, vec!["ledger_saved", "ledger_loaded"]);
    }

    #[test]
    fn disabled_event_log_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = QuestConfig::for_project(dir.path());
        config.record_events = false;
        let ctx = QuestContext::new(config);

        ctx.save_ledger(&GoalLedger::new("Nephi")).unwrap();
        assert!(!ctx.config.events_log.exists());
    }
}
