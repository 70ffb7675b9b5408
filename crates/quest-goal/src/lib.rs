//! # quest-goal
//!
//! Goal tracking engine for Eternal Quest.
//!
//! A [`GoalLedger`] holds one person's goals in the order they were added
//! and the score earned by completing them. Each [`Goal`] is one of a closed
//! set of variants with its own completion rule:
//!
//! - simple — completed by one event
//! - eternal — never completed, pays on every event
//! - checklist — completed after a target number of events, with a bonus
//!
//! ## Key components
//!
//! - [`Goal`] / [`GoalKind`] — goal state and completion behavior
//! - [`GoalLedger`] — ordered goals, event recording by index, running score
//! - [`codec`] — JSON encoding that keeps variant identity and progress
//! - [`LedgerStore`] — atomic file persistence for a ledger
//! - [`QuestEvent`] / [`EventDispatcher`] — events for notification sinks
//! - [`QuestConfig`] — per-project file layout and settings

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod ledger;
pub mod store;

pub use config::QuestConfig;
pub use error::GoalError;
pub use events::{EventDispatcher, LogSink, NotificationSink, QuestEvent};
pub use goal::{Goal, GoalKind};
pub use ledger::GoalLedger;
pub use store::LedgerStore;
