// ledger.rs — GoalLedger: one person's ordered goals and running score.
//
// Goals are addressed by position. Callers see 1-based numbers (as printed
// by `show_goals`), the ledger works with 0-based indices internally.
// The score only ever accumulates what `Goal::complete` returned; it is
// never recomputed from goal state.

use crate::goal::Goal;

/// An ordered collection of goals plus the score they have earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalLedger {
    owner_name: String,
    goals: Vec<Goal>,
    score: i64,
}

impl GoalLedger {
    /// Create an empty ledger with a zero score.
    pub fn new(owner_name: impl Into<String>) -> Self {
        Self {
            owner_name: owner_name.into(),
            goals: Vec::new(),
            score: 0,
        }
    }

    /// Rebuild a ledger from persisted state. The score is taken verbatim.
    pub(crate) fn restore(owner_name: String, goals: Vec<Goal>, score: i64) -> Self {
        Self {
            owner_name,
            goals,
            score,
        }
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Append a goal. Its 1-based number is the new `len()`.
    pub fn add_goal(&mut self, goal: Goal) {
        tracing::debug!(goal = %goal.name(), kind = goal.kind_name(), "goal added");
        self.goals.push(goal);
    }

    /// Complete the goal at `index` (0-based) and add the award to the score.
    ///
    /// An out-of-range index returns 0 and changes nothing. A goal can also
    /// legitimately award 0 points, so a caller that needs to tell the two
    /// apart must check `index < len()` first.
    pub fn record_event(&mut self, index: usize) -> i64 {
        if index >= self.goals.len() {
            tracing::debug!(index, goals = self.goals.len(), "record_event index out of range");
            return 0;
        }
        let awarded = self.goals[index].complete();
        self.score = self.score.saturating_add(awarded);
        awarded
    }

    /// Like [`record_event`](Self::record_event), but takes the 1-based
    /// number shown by [`show_goals`](Self::show_goals). Zero, negative, and
    /// too-large numbers are out of range and return 0.
    pub fn record_event_by_number(&mut self, number: i64) -> i64 {
        match number
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
        {
            Some(index) => self.record_event(index),
            None => 0,
        }
    }

    /// One line per goal, in order: `"{number}. {goal}"`.
    pub fn show_goals(&self) -> Vec<String> {
        self.goals
            .iter()
            .enumerate()
            .map(|(i, goal)| format!("{}. {}", i + 1, goal))
            .collect()
    }
}
