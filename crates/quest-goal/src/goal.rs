// goal.rs — Goal: one tracked objective and its completion behavior.
//
// Every goal shares a name, a per-completion point value, and a completed
// flag. What a completion does depends on the variant:
//   simple    — completes on the first event, still pays on later ones
//   eternal   — never completes, pays on every event
//   checklist — counts events, pays a bonus once the count reaches the target
//
// The variant set is closed. `GoalKind` carries the variant-specific state and
// doubles as the discriminator written by the codec.

use std::fmt;

/// Variant-specific behavior and state of a [`Goal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalKind {
    /// Completed by a single event.
    Simple,

    /// Repeatable forever; never reaches a terminal state.
    Eternal,

    /// Must be recorded `target_count` times; each event at or past the
    /// target pays `bonus_points` on top of the base value.
    Checklist {
        current_count: i64,
        target_count: i64,
        bonus_points: i64,
    },
}

impl GoalKind {
    /// The discriminator text used in persisted records.
    pub fn name(&self) -> &'static str {
        match self {
            GoalKind::Simple => "simple",
            GoalKind::Eternal => "eternal",
            GoalKind::Checklist { .. } => "checklist",
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A goal tracked by a [`GoalLedger`](crate::GoalLedger).
///
/// Fields are private: `base_points`, `target_count` and `bonus_points` are
/// fixed at construction, `completed` only ever goes from false to true, and
/// a checklist's `current_count` only grows.
///
/// Point values are not validated. Negative points and non-positive targets
/// are accepted and behave per the completion formulas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    name: String,
    base_points: i64,
    completed: bool,
    kind: GoalKind,
}

impl Goal {
    /// A goal completed by its first recorded event.
    pub fn simple(name: impl Into<String>, base_points: i64) -> Self {
        Self::with_kind(name, base_points, GoalKind::Simple)
    }

    /// A goal that is never completed and pays on every event.
    pub fn eternal(name: impl Into<String>, base_points: i64) -> Self {
        Self::with_kind(name, base_points, GoalKind::Eternal)
    }

    /// A goal that completes after `target_count` events.
    pub fn checklist(
        name: impl Into<String>,
        base_points: i64,
        target_count: i64,
        bonus_points: i64,
    ) -> Self {
        Self::with_kind(
            name,
            base_points,
            GoalKind::Checklist {
                current_count: 0,
                target_count,
                bonus_points,
            },
        )
    }

    fn with_kind(name: impl Into<String>, base_points: i64, kind: GoalKind) -> Self {
        Self {
            name: name.into(),
            base_points,
            completed: false,
            kind,
        }
    }

    /// Rebuild a goal from persisted state, progress included.
    pub(crate) fn restore(
        name: String,
        base_points: i64,
        completed: bool,
        kind: GoalKind,
    ) -> Self {
        Self {
            name,
            base_points,
            completed,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_points(&self) -> i64 {
        self.base_points
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn kind(&self) -> &GoalKind {
        &self.kind
    }

    /// Discriminator text for this goal's variant.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Record one completion event and return the points it earns.
    ///
    /// There is no idempotence guard. A completed simple goal pays its base
    /// points again, and a checklist past its target pays the bonus on every
    /// further call because the threshold is re-checked each time.
    pub fn complete(&mut self) -> i64 {
        let awarded = match &mut self.kind {
            GoalKind::Simple => {
                self.completed = true;
                self.base_points
            }
            GoalKind::Eternal => self.base_points,
            GoalKind::Checklist {
                current_count,
                target_count,
                bonus_points,
            } => {
                *current_count = current_count.saturating_add(1);
                if *current_count >= *target_count {
                    self.completed = true;
                    self.base_points.saturating_add(*bonus_points)
                } else {
                    self.base_points
                }
            }
        };
        tracing::debug!(
            goal = %self.name,
            kind = self.kind.name(),
            awarded,
            completed = self.completed,
            "goal completion recorded"
        );
        awarded
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.completed { "[X]" } else { "[ ]" };
        write!(f, "{} {}", marker, self.name)?;
        if let GoalKind::Checklist {
            current_count,
            target_count,
            ..
        } = &self.kind
        {
            write!(f, " (Completed {}/{} times)", current_count, target_count)?;
        }
        Ok(())
    }
}
