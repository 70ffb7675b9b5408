// codec.rs — Ledger persistence format.
//
// A ledger is stored as one pretty-printed JSON document:
//
//   {
//     "owner_name": "Nephi",
//     "score": 1150,
//     "goals": [
//       { "kind": "simple", "name": "...", "base_points": 1000, "completed": true },
//       { "kind": "checklist", "name": "...", "base_points": 50, "completed": false,
//         "current_count": 1, "target_count": 10, "bonus_points": 500 }
//     ]
//   }
//
// `kind` is the variant discriminator. Decoding reads it first and dispatches
// to the matching variant, so a goal comes back with the same behavior and
// progress it was saved with. Record fields are all optional at the serde
// level so that an absent field is reported as `MissingField` rather than a
// generic JSON error.

use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::goal::{Goal, GoalKind};
use crate::ledger::GoalLedger;

#[derive(Debug, Serialize, Deserialize)]
struct LedgerRecord {
    owner_name: Option<String>,
    score: Option<i64>,
    goals: Option<Vec<GoalRecord>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GoalRecord {
    kind: Option<String>,
    name: Option<String>,
    base_points: Option<i64>,
    completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bonus_points: Option<i64>,
}

impl From<&Goal> for GoalRecord {
    fn from(goal: &Goal) -> Self {
        let (current_count, target_count, bonus_points) = match goal.kind() {
            GoalKind::Simple | GoalKind::Eternal => (None, None, None),
            GoalKind::Checklist {
                current_count,
                target_count,
                bonus_points,
            } => (
                Some(*current_count),
                Some(*target_count),
                Some(*bonus_points),
            ),
        };
        Self {
            kind: Some(goal.kind_name().to_string()),
            name: Some(goal.name().to_string()),
            base_points: Some(goal.base_points()),
            completed: Some(goal.is_completed()),
            current_count,
            target_count,
            bonus_points,
        }
    }
}

impl GoalRecord {
    fn into_goal(self, location: &str) -> Result<Goal, GoalError> {
        let kind_name = require(self.kind, location, "kind")?;
        let kind = match kind_name.as_str() {
            "simple" => GoalKind::Simple,
            "eternal" => GoalKind::Eternal,
            "checklist" => GoalKind::Checklist {
                current_count: require(self.current_count, location, "current_count")?,
                target_count: require(self.target_count, location, "target_count")?,
                bonus_points: require(self.bonus_points, location, "bonus_points")?,
            },
            _ => {
                return Err(GoalError::UnknownKind {
                    location: location.to_string(),
                    kind: kind_name,
                })
            }
        };
        Ok(Goal::restore(
            require(self.name, location, "name")?,
            require(self.base_points, location, "base_points")?,
            require(self.completed, location, "completed")?,
            kind,
        ))
    }
}

fn require<T>(value: Option<T>, location: &str, field: &'static str) -> Result<T, GoalError> {
    value.ok_or_else(|| GoalError::MissingField {
        location: location.to_string(),
        field,
    })
}

/// Encode a ledger as pretty-printed JSON bytes.
pub fn encode(ledger: &GoalLedger) -> Result<Vec<u8>, GoalError> {
    let record = LedgerRecord {
        owner_name: Some(ledger.owner_name().to_string()),
        score: Some(ledger.score()),
        goals: Some(ledger.goals().iter().map(GoalRecord::from).collect()),
    };
    serde_json::to_vec_pretty(&record).map_err(GoalError::Encode)
}

/// Decode a ledger previously produced by [`encode`].
///
/// Either the whole ledger is reconstructed or an error is returned; no
/// partially decoded ledger ever escapes.
pub fn decode(bytes: &[u8]) -> Result<GoalLedger, GoalError> {
    let record: LedgerRecord = serde_json::from_slice(bytes)?;

    let owner_name = require(record.owner_name, "ledger", "owner_name")?;
    let score = require(record.score, "ledger", "score")?;
    let goals = require(record.goals, "ledger", "goals")?
        .into_iter()
        .enumerate()
        .map(|(i, goal)| goal.into_goal(&format!("goals[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GoalLedger::restore(owner_name, goals, score))
}
