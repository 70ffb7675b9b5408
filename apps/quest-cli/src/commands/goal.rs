// goal.rs — Goal subcommands: add, record, list, score.

use clap::Subcommand;
use quest_goal::{Goal, GoalLedger, QuestEvent};

use super::QuestContext;

#[derive(Subcommand)]
pub enum AddCommands {
    /// A goal completed by a single event.
    Simple {
        /// Goal name (e.g., "Run a marathon").
        name: String,
        /// Points awarded per event.
        #[arg(long, allow_negative_numbers = true)]
        points: i64,
    },
    /// A goal that is never finished and pays on every event.
    Eternal {
        /// Goal name (e.g., "Read scriptures").
        name: String,
        /// Points awarded per event.
        #[arg(long, allow_negative_numbers = true)]
        points: i64,
    },
    /// A goal completed after a number of events, with a bonus.
    Checklist {
        /// Goal name (e.g., "Attend the temple").
        name: String,
        /// Points awarded per event.
        #[arg(long, allow_negative_numbers = true)]
        points: i64,
        /// Number of events needed to complete the goal.
        #[arg(long, allow_negative_numbers = true)]
        target: i64,
        /// Extra points for each event at or past the target.
        #[arg(long, allow_negative_numbers = true)]
        bonus: i64,
    },
}

impl AddCommands {
    fn to_goal(&self) -> Goal {
        match self {
            AddCommands::Simple { name, points } => Goal::simple(name.as_str(), *points),
            AddCommands::Eternal { name, points } => Goal::eternal(name.as_str(), *points),
            AddCommands::Checklist {
                name,
                points,
                target,
                bonus,
            } => Goal::checklist(name.as_str(), *points, *target, *bonus),
        }
    }
}

pub fn add(ctx: &QuestContext, cmd: &AddCommands) -> anyhow::Result<()> {
    let mut ledger = ctx.load_ledger()?;
    let number = add_goal(ctx, &mut ledger, cmd.to_goal());
    ctx.save_ledger(&ledger)?;

    println!("Goal added as #{}: {}", number, ledger.goals()[number - 1]);
    Ok(())
}

pub fn record(ctx: &QuestContext, number: i64) -> anyhow::Result<()> {
    let mut ledger = ctx.load_ledger()?;
    let Some(points) = record_number(ctx, &mut ledger, number) else {
        anyhow::bail!(
            "Invalid goal number: {} (the quest log has {} goal(s))",
            number,
            ledger.len()
        );
    };
    ctx.save_ledger(&ledger)?;

    println!("Recorded! You earned {} points.", points);
    println!("Your score: {}", ledger.score());
    Ok(())
}

pub fn list(ctx: &QuestContext) -> anyhow::Result<()> {
    let ledger = ctx.load_ledger()?;
    if ledger.is_empty() {
        println!("No goals yet. Add one with `quest add`.");
        return Ok(());
    }
    for line in ledger.show_goals() {
        println!("{}", line);
    }
    Ok(())
}

pub fn score(ctx: &QuestContext) -> anyhow::Result<()> {
    let ledger = ctx.load_ledger()?;
    println!("{}'s score: {}", ledger.owner_name(), ledger.score());
    Ok(())
}

/// Append a goal and emit `GoalAdded`. Returns the goal's 1-based number.
pub fn add_goal(ctx: &QuestContext, ledger: &mut GoalLedger, goal: Goal) -> usize {
    ledger.add_goal(goal);
    let number = ledger.len();
    ctx.emit(&QuestEvent::goal_added(number, &ledger.goals()[number - 1]));
    number
}

/// Record an event by 1-based goal number and emit `EventRecorded`.
///
/// Returns `None` for a number that names no goal, so callers can report it
/// instead of treating it as a zero-point event.
pub fn record_number(ctx: &QuestContext, ledger: &mut GoalLedger, number: i64) -> Option<i64> {
    let index = goal_index(ledger, number)?;
    let points = ledger.record_event(index);
    ctx.emit(&QuestEvent::event_recorded(
        number as usize,
        &ledger.goals()[index],
        points,
        ledger.score(),
    ));
    Some(points)
}

/// Convert a 1-based goal number into an index, if it is in range.
fn goal_index(ledger: &GoalLedger, number: i64) -> Option<usize> {
    let index = usize::try_from(number.checked_sub(1)?).ok()?;
    (index < ledger.len()).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::temp_context;
    use quest_goal::{GoalKind, LogSink};

    fn init(ctx: &QuestContext) {
        ctx.save_ledger(&GoalLedger::new("Nephi")).unwrap();
    }

    #[test]
    fn goal_index_bounds() {
        let mut ledger = GoalLedger::new("Nephi");
        ledger.add_goal(Goal::simple("a", 1));
        ledger.add_goal(Goal::simple("b", 1));

        assert_eq!(goal_index(&ledger, 1), Some(0));
        assert_eq!(goal_index(&ledger, 2), Some(1));
        assert_eq!(goal_index(&ledger, 3), None);
        assert_eq!(goal_index(&ledger, 0), None);
        assert_eq!(goal_index(&ledger, -1), None);
        assert_eq!(goal_index(&ledger, i64::MIN), None);
    }

    #[test]
    fn add_then_record_persists_progress() {
        let (_dir, ctx) = temp_context();
        init(&ctx);

        add(
            &ctx,
            &AddCommands::Checklist {
                name: "Attend the temple".to_string(),
                points: 50,
                target: 2,
                bonus: 500,
            },
        )
        .unwrap();
        record(&ctx, 1).unwrap();
        record(&ctx, 1).unwrap();

        let ledger = ctx.load_ledger().unwrap();
        assert_eq!(ledger.score(), 600);
        assert!(ledger.goals()[0].is_completed());
        assert!(matches!(
            ledger.goals()[0].kind(),
            GoalKind::Checklist {
                current_count: 2,
                ..
            }
        ));
    }

    #[test]
    fn record_invalid_number_fails_without_saving() {
        let (_dir, ctx) = temp_context();
        init(&ctx);
        add(
            &ctx,
            &AddCommands::Eternal {
                name: "Read scriptures".to_string(),
                points: 100,
            },
        )
        .unwrap();

        assert!(record(&ctx, 2).is_err());
        assert!(record(&ctx, 0).is_err());
        assert!(record(&ctx, -1).is_err());
        assert_eq!(ctx.load_ledger().unwrap().score(), 0);
    }

    #[test]
    fn commands_require_an_initialized_ledger() {
        let (_dir, ctx) = temp_context();
        assert!(list(&ctx).is_err());
        assert!(score(&ctx).is_err());
        assert!(record(&ctx, 1).is_err());
    }

    #[test]
    fn record_emits_event_with_one_based_number() {
        let (_dir, ctx) = temp_context();
        let mut ledger = GoalLedger::new("Nephi");
        add_goal(&ctx, &mut ledger, Goal::simple("Run a marathon", 1000));
        add_goal(&ctx, &mut ledger, Goal::eternal("Read scriptures", 100));

        assert_eq!(record_number(&ctx, &mut ledger, 2), Some(100));
        assert_eq!(record_number(&ctx, &mut ledger, 3), None);

        let events = LogSink::new(&ctx.config.events_log).read_all().unwrap();
        let last = events.last().unwrap();
        assert_eq!(
            last.summary(),
            "recorded goal #2 \"Read scriptures\" for 100 points (score 100)"
        );
    }
}
