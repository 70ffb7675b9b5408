// menu.rs — `quest menu`: the interactive Eternal Quest menu.
//
// The menu keeps one ledger in memory. Changes are only written when the
// user picks "Save progress"; "Load progress" replaces the in-memory ledger.
// Input comes through `LineSource` so the loop can be driven by a script in
// tests and by rustyline on a terminal.

use std::io::Write;
use std::path::PathBuf;

use quest_goal::{Goal, GoalLedger, QuestEvent};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::goal::{add_goal, record_number};
use super::QuestContext;

const MENU: &str = "\nMenu:
1. Add a new goal
2. Record an event
3. Show goals
4. Show score
5. Save progress
6. Load progress
7. Exit";

/// A source of input lines for the menu.
pub trait LineSource {
    /// Read one line after showing `prompt`. `None` means input is closed.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// Line editing on the controlling terminal.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn execute(ctx: &QuestContext) -> anyhow::Result<()> {
    let mut terminal = Terminal::new()?;
    let mut stdout = std::io::stdout();
    run(ctx, &mut terminal, &mut stdout)
}

/// Run the menu loop until the user exits or input closes.
pub fn run(ctx: &QuestContext, input: &mut dyn LineSource, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "Welcome to Eternal Quest!")?;
    let Some(mut ledger) = open_ledger(ctx, input, out)? else {
        return Ok(());
    };

    loop {
        writeln!(out, "{}", MENU)?;
        let Some(choice) = input.read_line("Choose an option: ")? else {
            break;
        };
        match choice.trim() {
            "1" => add_from_prompts(ctx, &mut ledger, input, out)?,
            "2" => record_from_prompt(ctx, &mut ledger, input, out)?,
            "3" => show_goals(&ledger, out)?,
            "4" => writeln!(out, "Your score: {}", ledger.score())?,
            "5" => save_from_prompt(ctx, &ledger, input, out)?,
            "6" => {
                if let Some(loaded) = load_from_prompt(ctx, input, out)? {
                    ledger = loaded;
                }
            }
            "7" => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
    Ok(())
}

/// Resume the configured ledger, or start a new one for the user's name.
fn open_ledger(
    ctx: &QuestContext,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> anyhow::Result<Option<GoalLedger>> {
    if ctx.store().exists() {
        let ledger = ctx.load_ledger()?;
        writeln!(
            out,
            "Welcome back, {}! Your score: {}",
            ledger.owner_name(),
            ledger.score()
        )?;
        return Ok(Some(ledger));
    }

    let Some(name) = input.read_line("Enter your name: ")? else {
        return Ok(None);
    };
    let name = match name.trim() {
        "" => ctx.config.default_owner.clone(),
        trimmed => trimmed.to_string(),
    };
    ctx.emit(&QuestEvent::ledger_created(&name));
    Ok(Some(GoalLedger::new(name)))
}

fn add_from_prompts(
    ctx: &QuestContext,
    ledger: &mut GoalLedger,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let Some(kind) = input.read_line("Enter goal type (simple, eternal, checklist): ")? else {
        return Ok(());
    };
    let kind = kind.trim().to_lowercase();
    if !matches!(kind.as_str(), "simple" | "eternal" | "checklist") {
        writeln!(out, "Invalid goal type.")?;
        return Ok(());
    }

    let Some(name) = input.read_line("Enter goal name: ")? else {
        return Ok(());
    };
    let name = name.trim().to_string();
    let Some(points) = read_number(input, out, "Enter goal points: ")? else {
        return Ok(());
    };

    let goal = match kind.as_str() {
        "simple" => Goal::simple(name, points),
        "eternal" => Goal::eternal(name, points),
        _ => {
            let Some(target) = read_number(input, out, "Enter target count: ")? else {
                return Ok(());
            };
            let Some(bonus) = read_number(input, out, "Enter bonus points: ")? else {
                return Ok(());
            };
            Goal::checklist(name, points, target, bonus)
        }
    };

    add_goal(ctx, ledger, goal);
    writeln!(out, "Goal added!")?;
    Ok(())
}

fn record_from_prompt(
    ctx: &QuestContext,
    ledger: &mut GoalLedger,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    show_goals(ledger, out)?;
    let Some(number) = read_number(input, out, "Enter goal number to record: ")? else {
        return Ok(());
    };
    match record_number(ctx, ledger, number) {
        Some(points) => writeln!(out, "Recorded! You earned {} points.", points)?,
        None => writeln!(out, "Invalid goal number.")?,
    }
    Ok(())
}

fn show_goals(ledger: &GoalLedger, out: &mut dyn Write) -> anyhow::Result<()> {
    if ledger.is_empty() {
        writeln!(out, "No goals yet.")?;
    }
    for line in ledger.show_goals() {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn save_from_prompt(
    ctx: &QuestContext,
    ledger: &GoalLedger,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let Some(path) = read_path(ctx, input, "Enter filename to save progress: ")? else {
        return Ok(());
    };
    match ctx.save_to(&path, ledger) {
        Ok(()) => writeln!(out, "Progress saved!")?,
        Err(e) => writeln!(out, "Could not save progress: {:#}", e)?,
    }
    Ok(())
}

fn load_from_prompt(
    ctx: &QuestContext,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> anyhow::Result<Option<GoalLedger>> {
    let Some(path) = read_path(ctx, input, "Enter filename to load progress: ")? else {
        return Ok(None);
    };
    match ctx.load_from(&path) {
        Ok(ledger) => {
            writeln!(out, "Progress loaded!")?;
            Ok(Some(ledger))
        }
        Err(e) => {
            writeln!(out, "Could not load progress: {:#}", e)?;
            Ok(None)
        }
    }
}

/// Read a file name; an empty answer means the configured ledger file.
fn read_path(
    ctx: &QuestContext,
    input: &mut dyn LineSource,
    prompt: &str,
) -> anyhow::Result<Option<PathBuf>> {
    let Some(line) = input.read_line(prompt)? else {
        return Ok(None);
    };
    Ok(Some(match line.trim() {
        "" => ctx.config.ledger_file.clone(),
        name => PathBuf::from(name),
    }))
}

/// Read a whole number. Unparseable input is reported and yields `None`.
fn read_number(
    input: &mut dyn LineSource,
    out: &mut dyn Write,
    prompt: &str,
) -> anyhow::Result<Option<i64>> {
    let Some(line) = input.read_line(prompt)? else {
        return Ok(None);
    };
    match line.trim().parse() {
        Ok(n) => Ok(Some(n)),
        Err(_) => {
            writeln!(out, "Please enter a whole number.")?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::temp_context;
    use std::collections::VecDeque;

    struct Script(VecDeque<String>);

    impl Script {
        fn new(lines: &[&str]) -> Self {
            Self(lines.iter().map(|l| l.to_string()).collect())
        }
    }

    impl LineSource for Script {
        fn read_line(&mut self, _prompt: &str) -> anyhow::Result<Option<String>> {
            Ok(self.0.pop_front())
        }
    }

    fn run_script(ctx: &QuestContext, lines: &[&str]) -> String {
        let mut script = Script::new(lines);
        let mut out = Vec::new();
        run(ctx, &mut script, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_session_adds_records_and_saves() {
        let (_dir, ctx) = temp_context();
        let output = run_script(
            &ctx,
            &[
                "Nephi",
                "1", "simple", "Run a marathon", "1000",
                "1", "checklist", "Attend the temple", "50", "2", "500",
                "2", "2",
                "2", "2",
                "2", "9",
                "3",
                "4",
                "5", "",
                "7",
            ],
        );

        assert!(output.contains("Goal added!"));
        assert!(output.contains("Recorded! You earned 50 points."));
        assert!(output.contains("Recorded! You earned 550 points."));
        assert!(output.contains("Invalid goal number."));
        assert!(output.contains("2. [X] Attend the temple (Completed 2/2 times)"));
        assert!(output.contains("Your score: 600"));
        assert!(output.contains("Progress saved!"));
        assert!(output.ends_with("Goodbye!\n"));

        let saved = ctx.load_ledger().unwrap();
        assert_eq!(saved.owner_name(), "Nephi");
        assert_eq!(saved.score(), 600);
        assert_eq!(saved.len(), 2);
    }

    #[test]
    fn unsaved_changes_are_not_written() {
        let (_dir, ctx) = temp_context();
        run_script(&ctx, &["Nephi", "1", "eternal", "Pray", "10", "7"]);
        assert!(!ctx.store().exists());
    }

    #[test]
    fn resumes_existing_ledger_and_loads_other_files() {
        let (dir, ctx) = temp_context();
        let mut existing = GoalLedger::new("Nephi");
        existing.add_goal(Goal::eternal("Read scriptures", 100));
        existing.record_event(0);
        ctx.save_ledger(&existing).unwrap();

        let other_path = dir.path().join("other.json");
        let mut other = GoalLedger::new("Lehi");
        other.add_goal(Goal::simple("Build a ship", 5000));
        ctx.save_to(&other_path, &other).unwrap();

        let output = run_script(
            &ctx,
            &["4", "6", other_path.to_str().unwrap(), "3", "4", "7"],
        );

        assert!(output.contains("Welcome back, Nephi! Your score: 100"));
        assert!(output.contains("Progress loaded!"));
        assert!(output.contains("1. [ ] Build a ship"));
        assert!(output.contains("Your score: 0"));
    }

    #[test]
    fn bad_input_is_reported_and_menu_continues() {
        let (dir, ctx) = temp_context();
        let missing = dir.path().join("missing.json");
        let output = run_script(
            &ctx,
            &[
                "",
                "9",
                "1", "weekly",
                "1", "simple", "Run", "lots",
                "6", missing.to_str().unwrap(),
                "3",
            ],
        );

        assert!(output.contains("Invalid choice. Please try again."));
        assert!(output.contains("Invalid goal type."));
        assert!(output.contains("Please enter a whole number."));
        assert!(output.contains("Could not load progress"));
        assert!(output.contains("No goals yet."));
    }
}
