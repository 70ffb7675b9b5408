// history.rs — `quest history`: show recent quest events.

use quest_goal::LogSink;

use super::QuestContext;

pub fn execute(ctx: &QuestContext, limit: usize) -> anyhow::Result<()> {
    let path = &ctx.config.events_log;
    if !path.exists() {
        println!("No event log found at {}", path.display());
        return Ok(());
    }

    let events = LogSink::new(path).read_all()?;
    let start = events.len().saturating_sub(limit);
    let recent = &events[start..];

    if recent.is_empty() {
        println!("No quest events.");
        return Ok(());
    }

    println!("{:<20} {:<16} SUMMARY", "TIMESTAMP", "EVENT");
    println!("{}", "-".repeat(80));

    for event in recent {
        println!(
            "{:<20} {:<16} {}",
            event.timestamp().format("%Y-%m-%d %H:%M:%S"),
            event.event_type(),
            event.summary(),
        );
    }
    Ok(())
}
