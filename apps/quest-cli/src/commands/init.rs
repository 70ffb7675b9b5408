// init.rs — `quest init`: start a new quest log.

use quest_goal::{GoalLedger, QuestEvent};

use super::QuestContext;

pub fn execute(ctx: &QuestContext, owner: Option<&str>, force: bool) -> anyhow::Result<()> {
    let store = ctx.store();
    if store.exists() && !force {
        anyhow::bail!(
            "A quest log already exists at {} (use --force to replace it)",
            store.path().display()
        );
    }

    let owner = owner.unwrap_or(&ctx.config.default_owner);
    let ledger = GoalLedger::new(owner);
    ctx.emit(&QuestEvent::ledger_created(owner));
    ctx.save_ledger(&ledger)?;

    println!("Welcome to Eternal Quest, {}!", owner);
    println!("  Ledger: {}", store.path().display());
    Ok(())
}
