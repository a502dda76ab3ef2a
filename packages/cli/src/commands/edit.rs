use super::Context;
use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use learnpath_editor::{EditSession, Mutation, MutationOutcome};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Id of the path to edit
    pub id: String,

    /// JSON file holding an array of mutations
    pub mutations: PathBuf,

    /// Undo this many steps after applying the mutations
    #[arg(long, default_value_t = 0)]
    pub undo: usize,

    /// Apply and report without saving
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn edit(args: EditArgs, ctx: &Context) -> Result<()> {
    let content = fs::read_to_string(&args.mutations)
        .with_context(|| format!("Cannot read {}", args.mutations.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid mutation list in {}", args.mutations.display()))?;

    let mut session = EditSession::open(&ctx.store, ctx.owner.clone(), &args.id).await?;

    println!(
        "{} {}",
        "✏️  Editing".bright_blue().bold(),
        session.document().title.bright_white()
    );

    let mut applied = 0;
    for mutation in &mutations {
        match session.apply(mutation) {
            MutationOutcome::Applied => {
                applied += 1;
                println!("  {} {}", "✓".green(), mutation.name());
            }
            MutationOutcome::Noop(err) => {
                println!("  {} {} skipped: {}", "-".dimmed(), mutation.name(), err);
            }
            MutationOutcome::Rejected(err) => {
                println!("  {} {} rejected: {}", "✗".red(), mutation.name(), err);
            }
        }
    }

    for _ in 0..args.undo {
        if !session.undo() {
            break;
        }
    }

    println!();
    println!("{} of {} mutation(s) applied", applied, mutations.len());

    if args.dry_run {
        println!("{}", "Dry run, nothing saved".yellow());
        return Ok(());
    }

    let dirty = session.is_dirty();
    if let Err((_, err)) = session.close().await {
        return Err(err).context("Edits were not saved; rerun the command to apply them again");
    }
    if dirty {
        println!("{}", "✅ Saved".green().bold());
    }

    Ok(())
}
