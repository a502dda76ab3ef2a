use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use learnpath_store::PathStore;

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Title of the new path
    pub title: String,
}

pub async fn create(args: CreateArgs, ctx: &Context) -> Result<()> {
    let path = ctx.store.create(&ctx.owner, &args.title).await?;

    println!("  {} Created {} ({})", "✓".green(), path.title.bright_white(), path.id);
    if path.is_major {
        println!("  {} Marked as major path", "★".yellow());
    }

    Ok(())
}
