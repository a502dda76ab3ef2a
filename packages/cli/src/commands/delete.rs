use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use learnpath_store::PathStore;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Id of the path to delete
    pub id: String,
}

pub async fn delete(args: DeleteArgs, ctx: &Context) -> Result<()> {
    ctx.store.delete(&ctx.owner, &args.id).await?;

    println!("  {} Deleted {}", "✓".green(), args.id);

    Ok(())
}
