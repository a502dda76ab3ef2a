use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use learnpath_store::PathStore;

#[derive(Debug, Args)]
pub struct SetMajorArgs {
    /// Id of the path to promote
    pub id: String,
}

pub async fn set_major(args: SetMajorArgs, ctx: &Context) -> Result<()> {
    ctx.store.set_major(&ctx.owner, &args.id).await?;

    println!("  {} {} is now the major path", "★".yellow(), args.id);

    Ok(())
}
