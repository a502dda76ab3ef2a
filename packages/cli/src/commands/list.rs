use super::Context;
use anyhow::Result;
use colored::Colorize;
use learnpath_store::PathStore;

pub async fn list(ctx: &Context) -> Result<()> {
    let paths = ctx.store.list(&ctx.owner).await?;

    if paths.is_empty() {
        println!("{}", "No paths yet".yellow());
        return Ok(());
    }

    for path in &paths {
        let marker = if path.is_major {
            "★".yellow().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {}  {}  {}",
            marker,
            path.id.dimmed(),
            path.title.bright_white().bold(),
            path.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
    }

    Ok(())
}
