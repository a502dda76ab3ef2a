use super::Context;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use learnpath_editor::{visible_columns, Column, ColumnType, Path, SectionContent, Selection};
use learnpath_store::PathStore;
use thiserror::Error;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Id of the path to show
    pub id: String,

    /// Click an item, as COLUMN=ITEM; repeat to walk deeper
    #[arg(short, long = "select", value_parser = parse_select)]
    pub select: Vec<(String, String)>,

    /// Print the whole document as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Error)]
#[error("expected COLUMN=ITEM, got `{0}`")]
pub struct SelectParseError(String);

fn parse_select(raw: &str) -> Result<(String, String), SelectParseError> {
    match raw.split_once('=') {
        Some((column, item)) if !column.is_empty() && !item.is_empty() => {
            Ok((column.to_string(), item.to_string()))
        }
        _ => Err(SelectParseError(raw.to_string())),
    }
}

pub async fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let path = ctx
        .store
        .get(&ctx.owner, &args.id)
        .await?
        .ok_or_else(|| anyhow!("Path not found: {}", args.id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&path)?);
        return Ok(());
    }

    let mut selection = Selection::new();
    for (column_id, item_id) in &args.select {
        selection.select(&path, column_id, item_id);
    }

    let star = if path.is_major { " ★" } else { "" };
    println!("{}{}", path.title.bright_white().bold(), star.yellow());
    for line in outline(&path, &selection) {
        println!("{}", line);
    }

    Ok(())
}

/// Text rendering of the visible column chain
pub fn outline(path: &Path, selection: &Selection) -> Vec<String> {
    let mut lines = Vec::new();

    for column in visible_columns(path, selection) {
        lines.push(String::new());
        lines.push(format!(
            "[{}] {} ({}, {}px)",
            column.id,
            column.title,
            column_kind(column),
            column.width
        ));

        let active = selection.active_item(&column.id);
        for item in &column.items {
            let marker = if active == Some(item.id.as_str()) { "▸" } else { "-" };
            let opens = if path.has_child_column(&item.id) { " →" } else { "" };
            lines.push(format!("  {} {} ({}){}", marker, item.title, item.id, opens));
        }

        for section in &column.sections {
            lines.push(format!("  # {}", summarize(&section.content)));
        }
    }

    lines
}

fn column_kind(column: &Column) -> &'static str {
    match column.column_type {
        ColumnType::Branch => "branch",
        ColumnType::Dynamic => "content",
    }
}

fn summarize(content: &SectionContent) -> String {
    match content {
        SectionContent::Heading { text } => format!("heading: {}", text),
        SectionContent::SubHeading { text } => format!("sub-heading: {}", text),
        SectionContent::Paragraph { text } => format!("paragraph: {}", text),
        SectionContent::Image { src, .. } => format!("image: {}", src),
        SectionContent::Video { url, .. } => format!("video: {}", url),
        SectionContent::Bullets { items, .. } => format!("bullets: {} item(s)", items.len()),
        SectionContent::Qanda { question, .. } => format!("q&a: {}", question),
        SectionContent::Link { text, url } => format!("link: {} <{}>", text, url),
        SectionContent::Table { cells } => {
            let cols = cells.first().map_or(0, Vec::len);
            format!("table: {}x{}", cells.len(), cols)
        }
        SectionContent::Floating { text, .. } => format!("floating: {}", text),
    }
}
