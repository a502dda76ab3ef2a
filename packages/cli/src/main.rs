mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    create, delete, edit, init, list, set_major, show, Context, CreateArgs, DeleteArgs, EditArgs,
    InitArgs, SetMajorArgs, ShowArgs,
};
use config::{Config, OWNER_ENV};
use learnpath_store::JsonFileStore;

/// Learnpath CLI - Build and browse learning paths
#[derive(Parser, Debug)]
#[command(name = "learnpath")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Owner whose paths to work on (overrides config and LEARNPATH_OWNER)
    #[arg(long, global = true)]
    owner: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a learnpath.config.json in the current directory
    Init(InitArgs),

    /// List paths, newest first
    List,

    /// Create a new path with an empty root column
    Create(CreateArgs),

    /// Delete a path
    Delete(DeleteArgs),

    /// Make a path the major path
    SetMajor(SetMajorArgs),

    /// Print the visible columns of a path
    Show(ShowArgs),

    /// Apply a JSON list of mutations to a path and save it
    Edit(EditArgs),
}

async fn run(cli: Cli, cwd: &str) -> anyhow::Result<()> {
    let command = match cli.command {
        Command::Init(args) => return init(args, cwd),
        command => command,
    };

    let config = Config::load(cwd)?;
    let env_owner = std::env::var(OWNER_ENV).ok();
    let ctx = Context {
        store: JsonFileStore::new(config.get_data_dir(cwd)),
        owner: config.resolve_owner(cli.owner.as_deref(), env_owner.as_deref()),
    };
    tracing::debug!(owner = %ctx.owner, data_dir = %ctx.store.data_dir().display(), "using store");

    match command {
        Command::Init(_) => Ok(()),
        Command::List => list(&ctx).await,
        Command::Create(args) => create(args, &ctx).await,
        Command::Delete(args) => delete(args, &ctx).await,
        Command::SetMajor(args) => set_major(args, &ctx).await,
        Command::Show(args) => show(args, &ctx).await,
        Command::Edit(args) => edit(args, &ctx).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();

    let result = match std::env::current_dir() {
        Ok(cwd) => run(cli, &cwd.display().to_string()).await,
        Err(err) => Err(anyhow::anyhow!("Cannot get current directory: {}", err)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
