//! Command dispatch logic for weekly-review

use std::time::Instant;

use tracing::debug;

use crate::cli::paths::resolve_vault_path;
use crate::cli::{Cli, Commands};
use crate::commands;
use weekly_review_core::error::Result;

mod command;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let vault_root = resolve_vault_path(cli.vault.clone());

    debug!(elapsed = ?start.elapsed(), vault = %vault_root.display(), "resolve_vault");

    let ctx = CommandContext::new(cli, &vault_root, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Review(args) => commands::review::execute(ctx, args),
            Commands::Sprinkle(args) => commands::sprinkle::execute(ctx, args),
            Commands::Config { command } => commands::config::execute(ctx, command),
        }
    }
}
