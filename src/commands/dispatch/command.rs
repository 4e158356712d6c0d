//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use weekly_review_core::bail_usage;
use weekly_review_core::config::ReviewConfig;
use weekly_review_core::error::{ReviewError, Result};
use weekly_review_core::vault::FsVault;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub vault_root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, vault_root: &'a PathBuf, start: Instant) -> Self {
        Self {
            cli,
            vault_root,
            start,
        }
    }

    /// Open the vault root, which must be an existing directory
    pub fn open_vault(&self) -> Result<FsVault> {
        if !self.vault_root.exists() {
            return Err(ReviewError::not_found(
                "vault",
                self.vault_root.display(),
            ));
        }
        if !self.vault_root.is_dir() {
            bail_usage!(format!(
                "vault path is not a directory: {}",
                self.vault_root.display()
            ));
        }
        Ok(FsVault::new(self.vault_root.clone()))
    }

    pub fn load_config(&self) -> Result<ReviewConfig> {
        ReviewConfig::load()
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("weekly-review {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("LLM-written weekly reviews for a markdown vault.");
        println!();
        println!("Run `weekly-review --help` for usage information.");
        Ok(())
    }
}
