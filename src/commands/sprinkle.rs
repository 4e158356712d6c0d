//! `weekly-review sprinkle` command - rewrite text with the chat model
//!
//! The text comes from `--text`, `--file`, or stdin. On a terminal each reply
//! is shown for accept/retry/reject unless `--yes` is given.
//!
//! Example usage:
//! - `weekly-review sprinkle --prompt "make it a bullet list" --file draft.md`
//! - `pbpaste | weekly-review sprinkle --prompt "fix grammar"`

use std::fs;
use std::io::{self, BufRead, IsTerminal, Read, Write};

use tracing::debug;

use crate::cli::{OutputFormat, SprinkleArgs};
use crate::commands::dispatch::CommandContext;
use weekly_review_core::bail_usage;
use weekly_review_core::error::{ReviewError, Result};
use weekly_review_core::llm::UreqTransport;
use weekly_review_core::sprinkle::{run_sprinkle, SprinkleDecision};

/// Where the selection was read from
enum Selection {
    Argument(String),
    Stdin(String),
}

impl Selection {
    fn text(&self) -> &str {
        match self {
            Selection::Argument(text) | Selection::Stdin(text) => text,
        }
    }
}

/// Execute the sprinkle command
pub fn execute(ctx: &CommandContext, args: &SprinkleArgs) -> Result<()> {
    let selection = read_selection(args)?;

    let mut config = ctx.load_config()?;
    if let Some(model) = &args.model {
        config.llm.model = model.clone();
    }
    config.validate()?;

    // stdin already holds the selection when piped, so there is nobody to ask
    let interactive = !args.yes
        && matches!(selection, Selection::Argument(_))
        && io::stdin().is_terminal()
        && io::stderr().is_terminal();
    debug!(interactive, chars = selection.text().len(), "sprinkle_input");

    let transport = UreqTransport::new();
    let reply = run_sprinkle(
        &config.llm,
        &transport,
        &args.prompt,
        selection.text(),
        |reply| {
            if interactive {
                ask_decision(reply)
            } else {
                Ok(SprinkleDecision::Accept)
            }
        },
    )?;

    match (ctx.cli.format, reply) {
        (OutputFormat::Json, reply) => {
            let output = serde_json::json!({
                "accepted": reply.is_some(),
                "reply": reply,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        (OutputFormat::Human, Some(reply)) => println!("{}", reply),
        (OutputFormat::Human, None) => {
            if !ctx.cli.quiet {
                eprintln!("Reply discarded.");
            }
        }
    }

    Ok(())
}

fn read_selection(args: &SprinkleArgs) -> Result<Selection> {
    if let Some(text) = &args.text {
        return Ok(Selection::Argument(text.clone()));
    }

    if let Some(path) = &args.file {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ReviewError::not_found("file", path.display()),
            _ => ReviewError::io_operation("read", path.display(), e),
        })?;
        return Ok(Selection::Argument(text));
    }

    if io::stdin().is_terminal() {
        bail_usage!("no text to rewrite: pass --text, --file, or pipe text on stdin");
    }

    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(Selection::Stdin(text))
}

/// Show `reply` on stderr and read the user's choice from stdin
fn ask_decision(reply: &str) -> Result<SprinkleDecision> {
    let mut stderr = io::stderr();
    writeln!(stderr, "\n{}\n", reply)?;

    let stdin = io::stdin();
    loop {
        write!(stderr, "[a]ccept, [r]etry, or re[j]ect? ")?;
        stderr.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(SprinkleDecision::Reject);
        }

        if let Some(decision) = parse_decision(&line) {
            return Ok(decision);
        }
    }
}

fn parse_decision(input: &str) -> Option<SprinkleDecision> {
    match input.trim().to_ascii_lowercase().as_str() {
        "a" | "accept" | "y" | "yes" => Some(SprinkleDecision::Accept),
        "r" | "retry" => Some(SprinkleDecision::Retry),
        "j" | "reject" | "n" | "no" => Some(SprinkleDecision::Reject),
        _ => None,
    }
}
