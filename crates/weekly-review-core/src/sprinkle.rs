//! Inline rewrite of a text selection

use tracing::debug;

use crate::bail_invalid;
use crate::config::LlmConfig;
use crate::error::Result;
use crate::llm::{call_llm, HttpTransport};
use crate::prompt::build_sprinkle_prompt;

/// What the user chose after seeing a generated reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprinkleDecision {
    /// Use the reply
    Accept,
    /// Ask the model again with the same prompt
    Retry,
    /// Discard the reply
    Reject,
}

/// Ask the model to rewrite `selected_text` and let `decide` review each reply.
///
/// Returns `Some(reply)` once a reply is accepted and `None` when the user
/// rejects one. Every retry is a fresh chat call with the same prompt.
pub fn run_sprinkle<F>(
    config: &LlmConfig,
    transport: &dyn HttpTransport,
    user_prompt: &str,
    selected_text: &str,
    mut decide: F,
) -> Result<Option<String>>
where
    F: FnMut(&str) -> Result<SprinkleDecision>,
{
    if selected_text.trim().is_empty() {
        bail_invalid!("no text selected");
    }

    let prompt = build_sprinkle_prompt(user_prompt, selected_text);

    let mut round: u32 = 0;
    loop {
        round += 1;
        let reply = call_llm(config, transport, &prompt)?;
        let decision = decide(&reply)?;
        debug!(round, ?decision, "sprinkle reply reviewed");

        match decision {
            SprinkleDecision::Accept => return Ok(Some(reply)),
            SprinkleDecision::Reject => return Ok(None),
            SprinkleDecision::Retry => continue,
        }
    }
}
