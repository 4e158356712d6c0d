//! Weekly Review Core Library
//!
//! Core logic for turning a markdown vault into an LLM-written weekly review:
//! period resolution, vault scanning, evidence packing, prompt templates, the
//! chat client, filename resolution and note rendering.

pub mod config;
pub mod error;
pub mod evidence;
pub mod filenames;
pub mod frontmatter;
pub mod llm;
pub mod logging;
pub mod period;
pub mod prompt;
pub mod render;
pub mod review;
pub mod scan;
pub mod sprinkle;
pub mod vault;
