//! Prompt definitions module.
//!
//! Each prompt lives in its own file and implements `PromptDefinition`.
//! Register new prompts in `registry.rs`.

mod find_statistics;

pub use find_statistics::FindStatisticsPrompt;

use rmcp::model::PromptArgument;

/// Trait for prompt definitions.
pub trait PromptDefinition {
    /// The unique name of the prompt.
    const NAME: &'static str;

    /// A description of what the prompt does.
    const DESCRIPTION: &'static str;

    /// The template string with `{{variable}}` placeholders.
    fn template() -> &'static str;

    /// The arguments this prompt accepts.
    fn arguments() -> Vec<PromptArgument>;
}
