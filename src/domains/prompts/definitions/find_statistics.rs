//! Statistics discovery prompt.
//!
//! Walks the model through the usual e-Stat workflow: search for tables,
//! inspect the chosen table's metadata, then pull the data.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Guides a search → meta info → data lookup for one topic.
pub struct FindStatisticsPrompt;

impl PromptDefinition for FindStatisticsPrompt {
    const NAME: &'static str = "find_statistics";
    const DESCRIPTION: &'static str =
        "Find official Japanese statistics on a topic using the e-Stat tools";

    fn template() -> &'static str {
        TEMPLATE
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            PromptArgument {
                name: "topic".to_string(),
                title: None,
                description: Some(
                    "What to look for, e.g. \"人口\" or \"東京 AND 世帯\"".to_string(),
                ),
                required: Some(true),
            },
            PromptArgument {
                name: "survey_years".to_string(),
                title: None,
                description: Some(
                    "Survey period as yyyy, yyyymm or yyyymm-yyyymm".to_string(),
                ),
                required: Some(false),
            },
        ]
    }
}

const TEMPLATE: &str = "I need official Japanese government statistics about: {{topic}}.
{{#if survey_years}}Limit the search to the survey period {{survey_years}}.{{else}}Any survey period is fine; prefer the most recent.{{/if}}

Use the e-Stat tools in this order:
1. Call `search_e_stat_tables` with search_word \"{{topic}}\"{{#if survey_years}} and surveyYears \"{{survey_years}}\"{{/if}}. \
If nothing fits, try `get_e_stat_data_catalog` with the same arguments for downloadable files.
2. Pick the most relevant statistics table and call `get_e_stat_meta_info` with its stats_data_id to learn the classification and area codes.
3. Call `get_specific_e_stat_data` with that stats_data_id. Page with startPosition and limit when the table is large.

If a tool returns an error payload, report its status and stop rather than guessing values.
Summarize the figures you find and name the source table.";
