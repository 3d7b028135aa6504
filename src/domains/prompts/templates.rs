//! Prompt template rendering.
//!
//! Supported syntax:
//! - `{{variable}}` is replaced with the argument value, or nothing if unset
//! - `{{#if variable}}...{{/if}}` keeps its body only when the argument is non-empty
//! - `{{#if variable}}...{{else}}...{{/if}}` picks one branch
//!
//! Conditionals may nest.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template source.
    pub template: String,
}

struct Branch {
    parent_active: bool,
    condition: bool,
    in_else: bool,
}

impl Branch {
    fn active(&self) -> bool {
        self.parent_active && (self.condition != self.in_else)
    }
}

impl PromptTemplate {
    /// Render the template with the given arguments.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let mut output = String::with_capacity(self.template.len());
        let mut branches: Vec<Branch> = Vec::new();
        let mut rest = self.template.as_str();

        loop {
            let active = branches.last().is_none_or(Branch::active);

            let Some(open) = rest.find("{{") else {
                if active {
                    output.push_str(rest);
                }
                break;
            };
            if active {
                output.push_str(&rest[..open]);
            }

            let close = rest[open..]
                .find("}}")
                .map(|pos| open + pos)
                .ok_or_else(|| PromptError::template("Unclosed '{{' tag"))?;
            let tag = rest[open + 2..close].trim();
            rest = &rest[close + 2..];

            if let Some(variable) = tag.strip_prefix("#if ") {
                let condition = arguments
                    .get(variable.trim())
                    .is_some_and(|value| !value.is_empty());
                branches.push(Branch {
                    parent_active: active,
                    condition,
                    in_else: false,
                });
            } else if tag == "else" {
                branches
                    .last_mut()
                    .ok_or_else(|| PromptError::template("{{else}} outside of {{#if}}"))?
                    .in_else = true;
            } else if tag == "/if" {
                branches
                    .pop()
                    .ok_or_else(|| PromptError::template("{{/if}} without {{#if}}"))?;
            } else if active {
                if let Some(value) = arguments.get(tag) {
                    output.push_str(value);
                }
            }
        }

        if !branches.is_empty() {
            return Err(PromptError::template("Missing {{/if}} tag"));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(source: &str) -> PromptTemplate {
        PromptTemplate {
            name: "test".to_string(),
            description: None,
            arguments: vec![],
            template: source.to_string(),
        }
    }

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitution() {
        let rendered = template("統計: {{topic}}!")
            .render(&args(&[("topic", "人口")]))
            .unwrap();
        assert_eq!(rendered, "統計: 人口!");
    }

    #[test]
    fn test_unset_variable_renders_empty() {
        let rendered = template("[{{missing}}]").render(&args(&[])).unwrap();
        assert_eq!(rendered, "[]");
    }

    #[test]
    fn test_conditional_branches() {
        let t = template("{{#if year}}in {{year}}{{else}}any year{{/if}}.");
        assert_eq!(t.render(&args(&[("year", "2020")])).unwrap(), "in 2020.");
        assert_eq!(t.render(&args(&[])).unwrap(), "any year.");
        assert_eq!(t.render(&args(&[("year", "")])).unwrap(), "any year.");
    }

    #[test]
    fn test_nested_conditionals() {
        let t = template("{{#if a}}A{{#if b}}B{{else}}-{{/if}}{{/if}}");
        assert_eq!(t.render(&args(&[("a", "1"), ("b", "1")])).unwrap(), "AB");
        assert_eq!(t.render(&args(&[("a", "1")])).unwrap(), "A-");
        assert_eq!(t.render(&args(&[("b", "1")])).unwrap(), "");
    }

    #[test]
    fn test_malformed_templates() {
        assert!(template("{{#if a}}open").render(&args(&[])).is_err());
        assert!(template("close{{/if}}").render(&args(&[])).is_err());
        assert!(template("{{broken").render(&args(&[])).is_err());
    }
}
