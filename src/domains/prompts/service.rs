//! Prompt service implementation.
//!
//! Prompts are defined in `definitions/` and registered via `registry.rs`.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;

/// Service for listing and rendering prompts.
pub struct PromptService {
    /// Registered prompts keyed by name.
    prompts: BTreeMap<String, PromptTemplate>,
}

impl PromptService {
    /// Create a new PromptService with all registered prompts.
    pub fn new() -> Self {
        info!("Initializing PromptService");

        let mut service = Self {
            prompts: BTreeMap::new(),
        };
        for template in get_all_prompts() {
            service.register_prompt(template);
        }
        service
    }

    /// Register a prompt template.
    pub fn register_prompt(&mut self, template: PromptTemplate) {
        info!("Registering prompt: {}", template.name);
        self.prompts.insert(template.name.clone(), template);
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .values()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Render a prompt with the given arguments.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self
            .prompts
            .get(name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let arguments = arguments.unwrap_or_default();
        if let Some(missing) = template.arguments.iter().find(|arg| {
            arg.required.unwrap_or(false)
                && arguments.get(&arg.name).is_none_or(|v| v.is_empty())
        }) {
            return Err(PromptError::missing_argument(&missing.name));
        }

        debug!(prompt = name, "Rendering prompt");
        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}
