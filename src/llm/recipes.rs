use std::sync::Arc;

use anyhow::Result;
use log::debug;

use crate::llm::assistant::{Assistant, DEFAULT_SYSTEM_PROMPT};
use crate::providers::chat::ChatMessage;

/// Splits comma-separated ingredient text, dropping blanks.
pub fn parse_ingredients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn build_recipe_prompt(ingredients: &str) -> String {
    let parsed = parse_ingredients(ingredients);
    let list = if parsed.is_empty() {
        ingredients.trim().to_string()
    } else {
        parsed.join(", ")
    };

    format!(
        "Suggest a recipe I can cook with the following ingredients: {}. \
         Start with the recipe title on its own line, then list the ingredients \
         with amounts and give short step-by-step instructions.",
        list
    )
}

#[derive(Clone)]
pub struct RecipeSuggester {
    assistant: Arc<Assistant>,
}

impl RecipeSuggester {
    pub fn new(assistant: Arc<Assistant>) -> Self {
        Self { assistant }
    }

    pub async fn suggest(&self, ingredients: &str) -> Result<String> {
        debug!("Suggesting recipes for '{}'", ingredients);
        let messages = vec![
            ChatMessage::system(DEFAULT_SYSTEM_PROMPT),
            ChatMessage::user(build_recipe_prompt(ingredients)),
        ];
        self.assistant.run_conversation(messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredients() {
        assert_eq!(
            parse_ingredients(" chicken, rice ,, broccoli "),
            vec!["chicken", "rice", "broccoli"]
        );
    }

    #[test]
    fn test_prompt_lists_ingredients() {
        let prompt = build_recipe_prompt("eggs,spinach");
        assert!(prompt.contains("ingredients: eggs, spinach."));
    }
}
