use serde::{Deserialize, Serialize};

/// Recipes the user liked during this session, oldest first.
///
/// Append-only: duplicates are kept and nothing is evicted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceStore {
    recipes: Vec<String>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, recipe: impl Into<String>) {
        self.recipes.push(recipe.into());
    }

    pub fn all(&self) -> &[String] {
        &self.recipes
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }
}
