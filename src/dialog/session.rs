use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::{Action, DialogState};
use crate::food::analysis::nutrition::NutritionFacts;
use crate::food::preferences::PreferenceStore;
use crate::llm::meal_plan::{MealPlan, MealPlanRequest};
use crate::providers::chat::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Everything the dialog remembers about one user. Only the engine mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub state: DialogState,
    pub action: Option<Action>,
    pub profile: MealPlanRequest,
    pub food_item: Option<String>,
    pub portion_size: Option<String>,
    pub nutrition_info: Option<NutritionFacts>,
    pub meal_plan: Option<MealPlan>,
    pub ingredients: Option<String>,
    pub suggested_recipes: Option<String>,
    pub liked_recipes: PreferenceStore,
    pub messages: Vec<ChatEntry>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: DialogState::Start,
            action: None,
            profile: MealPlanRequest::default(),
            food_item: None,
            portion_size: None,
            nutrition_info: None,
            meal_plan: None,
            ingredients: None,
            suggested_recipes: None,
            liked_recipes: PreferenceStore::new(),
            messages: Vec::new(),
        }
    }

    /// Back to the main menu. Liked recipes and the transcript survive.
    pub fn restart(&mut self) {
        let liked_recipes = std::mem::take(&mut self.liked_recipes);
        let messages = std::mem::take(&mut self.messages);
        *self = Self {
            id: self.id,
            liked_recipes,
            messages,
            ..Self::new()
        };
    }

    pub fn record(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatEntry {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_keeps_likes_and_history() {
        let mut session = Session::new();
        let id = session.id;
        session.state = DialogState::ProvideMealPlan;
        session.profile.name = "Ann".to_string();
        session.liked_recipes.add("Pancakes");
        session.record(Role::User, "hello");

        session.restart();

        assert_eq!(session.id, id);
        assert_eq!(session.state, DialogState::Start);
        assert!(session.profile.name.is_empty());
        assert_eq!(session.liked_recipes.len(), 1);
        assert_eq!(session.messages.len(), 1);
    }
}
