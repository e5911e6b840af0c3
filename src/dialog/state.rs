use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DialogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    Start,
    GetAction,
    ProvideNutritionInfo,
    GetName,
    GetHealthGoal,
    GetDietaryPreferences,
    GetMealsPerDay,
    ProvideMealPlan,
    SuggestRecipe,
    StoreRecipe,
}

/// What a state moves to once its input is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    To(DialogState),
    /// Decided by the [`Action`] the user picked.
    ByAction,
    /// Stays put; the state can be rendered again.
    Terminal,
}

impl DialogState {
    pub const ALL: [DialogState; 10] = [
        DialogState::Start,
        DialogState::GetAction,
        DialogState::ProvideNutritionInfo,
        DialogState::GetName,
        DialogState::GetHealthGoal,
        DialogState::GetDietaryPreferences,
        DialogState::GetMealsPerDay,
        DialogState::ProvideMealPlan,
        DialogState::SuggestRecipe,
        DialogState::StoreRecipe,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DialogState::Start => "start",
            DialogState::GetAction => "get_action",
            DialogState::ProvideNutritionInfo => "provide_nutrition_info",
            DialogState::GetName => "get_name",
            DialogState::GetHealthGoal => "get_health_goal",
            DialogState::GetDietaryPreferences => "get_dietary_preferences",
            DialogState::GetMealsPerDay => "get_meals_per_day",
            DialogState::ProvideMealPlan => "provide_meal_plan",
            DialogState::SuggestRecipe => "suggest_recipe",
            DialogState::StoreRecipe => "store_recipe",
        }
    }

    pub fn transition(&self) -> Transition {
        match self {
            DialogState::Start => Transition::To(DialogState::GetAction),
            DialogState::GetAction => Transition::ByAction,
            DialogState::ProvideNutritionInfo => Transition::Terminal,
            DialogState::GetName => Transition::To(DialogState::GetHealthGoal),
            DialogState::GetHealthGoal => Transition::To(DialogState::GetDietaryPreferences),
            DialogState::GetDietaryPreferences => Transition::To(DialogState::GetMealsPerDay),
            DialogState::GetMealsPerDay => Transition::To(DialogState::ProvideMealPlan),
            DialogState::ProvideMealPlan => Transition::Terminal,
            DialogState::SuggestRecipe => Transition::To(DialogState::StoreRecipe),
            DialogState::StoreRecipe => Transition::To(DialogState::Start),
        }
    }

    /// Successor after an accepted input; `None` for terminal states.
    pub fn successor(&self, action: Option<Action>) -> Option<DialogState> {
        match self.transition() {
            Transition::To(next) => Some(next),
            Transition::ByAction => action.map(Action::entry_state),
            Transition::Terminal => None,
        }
    }
}

impl fmt::Display for DialogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DialogState {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.name() == s)
            .ok_or_else(|| DialogError::UnknownState(s.to_string()))
    }
}

/// Main-menu choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Nutrition,
    MealPlan,
    Recipe,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Nutrition, Action::MealPlan, Action::Recipe];

    pub fn keyword(&self) -> &'static str {
        match self {
            Action::Nutrition => "nutrition",
            Action::MealPlan => "meal plan",
            Action::Recipe => "recipe",
        }
    }

    /// Case-insensitive exact keyword match.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_lowercase();
        Self::ALL.into_iter().find(|action| action.keyword() == input)
    }

    pub fn entry_state(self) -> DialogState {
        match self {
            Action::Nutrition => DialogState::ProvideNutritionInfo,
            Action::MealPlan => DialogState::GetName,
            Action::Recipe => DialogState::SuggestRecipe,
        }
    }
}
