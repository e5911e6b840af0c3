use std::sync::Arc;

use log::{info, warn};

use super::messages;
use super::session::Session;
use super::state::{Action, DialogState};
use super::validation::{
    validate_dietary_preferences, validate_health_goal, validate_meals_per_day, validate_name,
};
use crate::config::DialogConfig;
use crate::food::analysis::nutrition::{FoodQuery, NutritionRecord};
use crate::food::api::NutritionSource;
use crate::llm::assistant::Assistant;
use crate::llm::meal_plan::{MealPlan, MealPlanGenerator, MealPlanRequest};
use crate::llm::recipes::RecipeSuggester;
use crate::providers::chat::Role;
use crate::providers::traits::CompletionProvider;

/// Result of one dialog step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub reply: String,
    /// Where the dialog goes next. Rejected turns repeat the current state;
    /// accepted turns out of a terminal state carry `None`.
    pub next_state: Option<DialogState>,
    pub accepted: bool,
}

impl Turn {
    fn accept(reply: impl Into<String>, next_state: Option<DialogState>) -> Self {
        Self {
            reply: reply.into(),
            next_state,
            accepted: true,
        }
    }

    fn retry(reply: impl Into<String>, state: DialogState) -> Self {
        Self {
            reply: reply.into(),
            next_state: Some(state),
            accepted: false,
        }
    }

    fn unexpected() -> Self {
        Self {
            reply: messages::UNEXPECTED_STATE.to_string(),
            next_state: None,
            accepted: false,
        }
    }
}

pub struct DialogEngine {
    nutrition: Arc<dyn NutritionSource>,
    meal_plans: MealPlanGenerator,
    recipes: RecipeSuggester,
    config: DialogConfig,
}

impl DialogEngine {
    pub fn new(
        provider: Box<dyn CompletionProvider + Send + Sync>,
        nutrition: Arc<dyn NutritionSource>,
        config: DialogConfig,
    ) -> Self {
        let assistant = Arc::new(Assistant::new(provider, nutrition.clone()));
        Self {
            nutrition,
            meal_plans: MealPlanGenerator::new(assistant.clone()),
            recipes: RecipeSuggester::new(assistant),
            config,
        }
    }

    /// Processes one user utterance end to end: records it, advances the
    /// dialog, records the reply and moves the session to its next state.
    pub async fn handle_turn(&self, session: &mut Session, input: &str) -> Turn {
        session.record(Role::User, input);
        let turn = self.advance(session, input).await;
        session.record(Role::Assistant, turn.reply.clone());

        if turn.accepted {
            if let Some(next) = turn.next_state {
                session.state = next;
            }
        }
        turn
    }

    /// Like [`advance`](Self::advance) for a state given by name. Unknown
    /// names leave the session untouched.
    pub async fn advance_named(&self, session: &mut Session, state: &str, input: &str) -> Turn {
        match state.parse::<DialogState>() {
            Ok(state) => {
                session.state = state;
                self.advance(session, input).await
            }
            Err(e) => {
                warn!("{}", e);
                Turn::unexpected()
            }
        }
    }

    /// Computes the reply and successor for `session.state` without moving
    /// the session; per-state fields are stored as they are collected.
    pub async fn advance(&self, session: &mut Session, input: &str) -> Turn {
        let state = session.state;
        info!("Handling dialog for state: {} ({} chars of input)", state, input.len());
        let mode = self.config.validation;

        match state {
            DialogState::Start => Turn::accept(messages::WELCOME, state.successor(None)),
            DialogState::GetAction => match Action::parse(input) {
                Some(action) => {
                    session.action = Some(action);
                    let reply = match action {
                        Action::Nutrition => messages::ASK_DISH,
                        Action::MealPlan => messages::ASK_NAME,
                        Action::Recipe => messages::ASK_INGREDIENTS,
                    };
                    Turn::accept(reply, state.successor(Some(action)))
                }
                None => Turn::retry(messages::ACTION_RETRY, state),
            },
            DialogState::ProvideNutritionInfo => self.provide_nutrition_info(session, input).await,
            DialogState::GetName => match validate_name(input, mode) {
                Some(name) => {
                    let reply = format!("Hi {}! {}", name, messages::ASK_HEALTH_GOAL);
                    session.profile.name = name;
                    Turn::accept(reply, state.successor(None))
                }
                None => Turn::retry(messages::NAME_RETRY, state),
            },
            DialogState::GetHealthGoal => match validate_health_goal(input, mode) {
                Some(goal) => {
                    session.profile.health_goal = goal;
                    Turn::accept(messages::ASK_DIETARY_PREFERENCES, state.successor(None))
                }
                None => Turn::retry(messages::HEALTH_GOAL_RETRY, state),
            },
            DialogState::GetDietaryPreferences => match validate_dietary_preferences(input, mode) {
                Some(preferences) => {
                    session.profile.dietary_preferences = preferences;
                    Turn::accept(messages::ASK_MEALS_PER_DAY, state.successor(None))
                }
                None => Turn::retry(messages::DIETARY_PREFERENCES_RETRY, state),
            },
            DialogState::GetMealsPerDay => match validate_meals_per_day(input, mode) {
                Some(count) => {
                    session.profile.meals_per_day = count;
                    self.create_meal_plan(session).await
                }
                None => Turn::retry(messages::MEALS_PER_DAY_RETRY, state),
            },
            DialogState::ProvideMealPlan => match &session.meal_plan {
                Some(plan) => Turn::accept(
                    meal_plan_summary(&session.profile, plan),
                    state.successor(None),
                ),
                None => Turn::retry(messages::MEAL_PLAN_MISSING, state),
            },
            DialogState::SuggestRecipe => self.suggest_recipe(session, input).await,
            DialogState::StoreRecipe => {
                let suggestion = session.suggested_recipes.take();
                let reply = match suggestion {
                    Some(recipe) if input.trim().eq_ignore_ascii_case("yes") => {
                        session.liked_recipes.add(recipe);
                        info!("Stored liked recipe ({} total)", session.liked_recipes.len());
                        messages::RECIPE_SAVED
                    }
                    _ => messages::RECIPE_DISCARDED,
                };
                Turn::accept(reply, state.successor(None))
            }
        }
    }

    async fn provide_nutrition_info(&self, session: &mut Session, input: &str) -> Turn {
        let state = DialogState::ProvideNutritionInfo;
        let query = FoodQuery::parse(input);
        if query.food.is_empty() {
            return Turn::retry(messages::DISH_RETRY, state);
        }

        match self.nutrition.lookup(&query.food).await {
            NutritionRecord::Facts(facts) => {
                let reply = format!(
                    "Nutritional Information for {} ({}):\n{}\n\n{}",
                    query.food,
                    query.portion,
                    facts,
                    messages::NUTRITION_FOLLOW_UP
                );
                session.food_item = Some(query.food);
                session.portion_size = Some(query.portion);
                session.nutrition_info = Some(facts);
                Turn::accept(reply, state.successor(None))
            }
            NutritionRecord::Error { error } => {
                warn!("Nutrition lookup failed: {}", error);
                Turn::retry(messages::NUTRITION_FAILED, state)
            }
        }
    }

    async fn create_meal_plan(&self, session: &mut Session) -> Turn {
        let state = DialogState::GetMealsPerDay;
        let text = match self
            .meal_plans
            .generate(&session.profile, session.liked_recipes.all())
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Meal plan generation failed: {}", e);
                return Turn::retry(messages::MEAL_PLAN_FAILED, state);
            }
        };

        let plan = MealPlan::assemble(text, self.nutrition.as_ref()).await;
        let summary = meal_plan_summary(&session.profile, &plan);
        session.meal_plan = Some(plan);

        Turn::accept(
            format!("{}\n\n{}", messages::MEAL_PLAN_INTRO, summary),
            state.successor(None),
        )
    }

    async fn suggest_recipe(&self, session: &mut Session, input: &str) -> Turn {
        let state = DialogState::SuggestRecipe;
        session.ingredients = Some(input.trim().to_string());

        match self.recipes.suggest(input).await {
            Ok(recipe) => {
                let reply = format!("{}\n\n{}", recipe.trim(), messages::RECIPE_SAVE_QUESTION);
                session.suggested_recipes = Some(recipe);
                Turn::accept(reply, state.successor(None))
            }
            Err(e) => {
                warn!("Recipe suggestion failed: {}", e);
                Turn::retry(messages::RECIPE_FAILED, state)
            }
        }
    }
}

/// Final summary built only from the collected profile and the assembled plan.
fn meal_plan_summary(profile: &MealPlanRequest, plan: &MealPlan) -> String {
    format!(
        "Meal Plan for {}:\n- Goal: {}\n- Dietary Preferences: {}\n- Meals per Day: {}\n\n{}\n\nTotal Nutrition Information:\n{}\n\n{}",
        profile.name,
        profile.health_goal,
        profile.dietary_preferences,
        profile.meals_per_day,
        plan.render(),
        plan.totals,
        messages::MEAL_PLAN_FOLLOW_UP
    )
}
