use std::sync::Arc;

use anyhow::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::food::analysis::nutrition::{NutritionRecord, NutritionTotals};
use crate::food::api::NutritionSource;
use crate::llm::assistant::{Assistant, DEFAULT_SYSTEM_PROMPT};
use crate::providers::chat::ChatMessage;

const FOOD_KEYS: [&str; 4] = ["food", "item", "name", "dish"];

/// The user attributes a meal plan is generated from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanRequest {
    pub name: String,
    pub health_goal: String,
    pub dietary_preferences: String,
    pub meals_per_day: String,
}

/// One meal recovered from generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealItem {
    pub meal: String,
    pub food: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub item: MealItem,
    pub nutrition: NutritionRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub text: String,
    pub meals: Vec<PlannedMeal>,
    pub totals: NutritionTotals,
}

impl MealPlan {
    /// Extracts the meals from `text` and looks each one up in turn. Failed
    /// lookups stay on the plan but do not count towards the totals.
    pub async fn assemble(text: String, nutrition: &dyn NutritionSource) -> Self {
        let items = extract_food_items(&text);
        info!("Meal plan contains {} food items", items.len());

        let mut meals = Vec::with_capacity(items.len());
        for item in items {
            let record = nutrition.lookup(&item.food).await;
            meals.push(PlannedMeal {
                item,
                nutrition: record,
            });
        }

        let totals = NutritionTotals::from_records(meals.iter().map(|m| &m.nutrition));
        Self { text, meals, totals }
    }

    /// Human-readable plan: one line per meal, or the raw text when nothing
    /// could be extracted.
    pub fn render(&self) -> String {
        if self.meals.is_empty() {
            return self.text.trim().to_string();
        }

        self.meals
            .iter()
            .map(|planned| match planned.nutrition.facts() {
                Some(facts) => format!(
                    "• {}: {} ({:.0} kcal)",
                    planned.item.meal, planned.item.food, facts.calories
                ),
                None => format!("• {}: {} (no nutrition data)", planned.item.meal, planned.item.food),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn build_meal_plan_prompt(request: &MealPlanRequest, liked_recipes: &[String]) -> String {
    let mut prompt = format!(
        "Generate a personalized meal plan for {} with the following details: \
         health goal - {}, dietary preferences - {}, meals per day - {}. \
         Please return the meal plan in JSON format: a single object whose keys are \
         the meal names and whose values are one food item each, for example \
         {{\"Breakfast\": \"Oatmeal with fruits\", \"Lunch\": \"Grilled chicken salad\"}}.",
        request.name, request.health_goal, request.dietary_preferences, request.meals_per_day
    );

    if !liked_recipes.is_empty() {
        prompt.push_str("\n\nThe user previously liked these recipes, favour similar dishes:\n");
        for recipe in liked_recipes {
            prompt.push_str(&format!("- {}\n", first_line(recipe)));
        }
    }

    prompt
}

fn first_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

#[derive(Clone)]
pub struct MealPlanGenerator {
    assistant: Arc<Assistant>,
}

impl MealPlanGenerator {
    pub fn new(assistant: Arc<Assistant>) -> Self {
        Self { assistant }
    }

    pub async fn generate(&self, request: &MealPlanRequest, liked_recipes: &[String]) -> Result<String> {
        debug!(
            "Generating meal plan ({} meals, {} liked recipes)",
            request.meals_per_day,
            liked_recipes.len()
        );
        let messages = vec![
            ChatMessage::system(DEFAULT_SYSTEM_PROMPT),
            ChatMessage::user(build_meal_plan_prompt(request, liked_recipes)),
        ];
        self.assistant.run_conversation(messages).await
    }
}

/// Pulls discrete food items out of generated meal plan text.
///
/// A JSON object (optionally inside a code fence or surrounded by prose) is
/// preferred, and once one parses it is the only source of items. Otherwise
/// each `<meal>: <food>` line counts as one item, see [`parse_meal_line`].
pub fn extract_food_items(text: &str) -> Vec<MealItem> {
    match extract_from_json(text) {
        Some(items) => items,
        None => text.lines().filter_map(parse_meal_line).collect(),
    }
}

fn extract_from_json(text: &str) -> Option<Vec<MealItem>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }

    let value: Value = serde_json::from_str(&text[start..=end]).ok()?;
    let object = value.as_object()?;

    // A single wrapper key such as {"meal_plan": {...}} is unwrapped, unless
    // the inner object is itself one meal.
    if object.len() == 1 {
        if let Some(inner) = object.values().next().and_then(Value::as_object) {
            let describes_one_meal = FOOD_KEYS.iter().any(|key| inner.contains_key(*key));
            if !describes_one_meal {
                return Some(items_from_object(inner));
            }
        }
    }

    Some(items_from_object(object))
}

fn items_from_object(object: &serde_json::Map<String, Value>) -> Vec<MealItem> {
    let mut items = Vec::new();
    for (meal, value) in object {
        let foods: Vec<&str> = match value {
            Value::String(food) => vec![food.as_str()],
            Value::Array(values) => values.iter().filter_map(Value::as_str).collect(),
            Value::Object(fields) => FOOD_KEYS
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str))
                .into_iter()
                .collect(),
            _ => Vec::new(),
        };

        for food in foods {
            let food = food.trim();
            if !food.is_empty() {
                items.push(MealItem {
                    meal: meal.trim().to_string(),
                    food: food.to_string(),
                });
            }
        }
    }
    items
}

/// Heuristic for prose plans. A line yields an item when, after removing a
/// leading bullet (`-`, `*`, `•`), list number (`1.`, `2)`) and markdown
/// emphasis, it reads `<meal>: <food>`. The food is cut at the first ` - `
/// or `(` so descriptions and portions are dropped.
pub fn parse_meal_line(line: &str) -> Option<MealItem> {
    let line = strip_list_marker(line.trim());
    let (meal, food) = line.split_once(':')?;

    let meal = meal.trim().trim_matches(|c: char| c == '*' || c == '#' || c == '_').trim();
    let mut food = food.trim_start_matches(|c: char| c == '*' || c == '_');
    if let Some(idx) = food.find(" - ") {
        food = &food[..idx];
    }
    if let Some(idx) = food.find('(') {
        food = &food[..idx];
    }
    let food = food.trim().trim_end_matches(|c: char| c == '.' || c == '*' || c == '_').trim();

    if meal.is_empty() || food.is_empty() {
        return None;
    }

    Some(MealItem {
        meal: meal.to_string(),
        food: food.to_string(),
    })
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim_start_matches(|c: char| c == '-' || c == '*' || c == '•').trim_start();

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim_start();
        }
    }
    line
}
