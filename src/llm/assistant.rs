use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::food::api::NutritionSource;
use crate::llm::meal_plan::{build_meal_plan_prompt, MealPlanRequest};
use crate::providers::chat::{ChatMessage, ChatReply, FunctionCall, FunctionSpec};
use crate::providers::traits::CompletionProvider;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("Unknown function requested: {0}")]
    Unknown(String),
    #[error("Invalid arguments for {name}: {source}")]
    Arguments {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The closed set of operations the completion service may ask us to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    NutritionLookup,
    GenerateMealPlan,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::NutritionLookup, Capability::GenerateMealPlan];

    pub fn name(&self) -> &'static str {
        match self {
            Capability::NutritionLookup => "get_nutritional_info",
            Capability::GenerateMealPlan => "generate_meal_plan",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CapabilityError> {
        Self::ALL
            .into_iter()
            .find(|capability| capability.name() == name)
            .ok_or_else(|| CapabilityError::Unknown(name.to_string()))
    }

    pub fn spec(&self) -> FunctionSpec {
        match self {
            Capability::NutritionLookup => FunctionSpec {
                name: self.name().to_string(),
                description: "Get nutritional information for a specified food item".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "food_item": {"type": "string", "description": "The name of the food item"}
                    },
                    "required": ["food_item"]
                }),
            },
            Capability::GenerateMealPlan => FunctionSpec {
                name: self.name().to_string(),
                description: "Generate a personalized meal plan".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "name": {"type": "string", "description": "The user's name"},
                        "health_goal": {"type": "string", "description": "The user's health goal"},
                        "dietary_preferences": {"type": "string", "description": "The user's dietary preferences"},
                        "meals_per_day": {"type": "integer", "description": "The number of meals per day"}
                    },
                    "required": ["name", "health_goal", "dietary_preferences", "meals_per_day"]
                }),
            },
        }
    }

    pub fn specs() -> Vec<FunctionSpec> {
        Self::ALL.iter().map(Capability::spec).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NutritionArgs {
    pub food_item: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MealPlanArgs {
    pub name: String,
    pub health_goal: String,
    pub dietary_preferences: String,
    // Declared as an integer, but models sometimes send "3".
    pub meals_per_day: Value,
}

impl From<MealPlanArgs> for MealPlanRequest {
    fn from(args: MealPlanArgs) -> Self {
        let meals_per_day = match args.meals_per_day {
            Value::String(s) => s,
            other => other.to_string(),
        };
        MealPlanRequest {
            name: args.name,
            health_goal: args.health_goal,
            dietary_preferences: args.dietary_preferences,
            meals_per_day,
        }
    }
}

/// A validated function call, ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    NutritionLookup(NutritionArgs),
    GenerateMealPlan(MealPlanArgs),
}

impl Invocation {
    pub fn parse(call: &FunctionCall) -> Result<Self, CapabilityError> {
        let capability = Capability::from_name(&call.name)?;
        let arguments = if call.arguments.trim().is_empty() {
            "{}"
        } else {
            call.arguments.as_str()
        };
        let bad_args = |source| CapabilityError::Arguments {
            name: call.name.clone(),
            source,
        };

        match capability {
            Capability::NutritionLookup => serde_json::from_str(arguments)
                .map(Invocation::NutritionLookup)
                .map_err(bad_args),
            Capability::GenerateMealPlan => serde_json::from_str(arguments)
                .map(Invocation::GenerateMealPlan)
                .map_err(bad_args),
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            Invocation::NutritionLookup(_) => Capability::NutritionLookup,
            Invocation::GenerateMealPlan(_) => Capability::GenerateMealPlan,
        }
    }
}

/// Drives a chat with the completion service, executing at most one
/// function call on the model's behalf before asking for the final answer.
#[derive(Clone)]
pub struct Assistant {
    provider: Box<dyn CompletionProvider + Send + Sync>,
    nutrition: Arc<dyn NutritionSource>,
}

impl Assistant {
    pub fn new(
        provider: Box<dyn CompletionProvider + Send + Sync>,
        nutrition: Arc<dyn NutritionSource>,
    ) -> Self {
        Self { provider, nutrition }
    }

    pub async fn run_conversation(&self, mut messages: Vec<ChatMessage>) -> Result<String> {
        let call = match self.provider.chat(&messages, &Capability::specs()).await? {
            ChatReply::Text(text) => return Ok(text),
            ChatReply::FunctionCall(call) => call,
        };

        info!("Model requested function '{}'", call.name);
        let invocation = Invocation::parse(&call)?;
        let result = self.execute(invocation).await;
        debug!("Function '{}' returned {} bytes", call.name, result.len());

        let name = call.name.clone();
        messages.push(ChatMessage::assistant_function_call(call));
        messages.push(ChatMessage::function_result(name, result));

        match self.provider.chat(&messages, &[]).await? {
            ChatReply::Text(text) => Ok(text),
            ChatReply::FunctionCall(call) => Err(anyhow!(
                "Model requested '{}' again after receiving the function result",
                call.name
            )),
        }
    }

    /// Runs one invocation and returns its JSON-encoded result. Failures are
    /// reported inside the JSON so the model can still answer.
    pub async fn execute(&self, invocation: Invocation) -> String {
        match invocation {
            Invocation::NutritionLookup(args) => {
                self.nutrition.lookup(&args.food_item).await.to_json()
            }
            Invocation::GenerateMealPlan(args) => {
                let prompt = build_meal_plan_prompt(&args.into(), &[]);
                match self.provider.complete(&prompt).await {
                    Ok(text) => json!({ "meal_plan": text }).to_string(),
                    Err(e) => {
                        warn!("Meal plan function failed: {}", e);
                        json!({ "error": format!("Could not generate meal plan: {}", e) }).to_string()
                    }
                }
            }
        }
    }
}
