pub mod assistant;
pub mod meal_plan;
pub mod recipes;

pub use assistant::{Assistant, Capability, CapabilityError, Invocation};
pub use meal_plan::{extract_food_items, MealItem, MealPlan, MealPlanGenerator, MealPlanRequest};
pub use recipes::RecipeSuggester;
