//! Reply templates for the dialog.

pub const WELCOME: &str = "Welcome to the AI Nutritionist! I can help you with the following:\n\
1. Find the nutritional content of a dish\n\
2. Create a personalized meal plan\n\
3. Suggest a recipe from the ingredients you have\n\n\
Please type 'nutrition', 'meal plan' or 'recipe'.";

pub const ACTION_RETRY: &str =
    "I didn't catch that. Please type 'nutrition' for nutritional content, 'meal plan' for a personalized meal plan or 'recipe' for recipe ideas.";

pub const ASK_DISH: &str =
    "Please tell me the name and portion size of the dish you want to find the nutritional content for (e.g., 2 cups of rice).";
pub const ASK_NAME: &str = "Let's get started with your personalized meal plan. What is your name?";
pub const ASK_INGREDIENTS: &str =
    "Which ingredients do you have? List them separated by commas (e.g., chicken, rice, broccoli).";

pub const DISH_RETRY: &str = "I didn't catch the dish. Please tell me the name and portion size of the dish.";
pub const NUTRITION_FAILED: &str = "I couldn't fetch the nutritional information. Please try again.";
pub const NUTRITION_FOLLOW_UP: &str = "Ask me about another dish, or type 'restart' for the main menu.";

pub const ASK_HEALTH_GOAL: &str = "What is your main health goal? (e.g., lose weight, build muscle, maintain health)";
pub const ASK_DIETARY_PREFERENCES: &str =
    "Great! Do you have any dietary preferences or restrictions? (e.g., vegan, vegetarian, no dairy, none)";
pub const ASK_MEALS_PER_DAY: &str = "Got it. How many meals would you like to have in a day? (e.g., 3, 4, 5)";

pub const NAME_RETRY: &str = "I didn't catch that. Could you please tell me your name?";
pub const HEALTH_GOAL_RETRY: &str =
    "I didn't catch that. Could you please tell me your health goal? (e.g., lose weight, build muscle, maintain health)";
pub const DIETARY_PREFERENCES_RETRY: &str =
    "I didn't catch that. Do you have any dietary preferences or restrictions? (e.g., vegan, vegetarian, no dairy, none)";
pub const MEALS_PER_DAY_RETRY: &str =
    "I didn't catch that. How many meals would you like to have in a day? (a number from 1 to 10)";

pub const MEAL_PLAN_INTRO: &str = "Thank you! Based on the information provided, here is your personalized meal plan.";
pub const MEAL_PLAN_FAILED: &str = "I couldn't generate the meal plan. Please try again.";
pub const MEAL_PLAN_MISSING: &str = "I don't have a meal plan for you yet. Type 'restart' to create one.";
pub const MEAL_PLAN_FOLLOW_UP: &str = "Type 'restart' to go back to the main menu.";

pub const RECIPE_FAILED: &str = "I couldn't come up with a recipe right now. Please try again.";
pub const RECIPE_SAVE_QUESTION: &str = "Would you like to save this recipe to your favorites? (yes/no)";
pub const RECIPE_SAVED: &str =
    "Saved! I'll keep this recipe in mind for your future meal plans. Send any message to see the menu again.";
pub const RECIPE_DISCARDED: &str = "No problem, I won't save it. Send any message to see the menu again.";

pub const UNEXPECTED_STATE: &str = "Unexpected state.";
