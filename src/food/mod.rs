pub mod analysis;
pub mod api;
pub mod config;
pub mod preferences;

pub use analysis::nutrition::{NutritionFacts, NutritionRecord, NutritionTotals};
pub use api::{NutritionSource, UsdaClient};
pub use config::FoodConfig;
pub use preferences::PreferenceStore;
